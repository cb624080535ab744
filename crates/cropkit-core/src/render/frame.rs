//! The source image as it appears in the viewport.

use crate::decode::SourceImage;
use crate::geometry::Point;
use crate::raster::Raster;
use crate::transform::sample_nearest;
use crate::view::ViewTransform;

use super::raster_dimensions;

/// Draw the source image into a viewport-sized raster through `view`.
///
/// Viewport pixels not covered by the image (zoomed out, or letterboxed in a
/// larger viewport) are transparent.
pub fn render_frame(image: &SourceImage, view: &ViewTransform) -> Raster {
    let (width, height) = raster_dimensions(view.viewport(), 1.0);
    let mut frame = Raster::transparent(width, height);

    for y in 0..height {
        for x in 0..width {
            let src = view.to_source(Point::new(x as f64 + 0.5, y as f64 + 0.5));
            frame.set_pixel(x, y, sample_nearest(image, src.x - 0.5, src.y - 0.5));
        }
    }

    frame
}
