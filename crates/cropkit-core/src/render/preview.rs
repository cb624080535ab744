//! Live preview of the crop result.

use crate::decode::SourceImage;
use crate::mask::CircleMask;
use crate::raster::Raster;
use crate::region::{CropRegion, CropShape};
use crate::transform::draw_region;
use crate::view::ViewTransform;

use super::raster_dimensions;

/// Slack allowed when checking that the mapped rectangle stays on the image.
const SOURCE_EPSILON: f64 = 1e-6;

/// Render the preview for `region` at its viewport size.
///
/// The region is inverse-mapped into source space through `view`. When the
/// mapped rectangle leaves the image the preview is fully transparent rather
/// than showing clamped or partial content. A degenerate region yields an
/// empty raster.
pub fn compute_preview(image: &SourceImage, region: &CropRegion, view: &ViewTransform) -> Raster {
    if region.is_empty() {
        return Raster::empty();
    }

    let (width, height) = raster_dimensions(region.size(), 1.0);
    let source_rect = view.rect_to_source(region.as_rect());
    if !source_rect.is_within(view.source(), SOURCE_EPSILON) {
        return Raster::transparent(width, height);
    }

    let mut preview = draw_region(image, source_rect, width, height, 0.0);
    if region.shape == CropShape::Circle {
        CircleMask::inscribed(width, height).apply(&mut preview);
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};

    fn solid(width: u32, height: u32) -> SourceImage {
        SourceImage::new(width, height, vec![200u8; (width * height * 4) as usize]).unwrap()
    }

    fn view(size: f64) -> ViewTransform {
        ViewTransform::new(Size::new(size, size), Size::new(size, size), 0.5, 3.0)
    }

    fn region(x0: f64, y0: f64, x1: f64, y1: f64, shape: CropShape) -> CropRegion {
        CropRegion::from_corners(Point::new(x0, y0), Point::new(x1, y1), shape)
    }

    #[test]
    fn test_preview_sized_to_region() {
        let image = solid(100, 100);
        let preview = compute_preview(&image, &region(10.0, 20.0, 70.0, 50.0, CropShape::Rect), &view(100.0));
        assert_eq!((preview.width, preview.height), (60, 30));
        assert_eq!(preview.pixel(30, 15), [200, 200, 200, 200]);
    }

    #[test]
    fn test_preview_blank_when_outside_image() {
        let image = solid(100, 100);
        let mut v = view(100.0);
        // Zoomed out, the image occupies only the middle of the viewport.
        v.set_zoom(0.5);
        let preview = compute_preview(&image, &region(0.0, 0.0, 40.0, 40.0, CropShape::Rect), &v);
        assert_eq!((preview.width, preview.height), (40, 40));
        assert!(preview.is_blank());
    }

    #[test]
    fn test_preview_shows_content_when_zoomed_in() {
        let image = solid(100, 100);
        let mut v = view(100.0);
        v.set_zoom(2.0);
        let preview = compute_preview(&image, &region(0.0, 0.0, 100.0, 100.0, CropShape::Rect), &v);
        assert!(!preview.is_blank());
    }

    #[test]
    fn test_circle_preview_masked() {
        let image = solid(100, 100);
        let preview = compute_preview(&image, &region(0.0, 0.0, 50.0, 50.0, CropShape::Circle), &view(100.0));
        assert_eq!(preview.pixel(0, 0)[3], 0);
        assert_ne!(preview.pixel(25, 25)[3], 0);
    }

    #[test]
    fn test_empty_region_gives_empty_preview() {
        let image = solid(10, 10);
        let preview = compute_preview(&image, &region(5.0, 5.0, 5.0, 8.0, CropShape::Rect), &view(10.0));
        assert!(preview.is_empty());
    }

    #[test]
    fn test_preview_is_idempotent() {
        let image = solid(64, 64);
        let r = region(3.5, 7.25, 41.0, 50.0, CropShape::Circle);
        assert_eq!(compute_preview(&image, &r, &view(64.0)), compute_preview(&image, &r, &view(64.0)));
    }
}
