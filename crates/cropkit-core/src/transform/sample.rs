//! Pixel sampling from a source image.
//!
//! Sample positions are in source pixel-centre coordinates: `(0, 0)` is the
//! centre of the top-left pixel. Positions whose pixel footprint falls
//! outside the image return transparent black rather than clamped edge
//! pixels.

use crate::decode::SourceImage;

#[inline]
fn outside(image: &SourceImage, x: f64, y: f64) -> bool {
    let (w, h) = (image.width as f64, image.height as f64);
    !(x >= -0.5 && y >= -0.5 && x < w - 0.5 && y < h - 0.5)
}

/// Sample the pixel whose footprint contains the position.
pub fn sample_nearest(image: &SourceImage, x: f64, y: f64) -> [u8; 4] {
    if outside(image, x, y) {
        return [0, 0, 0, 0];
    }
    let px = (x + 0.5).floor().clamp(0.0, (image.width - 1) as f64) as u32;
    let py = (y + 0.5).floor().clamp(0.0, (image.height - 1) as f64) as u32;
    image.pixel(px, py)
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixels and weights
/// their contribution based on distance. Within half a pixel of the border
/// the edge pixels are repeated.
pub fn sample_bilinear(image: &SourceImage, x: f64, y: f64) -> [u8; 4] {
    if outside(image, x, y) {
        return [0, 0, 0, 0];
    }

    let max_x = (image.width - 1) as f64;
    let max_y = (image.height - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}
