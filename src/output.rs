//! PNG export of rendered frames.

use image::{ImageBuffer, Rgb};
use log::{info, warn};

use glint::screen::{Screen, SwScreen};

/// Write `screen` to `output_path` as an 8-bit PNG.
///
/// The screen's row 0 is the bottom of the camera frustum while image rows
/// run top-down, so rows are flipped on the way out. Channels are clamped to
/// [0, 1] and pushed through the sRGB transfer curve.
pub fn save_screen_as_png(screen: &SwScreen, output_path: &str) {
    let height = screen.height();
    let image: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(screen.width(), height, |x, y| {
            let color = screen.pixel(x, height - 1 - y);
            Rgb([
                encode_srgb(color.x),
                encode_srgb(color.y),
                encode_srgb(color.z),
            ])
        });

    match image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// sRGB transfer: linear segment for dark values, 1/2.4 power curve above.
fn encode_srgb(linear: f32) -> u8 {
    let linear = linear.clamp(0.0, 1.0);
    let gamma = if linear <= 0.0031308 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    };
    (gamma * 255.0) as u8
}
