//! Frame orchestration: split the view into horizontal bands, render them on
//! the pool, reassemble in order.

use std::sync::mpsc;
use std::sync::Arc;

use thiserror::Error;

use crate::camera::{Camera, CameraSpan};
use crate::pool::ThreadPool;
use crate::render::{self, TraceSettings};
use crate::scene::SceneQuery;
use crate::screen::{Screen, SwScreen};

/// Failure of a parallel render pass.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The requested band count cannot partition the screen.
    #[error("cannot split {height} pixel rows into {region_count} bands")]
    InvalidRegionCount {
        /// Requested number of bands.
        region_count: u32,
        /// Screen height in pixels.
        height: u32,
    },

    /// A band's render task died before delivering its pixels.
    #[error("render task for band {band} finished without delivering pixels")]
    BandLost {
        /// Index of the lost band, counted from the bottom of the frame.
        band: u32,
    },
}

/// Render a frame split into `region_count` horizontal bands on `pool`.
///
/// Each band task renders its slice of the camera span into a private
/// [`SwScreen`]; only after a band's task completes does the calling thread
/// copy its rows into `screen`, in band order, so no pixel ever has two
/// writers. Blocks until the whole frame is assembled.
///
/// Bands cover `height / region_count` rows each, with remainder rows going
/// to the last band. `region_count` must be between 1 and the screen height.
///
/// The scene is shared with the band tasks, which is why it arrives behind
/// an [`Arc`]; it must not be mutated until this call returns.
pub fn render_parallel<S, T>(
    scene: &Arc<S>,
    screen: &mut T,
    camera: &Camera,
    pool: &ThreadPool,
    region_count: u32,
    span: Option<CameraSpan>,
    settings: TraceSettings,
) -> Result<(), FrameError>
where
    S: SceneQuery + 'static,
    T: Screen + ?Sized,
{
    let screen_w = screen.width();
    let screen_h = screen.height();
    if region_count == 0 || region_count > screen_h {
        return Err(FrameError::InvalidRegionCount {
            region_count,
            height: screen_h,
        });
    }

    let span = span.unwrap_or_else(|| CameraSpan::aspect(screen_w, screen_h));
    let y_scale = span.top - span.bottom;
    let bands = band_rows(screen_h, region_count);

    let mut pending = Vec::with_capacity(bands.len());
    for &(row_start, row_count) in &bands {
        // The band sees the vertical slice of the span its rows project to.
        let band_span = CameraSpan {
            left: span.left,
            right: span.right,
            bottom: span.bottom + y_scale * row_start as f32 / screen_h as f32,
            top: span.bottom + y_scale * (row_start + row_count) as f32 / screen_h as f32,
        };

        let (sender, receiver) = mpsc::channel();
        let scene = Arc::clone(scene);
        let camera = *camera;
        pool.submit(move || {
            let mut band = SwScreen::new(screen_w, row_count);
            render::render(scene.as_ref(), &mut band, &camera, Some(band_span), settings);
            // The orchestrator may have bailed out on an earlier band; then
            // nobody is left to receive, which is fine.
            let _ = sender.send(band);
        });
        pending.push(receiver);
    }

    // Collect in band order. A private buffer is only read after its
    // producing task has sent it away.
    for (band, (receiver, &(row_start, row_count))) in pending.iter().zip(&bands).enumerate() {
        let band_screen = receiver
            .recv()
            .map_err(|_| FrameError::BandLost { band: band as u32 })?;

        for y in 0..row_count {
            for x in 0..screen_w {
                screen.put_pixel(x, row_start + y, band_screen.pixel(x, y));
            }
        }
    }

    Ok(())
}

/// Partition `height` rows into `region_count` bands of `(start, count)`.
fn band_rows(height: u32, region_count: u32) -> Vec<(u32, u32)> {
    let base = height / region_count;
    (0..region_count)
        .map(|region| {
            let start = region * base;
            let count = if region + 1 == region_count {
                height - start
            } else {
                base
            };
            (start, count)
        })
        .collect()
}
