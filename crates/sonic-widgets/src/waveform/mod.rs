//! Waveform display
//!
//! A bar-chart waveform drawn on an iced canvas:
//!
//! - [`layout`]: bar geometry, played/hovered classification and paint
//! - [`canvas`]: the canvas `Program` with hover, click-to-seek and glow
//! - [`animation`]: redraw loop bookkeeping while playback runs
//! - [`view`]: the `waveform` view function applications call
//!
//! ## Usage
//!
//! ```ignore
//! let master = waveform(
//!     WaveformState::new(&self.master, progress, is_playing),
//!     "hsl(var(--primary))",
//!     palette(),
//!     100.0,
//!     Some(Message::Seek),
//! );
//! ```

pub mod animation;
pub mod canvas;
pub mod layout;
pub mod view;

pub use animation::{AnimationHandle, AnimationLoop};
pub use canvas::{WaveformCanvas, WaveformInteraction};
pub use layout::{hover_fraction, seek_fraction, Bar, BarPaint, PixelGrid, WaveformLayout};
pub use view::waveform;

/// What one waveform shows for a frame
#[derive(Debug, Clone, Copy)]
pub struct WaveformState<'a> {
    /// Normalized samples in `[0, 1]`
    pub samples: &'a [f32],
    /// Played fraction in `[0, 1]`
    pub progress: f32,
    pub is_playing: bool,
    pub pixel_grid: PixelGrid,
}

impl<'a> WaveformState<'a> {
    pub fn new(samples: &'a [f32], progress: f32, is_playing: bool) -> Self {
        Self {
            samples,
            progress,
            is_playing,
            pixel_grid: PixelGrid::default(),
        }
    }

    pub fn with_pixel_ratio(mut self, ratio: f32) -> Self {
        self.pixel_grid = PixelGrid::new(ratio);
        self
    }
}
