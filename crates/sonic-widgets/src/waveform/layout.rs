//! Bar-chart layout for waveform rendering
//!
//! Pure geometry, no iced renderer involved: the canvas program asks
//! [`WaveformLayout::compute`] where each bar goes and how it is styled, then
//! paints the result. Keeping this separate lets the played/unplayed split and
//! the hover band be tested without a window.

use iced::{Rectangle, Size};

/// Fraction of the canvas height a full-scale sample occupies
pub const HEIGHT_FILL: f32 = 0.8;

/// Horizontal gap between bars in logical pixels
pub const BAR_GAP: f32 = 1.0;

/// Narrowest bar drawn, in logical pixels
pub const MIN_BAR_WIDTH: f32 = 1.0;

/// Bar corner radius
pub const BAR_RADIUS: f32 = 2.0;

/// Bars within this fraction of the pointer count as hovered
pub const HOVER_TOLERANCE: f32 = 0.02;

/// Playhead stroke width
pub const PLAYHEAD_WIDTH: f32 = 2.0;

/// Glow radius of played bars while playing
pub const PLAYED_GLOW: f32 = 8.0;

/// Glow radius of hovered bars
pub const HOVER_GLOW: f32 = 12.0;

/// Glow radius of the playhead
pub const PLAYHEAD_GLOW: f32 = 15.0;

/// Gradient stops `(offset, alpha)` from bar top to bar bottom
pub type GradientStops = [(f32, f32); 3];

/// One laid-out bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub index: usize,
    pub bounds: Rectangle,
    pub played: bool,
    pub hovered: bool,
}

impl Bar {
    /// Paint for this bar given the play state
    pub fn paint(&self, is_playing: bool) -> BarPaint {
        BarPaint {
            stops: if self.played { PLAYED_STOPS } else { UNPLAYED_STOPS },
            glow: if self.played && is_playing {
                PLAYED_GLOW
            } else if self.hovered {
                HOVER_GLOW
            } else {
                0.0
            },
        }
    }
}

/// Full accent fading to about half opacity at the bottom edge
const PLAYED_STOPS: GradientStops = [(0.0, 1.0), (0.5, 1.0), (1.0, 0x88 as f32 / 255.0)];

/// Dimmed accent, stronger at the top
const UNPLAYED_STOPS: GradientStops = [
    (0.0, 0x66 as f32 / 255.0),
    (0.5, 0x44 as f32 / 255.0),
    (1.0, 0x22 as f32 / 255.0),
];

/// How a bar is filled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarPaint {
    pub stops: GradientStops,
    /// Glow radius, 0 for none
    pub glow: f32,
}

/// Bars and playhead for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformLayout {
    pub bars: Vec<Bar>,
    /// Playhead x, only while `0 < progress < 1`
    pub playhead: Option<f32>,
}

impl WaveformLayout {
    /// Lay out `samples` across `size`
    ///
    /// `progress` is the played fraction and `hover` the pointer fraction, if
    /// the pointer is over the canvas.
    pub fn compute(samples: &[f32], size: Size, progress: f32, hover: Option<f32>) -> Self {
        let count = samples.len();
        let playhead = (progress > 0.0 && progress < 1.0).then(|| progress * size.width);

        if count == 0 || size.width <= 0.0 {
            return Self { bars: Vec::new(), playhead };
        }

        let slot = size.width / count as f32;
        let center_y = size.height / 2.0;
        let width = (slot - BAR_GAP).max(MIN_BAR_WIDTH);

        let bars = samples
            .iter()
            .enumerate()
            .map(|(index, &sample)| {
                let position = index as f32 / count as f32;
                let height = sample.clamp(0.0, 1.0) * size.height * HEIGHT_FILL;
                Bar {
                    index,
                    bounds: Rectangle {
                        x: index as f32 * slot + BAR_GAP / 2.0,
                        y: center_y - height / 2.0,
                        width,
                        height,
                    },
                    played: position < progress,
                    hovered: hover.is_some_and(|h| (position - h).abs() < HOVER_TOLERANCE),
                }
            })
            .collect();

        Self { bars, playhead }
    }

    pub fn played_count(&self) -> usize {
        self.bars.iter().filter(|b| b.played).count()
    }
}

/// Pointer position as a fraction of the canvas width
///
/// Not clamped, so a pointer just outside the edge still highlights the
/// nearest bars. `None` for a zero-width area.
pub fn hover_fraction(x: f32, left: f32, width: f32) -> Option<f32> {
    (width > 0.0).then(|| (x - left) / width)
}

/// Click position as a seek fraction in `[0, 1]`
pub fn seek_fraction(x: f32, left: f32, width: f32) -> Option<f32> {
    hover_fraction(x, left, width).map(|f| f.clamp(0.0, 1.0))
}

/// Logical-to-physical pixel mapping
///
/// Drawing stays in logical coordinates; edges are snapped to the physical
/// grid so thin bars stay crisp on high-density displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelGrid {
    pub ratio: f32,
}

impl PixelGrid {
    pub fn new(ratio: f32) -> Self {
        Self {
            ratio: if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 },
        }
    }

    /// Round a logical coordinate to the nearest physical pixel
    pub fn snap(&self, value: f32) -> f32 {
        (value * self.ratio).round() / self.ratio
    }

    /// Snap both edges of a rectangle, keeping it at least one physical pixel wide
    pub fn snap_rect(&self, rect: Rectangle) -> Rectangle {
        let left = self.snap(rect.x);
        let right = self.snap(rect.x + rect.width).max(left + 1.0 / self.ratio);
        let top = self.snap(rect.y);
        let bottom = self.snap(rect.y + rect.height).max(top);
        Rectangle {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }
}

impl Default for PixelGrid {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Size = Size { width: 100.0, height: 50.0 };

    #[test]
    fn test_half_progress_splits_ten_bars() {
        let layout = WaveformLayout::compute(&[0.5; 10], SIZE, 0.5, None);
        assert_eq!(layout.bars.len(), 10);
        for bar in &layout.bars {
            assert_eq!(bar.played, bar.index < 5, "bar {}", bar.index);
        }
        assert_eq!(layout.playhead, Some(50.0));
    }

    #[test]
    fn test_progress_edges() {
        let none = WaveformLayout::compute(&[0.5; 10], SIZE, 0.0, None);
        assert_eq!(none.played_count(), 0);
        assert_eq!(none.playhead, None);

        let all = WaveformLayout::compute(&[0.5; 10], SIZE, 1.0, None);
        assert_eq!(all.played_count(), 10);
        assert_eq!(all.playhead, None);

        let past = WaveformLayout::compute(&[0.5; 10], SIZE, 1.5, None);
        assert_eq!(past.played_count(), 10);
        assert_eq!(past.playhead, None);
    }

    #[test]
    fn test_bar_geometry() {
        let layout = WaveformLayout::compute(&[1.0, 0.5], SIZE, 0.0, None);
        let first = layout.bars[0].bounds;
        assert_eq!(first.x, 0.5);
        assert_eq!(first.width, 49.0);
        assert_eq!(first.height, 40.0);
        assert_eq!(first.y, 5.0);

        let second = layout.bars[1].bounds;
        assert_eq!(second.x, 50.5);
        assert_eq!(second.height, 20.0);
        assert_eq!(second.y + second.height / 2.0, 25.0);
    }

    #[test]
    fn test_dense_bars_keep_minimum_width() {
        let layout = WaveformLayout::compute(&[0.5; 400], SIZE, 0.0, None);
        assert!(layout.bars.iter().all(|b| b.bounds.width == MIN_BAR_WIDTH));
    }

    #[test]
    fn test_hover_band() {
        let layout = WaveformLayout::compute(&[0.5; 100], SIZE, 0.0, Some(0.505));
        let hovered: Vec<usize> = layout.bars.iter().filter(|b| b.hovered).map(|b| b.index).collect();
        assert_eq!(hovered, vec![49, 50, 51, 52]);
    }

    #[test]
    fn test_paint_and_glow() {
        let layout = WaveformLayout::compute(&[0.5; 10], SIZE, 0.5, Some(0.9));
        let played = layout.bars[0];
        let hovered = layout.bars[9];
        let plain = layout.bars[7];

        assert_eq!(played.paint(true).glow, PLAYED_GLOW);
        assert_eq!(played.paint(false).glow, 0.0);
        assert_eq!(hovered.paint(true).glow, HOVER_GLOW);
        assert_eq!(plain.paint(true).glow, 0.0);

        assert_eq!(played.paint(false).stops[0], (0.0, 1.0));
        let unplayed = plain.paint(false).stops;
        assert!((unplayed[0].1 - 0.4).abs() < 1e-6);
        assert!((unplayed[2].1 - 0.133).abs() < 1e-3);
    }

    #[test]
    fn test_empty_input() {
        let layout = WaveformLayout::compute(&[], SIZE, 0.25, None);
        assert!(layout.bars.is_empty());
        assert_eq!(layout.playhead, Some(25.0));
    }

    #[test]
    fn test_pointer_fractions() {
        assert_eq!(hover_fraction(60.0, 10.0, 100.0), Some(0.5));
        assert_eq!(hover_fraction(5.0, 10.0, 0.0), None);
        assert_eq!(seek_fraction(-20.0, 10.0, 100.0), Some(0.0));
        assert_eq!(seek_fraction(500.0, 10.0, 100.0), Some(1.0));
    }

    #[test]
    fn test_pixel_grid() {
        let grid = PixelGrid::new(2.0);
        assert_eq!(grid.snap(0.3), 0.5);
        let rect = grid.snap_rect(Rectangle { x: 0.1, y: 1.2, width: 0.1, height: 3.0 });
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.width, 0.5);
        assert_eq!(PixelGrid::new(0.0).ratio, 1.0);
    }
}
