//! Sonic Remix widgets
//!
//! Custom iced widgets for the remix studio:
//!
//! - **Waveform**: bar-chart canvas with played/unplayed gradients, playhead,
//!   hover highlight and click-to-seek
//! - **Color**: accent color normalization, including theme-variable HSL
//! - **Theme**: YAML theme configuration and the resolved palette

pub mod color;
pub mod theme;
pub mod waveform;

pub use color::AccentColor;
pub use theme::{init_theme, load_theme, palette, theme, Palette, StemColors, ThemeConfig, ThemeVariables};
pub use waveform::{waveform, AnimationHandle, AnimationLoop, PixelGrid, WaveformLayout, WaveformState};
