//! Studio settings persisted in `config.yaml`

use serde::{Deserialize, Serialize};

use crate::catalog::find_style;
use crate::transform::RemixSettings;
use crate::waveform::DEFAULT_WAVEFORM_LEN;

/// Top-level studio configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub remix: RemixDefaults,
    pub timing: TimingConfig,
    pub display: DisplayConfig,
}

/// Initial values of the remix controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemixDefaults {
    /// Catalog id of the preselected style
    pub style_id: String,
    pub intensity: f32,
    pub randomness: f32,
    pub preserve_vocals: bool,
    pub auto_arrange: bool,
}

impl Default for RemixDefaults {
    fn default() -> Self {
        Self {
            style_id: "trap-flip".to_string(),
            intensity: 75.0,
            randomness: 30.0,
            preserve_vocals: true,
            auto_arrange: true,
        }
    }
}

impl RemixDefaults {
    /// Build session settings; an unknown style id leaves no style selected
    pub fn to_settings(&self) -> RemixSettings {
        let style = find_style(&self.style_id);
        if style.is_none() {
            log::warn!("config: unknown style id '{}' in remix defaults", self.style_id);
        }

        RemixSettings {
            style,
            intensity: self.intensity.clamp(0.0, 100.0),
            randomness: self.randomness.clamp(0.0, 100.0),
            preserve_vocals: self.preserve_vocals,
            auto_arrange: self.auto_arrange,
            target_bpm: None,
            target_key: None,
        }
    }

    /// Capture the current session settings as defaults
    pub fn from_settings(settings: &RemixSettings) -> Self {
        Self {
            style_id: settings.style_id().unwrap_or_default().to_string(),
            intensity: settings.intensity,
            randomness: settings.randomness,
            preserve_vocals: settings.preserve_vocals,
            auto_arrange: settings.auto_arrange,
        }
    }
}

/// Timer cadence of the simulated processing and playback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Playback timer interval
    pub playback_tick_ms: u64,
    /// Position advance per playback tick, in seconds
    pub playback_step_secs: f64,
    /// Progress-bar timer interval
    pub progress_tick_ms: u64,
    /// Progress advance per tick, in percent
    pub progress_step: f32,
    /// How long "Complete" stays up before returning to idle
    pub complete_hold_ms: u64,
    /// Simulated export render time
    pub export_render_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            playback_tick_ms: 100,
            playback_step_secs: 0.1,
            progress_tick_ms: 50,
            progress_step: 2.0,
            complete_hold_ms: 1000,
            export_render_ms: 2000,
        }
    }
}

impl TimingConfig {
    /// Convert a duration to progress ticks, at least one
    pub fn ms_to_ticks(&self, ms: u64) -> u32 {
        let tick = self.progress_tick_ms.max(1);
        ms.div_ceil(tick).max(1) as u32
    }

    pub fn complete_hold_ticks(&self) -> u32 {
        self.ms_to_ticks(self.complete_hold_ms)
    }

    pub fn export_render_ticks(&self) -> u32 {
        self.ms_to_ticks(self.export_render_ms)
    }
}

/// Display sizes and initial mixer state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Bars per generated waveform
    pub waveform_length: usize,
    /// Master waveform height in logical pixels
    pub master_height: f32,
    /// Per-stem waveform height in logical pixels
    pub stem_height: f32,
    /// Physical pixels per logical pixel used to snap bar edges
    pub pixel_ratio: f32,
    /// Initial master volume, 0-100
    pub master_volume: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            waveform_length: DEFAULT_WAVEFORM_LEN,
            master_height: 100.0,
            stem_height: 48.0,
            pixel_ratio: 1.0,
            master_volume: 80,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StudioConfig::default();
        assert_eq!(config.timing.playback_tick_ms, 100);
        assert_eq!(config.timing.complete_hold_ticks(), 20);
        assert_eq!(config.timing.export_render_ticks(), 40);
        assert_eq!(config.display.waveform_length, 200);
        assert_eq!(config.display.master_volume, 80);
    }

    #[test]
    fn test_settings_conversion() {
        let settings = RemixDefaults::default().to_settings();
        assert_eq!(settings.style_id(), Some("trap-flip"));
        assert_eq!(settings.intensity, 75.0);
        assert_eq!(RemixDefaults::from_settings(&settings), RemixDefaults::default());

        let unknown = RemixDefaults { style_id: "polka".into(), intensity: 400.0, ..Default::default() };
        let settings = unknown.to_settings();
        assert!(settings.style.is_none());
        assert_eq!(settings.intensity, 100.0);
    }

    #[test]
    fn test_ticks_round_up() {
        let timing = TimingConfig { progress_tick_ms: 30, ..Default::default() };
        assert_eq!(timing.ms_to_ticks(100), 4);
        assert_eq!(timing.ms_to_ticks(0), 1);
    }
}
