//! Stem effect parameters and partial overrides
//!
//! [`StemEffects`] is the full per-stem effect state. [`StemTransform`] is the
//! partial override a remix style carries for one stem category: every field
//! is optional, and the numeric fields are visited through [`EffectParam`] so
//! the filter-versus-numeric split is decided by the type system.

use serde::{Deserialize, Serialize};

/// Filter response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    Lowpass,
    Highpass,
    Bandpass,
}

impl FilterType {
    pub const ALL: [FilterType; 3] = [FilterType::Lowpass, FilterType::Highpass, FilterType::Bandpass];

    pub fn label(&self) -> &'static str {
        match self {
            FilterType::Lowpass => "Low Pass",
            FilterType::Highpass => "High Pass",
            FilterType::Bandpass => "Band Pass",
        }
    }
}

impl std::fmt::Display for FilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Filter stage settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    /// Cutoff/center frequency in Hz
    pub frequency: f32,
    /// Resonance in percent
    pub resonance: f32,
}

impl Filter {
    /// Lowest frequency the UI exposes
    pub const MIN_FREQUENCY: f32 = 20.0;
    /// Highest frequency; a lowpass here is effectively bypassed
    pub const MAX_FREQUENCY: f32 = 20_000.0;

    pub const fn new(filter_type: FilterType, frequency: f32, resonance: f32) -> Self {
        Self { filter_type, frequency, resonance }
    }

    pub const fn lowpass(frequency: f32, resonance: f32) -> Self {
        Self::new(FilterType::Lowpass, frequency, resonance)
    }

    pub const fn highpass(frequency: f32, resonance: f32) -> Self {
        Self::new(FilterType::Highpass, frequency, resonance)
    }

    pub const fn bandpass(frequency: f32, resonance: f32) -> Self {
        Self::new(FilterType::Bandpass, frequency, resonance)
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::lowpass(Self::MAX_FREQUENCY, 0.0)
    }
}

/// Numeric effect parameters (everything except the filter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectParam {
    Reverb,
    Delay,
    Distortion,
    /// Semitones
    PitchShift,
    /// Percent of original speed
    TimeStretch,
    Compression,
    Chorus,
    Phaser,
    Bitcrush,
}

impl EffectParam {
    /// All numeric parameters in declaration order
    pub const ALL: [EffectParam; 9] = [
        EffectParam::Reverb,
        EffectParam::Delay,
        EffectParam::Distortion,
        EffectParam::PitchShift,
        EffectParam::TimeStretch,
        EffectParam::Compression,
        EffectParam::Chorus,
        EffectParam::Phaser,
        EffectParam::Bitcrush,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EffectParam::Reverb => "Reverb",
            EffectParam::Delay => "Delay",
            EffectParam::Distortion => "Distortion",
            EffectParam::PitchShift => "Pitch Shift",
            EffectParam::TimeStretch => "Time Stretch",
            EffectParam::Compression => "Compression",
            EffectParam::Chorus => "Chorus",
            EffectParam::Phaser => "Phaser",
            EffectParam::Bitcrush => "Bitcrush",
        }
    }

    /// Slider range exposed to the user
    pub fn range(&self) -> std::ops::RangeInclusive<f32> {
        match self {
            EffectParam::PitchShift => -12.0..=12.0,
            EffectParam::TimeStretch => 50.0..=200.0,
            _ => 0.0..=100.0,
        }
    }

    /// Slider step
    pub fn step(&self) -> f32 {
        match self {
            EffectParam::TimeStretch => 5.0,
            _ => 1.0,
        }
    }

    /// Whether the value is a conventional 0-100 percentage
    pub fn is_percentage(&self) -> bool {
        !matches!(self, EffectParam::PitchShift | EffectParam::TimeStretch)
    }

    /// Human-readable value, e.g. `+2 st`, `120%`
    pub fn format_value(&self, value: f32) -> String {
        match self {
            EffectParam::PitchShift => {
                let sign = if value > 0.0 { "+" } else { "" };
                format!("{}{:.0} st", sign, value)
            }
            _ => format!("{:.0}%", value),
        }
    }
}

impl std::fmt::Display for EffectParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete effect state of one stem
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StemEffects {
    pub reverb: f32,
    pub delay: f32,
    pub distortion: f32,
    pub pitch_shift: f32,
    pub time_stretch: f32,
    pub filter: Filter,
    pub compression: f32,
    pub chorus: f32,
    pub phaser: f32,
    pub bitcrush: f32,
}

impl Default for StemEffects {
    fn default() -> Self {
        Self {
            reverb: 0.0,
            delay: 0.0,
            distortion: 0.0,
            pitch_shift: 0.0,
            time_stretch: 100.0,
            filter: Filter::default(),
            compression: 0.0,
            chorus: 0.0,
            phaser: 0.0,
            bitcrush: 0.0,
        }
    }
}

impl StemEffects {
    pub fn get(&self, param: EffectParam) -> f32 {
        match param {
            EffectParam::Reverb => self.reverb,
            EffectParam::Delay => self.delay,
            EffectParam::Distortion => self.distortion,
            EffectParam::PitchShift => self.pitch_shift,
            EffectParam::TimeStretch => self.time_stretch,
            EffectParam::Compression => self.compression,
            EffectParam::Chorus => self.chorus,
            EffectParam::Phaser => self.phaser,
            EffectParam::Bitcrush => self.bitcrush,
        }
    }

    pub fn set(&mut self, param: EffectParam, value: f32) {
        let slot = match param {
            EffectParam::Reverb => &mut self.reverb,
            EffectParam::Delay => &mut self.delay,
            EffectParam::Distortion => &mut self.distortion,
            EffectParam::PitchShift => &mut self.pitch_shift,
            EffectParam::TimeStretch => &mut self.time_stretch,
            EffectParam::Compression => &mut self.compression,
            EffectParam::Chorus => &mut self.chorus,
            EffectParam::Phaser => &mut self.phaser,
            EffectParam::Bitcrush => &mut self.bitcrush,
        };
        *slot = value;
    }
}

/// Partial effect override for one stem category
///
/// Absent fields leave the stem's current value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StemTransform {
    pub reverb: Option<f32>,
    pub delay: Option<f32>,
    pub distortion: Option<f32>,
    pub pitch_shift: Option<f32>,
    pub time_stretch: Option<f32>,
    pub filter: Option<Filter>,
    pub compression: Option<f32>,
    pub chorus: Option<f32>,
    pub phaser: Option<f32>,
    pub bitcrush: Option<f32>,
    /// Volume scaling; treated as 1.0 when absent
    pub volume_multiplier: Option<f32>,
}

impl StemTransform {
    pub const fn new() -> Self {
        Self {
            reverb: None,
            delay: None,
            distortion: None,
            pitch_shift: None,
            time_stretch: None,
            filter: None,
            compression: None,
            chorus: None,
            phaser: None,
            bitcrush: None,
            volume_multiplier: None,
        }
    }

    /// Set a numeric override
    pub const fn with(mut self, param: EffectParam, value: f32) -> Self {
        match param {
            EffectParam::Reverb => self.reverb = Some(value),
            EffectParam::Delay => self.delay = Some(value),
            EffectParam::Distortion => self.distortion = Some(value),
            EffectParam::PitchShift => self.pitch_shift = Some(value),
            EffectParam::TimeStretch => self.time_stretch = Some(value),
            EffectParam::Compression => self.compression = Some(value),
            EffectParam::Chorus => self.chorus = Some(value),
            EffectParam::Phaser => self.phaser = Some(value),
            EffectParam::Bitcrush => self.bitcrush = Some(value),
        }
        self
    }

    pub const fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub const fn volume(mut self, multiplier: f32) -> Self {
        self.volume_multiplier = Some(multiplier);
        self
    }

    /// Numeric override for one parameter
    pub fn get(&self, param: EffectParam) -> Option<f32> {
        match param {
            EffectParam::Reverb => self.reverb,
            EffectParam::Delay => self.delay,
            EffectParam::Distortion => self.distortion,
            EffectParam::PitchShift => self.pitch_shift,
            EffectParam::TimeStretch => self.time_stretch,
            EffectParam::Compression => self.compression,
            EffectParam::Chorus => self.chorus,
            EffectParam::Phaser => self.phaser,
            EffectParam::Bitcrush => self.bitcrush,
        }
    }

    /// Present numeric overrides in declaration order
    pub fn numeric_overrides(&self) -> impl Iterator<Item = (EffectParam, f32)> + '_ {
        EffectParam::ALL
            .into_iter()
            .filter_map(move |param| self.get(param).map(|value| (param, value)))
    }

    /// Volume multiplier with the 1.0 default applied
    pub fn volume_multiplier(&self) -> f32 {
        self.volume_multiplier.unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_effects_are_neutral() {
        let fx = StemEffects::default();
        assert_eq!(fx.time_stretch, 100.0);
        assert_eq!(fx.filter, Filter::lowpass(20_000.0, 0.0));
        for param in EffectParam::ALL {
            if param != EffectParam::TimeStretch {
                assert_eq!(fx.get(param), 0.0, "{param} should default to 0");
            }
        }
    }

    #[test]
    fn test_get_set_every_param() {
        let mut fx = StemEffects::default();
        for (i, param) in EffectParam::ALL.iter().enumerate() {
            fx.set(*param, i as f32 + 1.0);
        }
        for (i, param) in EffectParam::ALL.iter().enumerate() {
            assert_eq!(fx.get(*param), i as f32 + 1.0);
        }
    }

    #[test]
    fn test_numeric_overrides_skip_absent_fields() {
        let t = StemTransform::new()
            .with(EffectParam::Distortion, 60.0)
            .with(EffectParam::Reverb, 10.0)
            .filter(Filter::lowpass(200.0, 70.0))
            .volume(1.6);

        let overrides: Vec<_> = t.numeric_overrides().collect();
        assert_eq!(
            overrides,
            vec![(EffectParam::Reverb, 10.0), (EffectParam::Distortion, 60.0)]
        );
        assert_eq!(t.volume_multiplier(), 1.6);
        assert_eq!(StemTransform::default().numeric_overrides().count(), 0);
        assert_eq!(StemTransform::default().volume_multiplier(), 1.0);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(EffectParam::PitchShift.format_value(2.0), "+2 st");
        assert_eq!(EffectParam::PitchShift.format_value(-3.0), "-3 st");
        assert_eq!(EffectParam::Reverb.format_value(45.4), "45%");
    }

    #[test]
    fn test_filter_yaml_uses_type_key() {
        let yaml = serde_yaml::to_string(&Filter::bandpass(150.0, 60.0)).unwrap();
        assert!(yaml.contains("type: bandpass"));
    }
}
