//! Separated stems and mixer edits
//!
//! "Separation" synthesizes the four fixed stems; nothing is extracted from
//! the uploaded file. The free functions below are the mixer edits the UI
//! performs on the stem list.

use serde::{Deserialize, Serialize};

use crate::effects::{EffectParam, Filter, StemEffects};
use crate::random::RandomSource;
use crate::types::{StemKind, MAX_STEM_VOLUME, UNITY_VOLUME};
use crate::waveform::generate_waveform;

/// Accent colors per separated stem [Vocals, Drums, Bass, Melody]
pub const STEM_ACCENTS: [&str; 4] = [
    "hsl(320, 100%, 60%)",
    "hsl(180, 100%, 50%)",
    "hsl(280, 100%, 65%)",
    "hsl(25, 100%, 55%)",
];

/// One isolated audio component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stem {
    pub id: String,
    pub name: String,
    pub kind: StemKind,
    /// Accent color in CSS notation
    pub color: String,
    /// 0-150, 100 = unity
    pub volume: f32,
    /// -1.0 (left) to 1.0 (right)
    pub pan: f32,
    pub muted: bool,
    pub solo: bool,
    pub effects: StemEffects,
    /// Per-bar amplitude in [0, 1]
    pub waveform: Vec<f32>,
}

impl Stem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: StemKind, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            color: color.into(),
            volume: UNITY_VOLUME,
            pan: 0.0,
            muted: false,
            solo: false,
            effects: StemEffects::default(),
            waveform: Vec::new(),
        }
    }
}

/// Synthesize the four separated stems with neutral effects
pub fn create_default_stems<R: RandomSource + ?Sized>(rng: &mut R, waveform_len: usize) -> Vec<Stem> {
    StemKind::SEPARATED
        .iter()
        .zip(STEM_ACCENTS)
        .enumerate()
        .map(|(index, (kind, color))| {
            let mut stem = Stem::new(format!("stem-{}", index), kind.name(), *kind, color);
            stem.waveform = generate_waveform(rng, waveform_len);
            stem
        })
        .collect()
}

fn find_mut<'a>(stems: &'a mut [Stem], stem_id: &str) -> Option<&'a mut Stem> {
    stems.iter_mut().find(|s| s.id == stem_id)
}

/// Set a stem's volume, clamped to 0-150. Returns false if the id is unknown.
pub fn set_volume(stems: &mut [Stem], stem_id: &str, volume: f32) -> bool {
    match find_mut(stems, stem_id) {
        Some(stem) => {
            stem.volume = volume.clamp(0.0, MAX_STEM_VOLUME);
            true
        }
        None => false,
    }
}

/// Flip a stem's mute flag
pub fn toggle_mute(stems: &mut [Stem], stem_id: &str) -> bool {
    match find_mut(stems, stem_id) {
        Some(stem) => {
            stem.muted = !stem.muted;
            true
        }
        None => false,
    }
}

/// Solo a stem, or release solo if it is already soloed
///
/// Soloing mutes every other stem. Releasing clears solo and mute on all
/// stems, including mutes that were set by hand before the solo.
pub fn toggle_solo(stems: &mut [Stem], stem_id: &str) -> bool {
    let Some(was_solo) = stems.iter().find(|s| s.id == stem_id).map(|s| s.solo) else {
        return false;
    };

    for stem in stems.iter_mut() {
        if was_solo {
            stem.solo = false;
            stem.muted = false;
        } else {
            let target = stem.id == stem_id;
            stem.solo = target;
            stem.muted = !target;
        }
    }
    true
}

/// Set one numeric effect on a stem, clamped to the parameter's range
pub fn set_effect(stems: &mut [Stem], stem_id: &str, param: EffectParam, value: f32) -> bool {
    match find_mut(stems, stem_id) {
        Some(stem) => {
            let range = param.range();
            stem.effects.set(param, value.clamp(*range.start(), *range.end()));
            true
        }
        None => false,
    }
}

/// Replace a stem's filter
pub fn set_filter(stems: &mut [Stem], stem_id: &str, filter: Filter) -> bool {
    match find_mut(stems, stem_id) {
        Some(stem) => {
            stem.effects.filter = Filter {
                frequency: filter.frequency.clamp(Filter::MIN_FREQUENCY, Filter::MAX_FREQUENCY),
                resonance: filter.resonance.clamp(0.0, 100.0),
                ..filter
            };
            true
        }
        None => false,
    }
}

/// Restore a stem's effects to neutral defaults
pub fn reset_effects(stems: &mut [Stem], stem_id: &str) -> bool {
    match find_mut(stems, stem_id) {
        Some(stem) => {
            stem.effects = StemEffects::default();
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::FilterType;
    use crate::random::FixedSequence;

    fn stems() -> Vec<Stem> {
        create_default_stems(&mut FixedSequence::constant(0.5), 8)
    }

    #[test]
    fn test_default_stems() {
        let stems = stems();
        assert_eq!(stems.len(), 4);
        let ids: Vec<_> = stems.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["stem-0", "stem-1", "stem-2", "stem-3"]);
        let kinds: Vec<_> = stems.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, StemKind::SEPARATED);
        for stem in &stems {
            assert_eq!(stem.volume, 100.0);
            assert_eq!(stem.effects, StemEffects::default());
            assert_eq!(stem.waveform.len(), 8);
            assert!(!stem.muted && !stem.solo);
        }
        assert_eq!(stems[0].color, "hsl(320, 100%, 60%)");
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut stems = stems();
        assert!(set_volume(&mut stems, "stem-1", 400.0));
        assert_eq!(stems[1].volume, 150.0);
        assert!(set_volume(&mut stems, "stem-1", -3.0));
        assert_eq!(stems[1].volume, 0.0);
        assert!(!set_volume(&mut stems, "nope", 10.0));
    }

    #[test]
    fn test_solo_mutes_others_and_release_unmutes_all() {
        let mut stems = stems();
        toggle_mute(&mut stems, "stem-3");
        assert!(toggle_solo(&mut stems, "stem-1"));
        assert!(stems[1].solo && !stems[1].muted);
        assert!(stems.iter().filter(|s| s.id != "stem-1").all(|s| s.muted && !s.solo));

        assert!(toggle_solo(&mut stems, "stem-1"));
        assert!(stems.iter().all(|s| !s.solo && !s.muted));
    }

    #[test]
    fn test_solo_switches_between_stems() {
        let mut stems = stems();
        toggle_solo(&mut stems, "stem-0");
        toggle_solo(&mut stems, "stem-2");
        assert!(stems[2].solo && !stems[2].muted);
        assert!(!stems[0].solo && stems[0].muted);
    }

    #[test]
    fn test_effect_edits() {
        let mut stems = stems();
        assert!(set_effect(&mut stems, "stem-0", EffectParam::PitchShift, -20.0));
        assert_eq!(stems[0].effects.pitch_shift, -12.0);
        assert!(set_filter(&mut stems, "stem-0", Filter::highpass(5.0, 300.0)));
        assert_eq!(stems[0].effects.filter.filter_type, FilterType::Highpass);
        assert_eq!(stems[0].effects.filter.frequency, 20.0);
        assert_eq!(stems[0].effects.filter.resonance, 100.0);
        assert!(reset_effects(&mut stems, "stem-0"));
        assert_eq!(stems[0].effects, StemEffects::default());
    }
}
