//! Remix transform engine
//!
//! Blends a style's per-stem overrides into the current stem state, scaled
//! by intensity and perturbed by randomness. Draw order per stem is fixed:
//! one draw per present numeric override (declaration order), one for the
//! volume factor, then the waveform draws.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::analysis::MusicalKey;
use crate::catalog::{catalog, default_style, find_style, RemixStyle};
use crate::error::{Result, StudioError};
use crate::random::RandomSource;
use crate::stem::Stem;
use crate::types::{MAX_EFFECT_VALUE, MAX_STEM_VOLUME};
use crate::waveform::{generate_waveform, DEFAULT_WAVEFORM_LEN};

/// User-controlled remix parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemixSettings {
    #[serde(with = "style_by_id")]
    pub style: Option<&'static RemixStyle>,
    /// 0-100, scales override values
    pub intensity: f32,
    /// 0-100, spread of the random factors
    pub randomness: f32,
    /// Reserved; not consulted by the transform
    pub preserve_vocals: bool,
    /// Reserved; not consulted by the transform
    pub auto_arrange: bool,
    pub target_bpm: Option<u32>,
    pub target_key: Option<MusicalKey>,
}

impl Default for RemixSettings {
    fn default() -> Self {
        Self {
            style: Some(default_style()),
            intensity: 75.0,
            randomness: 30.0,
            preserve_vocals: true,
            auto_arrange: true,
            target_bpm: None,
            target_key: None,
        }
    }
}

impl RemixSettings {
    /// Style id, if one is selected
    pub fn style_id(&self) -> Option<&'static str> {
        self.style.map(|style| style.id.as_str())
    }
}

mod style_by_id {
    use super::*;

    pub fn serialize<S: Serializer>(style: &Option<&'static RemixStyle>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        style.map(|s| s.id.as_str()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<&'static RemixStyle>, D::Error> {
        let id: Option<String> = Option::deserialize(deserializer)?;
        Ok(id.and_then(|id| {
            let style = find_style(&id);
            if style.is_none() {
                log::warn!("remix settings: unknown style id '{}', leaving unselected", id);
            }
            style
        }))
    }
}

/// Apply the selected style to every stem
///
/// Returns [`StudioError::NoStyleSelected`] when `settings.style` is empty.
pub fn apply_remix_transformations<R: RandomSource + ?Sized>(
    stems: &[Stem],
    settings: &RemixSettings,
    rng: &mut R,
) -> Result<Vec<Stem>> {
    let style = settings.style.ok_or(StudioError::NoStyleSelected)?;
    Ok(transform_stems(stems, style, settings, rng))
}

/// Apply `style` to every stem; the input slice is left untouched
pub fn transform_stems<R: RandomSource + ?Sized>(
    stems: &[Stem],
    style: &RemixStyle,
    settings: &RemixSettings,
    rng: &mut R,
) -> Vec<Stem> {
    stems
        .iter()
        .map(|stem| transform_stem(stem, style, settings, rng))
        .collect()
}

fn transform_stem<R: RandomSource + ?Sized>(
    stem: &Stem,
    style: &RemixStyle,
    settings: &RemixSettings,
    rng: &mut R,
) -> Stem {
    let mut out = stem.clone();
    let scale = settings.intensity / 100.0;
    let spread = settings.randomness as f64;

    let volume_multiplier = match style.transform_for(stem.kind) {
        Some(transform) => {
            if let Some(filter) = transform.filter {
                out.effects.filter = filter;
            }
            for (param, value) in transform.numeric_overrides() {
                let factor = 1.0 + (rng.next_unit() - 0.5) * (spread / 50.0);
                out.effects.set(param, (value * scale * factor as f32).min(MAX_EFFECT_VALUE));
            }
            transform.volume_multiplier()
        }
        None => 1.0,
    };

    let volume_factor = 1.0 + (rng.next_unit() - 0.5) * (spread / 100.0);
    out.volume = (stem.volume * volume_multiplier * volume_factor as f32).min(MAX_STEM_VOLUME);

    let len = if stem.waveform.is_empty() {
        DEFAULT_WAVEFORM_LEN
    } else {
        stem.waveform.len()
    };
    out.waveform = generate_waveform(rng, len);

    out
}

/// Shuffle the remix controls ("Randomize All")
///
/// Picks a random style, intensity 40-99, randomness 20-89, preserve vocals
/// with probability 0.7 and auto arrange with probability 0.6. Target tempo
/// and key are cleared.
pub fn randomize_settings<R: RandomSource + ?Sized>(rng: &mut R) -> RemixSettings {
    let styles = catalog();
    let index = rng.range_u32(0, styles.len() as u32 - 1) as usize;

    RemixSettings {
        style: styles.get(index),
        intensity: rng.range_u32(40, 99) as f32,
        randomness: rng.range_u32(20, 89) as f32,
        preserve_vocals: rng.chance(0.7),
        auto_arrange: rng.chance(0.6),
        target_bpm: None,
        target_key: None,
    }
}
