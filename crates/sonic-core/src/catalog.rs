//! Remix style catalog
//!
//! Ten fixed styles, built once on first access and shared read-only for the
//! rest of the process.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::effects::{EffectParam, Filter, StemTransform};
use crate::types::StemKind;

use EffectParam::*;

static CATALOG: OnceLock<Vec<RemixStyle>> = OnceLock::new();

/// Song sections of an arrangement pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Intro,
    Verse,
    Chorus,
    Bridge,
    Drop,
    Outro,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Intro,
        Section::Verse,
        Section::Chorus,
        Section::Bridge,
        Section::Drop,
        Section::Outro,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Intro => "Intro",
            Section::Verse => "Verse",
            Section::Chorus => "Chorus",
            Section::Bridge => "Bridge",
            Section::Drop => "Drop",
            Section::Outro => "Outro",
        }
    }
}

/// Per-section stem activation, one bit per [Vocals, Drums, Bass, Melody]
///
/// Informational only; playback does not gate stems by section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrangement {
    pub intro: [u8; 4],
    pub verse: [u8; 4],
    pub chorus: [u8; 4],
    pub bridge: [u8; 4],
    pub drop: [u8; 4],
    pub outro: [u8; 4],
}

impl Arrangement {
    pub fn section(&self, section: Section) -> [u8; 4] {
        match section {
            Section::Intro => self.intro,
            Section::Verse => self.verse,
            Section::Chorus => self.chorus,
            Section::Bridge => self.bridge,
            Section::Drop => self.drop,
            Section::Outro => self.outro,
        }
    }

    /// Whether `kind` is audible in `section`. `Other` never is.
    pub fn is_active(&self, section: Section, kind: StemKind) -> bool {
        kind.arrangement_slot()
            .map(|slot| self.section(section)[slot] != 0)
            .unwrap_or(false)
    }
}

/// Immutable catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemixStyle {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Conceptual tempo scaling; no audio is time-stretched
    pub bpm_multiplier: f32,
    pub stem_transforms: BTreeMap<StemKind, StemTransform>,
    pub arrangement: Arrangement,
}

impl RemixStyle {
    /// Override set for a stem category, if the style defines one
    pub fn transform_for(&self, kind: StemKind) -> Option<&StemTransform> {
        self.stem_transforms.get(&kind)
    }

    /// Tempo the style would target for a source tempo
    pub fn target_bpm(&self, source_bpm: u32) -> f32 {
        source_bpm as f32 * self.bpm_multiplier
    }
}

impl std::fmt::Display for RemixStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.icon, self.name)
    }
}

/// All styles in catalog order
pub fn catalog() -> &'static [RemixStyle] {
    CATALOG.get_or_init(build_catalog)
}

/// Look up a style by id
pub fn find_style(id: &str) -> Option<&'static RemixStyle> {
    catalog().iter().find(|style| style.id == id)
}

/// First catalog entry ("Trap Flip")
pub fn default_style() -> &'static RemixStyle {
    &catalog()[0]
}

fn t() -> StemTransform {
    StemTransform::new()
}

fn bits(intro: [u8; 4], verse: [u8; 4], chorus: [u8; 4], bridge: [u8; 4], drop: [u8; 4], outro: [u8; 4]) -> Arrangement {
    Arrangement { intro, verse, chorus, bridge, drop, outro }
}

struct StyleEntry {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    bpm_multiplier: f32,
    /// [drums, bass, vocals, melody]
    transforms: [StemTransform; 4],
    arrangement: Arrangement,
}

impl From<StyleEntry> for RemixStyle {
    fn from(entry: StyleEntry) -> Self {
        let [drums, bass, vocals, melody] = entry.transforms;
        let stem_transforms = BTreeMap::from([
            (StemKind::Drums, drums),
            (StemKind::Bass, bass),
            (StemKind::Vocals, vocals),
            (StemKind::Melody, melody),
        ]);

        Self {
            id: entry.id.to_string(),
            name: entry.name.to_string(),
            description: entry.description.to_string(),
            icon: entry.icon.to_string(),
            bpm_multiplier: entry.bpm_multiplier,
            stem_transforms,
            arrangement: entry.arrangement,
        }
    }
}

fn build_catalog() -> Vec<RemixStyle> {
    log::debug!("catalog: building remix style catalog");

    let entries = [
        StyleEntry {
            id: "trap-flip",
            name: "Trap Flip",
            description: "Heavy 808s, hi-hat rolls, dark atmosphere",
            icon: "🔥",
            bpm_multiplier: 0.75,
            transforms: [
                t().with(Distortion, 40.0).with(Compression, 80.0).with(Bitcrush, 15.0).volume(1.4),
                t().with(Distortion, 60.0).filter(Filter::lowpass(200.0, 70.0)).volume(1.6),
                t().with(Reverb, 45.0).with(Delay, 30.0).with(PitchShift, -2.0).volume(0.9),
                t().with(Reverb, 60.0).with(Delay, 40.0).filter(Filter::lowpass(3000.0, 40.0)).volume(0.7),
            ],
            arrangement: bits([0, 0, 0, 1], [1, 1, 1, 1], [1, 1, 1, 1], [0, 1, 0, 1], [1, 1, 1, 1], [0, 0, 1, 0]),
        },
        StyleEntry {
            id: "dnb-refix",
            name: "DnB Refix",
            description: "Breakbeats, jungle vibes, high energy",
            icon: "⚡",
            bpm_multiplier: 1.8,
            transforms: [
                t().with(TimeStretch, 180.0).with(Distortion, 25.0).with(Compression, 90.0).volume(1.3),
                t().with(Distortion, 35.0).filter(Filter::bandpass(150.0, 60.0)).with(TimeStretch, 180.0).volume(1.4),
                t().with(Reverb, 35.0).with(Delay, 50.0).with(Chorus, 30.0).volume(0.85),
                t().with(Phaser, 50.0).with(Delay, 60.0).filter(Filter::highpass(500.0, 30.0)).volume(0.8),
            ],
            arrangement: bits([1, 0, 0, 1], [1, 1, 0, 1], [1, 1, 1, 1], [1, 0, 0, 0], [1, 1, 1, 1], [1, 0, 0, 1]),
        },
        StyleEntry {
            id: "house-rework",
            name: "House Rework",
            description: "Four-on-floor, groovy basslines, club ready",
            icon: "🏠",
            bpm_multiplier: 1.0,
            transforms: [
                t().with(Compression, 70.0).filter(Filter::highpass(80.0, 20.0)).volume(1.2),
                t().filter(Filter::lowpass(250.0, 50.0)).with(Compression, 60.0).volume(1.3),
                t().with(Reverb, 50.0).with(Delay, 25.0).filter(Filter::highpass(200.0, 20.0)).volume(1.0),
                t().with(Chorus, 40.0).with(Phaser, 30.0).with(Reverb, 45.0).volume(0.9),
            ],
            arrangement: bits([1, 0, 0, 0], [1, 1, 0, 1], [1, 1, 1, 1], [1, 1, 0, 0], [1, 1, 1, 1], [1, 0, 0, 0]),
        },
        StyleEntry {
            id: "ambient-deconstruct",
            name: "Ambient Deconstruct",
            description: "Ethereal textures, stretched time, dreamscape",
            icon: "🌌",
            bpm_multiplier: 0.4,
            transforms: [
                t().with(Reverb, 90.0).with(TimeStretch, 300.0).volume(0.3),
                t().with(Reverb, 80.0).filter(Filter::lowpass(100.0, 80.0)).with(TimeStretch, 400.0).volume(0.5),
                t().with(Reverb, 95.0).with(Delay, 80.0).with(PitchShift, -5.0).with(TimeStretch, 250.0).volume(0.7),
                t().with(Reverb, 100.0).with(Delay, 90.0).with(Chorus, 60.0).with(TimeStretch, 350.0).volume(0.8),
            ],
            arrangement: bits([0, 0, 0, 1], [0, 0, 1, 1], [0, 1, 1, 1], [0, 0, 0, 1], [0, 1, 1, 1], [0, 0, 0, 1]),
        },
        StyleEntry {
            id: "glitch-core",
            name: "Glitch Core",
            description: "Chopped, stuttered, digital chaos",
            icon: "💥",
            bpm_multiplier: 1.2,
            transforms: [
                t().with(Bitcrush, 60.0).with(Distortion, 50.0).with(Compression, 95.0).volume(1.1),
                t().with(Bitcrush, 40.0).with(Distortion, 70.0).filter(Filter::bandpass(200.0, 90.0)).volume(1.2),
                t().with(Bitcrush, 30.0).with(Delay, 70.0).with(Reverb, 40.0).with(PitchShift, 3.0).volume(0.8),
                t().with(Bitcrush, 50.0).with(Phaser, 70.0).with(Delay, 80.0).volume(0.7),
            ],
            arrangement: bits([1, 0, 1, 0], [1, 1, 0, 1], [1, 1, 1, 1], [0, 1, 1, 0], [1, 1, 1, 1], [1, 0, 1, 0]),
        },
        StyleEntry {
            id: "synthwave-reimagine",
            name: "Synthwave Reimagine",
            description: "80s nostalgia, arpeggios, neon sunset",
            icon: "🌅",
            bpm_multiplier: 0.9,
            transforms: [
                t().with(Reverb, 50.0).with(Compression, 60.0).filter(Filter::highpass(100.0, 30.0)).volume(1.0),
                t().with(Distortion, 20.0).with(Chorus, 50.0).filter(Filter::lowpass(300.0, 60.0)).volume(1.2),
                t().with(Reverb, 60.0).with(Delay, 40.0).with(Chorus, 30.0).volume(1.0),
                t().with(Chorus, 70.0).with(Phaser, 40.0).with(Reverb, 55.0).with(Delay, 50.0).volume(1.1),
            ],
            arrangement: bits([0, 0, 0, 1], [1, 1, 0, 1], [1, 1, 1, 1], [0, 1, 0, 1], [1, 1, 1, 1], [0, 0, 0, 1]),
        },
        StyleEntry {
            id: "lo-fi-chill",
            name: "Lo-Fi Chill",
            description: "Vinyl crackle, jazzy chords, study beats",
            icon: "☕",
            bpm_multiplier: 0.7,
            transforms: [
                t().with(Bitcrush, 20.0).filter(Filter::lowpass(8000.0, 20.0)).with(Compression, 50.0).volume(0.9),
                t().filter(Filter::lowpass(400.0, 40.0)).with(Compression, 40.0).volume(1.1),
                t().with(Reverb, 40.0).filter(Filter::lowpass(6000.0, 30.0)).volume(0.7),
                t().with(Chorus, 30.0).with(Reverb, 50.0).filter(Filter::lowpass(5000.0, 25.0)).volume(1.0),
            ],
            arrangement: bits([1, 0, 0, 1], [1, 1, 0, 1], [1, 1, 1, 1], [1, 0, 0, 1], [1, 1, 1, 1], [1, 0, 0, 1]),
        },
        StyleEntry {
            id: "hardstyle-mutation",
            name: "Hardstyle Mutation",
            description: "Distorted kicks, euphoric leads, 150+ BPM",
            icon: "🎪",
            bpm_multiplier: 1.5,
            transforms: [
                t().with(Distortion, 80.0).with(Compression, 100.0).with(Bitcrush, 10.0).volume(1.5),
                t().with(Distortion, 90.0).filter(Filter::lowpass(150.0, 90.0)).volume(1.6),
                t().with(PitchShift, 2.0).with(Reverb, 60.0).with(Delay, 30.0).volume(0.8),
                t().with(Distortion, 30.0).with(Phaser, 50.0).with(Reverb, 40.0).volume(1.2),
            ],
            arrangement: bits([1, 0, 0, 0], [1, 1, 0, 1], [1, 1, 1, 1], [0, 0, 0, 1], [1, 1, 1, 1], [1, 0, 0, 0]),
        },
        StyleEntry {
            id: "drill-edit",
            name: "Drill Edit",
            description: "Sliding 808s, UK/NY drill patterns",
            icon: "🔫",
            bpm_multiplier: 0.95,
            transforms: [
                t().with(Compression, 85.0).with(Distortion, 20.0).volume(1.3),
                t().with(PitchShift, -3.0).with(Distortion, 55.0).filter(Filter::lowpass(180.0, 75.0)).volume(1.5),
                t().with(Reverb, 30.0).with(Delay, 20.0).volume(1.0),
                t().with(Reverb, 50.0).filter(Filter::lowpass(4000.0, 35.0)).volume(0.75),
            ],
            arrangement: bits([0, 0, 0, 0], [1, 1, 1, 1], [1, 1, 1, 1], [1, 1, 0, 0], [1, 1, 1, 1], [0, 1, 0, 0]),
        },
        StyleEntry {
            id: "psytrance-warp",
            name: "Psytrance Warp",
            description: "Rolling basslines, psychedelic textures, 145 BPM",
            icon: "🍄",
            bpm_multiplier: 1.45,
            transforms: [
                t().with(Compression, 75.0).filter(Filter::highpass(60.0, 25.0)).volume(1.2),
                t().with(Distortion, 45.0).filter(Filter::bandpass(200.0, 85.0)).with(Phaser, 60.0).volume(1.4),
                t().with(Delay, 70.0).with(Reverb, 75.0).with(Phaser, 50.0).with(PitchShift, 1.0).volume(0.6),
                t().with(Phaser, 80.0).with(Delay, 60.0).with(Reverb, 55.0).filter(Filter::bandpass(2000.0, 50.0)).volume(1.0),
            ],
            arrangement: bits([1, 1, 0, 0], [1, 1, 0, 1], [1, 1, 1, 1], [1, 1, 0, 0], [1, 1, 1, 1], [1, 1, 0, 0]),
        },
    ];

    entries.into_iter().map(RemixStyle::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_ten_unique_styles() {
        let styles = catalog();
        assert_eq!(styles.len(), 10);
        let ids: HashSet<_> = styles.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), 10);
        assert_eq!(default_style().name, "Trap Flip");
    }

    #[test]
    fn test_every_style_covers_separated_stems_only() {
        for style in catalog() {
            for kind in StemKind::SEPARATED {
                assert!(style.transform_for(kind).is_some(), "{} missing {kind}", style.id);
            }
            assert!(style.transform_for(StemKind::Other).is_none());
        }
    }

    #[test]
    fn test_trap_flip_bass_table() {
        let style = find_style("trap-flip").unwrap();
        let bass = style.transform_for(StemKind::Bass).unwrap();
        assert_eq!(bass.distortion, Some(60.0));
        assert_eq!(bass.filter, Some(Filter::lowpass(200.0, 70.0)));
        assert_eq!(bass.volume_multiplier, Some(1.6));
        assert_eq!(bass.reverb, None);
    }

    #[test]
    fn test_arrangement_lookup() {
        let style = find_style("drill-edit").unwrap();
        assert_eq!(style.arrangement.section(Section::Intro), [0, 0, 0, 0]);
        assert!(style.arrangement.is_active(Section::Outro, StemKind::Drums));
        assert!(!style.arrangement.is_active(Section::Outro, StemKind::Vocals));
        assert!(!style.arrangement.is_active(Section::Drop, StemKind::Other));

        // Ambient strips vocals even from the drop; every other style drops in full
        let ambient = find_style("ambient-deconstruct").unwrap();
        assert_eq!(ambient.arrangement.section(Section::Drop), [0, 1, 1, 1]);
        assert!(!ambient.arrangement.is_active(Section::Drop, StemKind::Vocals));
        for s in catalog().iter().filter(|s| s.id != "ambient-deconstruct") {
            assert_eq!(s.arrangement.section(Section::Drop), [1, 1, 1, 1], "{}", s.id);
        }
    }

    #[test]
    fn test_target_bpm_and_lookup_miss() {
        let style = find_style("dnb-refix").unwrap();
        assert!((style.target_bpm(100) - 180.0).abs() < 1e-3);
        assert!(find_style("polka-remix").is_none());
    }
}
