//! Common types for Sonic Remix
//!
//! Stem categories and the numeric limits shared by the transform engine,
//! the mixer and the UI sliders.

use serde::{Deserialize, Serialize};

/// Number of stems produced by a separation pass (Vocals, Drums, Bass, Melody)
pub const NUM_SEPARATED_STEMS: usize = 4;

/// Upper bound for percentage effect parameters
pub const MAX_EFFECT_VALUE: f32 = 100.0;

/// Stem volume at unity gain
pub const UNITY_VOLUME: f32 = 100.0;

/// Upper bound for stem volume (150% of unity)
pub const MAX_STEM_VOLUME: f32 = 150.0;

/// Stem categories
///
/// `Other` exists for completeness; the separator never emits it and no
/// catalog style carries a transform for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemKind {
    Vocals,
    Drums,
    Bass,
    Melody,
    Other,
}

impl StemKind {
    /// Stems in separation order
    pub const SEPARATED: [StemKind; NUM_SEPARATED_STEMS] =
        [StemKind::Vocals, StemKind::Drums, StemKind::Bass, StemKind::Melody];

    /// All categories
    pub const ALL: [StemKind; 5] = [
        StemKind::Vocals,
        StemKind::Drums,
        StemKind::Bass,
        StemKind::Melody,
        StemKind::Other,
    ];

    /// Slot in an arrangement activation vector, `None` for `Other`
    pub fn arrangement_slot(&self) -> Option<usize> {
        match self {
            StemKind::Vocals => Some(0),
            StemKind::Drums => Some(1),
            StemKind::Bass => Some(2),
            StemKind::Melody => Some(3),
            StemKind::Other => None,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            StemKind::Vocals => "Vocals",
            StemKind::Drums => "Drums",
            StemKind::Bass => "Bass",
            StemKind::Melody => "Melody",
            StemKind::Other => "Other",
        }
    }

    /// Lower-case key used in config files and transform tables
    pub fn as_str(&self) -> &'static str {
        match self {
            StemKind::Vocals => "vocals",
            StemKind::Drums => "drums",
            StemKind::Bass => "bass",
            StemKind::Melody => "melody",
            StemKind::Other => "other",
        }
    }
}

impl std::fmt::Display for StemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrangement_slots() {
        for (i, kind) in StemKind::SEPARATED.iter().enumerate() {
            assert_eq!(kind.arrangement_slot(), Some(i));
        }
        assert_eq!(StemKind::Other.arrangement_slot(), None);
    }

    #[test]
    fn test_serde_lowercase() {
        let yaml = serde_yaml::to_string(&StemKind::Melody).unwrap();
        assert_eq!(yaml.trim(), "melody");
        let parsed: StemKind = serde_yaml::from_str("bass").unwrap();
        assert_eq!(parsed, StemKind::Bass);
    }
}
