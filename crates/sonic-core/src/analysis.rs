//! Song analysis
//!
//! The "analysis" of an uploaded file is synthesized: tempo, key, energy,
//! danceability, mood and duration are drawn from the random source and the
//! audio itself is never inspected.

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// Pitch class names, index = semitones above C
pub const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// Musical key with root note and mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MusicalKey {
    /// Root note as semitone offset from C (0=C, 1=C#, ..., 11=B)
    pub root: u8,
    /// true = minor, false = major
    pub minor: bool,
}

impl MusicalKey {
    pub const fn new(root: u8, minor: bool) -> Self {
        Self {
            root: root % 12,
            minor,
        }
    }

    /// Root note name
    pub fn note(&self) -> &'static str {
        NOTE_NAMES[self.root as usize % 12]
    }

    /// Mode suffix as displayed ("maj" / "min")
    pub fn mode(&self) -> &'static str {
        if self.minor {
            "min"
        } else {
            "maj"
        }
    }
}

impl std::fmt::Display for MusicalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.note(), self.mode())
    }
}

/// Mood vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Energetic,
    Melancholic,
    Uplifting,
    Dark,
    Chill,
    Aggressive,
    Dreamy,
    Nostalgic,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Energetic,
        Mood::Melancholic,
        Mood::Uplifting,
        Mood::Dark,
        Mood::Chill,
        Mood::Aggressive,
        Mood::Dreamy,
        Mood::Nostalgic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Mood::Energetic => "Energetic",
            Mood::Melancholic => "Melancholic",
            Mood::Uplifting => "Uplifting",
            Mood::Dark => "Dark",
            Mood::Chill => "Chill",
            Mood::Aggressive => "Aggressive",
            Mood::Dreamy => "Dreamy",
            Mood::Nostalgic => "Nostalgic",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Synthesized song metadata
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SongAnalysis {
    /// 90-149
    pub bpm: u32,
    pub key: MusicalKey,
    /// 0-100
    pub energy: f32,
    /// 0-100
    pub danceability: f32,
    pub mood: Mood,
    /// Seconds, 120-299
    pub duration: u32,
}

pub const MIN_BPM: u32 = 90;
pub const MAX_BPM: u32 = 149;
pub const MIN_DURATION_SECS: u32 = 120;
pub const MAX_DURATION_SECS: u32 = 299;

/// Draw a fresh analysis
pub fn analyze_song<R: RandomSource + ?Sized>(rng: &mut R) -> SongAnalysis {
    let bpm = rng.range_u32(MIN_BPM, MAX_BPM);
    let root = rng.range_u32(0, 11) as u8;
    let minor = rng.range_u32(0, 1) == 1;
    let energy = (rng.next_unit() * 100.0) as f32;
    let danceability = (rng.next_unit() * 100.0) as f32;
    let mood = Mood::ALL[rng.range_u32(0, Mood::ALL.len() as u32 - 1) as usize];
    let duration = rng.range_u32(MIN_DURATION_SECS, MAX_DURATION_SECS);

    SongAnalysis {
        bpm,
        key: MusicalKey::new(root, minor),
        energy: energy.min(99.999),
        danceability: danceability.min(99.999),
        mood,
        duration,
    }
}

/// Format seconds as `m:ss`
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
