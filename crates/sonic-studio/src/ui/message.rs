//! Application messages
//!
//! All message types that can be dispatched in the sonic-studio application.

use std::path::PathBuf;

use sonic_core::{EffectParam, FilterType};

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Upload
    PathInputChanged(String),
    SubmitPath,
    FileDropped(PathBuf),
    ClearFile,

    // Timers
    /// Advance the processing pipeline
    ProgressTick,
    /// Advance the simulated playback position
    PlaybackTick,
    /// Display frame while the waveform animates
    Frame,

    // Transport
    TogglePlayback,
    SkipBack,
    SkipForward,
    /// Seek to a fraction of the track (0.0-1.0)
    Seek(f32),
    SetMasterVolume(u8),

    // Stem mixer
    SelectStem(String),
    SetStemVolume(String, f32),
    ToggleMute(String),
    ToggleSolo(String),
    SetEffect(String, EffectParam, f32),
    SetFilterType(String, FilterType),
    SetFilterFrequency(String, f32),
    SetFilterResonance(String, f32),
    ResetEffects(String),

    // Remix controls
    SelectStyle(String),
    SetIntensity(f32),
    SetRandomness(f32),
    SetPreserveVocals(bool),
    SetAutoArrange(bool),
    Randomize,
    GenerateRemix,
    Export,
    SaveDefaults,

    // Notifications
    DismissNotification(usize),
}
