//! Sonic Core - remix engine shared by the studio shell and widgets
//!
//! Everything here is headless: the style catalog, the effect-parameter
//! transform, the synthetic waveform/analysis generators and the tick-driven
//! studio session. Randomness always comes from an injected [`RandomSource`].

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod effects;
pub mod error;
pub mod processing;
pub mod random;
pub mod stem;
pub mod studio;
pub mod transform;
pub mod transport;
pub mod types;
pub mod waveform;

pub use analysis::{analyze_song, format_time, Mood, MusicalKey, SongAnalysis};
pub use catalog::{catalog, default_style, find_style, Arrangement, RemixStyle, Section};
pub use config::StudioConfig;
pub use effects::{EffectParam, Filter, FilterType, StemEffects, StemTransform};
pub use error::{Result, StudioError};
pub use processing::{ProcessingState, ProcessingStatus};
pub use random::{FixedSequence, RandomSource};
pub use stem::{create_default_stems, Stem};
pub use studio::{AudioFile, Notification, NotificationLevel, Studio};
pub use transform::{apply_remix_transformations, randomize_settings, transform_stems, RemixSettings};
pub use transport::Transport;
pub use types::*;
pub use waveform::{generate_waveform, mix_master_waveform, DEFAULT_WAVEFORM_LEN};
