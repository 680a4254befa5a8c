//! Studio error types

use thiserror::Error;

use crate::processing::ProcessingStatus;

/// Errors returned by studio session operations
///
/// None of these come from I/O; they are all rejected preconditions. The
/// session reports each one as an error notification as well.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StudioError {
    /// File extension is not on the audio allow-list
    #[error("Unsupported audio format: {name}")]
    UnsupportedFormat { name: String },

    /// Operation needs an uploaded file
    #[error("No audio file loaded")]
    NoFileLoaded,

    /// Operation needs separated stems
    #[error("No stems available")]
    NoStems,

    /// Remix requested without a style
    #[error("No remix style selected")]
    NoStyleSelected,

    /// Another processing pipeline is still running
    #[error("Busy: {stage} in progress")]
    Busy { stage: ProcessingStatus },

    /// Stem id not present in the session
    #[error("Unknown stem: {0}")]
    UnknownStem(String),

    /// Style id not present in the catalog
    #[error("Unknown remix style: {0}")]
    UnknownStyle(String),
}

/// Result type for studio operations
pub type Result<T> = std::result::Result<T, StudioError>;
