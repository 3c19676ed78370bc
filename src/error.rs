//! The [`Error`] type shared by every fallible operation of this crate.

use std::fmt;

#[cfg(feature = "pipeline")]
use crate::pipeline::StageKind;

/// A specialized [`Result`](std::result::Result) for this crate's operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced by [`Slice`](crate::Slice), [`Mapping`](crate::Mapping)
/// and pipeline [`Channel`](crate::pipeline::Channel)s.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An untyped value did not have the shape the conversion requires.
    #[error("invalid input kind: expected {expected}, got {actual}")]
    InvalidInputKind {
        /// The shape the conversion accepts.
        expected: Kind,
        /// The shape that was supplied.
        actual: Kind,
    },

    /// An index was outside `0..len`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A destination buffer does not have the length of the source.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The elements of an untyped value failed to deserialize.
    #[cfg(feature = "dynamic")]
    #[error("failed to decode elements: {0}")]
    Decode(#[from] serde_json::Error),

    /// A user callback panicked inside a pipeline worker.
    #[cfg(feature = "pipeline")]
    #[error("{stage} callback at depth {depth} panicked: {message}")]
    CallbackPanicked {
        stage: StageKind,
        depth: usize,
        message: String,
    },

    /// The pipeline was cancelled through its [`CancelToken`](crate::pipeline::CancelToken).
    #[cfg(feature = "pipeline")]
    #[error("pipeline cancelled")]
    Cancelled,

    /// The OS refused to spawn a worker thread.
    #[cfg(feature = "pipeline")]
    #[error("failed to spawn {stage} worker")]
    Spawn {
        stage: StageKind,
        #[source]
        source: std::io::Error,
    },
}

/// The shape of an untyped value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    /// An ordered collection.
    Sequence,
    /// A key/value collection.
    Mapping,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Sequence => "sequence",
            Kind::Mapping => "mapping",
        })
    }
}
