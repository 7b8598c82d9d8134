// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for navcodec.
//!
//! Provides error types for navigation format operations:
//! - Candidate decoding during format detection
//! - Rewindable stream handling
//! - Capacity checks when splitting routes across outputs
//! - Encoding operations

use thiserror::Error;

/// Errors that can occur during navigation format I/O operations.
#[derive(Debug, Clone, Error)]
pub enum CodecError {
    /// A candidate format could not decode the input
    #[error("{format} could not decode input: {message}")]
    DecodeMismatch {
        /// Name of the format that was tried
        format: String,
        /// Error message
        message: String,
    },

    /// The stream cannot be rewound to its mark
    #[error("Cannot rewind stream: {consumed} bytes read past a rewind budget of {budget} bytes")]
    StreamNotRewindable {
        /// Rewind budget given when the mark was set
        budget: usize,
        /// Bytes consumed since the mark
        consumed: usize,
    },

    /// A route does not fit into the given outputs
    #[error(
        "Found {positions} positions, {format} format may only contain {capacity} positions in one position list ({targets} target(s) given)"
    )]
    CapacityOverflow {
        /// Name of the target format
        format: String,
        /// Positions that had to be written
        positions: usize,
        /// Maximum positions per output
        capacity: usize,
        /// Number of outputs available
        targets: usize,
    },

    /// Encoding error
    #[error("{codec} encode error: {message}")]
    EncodeError {
        /// Codec context (e.g., "GeoJSON", "CSV", "IO")
        codec: String,
        /// Error message
        message: String,
    },

    /// A write was requested without any output target
    #[error("No output targets given")]
    NoTargets,

    /// Unsupported operation or feature
    #[error("Unsupported feature: '{feature}'")]
    Unsupported {
        /// What is not supported
        feature: String,
    },

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

impl CodecError {
    /// Create a decode mismatch error.
    pub fn decode(format: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::DecodeMismatch {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(codec: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::EncodeError {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create a stream-not-rewindable error.
    pub fn not_rewindable(budget: usize, consumed: usize) -> Self {
        CodecError::StreamNotRewindable { budget, consumed }
    }

    /// Create a capacity overflow error.
    pub fn capacity_overflow(
        format: impl Into<String>,
        positions: usize,
        capacity: usize,
        targets: usize,
    ) -> Self {
        CodecError::CapacityOverflow {
            format: format.into(),
            positions,
            capacity,
            targets,
        }
    }

    /// Create an unsupported feature error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        CodecError::Unsupported {
            feature: feature.into(),
        }
    }

    /// Create an "unknown format" error.
    pub fn unknown_format(name: impl Into<String>) -> Self {
        CodecError::Unsupported {
            feature: format!("unknown format: {}", name.into()),
        }
    }

    /// Positions that did not fit, for capacity overflows.
    pub fn overflow_amount(&self) -> Option<usize> {
        match self {
            CodecError::CapacityOverflow {
                positions,
                capacity,
                targets,
                ..
            } => Some(positions.saturating_sub(capacity.saturating_mul(*targets))),
            _ => None,
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::DecodeMismatch { format, message } => {
                vec![("format", format.clone()), ("message", message.clone())]
            }
            CodecError::StreamNotRewindable { budget, consumed } => vec![
                ("budget", budget.to_string()),
                ("consumed", consumed.to_string()),
            ],
            CodecError::CapacityOverflow {
                format,
                positions,
                capacity,
                targets,
            } => vec![
                ("format", format.clone()),
                ("positions", positions.to_string()),
                ("capacity", capacity.to_string()),
                ("targets", targets.to_string()),
            ],
            CodecError::EncodeError { codec, message } => {
                vec![("codec", codec.clone()), ("message", message.clone())]
            }
            CodecError::NoTargets => Vec::new(),
            CodecError::Unsupported { feature } => vec![("feature", feature.clone())],
            CodecError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::EncodeError {
            codec: "IO".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type for navcodec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
