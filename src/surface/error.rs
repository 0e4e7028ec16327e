//! Error types for surface export.

use std::fmt;

/// Errors raised while exporting or importing surface snapshots.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// Serializing a snapshot failed.
    SerializationError {
        /// Serializer error message.
        message: String,
    },

    /// Deserializing a snapshot failed.
    DeserializationError {
        /// Deserializer error message.
        message: String,
    },

    /// Snapshot package written by an unknown format version.
    UnsupportedVersion {
        /// Version found in the package.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },

    /// Stored checksum does not match the snapshot contents.
    ChecksumMismatch {
        /// Checksum stored in the package.
        expected: String,
        /// Checksum computed from the snapshot.
        actual: String,
    },

    /// Volatility grid dimensions disagree with the strike/expiry axes.
    ShapeMismatch {
        /// Description of the mismatch.
        message: String,
    },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::SerializationError { message } => {
                write!(f, "failed to serialize surface snapshot: {message}")
            }
            SurfaceError::DeserializationError { message } => {
                write!(f, "failed to deserialize surface snapshot: {message}")
            }
            SurfaceError::UnsupportedVersion { found, expected } => {
                write!(
                    f,
                    "unsupported snapshot version: {found} (expected {expected})"
                )
            }
            SurfaceError::ChecksumMismatch { expected, actual } => {
                write!(f, "checksum mismatch: expected {expected}, got {actual}")
            }
            SurfaceError::ShapeMismatch { message } => {
                write!(f, "surface shape mismatch: {message}")
            }
        }
    }
}

impl std::error::Error for SurfaceError {}
