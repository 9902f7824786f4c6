//! Error types for catalog construction, solving and tile I/O

use std::fmt;
use std::path::PathBuf;

use crate::spatial::grid::Coordinate;

/// Main error type for all solver and collaborator operations
#[derive(Debug)]
pub enum WaveError {
    /// The module catalog has no modules
    EmptyCatalog,

    /// Grid dimensions are unusable
    InvalidDimensions {
        /// Requested number of columns
        width: usize,
        /// Requested number of rows
        height: usize,
    },

    /// A parameter or caller action failed validation
    InvalidParameter {
        /// Parameter or action that was rejected
        parameter: &'static str,
        /// Offending value as text
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// A caller constraint left a slot with no module before any collapse
    EmptyCell {
        /// The emptied slot
        coordinate: Coordinate,
    },

    /// Propagating the caller constraints alone empties a slot
    ///
    /// No randomness is involved before the first collapse, so retrying
    /// would fail identically.
    UnsatisfiableConstraints {
        /// First slot found empty
        coordinate: Coordinate,
    },

    /// Every attempt ended in a contradiction
    Exhausted {
        /// Attempts made by the failing call
        attempts: usize,
        /// Slot emptied by the last attempt
        coordinate: Coordinate,
    },

    /// Textual fingerprint could not be parsed
    InvalidFingerprint {
        /// The rejected text
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Failed to load a tile image from the filesystem
    ImageLoad {
        /// Tile image that failed
        path: PathBuf,
        /// Decoder error
        source: image::ImageError,
    },

    /// Failed to save the generated image to disk
    ImageExport {
        /// Destination of the export
        path: PathBuf,
        /// Encoder error
        source: image::ImageError,
    },

    /// Filesystem failure outside image decoding
    FileSystem {
        /// Path being accessed
        path: PathBuf,
        /// What was being done
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for WaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCatalog => write!(f, "Module catalog contains no modules"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "Invalid grid dimensions {width}x{height}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::EmptyCell { coordinate } => {
                write!(f, "Cell {coordinate} has no possible module before solving")
            }
            Self::UnsatisfiableConstraints { coordinate } => {
                write!(
                    f,
                    "Constraints are contradictory: cell {coordinate} has no compatible module"
                )
            }
            Self::Exhausted {
                attempts,
                coordinate,
            } => {
                write!(
                    f,
                    "Failed to collapse after {attempts} attempts (last contradiction at {coordinate})"
                )
            }
            Self::InvalidFingerprint { value, reason } => {
                write!(f, "Invalid fingerprint '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Cannot load tile '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(f, "Cannot write image '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(f, "Cannot {operation} '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for WaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl WaveError {
    /// Whether the error stems from caller configuration rather than solving
    pub const fn is_invalid_configuration(&self) -> bool {
        matches!(
            self,
            Self::EmptyCatalog
                | Self::InvalidDimensions { .. }
                | Self::InvalidParameter { .. }
                | Self::EmptyCell { .. }
                | Self::UnsatisfiableConstraints { .. }
        )
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, WaveError>;

impl From<image::ImageError> for WaveError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<std::io::Error> for WaveError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::new(),
            operation: "access",
            source: err,
        }
    }
}

/// Build a [`WaveError::InvalidParameter`]
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> WaveError {
    WaveError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
