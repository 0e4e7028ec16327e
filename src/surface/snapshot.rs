//! Surface snapshots for external plotting tools.

use super::error::SurfaceError;
use super::grid::VolatilitySurface;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::trace;

/// Plain numeric view of a surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSnapshot {
    /// Free-form label, usually the ticker symbol.
    pub label: String,
    /// Strike axis, ascending.
    pub strikes: Vec<f64>,
    /// Expiry axis in years, ascending.
    pub expiries: Vec<f64>,
    /// Implied volatilities, one row per expiry; `None` where unsolved.
    pub volatilities: Vec<Vec<Option<f64>>>,
}

impl SurfaceSnapshot {
    /// Captures the solved values of a surface.
    #[must_use]
    pub fn from_surface(label: impl Into<String>, surface: &VolatilitySurface) -> Self {
        Self {
            label: label.into(),
            strikes: surface.strikes().to_vec(),
            expiries: surface.expiries().to_vec(),
            volatilities: surface.volatilities(),
        }
    }

    /// Checks that the grid has one row per expiry and one column per strike.
    pub fn check_shape(&self) -> Result<(), SurfaceError> {
        if self.volatilities.len() != self.expiries.len() {
            return Err(SurfaceError::ShapeMismatch {
                message: format!(
                    "{} rows for {} expiries",
                    self.volatilities.len(),
                    self.expiries.len()
                ),
            });
        }
        if let Some((row, values)) = self
            .volatilities
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != self.strikes.len())
        {
            return Err(SurfaceError::ShapeMismatch {
                message: format!(
                    "row {row} has {} values for {} strikes",
                    values.len(),
                    self.strikes.len()
                ),
            });
        }
        Ok(())
    }
}

/// Format version used for checksum-enabled surface snapshots.
pub const SURFACE_SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Wrapper that provides checksum validation for `SurfaceSnapshot` instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceSnapshotPackage {
    /// Version of the snapshot schema for forward compatibility.
    pub version: u32,
    /// Snapshot payload.
    pub snapshot: SurfaceSnapshot,
    /// Hex-encoded checksum of the serialized snapshot.
    pub checksum: String,
}

impl SurfaceSnapshotPackage {
    /// Creates a new snapshot package computing the checksum of the snapshot contents.
    pub fn new(snapshot: SurfaceSnapshot) -> Result<Self, SurfaceError> {
        snapshot.check_shape()?;
        let checksum = Self::compute_checksum(&snapshot)?;

        Ok(Self {
            version: SURFACE_SNAPSHOT_FORMAT_VERSION,
            snapshot,
            checksum,
        })
    }

    /// Serializes the package to JSON.
    pub fn to_json(&self) -> Result<String, SurfaceError> {
        serde_json::to_string_pretty(self).map_err(|error| SurfaceError::SerializationError {
            message: error.to_string(),
        })
    }

    /// Deserializes the package from JSON.
    pub fn from_json(data: &str) -> Result<Self, SurfaceError> {
        serde_json::from_str(data).map_err(|error| SurfaceError::DeserializationError {
            message: error.to_string(),
        })
    }

    /// Validates version, checksum and grid shape.
    pub fn validate(&self) -> Result<(), SurfaceError> {
        if self.version != SURFACE_SNAPSHOT_FORMAT_VERSION {
            return Err(SurfaceError::UnsupportedVersion {
                found: self.version,
                expected: SURFACE_SNAPSHOT_FORMAT_VERSION,
            });
        }

        let computed = Self::compute_checksum(&self.snapshot)?;
        if computed != self.checksum {
            return Err(SurfaceError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual: computed,
            });
        }

        self.snapshot.check_shape()
    }

    /// Consumes the package and returns the validated snapshot.
    pub fn into_snapshot(self) -> Result<SurfaceSnapshot, SurfaceError> {
        self.validate()?;
        Ok(self.snapshot)
    }

    fn compute_checksum(snapshot: &SurfaceSnapshot) -> Result<String, SurfaceError> {
        let payload =
            serde_json::to_vec(snapshot).map_err(|error| SurfaceError::SerializationError {
                message: error.to_string(),
            })?;

        let mut hasher = Sha256::new();
        hasher.update(payload);

        let checksum = format!("{:x}", hasher.finalize());
        trace!("surface snapshot checksum: {}", checksum);
        Ok(checksum)
    }
}
