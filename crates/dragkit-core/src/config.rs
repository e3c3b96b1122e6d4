#![forbid(unsafe_code)]

//! Drag surface configuration.
//!
//! [`DragConfig`] gathers every tunable of the drag interaction. With the
//! `config` feature it can be loaded from TOML or JSON at startup:
//!
//! ```toml
//! # dragkit.toml
//! threshold = 24.0
//! axis = "vertical"
//! max_columns = 4
//! ```
//!
//! ```rust,ignore
//! let config = DragConfig::from_toml_file("dragkit.toml")?;
//! let config = DragConfig::from_json_str(r#"{"threshold": 12.0}"#)?;
//! ```
//!
//! Missing fields take their defaults; loaded configs are validated.

use std::fmt;
#[cfg(feature = "config")]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::direction::{AxisRestriction, DEFAULT_DIRECTION_THRESHOLD, DirectionClassifier};

/// Default floor for column groups.
pub const DEFAULT_MIN_COLUMNS: usize = 2;

/// Default ceiling for column groups.
pub const DEFAULT_MAX_COLUMNS: usize = 5;

/// Default drop-indicator line thickness in pixels.
pub const DEFAULT_INDICATOR_THICKNESS: f32 = 2.0;

/// Recognized drag surface options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Direction-classification dead zone in pixels (default: 30).
    pub threshold: f32,
    /// Restrict which directions a drag may be classified as.
    pub axis: AxisRestriction,
    /// Minimum columns in a column group (default: 2).
    pub min_columns: usize,
    /// Maximum columns in a column group (default: 5).
    pub max_columns: usize,
    /// Drop-indicator line thickness in pixels (default: 2).
    pub indicator_thickness: f32,
    /// Cancel the drag when the pointer leaves the drag surface.
    pub cancel_on_leave: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DIRECTION_THRESHOLD,
            axis: AxisRestriction::Both,
            min_columns: DEFAULT_MIN_COLUMNS,
            max_columns: DEFAULT_MAX_COLUMNS,
            indicator_thickness: DEFAULT_INDICATOR_THICKNESS,
            cancel_on_leave: true,
        }
    }
}

impl DragConfig {
    /// Check every option, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), DragConfigError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(DragConfigError::InvalidThreshold {
                threshold: self.threshold,
            });
        }
        if self.min_columns < 2 || self.max_columns < self.min_columns {
            return Err(DragConfigError::InvalidColumnLimits {
                min: self.min_columns,
                max: self.max_columns,
            });
        }
        if !self.indicator_thickness.is_finite() || self.indicator_thickness <= 0.0 {
            return Err(DragConfigError::InvalidIndicatorThickness {
                thickness: self.indicator_thickness,
            });
        }
        Ok(())
    }

    /// Return `self` if valid.
    pub fn validated(self) -> Result<Self, DragConfigError> {
        self.validate()?;
        Ok(self)
    }

    /// Direction classifier built from `threshold` and `axis`.
    #[must_use]
    pub fn classifier(&self) -> DirectionClassifier {
        DirectionClassifier::new(self.threshold, self.axis)
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, DragConfigError> {
        let config: Self = toml::from_str(s).map_err(DragConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DragConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DragConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, DragConfigError> {
        let config: Self = serde_json::from_str(s).map_err(DragConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DragConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DragConfigError::Io)?;
        Self::from_json_str(&content)
    }
}

/// Configuration construction and loading errors.
#[derive(Debug)]
pub enum DragConfigError {
    InvalidThreshold { threshold: f32 },
    InvalidColumnLimits { min: usize, max: usize },
    InvalidIndicatorThickness { thickness: f32 },
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
}

impl fmt::Display for DragConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidThreshold { threshold } => {
                write!(f, "threshold must be finite and >= 0 (got {threshold})")
            }
            Self::InvalidColumnLimits { min, max } => {
                write!(f, "column limits must satisfy 2 <= min <= max (got {min}..={max})")
            }
            Self::InvalidIndicatorThickness { thickness } => {
                write!(f, "indicator thickness must be > 0 (got {thickness})")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
        }
    }
}

impl std::error::Error for DragConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}
