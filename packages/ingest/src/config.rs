//! Validator configuration, loadable from a TOML file.
//!
//! Every knob defaults to the documented contract (NYC bounding box,
//! flag-don't-drop policy), so running without a config file enforces the
//! schema exactly as written.

use std::path::Path;

use collision_map_models::InvalidRowPolicy;
use serde::{Deserialize, Serialize};

use crate::IngestError;

/// Geographic bounding box a record must fall inside to be considered
/// geographically valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl GeoBounds {
    /// The documented NYC bounding box.
    pub const NYC: Self = Self {
        lat_min: 40.5,
        lat_max: 40.9,
        lng_min: -74.3,
        lng_max: -73.7,
    };

    /// Whether the coordinate pair falls inside this box (inclusive).
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&latitude)
            && (self.lng_min..=self.lng_max).contains(&longitude)
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self::NYC
    }
}

/// Validator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Bounding box for the coordinate check.
    pub bounds: GeoBounds,
    /// What to do with rows that carry violation tags.
    pub policy: InvalidRowPolicy,
}

impl ValidatorConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Config`] if the TOML is malformed.
    pub fn from_toml_str(text: &str) -> Result<Self, IngestError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a config file, falling back to defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, IngestError> {
        match path {
            Some(path) => {
                log::info!("Loading validator config from {}", path.display());
                Self::from_toml_str(&std::fs::read_to_string(path)?)
            }
            None => Ok(Self::default()),
        }
    }
}
