//! Birth profile value type
//!
//! A `BirthProfile` is the only input to report generation. Profiles are
//! immutable once deserialized; validation happens at the service boundary
//! before any cache or origin call is made.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Birth details identifying one person's report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthProfile {
    /// Date of birth (free-form date string, e.g. "2000-01-01")
    pub dob: String,
    /// Time of birth, "HH:MM:SS"
    pub tob: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

impl BirthProfile {
    pub fn new(dob: impl Into<String>, tob: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            dob: dob.into(),
            tob: tob.into(),
            lat,
            lon,
        }
    }

    /// Check field contents beyond what deserialization guarantees
    ///
    /// Rejects blank dates, times not in `HH:MM:SS` form, and coordinates
    /// outside the valid latitude/longitude ranges.
    pub fn validate(&self) -> Result<()> {
        if self.dob.trim().is_empty() {
            return Err(Error::InvalidInput("dob must not be empty".to_string()));
        }

        if NaiveTime::parse_from_str(&self.tob, "%H:%M:%S").is_err() || self.tob.len() != 8 {
            return Err(Error::InvalidInput(format!(
                "tob must be HH:MM:SS, got {:?}",
                self.tob
            )));
        }

        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidInput(format!(
                "lat out of range: {}",
                self.lat
            )));
        }

        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(Error::InvalidInput(format!(
                "lon out of range: {}",
                self.lon
            )));
        }

        Ok(())
    }
}
