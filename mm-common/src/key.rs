//! Report key derivation
//!
//! A report key is the SHA-256 fingerprint of a birth profile, rendered as
//! 64 lowercase hex characters. The pre-image is
//! `"{dob}:{tob}:{lat:.8}:{lon:.8}"`; the 8-decimal coordinate formatting is
//! part of the key contract, so keys already stored in the cache tiers stay
//! addressable.

use sha2::{Digest, Sha256};
use std::fmt;

use crate::BirthProfile;

/// Length of a rendered report key
pub const REPORT_KEY_LEN: usize = 64;

/// Deterministic fingerprint identifying a cached report
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportKey(String);

impl ReportKey {
    /// Derive the key for a profile
    pub fn derive(profile: &BirthProfile) -> Self {
        let preimage = format!(
            "{}:{}:{:.8}:{:.8}",
            profile.dob, profile.tob, profile.lat, profile.lon
        );

        let mut hasher = Sha256::new();
        hasher.update(preimage.as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&BirthProfile> for ReportKey {
    fn from(profile: &BirthProfile) -> Self {
        Self::derive(profile)
    }
}

impl fmt::Display for ReportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReportKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
