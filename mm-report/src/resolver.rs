//! Report resolution: cache first, origin on a full miss

use tracing::debug;

use mm_common::{BirthProfile, ReportKey, ReportPayload};

use crate::cache::{ReportCache, Tier};
use crate::origin::{OriginClient, OriginError};

/// Where a resolved report came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    Hot,
    Warm,
    Origin,
}

impl From<Tier> for ReportSource {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Hot => ReportSource::Hot,
            Tier::Warm => ReportSource::Warm,
        }
    }
}

/// Resolves one profile's report through the cache tiers and origin engine
#[derive(Clone)]
pub struct ReportResolver {
    cache: ReportCache,
    origin: OriginClient,
}

impl ReportResolver {
    pub fn new(cache: ReportCache, origin: OriginClient) -> Self {
        Self { cache, origin }
    }

    /// Resolve the report for `profile`
    ///
    /// On an origin fetch the payload is scheduled for write-back before it
    /// is returned. Origin failures schedule nothing.
    pub async fn resolve(
        &self,
        profile: &BirthProfile,
    ) -> Result<(ReportPayload, ReportSource), OriginError> {
        let key = ReportKey::derive(profile);

        if let Some(hit) = self.cache.lookup(&key).await {
            debug!(key = %key, tier = %hit.tier, "Report served from cache");
            return Ok((hit.payload, hit.tier.into()));
        }

        let payload = self.origin.fetch(profile).await?;
        debug!(key = %key, bytes = payload.len(), "Report computed by engine");

        self.cache.write_back(key, payload.clone());
        Ok((payload, ReportSource::Origin))
    }
}
