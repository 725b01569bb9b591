use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};
use waypoint_providers::{
    config::DEFAULT_REQUEST_TIMEOUT,
    directions_provider::{DirectionsProvider, LegCostText},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LegCostResult {
    Found(LegCostText),
    NoRoute,
}

/// Authoritative driving cost of a directed leg.
///
/// Every failure of the underlying provider, including a timeout, is
/// reported as [`LegCostResult::NoRoute`].
pub struct LegCost<D> {
    provider: D,
    timeout: Duration,
}

impl<D: DirectionsProvider> LegCost<D> {
    pub fn new(provider: D) -> Self {
        Self {
            provider,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn query(&self, from: &str, to: &str) -> LegCostResult {
        match tokio::time::timeout(self.timeout, self.provider.directions(from, to)).await {
            Ok(Ok(Some(cost))) => {
                debug!(
                    "LegCost: {} -> {}: {}, {}",
                    from, to, cost.duration_text, cost.distance_text
                );
                LegCostResult::Found(cost)
            }
            Ok(Ok(None)) => {
                warn!(from, to, "LegCost: no route");
                LegCostResult::NoRoute
            }
            Ok(Err(err)) => {
                warn!(from, to, "LegCost: directions failed: {}", err);
                LegCostResult::NoRoute
            }
            Err(_) => {
                warn!(from, to, "LegCost: directions timed out after {:?}", self.timeout);
                LegCostResult::NoRoute
            }
        }
    }
}
