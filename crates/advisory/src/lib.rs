use std::sync::Arc;

use async_trait::async_trait;
use shared::domain::SoilMetrics;

mod local;
mod remote;

pub use local::LocalAdvisory;
pub use remote::{RemoteAdvisory, RemoteCredentials, ANALYSIS_UNAVAILABLE};

/// Turns a completed soil reading into operator-facing advisory text.
///
/// Infallible by contract: implementations absorb their own failures and
/// always hand text back, so scan orchestration never stalls on analysis.
#[async_trait]
pub trait AdvisoryProvider: Send + Sync {
    async fn analyze(&self, metrics: &SoilMetrics) -> String;
}

/// Picks the analysis strategy once, at construction. A configured remote
/// credential selects the external service; its absence downgrades to the
/// deterministic local rule engine rather than failing.
pub fn select_provider(credentials: Option<RemoteCredentials>) -> Arc<dyn AdvisoryProvider> {
    match credentials {
        Some(credentials) => Arc::new(RemoteAdvisory::new(credentials)),
        None => Arc::new(LocalAdvisory),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
