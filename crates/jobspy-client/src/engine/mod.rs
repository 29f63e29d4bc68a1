//! The external scrape engine seam.

pub mod http;

use async_trait::async_trait;

use crate::table::{JobTable, JsonMap};

pub use http::{EngineError, HttpScrapeEngine};

/// One operation: given an assembled parameter map, return a tabular result
/// set or fail. The error side is deliberately the catch-all `anyhow::Error`
/// — the engine may fail for any reason (network, adapter, validation) and
/// callers never distinguish subtypes.
#[async_trait]
pub trait ScrapeEngine: Send + Sync {
    async fn scrape(&self, params: &JsonMap) -> anyhow::Result<JobTable>;
}
