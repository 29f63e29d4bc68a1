//! JobSpy client — search parameter assembly, tabular results, and report shaping
//! around an external job-board scrape engine.

pub mod engine;
pub mod params;
pub mod report;
pub mod scrape;
pub mod table;

pub use engine::{EngineError, HttpScrapeEngine, ScrapeEngine};
pub use params::{SearchParams, Site, DEFAULT_SITES};
pub use report::{ReportMetadata, ScrapeReport, NO_JOBS_MESSAGE};
pub use scrape::scrape_jobs;
pub use table::{JobTable, JsonMap};
