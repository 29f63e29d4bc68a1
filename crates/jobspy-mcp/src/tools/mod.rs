//! MCP tool implementations.

pub mod jobspy_scraper;
pub mod registry;

pub use registry::ToolRegistry;
