//! JobSpy MCP Server — job-board scraping as an agent tool.

pub mod config;
pub mod protocol;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::resolve_endpoint;
pub use protocol::ProtocolHandler;
pub use transport::StdioTransport;
