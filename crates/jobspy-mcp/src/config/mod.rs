//! Configuration loading and resolution.

/// Default JobSpy-compatible scrape endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/api/v1/search_jobs";

/// Resolve the scrape endpoint: explicit value, then the JOBSPY_API_URL
/// environment variable, then the default.
pub fn resolve_endpoint(explicit: Option<&str>) -> String {
    if let Some(endpoint) = explicit {
        return endpoint.to_string();
    }

    if let Ok(env_endpoint) = std::env::var("JOBSPY_API_URL") {
        return env_endpoint;
    }

    DEFAULT_ENDPOINT.to_string()
}
