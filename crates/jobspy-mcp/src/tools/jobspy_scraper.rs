//! Tool: jobspy_scraper — search job boards through the scrape engine.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use jobspy_client::params::{
    DEFAULT_COUNTRY_INDEED, DEFAULT_DISTANCE, DEFAULT_HOURS_OLD, DEFAULT_LOCATION,
    DEFAULT_RESULTS_WANTED, DEFAULT_SEARCH_TERM, DEFAULT_VERBOSE,
};
use jobspy_client::{scrape_jobs, JsonMap, ScrapeEngine, SearchParams, Site};

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

/// The fixed search parameter set — unlike the library surface there is no
/// open-ended override passthrough here.
#[derive(Debug, Deserialize)]
struct ScraperParams {
    #[serde(default = "default_search_term")]
    search_term: String,
    #[serde(default = "default_location")]
    location: String,
    #[serde(default)]
    site_name: Option<Vec<Site>>,
    #[serde(default = "default_country_indeed")]
    country_indeed: String,
    #[serde(default = "default_results_wanted")]
    results_wanted: u32,
    #[serde(default = "default_hours_old")]
    hours_old: u32,
    #[serde(default = "default_distance")]
    distance: u32,
    #[serde(default)]
    offset: u32,
    #[serde(default)]
    job_type: Option<String>,
    #[serde(default)]
    is_remote: Option<bool>,
    #[serde(default)]
    easy_apply: Option<bool>,
    #[serde(default)]
    google_search_term: Option<String>,
    #[serde(default)]
    linkedin_fetch_description: bool,
    #[serde(default)]
    enforce_annual_salary: bool,
    #[serde(default = "default_verbose")]
    verbose: u8,
}

fn default_search_term() -> String {
    DEFAULT_SEARCH_TERM.to_string()
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_country_indeed() -> String {
    DEFAULT_COUNTRY_INDEED.to_string()
}

fn default_results_wanted() -> u32 {
    DEFAULT_RESULTS_WANTED
}

fn default_hours_old() -> u32 {
    DEFAULT_HOURS_OLD
}

fn default_distance() -> u32 {
    DEFAULT_DISTANCE
}

fn default_verbose() -> u8 {
    DEFAULT_VERBOSE
}

impl ScraperParams {
    fn into_params(self) -> SearchParams {
        SearchParams {
            search_term: self.search_term,
            location: self.location,
            site_name: self.site_name,
            country_indeed: self.country_indeed,
            results_wanted: self.results_wanted,
            hours_old: self.hours_old,
            distance: self.distance,
            offset: self.offset,
            job_type: self.job_type,
            is_remote: self.is_remote,
            easy_apply: self.easy_apply,
            google_search_term: self.google_search_term,
            linkedin_fetch_description: self.linkedin_fetch_description,
            enforce_annual_salary: self.enforce_annual_salary,
            verbose: self.verbose,
            extra: JsonMap::new(),
        }
    }
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "jobspy_scraper".to_string(),
        description: Some(
            "Scrapes job listings from multiple sources using JobSpy and returns results as JSON."
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "search_term": {
                    "type": "string",
                    "description": "Main keyword for the job search",
                    "default": DEFAULT_SEARCH_TERM
                },
                "location": {
                    "type": "string",
                    "description": "Location for the search (e.g. \"New York, NY\")",
                    "default": DEFAULT_LOCATION
                },
                "site_name": {
                    "type": "array",
                    "items": {
                        "type": "string",
                        "enum": ["indeed", "linkedin", "zip_recruiter", "glassdoor", "google", "bayt", "naukri"]
                    },
                    "description": "Job sites to scrape; defaults to indeed, linkedin, zip_recruiter and google"
                },
                "country_indeed": {
                    "type": "string",
                    "description": "Country for Indeed/Glassdoor searches",
                    "default": DEFAULT_COUNTRY_INDEED
                },
                "results_wanted": { "type": "integer", "minimum": 0, "default": DEFAULT_RESULTS_WANTED },
                "hours_old": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Only postings newer than this many hours",
                    "default": DEFAULT_HOURS_OLD
                },
                "distance": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Search radius in miles",
                    "default": DEFAULT_DISTANCE
                },
                "offset": { "type": "integer", "minimum": 0, "description": "Skip the first N results", "default": 0 },
                "job_type": {
                    "type": "string",
                    "description": "Job type filter (e.g. \"fulltime\", \"internship\"); omitted when empty"
                },
                "is_remote": { "type": "boolean", "description": "Only include remote jobs; omitted unless set" },
                "easy_apply": { "type": "boolean", "description": "Filter for easy-apply jobs; omitted unless set" },
                "google_search_term": {
                    "type": "string",
                    "description": "Special query for Google Jobs; falls back to search_term"
                },
                "linkedin_fetch_description": {
                    "type": "boolean",
                    "description": "Fetch full LinkedIn job descriptions (slower)",
                    "default": false
                },
                "enforce_annual_salary": {
                    "type": "boolean",
                    "description": "Convert pay to annual salary",
                    "default": false
                },
                "verbose": { "type": "integer", "minimum": 0, "maximum": 2, "default": DEFAULT_VERBOSE }
            }
        }),
    }
}

pub async fn execute(args: Value, engine: &Arc<dyn ScrapeEngine>) -> McpResult<ToolCallResult> {
    let params: ScraperParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;
    let request = params.into_params();

    let sites = request
        .sites()
        .iter()
        .map(Site::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    tracing::info!(
        "Searching '{}' jobs in {} across {sites}",
        request.search_term,
        request.location
    );

    let report = scrape_jobs(engine.as_ref(), &request).await;

    if !report.success {
        tracing::error!(
            "JobSpy scraping failed: {}",
            report.error.as_deref().unwrap_or("unknown error")
        );
    } else if report.count == Some(0) {
        tracing::warn!("No jobs found for given parameters");
    } else {
        tracing::info!(
            "Found {} jobs for '{}'",
            report.count.unwrap_or(0),
            request.search_term
        );
    }

    Ok(ToolCallResult::json(&report))
}
