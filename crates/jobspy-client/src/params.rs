//! Search parameters and their assembly into an engine parameter map.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::table::JsonMap;

pub const DEFAULT_SEARCH_TERM: &str = "Software Engineer";
pub const DEFAULT_LOCATION: &str = "San Francisco, CA";
pub const DEFAULT_COUNTRY_INDEED: &str = "USA";
pub const DEFAULT_RESULTS_WANTED: u32 = 20;
pub const DEFAULT_HOURS_OLD: u32 = 72;
pub const DEFAULT_DISTANCE: u32 = 50;
pub const DEFAULT_VERBOSE: u8 = 2;

/// Job boards the scrape engine knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    Indeed,
    Linkedin,
    ZipRecruiter,
    Glassdoor,
    Google,
    Bayt,
    Naukri,
}

/// Sites searched when the caller does not name any.
pub const DEFAULT_SITES: [Site; 4] = [Site::Indeed, Site::Linkedin, Site::ZipRecruiter, Site::Google];

impl Site {
    pub fn as_str(&self) -> &'static str {
        match self {
            Site::Indeed => "indeed",
            Site::Linkedin => "linkedin",
            Site::ZipRecruiter => "zip_recruiter",
            Site::Glassdoor => "glassdoor",
            Site::Google => "google",
            Site::Bayt => "bayt",
            Site::Naukri => "naukri",
        }
    }
}

impl std::fmt::Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Site {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "indeed" => Ok(Site::Indeed),
            "linkedin" => Ok(Site::Linkedin),
            "zip_recruiter" => Ok(Site::ZipRecruiter),
            "glassdoor" => Ok(Site::Glassdoor),
            "google" => Ok(Site::Google),
            "bayt" => Ok(Site::Bayt),
            "naukri" => Ok(Site::Naukri),
            other => Err(format!("unknown site: {other}")),
        }
    }
}

/// A job search request.
///
/// Every field has a stated default; `is_remote` and `easy_apply` are
/// tri-state (unset / true / false) and are forwarded to the engine only
/// when the caller supplied a value. `extra` holds passthrough overrides
/// merged last — they win over any computed key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub search_term: String,
    pub location: String,
    pub site_name: Option<Vec<Site>>,
    pub country_indeed: String,
    pub results_wanted: u32,
    pub hours_old: u32,
    pub distance: u32,
    pub offset: u32,
    pub job_type: Option<String>,
    pub is_remote: Option<bool>,
    pub easy_apply: Option<bool>,
    pub google_search_term: Option<String>,
    pub linkedin_fetch_description: bool,
    pub enforce_annual_salary: bool,
    pub verbose: u8,
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            search_term: DEFAULT_SEARCH_TERM.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            site_name: None,
            country_indeed: DEFAULT_COUNTRY_INDEED.to_string(),
            results_wanted: DEFAULT_RESULTS_WANTED,
            hours_old: DEFAULT_HOURS_OLD,
            distance: DEFAULT_DISTANCE,
            offset: 0,
            job_type: None,
            is_remote: None,
            easy_apply: None,
            google_search_term: None,
            linkedin_fetch_description: false,
            enforce_annual_salary: false,
            verbose: DEFAULT_VERBOSE,
            extra: JsonMap::new(),
        }
    }
}

impl SearchParams {
    /// The sites the engine will be asked to search.
    pub fn sites(&self) -> Vec<Site> {
        self.site_name
            .clone()
            .unwrap_or_else(|| DEFAULT_SITES.to_vec())
    }

    /// Assemble the parameter map forwarded to the scrape engine.
    ///
    /// Pure data assembly: fills defaults, includes `job_type` only when
    /// non-empty and the tri-state booleans only when set, then merges
    /// `extra` last so colliding keys are overridden.
    pub fn assemble(&self) -> JsonMap {
        let mut params = JsonMap::new();

        let google_search_term = self
            .google_search_term
            .as_deref()
            .filter(|term| !term.is_empty())
            .unwrap_or(&self.search_term);

        params.insert("site_name".to_string(), json!(self.sites()));
        params.insert("search_term".to_string(), json!(self.search_term));
        params.insert("google_search_term".to_string(), json!(google_search_term));
        params.insert("location".to_string(), json!(self.location));
        params.insert("country_indeed".to_string(), json!(self.country_indeed));
        params.insert("results_wanted".to_string(), json!(self.results_wanted));
        params.insert("hours_old".to_string(), json!(self.hours_old));
        params.insert("distance".to_string(), json!(self.distance));
        params.insert("offset".to_string(), json!(self.offset));
        params.insert("verbose".to_string(), json!(self.verbose));
        params.insert(
            "enforce_annual_salary".to_string(),
            json!(self.enforce_annual_salary),
        );
        params.insert(
            "linkedin_fetch_description".to_string(),
            json!(self.linkedin_fetch_description),
        );

        if let Some(job_type) = self.job_type.as_deref().filter(|jt| !jt.is_empty()) {
            params.insert("job_type".to_string(), json!(job_type));
        }
        if let Some(is_remote) = self.is_remote {
            params.insert("is_remote".to_string(), json!(is_remote));
        }
        if let Some(easy_apply) = self.easy_apply {
            params.insert("easy_apply".to_string(), json!(easy_apply));
        }

        for (key, value) in &self.extra {
            params.insert(key.clone(), value.clone());
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_every_scalar() {
        let params = SearchParams::default().assemble();

        assert_eq!(params["search_term"], json!("Software Engineer"));
        assert_eq!(params["location"], json!("San Francisco, CA"));
        assert_eq!(
            params["site_name"],
            json!(["indeed", "linkedin", "zip_recruiter", "google"])
        );
        assert_eq!(params["country_indeed"], json!("USA"));
        assert_eq!(params["results_wanted"], json!(20));
        assert_eq!(params["hours_old"], json!(72));
        assert_eq!(params["distance"], json!(50));
        assert_eq!(params["offset"], json!(0));
        assert_eq!(params["verbose"], json!(2));
        assert_eq!(params["enforce_annual_salary"], json!(false));
        assert_eq!(params["linkedin_fetch_description"], json!(false));
    }

    #[test]
    fn google_search_term_falls_back_to_search_term() {
        let mut request = SearchParams {
            search_term: "Data Scientist".to_string(),
            ..Default::default()
        };
        assert_eq!(
            request.assemble()["google_search_term"],
            json!("Data Scientist")
        );

        // Empty string is treated like unset.
        request.google_search_term = Some(String::new());
        assert_eq!(
            request.assemble()["google_search_term"],
            json!("Data Scientist")
        );

        request.google_search_term = Some("data scientist jobs near me".to_string());
        assert_eq!(
            request.assemble()["google_search_term"],
            json!("data scientist jobs near me")
        );
    }

    #[test]
    fn tristate_booleans_are_omitted_until_set() {
        let mut request = SearchParams::default();
        let params = request.assemble();
        assert!(!params.contains_key("is_remote"));
        assert!(!params.contains_key("easy_apply"));

        // An explicit false must be forwarded, not dropped.
        request.is_remote = Some(false);
        request.easy_apply = Some(true);
        let params = request.assemble();
        assert_eq!(params["is_remote"], json!(false));
        assert_eq!(params["easy_apply"], json!(true));
    }

    #[test]
    fn empty_job_type_is_omitted() {
        let mut request = SearchParams {
            job_type: Some(String::new()),
            ..Default::default()
        };
        assert!(!request.assemble().contains_key("job_type"));

        request.job_type = Some("fulltime".to_string());
        assert_eq!(request.assemble()["job_type"], json!("fulltime"));
    }

    #[test]
    fn explicit_site_list_is_kept_verbatim() {
        let request = SearchParams {
            site_name: Some(vec![Site::Indeed]),
            ..Default::default()
        };
        assert_eq!(request.assemble()["site_name"], json!(["indeed"]));
    }

    #[test]
    fn extra_overrides_win_on_collision() {
        let mut extra = JsonMap::new();
        extra.insert("results_wanted".to_string(), json!(99));
        extra.insert("proxies".to_string(), json!(["10.0.0.1:8080"]));

        let request = SearchParams {
            extra,
            ..Default::default()
        };
        let params = request.assemble();
        assert_eq!(params["results_wanted"], json!(99));
        assert_eq!(params["proxies"], json!(["10.0.0.1:8080"]));
    }

    #[test]
    fn site_round_trips_through_fromstr_and_display() {
        for site in [
            Site::Indeed,
            Site::Linkedin,
            Site::ZipRecruiter,
            Site::Glassdoor,
            Site::Google,
            Site::Bayt,
            Site::Naukri,
        ] {
            assert_eq!(site.to_string().parse::<Site>(), Ok(site));
        }
        assert!("monster".parse::<Site>().is_err());
    }

    #[test]
    fn params_deserialize_collects_unknown_keys_into_extra() {
        let request: SearchParams = serde_json::from_value(json!({
            "search_term": "Rust Engineer",
            "is_remote": false,
            "proxies": ["10.0.0.1:8080"]
        }))
        .unwrap();

        assert_eq!(request.search_term, "Rust Engineer");
        assert_eq!(request.is_remote, Some(false));
        assert_eq!(request.extra["proxies"], json!(["10.0.0.1:8080"]));
    }
}
