//! Scrape report shaping — the JSON structure handed back to callers.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::table::{JobTable, JsonMap};

/// Message attached when the engine returns zero rows.
pub const NO_JOBS_MESSAGE: &str = "No jobs found. Try adjusting your filters.";

/// How many cities the `top_locations` frequency map keeps.
const TOP_LOCATIONS_LIMIT: usize = 10;

/// Result of one scrape call. Exactly one of three shapes:
///
/// - failure: `success=false`, `error` set, nothing else;
/// - empty: `success=true`, `count=0`, `data=[]`, `message` set;
/// - populated: `success=true`, `count`, `data` and `metadata` set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeReport {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<JsonMap>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ReportMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary metrics over a populated result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Distinct non-null "company" values, or null when the column is absent.
    pub unique_companies: Option<u64>,
    /// City → occurrence count, at most the top ten by count. Empty when
    /// the result has no "city" column.
    pub top_locations: JsonMap,
}

impl ScrapeReport {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            count: None,
            data: None,
            metadata: None,
            message: None,
            error: Some(error.into()),
        }
    }

    pub fn empty() -> Self {
        Self {
            success: true,
            count: Some(0),
            data: Some(Vec::new()),
            metadata: None,
            message: Some(NO_JOBS_MESSAGE.to_string()),
            error: None,
        }
    }

    pub fn from_table(table: &JobTable) -> Self {
        Self {
            success: true,
            count: Some(table.len()),
            data: Some(table.records()),
            metadata: Some(ReportMetadata::from_table(table)),
            message: None,
            error: None,
        }
    }
}

impl ReportMetadata {
    pub fn from_table(table: &JobTable) -> Self {
        Self {
            unique_companies: unique_companies(table),
            top_locations: top_locations(table),
        }
    }
}

fn unique_companies(table: &JobTable) -> Option<u64> {
    let values = table.column("company")?;
    let distinct: BTreeSet<String> = values
        .into_iter()
        .filter(|v| !v.is_null())
        .map(cell_key)
        .collect();
    Some(distinct.len() as u64)
}

fn top_locations(table: &JobTable) -> JsonMap {
    let Some(values) = table.column("city") else {
        return JsonMap::new();
    };

    // Count in first-appearance order so equal counts keep a stable order
    // after the sort below.
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u64> = HashMap::new();
    for value in values {
        if value.is_null() {
            continue;
        }
        let city = cell_key(value);
        if !counts.contains_key(&city) {
            order.push(city.clone());
        }
        *counts.entry(city).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, u64)> = order
        .into_iter()
        .map(|city| {
            let count = counts[&city];
            (city, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_LOCATIONS_LIMIT);

    ranked
        .into_iter()
        .map(|(city, count)| (city, json!(count)))
        .collect()
}

fn cell_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, Value)]) -> JsonMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn company_table(companies: &[&str]) -> JobTable {
        JobTable::from_records(
            companies
                .iter()
                .map(|c| record(&[("title", json!("role")), ("company", json!(c))]))
                .collect(),
        )
    }

    #[test]
    fn failure_report_carries_only_error() {
        let report = ScrapeReport::failure("connection reset by peer");
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"], json!("connection reset by peer"));
        let fields: Vec<_> = value.as_object().unwrap().keys().collect();
        assert_eq!(fields, ["success", "error"]);
    }

    #[test]
    fn empty_report_has_message_and_no_metadata() {
        let report = ScrapeReport::empty();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["count"], json!(0));
        assert_eq!(value["data"], json!([]));
        assert_eq!(value["message"], json!(NO_JOBS_MESSAGE));
        assert!(value.get("metadata").is_none());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn populated_report_counts_and_orders_rows() {
        let table = company_table(&["A", "A", "B", "C", "D"]);
        let report = ScrapeReport::from_table(&table);

        assert!(report.success);
        assert_eq!(report.count, Some(5));
        assert_eq!(report.data.as_ref().unwrap().len(), 5);
        assert!(report.message.is_none());
        assert!(report.error.is_none());

        let metadata = report.metadata.unwrap();
        assert_eq!(metadata.unique_companies, Some(3));
        assert!(metadata.top_locations.is_empty());
    }

    #[test]
    fn unique_companies_is_null_without_the_column() {
        let table = JobTable::from_records(vec![record(&[("title", json!("role"))])]);
        let metadata = ReportMetadata::from_table(&table);

        assert_eq!(metadata.unique_companies, None);
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["unique_companies"], Value::Null);
    }

    #[test]
    fn unique_companies_skips_null_cells() {
        let table = JobTable::from_records(vec![
            record(&[("company", json!("Acme"))]),
            record(&[("company", Value::Null)]),
            record(&[("company", json!("Acme"))]),
        ]);
        assert_eq!(ReportMetadata::from_table(&table).unique_companies, Some(1));
    }

    #[test]
    fn top_locations_ranks_by_count() {
        let cities = ["Austin", "Boston", "Austin", "Chicago", "Austin", "Boston"];
        let table = JobTable::from_records(
            cities
                .iter()
                .map(|c| record(&[("city", json!(c))]))
                .collect(),
        );

        let locations = ReportMetadata::from_table(&table).top_locations;
        let entries: Vec<_> = locations.iter().collect();
        assert_eq!(entries[0], (&"Austin".to_string(), &json!(3)));
        assert_eq!(entries[1], (&"Boston".to_string(), &json!(2)));
        assert_eq!(entries[2], (&"Chicago".to_string(), &json!(1)));
    }

    #[test]
    fn top_locations_is_capped_at_ten() {
        let table = JobTable::from_records(
            (0..15)
                .map(|i| record(&[("city", json!(format!("city-{i}")))]))
                .collect(),
        );
        assert_eq!(ReportMetadata::from_table(&table).top_locations.len(), 10);
    }

    #[test]
    fn top_locations_ignores_null_cities() {
        let table = JobTable::from_records(vec![
            record(&[("city", json!("Austin"))]),
            record(&[("city", Value::Null)]),
        ]);

        let locations = ReportMetadata::from_table(&table).top_locations;
        assert_eq!(locations.len(), 1);
        assert_eq!(locations["Austin"], json!(1));
    }
}
