//! The plain call surface: assemble parameters, call the engine, shape the
//! result.

use crate::engine::ScrapeEngine;
use crate::params::SearchParams;
use crate::report::ScrapeReport;

/// Run one scrape. Never returns an error — every engine failure is caught
/// here and folded into a `success=false` report.
pub async fn scrape_jobs(engine: &dyn ScrapeEngine, params: &SearchParams) -> ScrapeReport {
    let assembled = params.assemble();

    match engine.scrape(&assembled).await {
        Ok(table) if table.is_empty() => ScrapeReport::empty(),
        Ok(table) => ScrapeReport::from_table(&table),
        Err(error) => ScrapeReport::failure(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::*;
    use crate::report::NO_JOBS_MESSAGE;
    use crate::table::{JobTable, JsonMap};

    enum Outcome {
        Rows(Vec<JsonMap>),
        Fail(String),
    }

    struct StubEngine {
        outcome: Outcome,
        seen: Mutex<Vec<JsonMap>>,
    }

    impl StubEngine {
        fn rows(records: Vec<JsonMap>) -> Self {
            Self {
                outcome: Outcome::Rows(records),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                outcome: Outcome::Fail(message.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn last_params(&self) -> JsonMap {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl ScrapeEngine for StubEngine {
        async fn scrape(&self, params: &JsonMap) -> anyhow::Result<JobTable> {
            self.seen.lock().unwrap().push(params.clone());
            match &self.outcome {
                Outcome::Rows(records) => Ok(JobTable::from_records(records.clone())),
                Outcome::Fail(message) => Err(anyhow::anyhow!("{message}")),
            }
        }
    }

    fn record(pairs: &[(&str, Value)]) -> JsonMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn populated_result_is_reported_in_row_order() {
        let engine = StubEngine::rows(vec![
            record(&[("title", json!("SRE")), ("company", json!("Acme"))]),
            record(&[("title", json!("Backend")), ("company", json!("Globex"))]),
        ]);

        let report = scrape_jobs(&engine, &SearchParams::default()).await;
        assert!(report.success);
        assert_eq!(report.count, Some(2));
        let data = report.data.unwrap();
        assert_eq!(data[0]["title"], json!("SRE"));
        assert_eq!(data[1]["title"], json!("Backend"));
    }

    #[tokio::test]
    async fn zero_rows_become_the_empty_report() {
        let engine = StubEngine::rows(Vec::new());

        let report = scrape_jobs(&engine, &SearchParams::default()).await;
        assert!(report.success);
        assert_eq!(report.count, Some(0));
        assert_eq!(report.data, Some(Vec::new()));
        assert_eq!(report.message.as_deref(), Some(NO_JOBS_MESSAGE));
        assert!(report.metadata.is_none());
    }

    #[tokio::test]
    async fn engine_failure_is_caught_and_stringified() {
        let engine = StubEngine::failing("Connection refused (os error 111)");

        let report = scrape_jobs(&engine, &SearchParams::default()).await;
        assert!(!report.success);
        assert!(report
            .error
            .as_deref()
            .unwrap()
            .contains("Connection refused"));
        assert!(report.count.is_none());
        assert!(report.data.is_none());
    }

    #[tokio::test]
    async fn assembled_parameters_reach_the_engine() {
        let engine = StubEngine::rows(Vec::new());
        let params = SearchParams {
            search_term: "Data Scientist".to_string(),
            location: "Remote".to_string(),
            site_name: Some(vec![crate::params::Site::Indeed]),
            results_wanted: 5,
            is_remote: Some(true),
            ..Default::default()
        };

        scrape_jobs(&engine, &params).await;

        let seen = engine.last_params();
        assert_eq!(seen["search_term"], json!("Data Scientist"));
        assert_eq!(seen["site_name"], json!(["indeed"]));
        assert_eq!(seen["results_wanted"], json!(5));
        assert_eq!(seen["is_remote"], json!(true));
        assert!(!seen.contains_key("easy_apply"));
    }
}
