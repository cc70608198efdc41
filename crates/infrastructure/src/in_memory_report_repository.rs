use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use cadence_application::ReportRepository;
use cadence_core::AuditResult;
use cadence_domain::{FrequencyFamily, ObservedRecord, TimeWindow};


#[derive(Debug, Clone)]
struct ReportRow {
    job_name: String,
    family: FrequencyFamily,
    report_time: String,
}

/// In-memory observed-data adapter.
///
/// Reference implementation of [`ReportRepository`] backing the tests; a
/// production deployment points the port at its own report-event store.
/// Stamps are compared lexicographically against the window's per-family
/// bounds, which is equivalent to chronological order for canonical
/// zero-padded stamps.
#[derive(Debug, Default)]
pub struct InMemoryReportRepository {
    rows: RwLock<Vec<ReportRow>>,
}

impl InMemoryReportRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Records one report event for a job at the family's stamp
    /// granularity.
    pub async fn record_report(
        &self,
        job_name: impl Into<String>,
        family: FrequencyFamily,
        report_time: impl Into<String>,
    ) {
        self.rows.write().await.push(ReportRow {
            job_name: job_name.into(),
            family,
            report_time: report_time.into(),
        });
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn fetch_observed(
        &self,
        family: FrequencyFamily,
        job_names: &[String],
        window: &TimeWindow,
    ) -> AuditResult<HashMap<String, ObservedRecord>> {
        let (low, high) = window.query_bounds(family);
        let rows = self.rows.read().await;

        let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
        for row in rows.iter() {
            if row.family != family
                || row.report_time.as_str() < low.as_str()
                || row.report_time.as_str() > high.as_str()
                || !job_names.contains(&row.job_name)
            {
                continue;
            }

            grouped
                .entry(row.job_name.clone())
                .or_default()
                .push(row.report_time.clone());
        }

        Ok(grouped
            .into_iter()
            .map(|(job_name, stamps)| (job_name, ObservedRecord::new(stamps)))
            .collect())
    }
}
