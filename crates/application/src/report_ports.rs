use std::collections::HashMap;

use async_trait::async_trait;

use cadence_core::AuditResult;
use cadence_domain::{FrequencyFamily, ObservedRecord, TimeWindow};

/// Read-only port over the store of observed report events.
///
/// One batched call serves a whole frequency partition, so external
/// round-trips stay bounded by the number of families, not the number of
/// jobs. Adapters query at the family's stamp granularity;
/// [`TimeWindow::query_bounds`] supplies the canonical bounds.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Returns, for each named job with at least one report inside the
    /// window, its distinct observed stamps. Jobs with no reports are
    /// simply absent from the map.
    async fn fetch_observed(
        &self,
        family: FrequencyFamily,
        job_names: &[String],
        window: &TimeWindow,
    ) -> AuditResult<HashMap<String, ObservedRecord>>;
}
