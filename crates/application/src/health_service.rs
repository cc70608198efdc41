use std::sync::Arc;

use tracing::warn;

use cadence_domain::{
    FrequencyFamily, FrequencySpec, Job, JobHealth, MonthlyGranularity, ObservedRecord, TimeWindow,
    absent_entries, expected_days, expected_hours, expected_months, expected_weekly_slots,
    infer_monthly_granularity, parse_report_stamp,
};

use crate::report_ports::ReportRepository;

#[cfg(test)]
mod tests;

/// Audits a job catalog for missing reports inside a window.
///
/// The entry point an external API layer calls. Stateless across
/// invocations; auditing the same jobs, window, and storage state twice
/// yields identical results.
pub struct HealthCheckService {
    reports: Arc<dyn ReportRepository>,
}

impl HealthCheckService {
    /// Creates the service over an observed-data backend.
    #[must_use]
    pub fn new(reports: Arc<dyn ReportRepository>) -> Self {
        Self { reports }
    }

    /// Audits every job against the window and returns one report per job.
    ///
    /// Jobs are partitioned by frequency family and each non-empty
    /// partition performs exactly one batched fetch. A failed fetch marks
    /// only that partition's jobs [`cadence_domain::HealthStatus::Unknown`];
    /// the remaining partitions still complete. Within a partition the
    /// input order is preserved; jobs with unrecognized frequencies are
    /// appended last.
    pub async fn audit(&self, jobs: &[Job], window: &TimeWindow) -> Vec<JobHealth> {
        let mut classified = Vec::with_capacity(jobs.len());
        let mut unrecognized = Vec::new();
        for job in jobs {
            match FrequencySpec::parse(job.frequency_raw()) {
                Ok(spec) => classified.push((job, spec)),
                Err(_) => unrecognized.push(job),
            }
        }

        let mut results = Vec::with_capacity(jobs.len());
        for family in FrequencyFamily::ALL {
            let partition: Vec<(&Job, FrequencySpec)> = classified
                .iter()
                .filter(|(_, spec)| spec.family() == family)
                .map(|(job, spec)| (*job, *spec))
                .collect();

            if partition.is_empty() {
                continue;
            }

            results.extend(self.audit_partition(family, &partition, window).await);
        }

        results.extend(
            unrecognized
                .into_iter()
                .map(|job| JobHealth::unrecognized(job.name(), job.frequency_raw())),
        );

        results
    }

    async fn audit_partition(
        &self,
        family: FrequencyFamily,
        partition: &[(&Job, FrequencySpec)],
        window: &TimeWindow,
    ) -> Vec<JobHealth> {
        let job_names: Vec<String> = partition
            .iter()
            .map(|(job, _)| job.name().to_owned())
            .collect();

        let observed = match self.reports.fetch_observed(family, &job_names, window).await {
            Ok(observed) => observed,
            Err(error) => {
                warn!(
                    family = family.as_str(),
                    %error,
                    "partition fetch failed, reporting its jobs as unknown"
                );
                return partition
                    .iter()
                    .map(|(job, _)| JobHealth::unknown(job.name(), job.frequency_raw()))
                    .collect();
            }
        };

        partition
            .iter()
            .map(|(job, spec)| job_report(job, *spec, observed.get(job.name()), window))
            .collect()
    }
}

fn job_report(
    job: &Job,
    spec: FrequencySpec,
    observed: Option<&ObservedRecord>,
    window: &TimeWindow,
) -> JobHealth {
    match spec.family() {
        FrequencyFamily::Hourly => {
            let calendar = expected_hours(window, spec.interval());
            diffed(job, &calendar, observed)
        }
        FrequencyFamily::Daily => {
            let calendar = expected_days(window, spec.interval());
            diffed(job, &calendar, observed)
        }
        FrequencyFamily::Weekly => {
            let Some(baseline) = observed.and_then(ObservedRecord::earliest) else {
                return JobHealth::no_history(job.name(), job.frequency_raw());
            };

            match parse_report_stamp(baseline) {
                Ok(baseline) => {
                    let calendar = expected_weekly_slots(window, spec.interval(), baseline);
                    diffed(job, &calendar, observed)
                }
                Err(error) => {
                    warn!(job = job.name(), %error, "stored baseline stamp is malformed");
                    JobHealth::unknown(job.name(), job.frequency_raw())
                }
            }
        }
        FrequencyFamily::Monthly => {
            let sample = observed.and_then(ObservedRecord::earliest);
            let granularity = infer_monthly_granularity(sample);
            if granularity == MonthlyGranularity::Unknown {
                return JobHealth::no_history(job.name(), job.frequency_raw());
            }

            let calendar = expected_months(window, granularity);
            diffed(job, &calendar, observed)
        }
    }
}

fn diffed(job: &Job, calendar: &[String], observed: Option<&ObservedRecord>) -> JobHealth {
    let fallback = ObservedRecord::default();
    let record = observed.unwrap_or(&fallback);

    JobHealth::audited(
        job.name(),
        job.frequency_raw(),
        absent_entries(calendar, record),
    )
}
