use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use cadence_core::{AuditError, AuditResult};
use cadence_domain::{
    FrequencyFamily, HealthStatus, Job, JobHealth, ObservedRecord, TimeWindow,
};

use super::HealthCheckService;
use crate::report_ports::ReportRepository;

#[derive(Default)]
struct FakeReportRepository {
    rows: HashMap<FrequencyFamily, HashMap<String, ObservedRecord>>,
    failing: HashSet<FrequencyFamily>,
    fetches: Mutex<Vec<FrequencyFamily>>,
}

impl FakeReportRepository {
    fn with_observed(mut self, family: FrequencyFamily, job_name: &str, stamps: &[&str]) -> Self {
        self.rows.entry(family).or_default().insert(
            job_name.to_owned(),
            ObservedRecord::new(stamps.iter().map(|stamp| (*stamp).to_owned()).collect()),
        );
        self
    }

    fn with_failing(mut self, family: FrequencyFamily) -> Self {
        self.failing.insert(family);
        self
    }

    async fn fetched_families(&self) -> Vec<FrequencyFamily> {
        self.fetches.lock().await.clone()
    }
}

#[async_trait]
impl ReportRepository for FakeReportRepository {
    async fn fetch_observed(
        &self,
        family: FrequencyFamily,
        job_names: &[String],
        _window: &TimeWindow,
    ) -> AuditResult<HashMap<String, ObservedRecord>> {
        self.fetches.lock().await.push(family);

        if self.failing.contains(&family) {
            return Err(AuditError::DataSourceUnavailable(
                "connection refused".to_owned(),
            ));
        }

        Ok(self
            .rows
            .get(&family)
            .map(|jobs| {
                jobs.iter()
                    .filter(|(job_name, _)| job_names.contains(*job_name))
                    .map(|(job_name, record)| (job_name.clone(), record.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}

fn job(name: &str, frequency: &str) -> Job {
    let Ok(job) = Job::new(name, frequency) else {
        panic!("job {name} should build");
    };
    job
}

fn window(start: &str, end: &str) -> TimeWindow {
    let Ok(window) = TimeWindow::parse(start, end) else {
        panic!("window {start} -> {end} should parse");
    };
    window
}

fn absent_of<'a>(results: &'a [JobHealth], job_name: &str) -> &'a [String] {
    let Some(report) = results.iter().find(|report| report.job_name() == job_name) else {
        panic!("no report for {job_name}");
    };
    report.absent_entries()
}

fn status_of(results: &[JobHealth], job_name: &str) -> HealthStatus {
    let Some(report) = results.iter().find(|report| report.job_name() == job_name) else {
        panic!("no report for {job_name}");
    };
    report.status()
}

#[tokio::test]
async fn reports_hourly_gaps_in_calendar_order() {
    let repository = FakeReportRepository::default().with_observed(
        FrequencyFamily::Hourly,
        "orders_hourly",
        &["2024-01-01-00", "2024-01-01-02"],
    );
    let service = HealthCheckService::new(Arc::new(repository));

    let results = service
        .audit(
            &[job("orders_hourly", "hourly")],
            &window("2024-01-01-00", "2024-01-01-03"),
        )
        .await;

    assert_eq!(status_of(&results, "orders_hourly"), HealthStatus::Audited);
    assert_eq!(
        absent_of(&results, "orders_hourly"),
        ["2024-01-01-01", "2024-01-01-03"]
    );
}

#[tokio::test]
async fn job_without_any_reports_marks_whole_calendar_absent() {
    let service = HealthCheckService::new(Arc::new(FakeReportRepository::default()));

    let results = service
        .audit(
            &[job("orders_daily", "daily")],
            &window("2024-02-27-00", "2024-03-01-00"),
        )
        .await;

    assert_eq!(
        absent_of(&results, "orders_daily"),
        ["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01"]
    );
}

#[tokio::test]
async fn custom_hourly_stride_audits_only_its_slots() {
    let repository = FakeReportRepository::default().with_observed(
        FrequencyFamily::Hourly,
        "orders_rollup",
        &["2024-01-01-02"],
    );
    let service = HealthCheckService::new(Arc::new(repository));

    let results = service
        .audit(
            &[job("orders_rollup", "2-hourly")],
            &window("2024-01-01-00", "2024-01-01-03"),
        )
        .await;

    assert_eq!(absent_of(&results, "orders_rollup"), ["2024-01-01-00"]);
}

#[tokio::test]
async fn weekly_stride_anchors_at_observed_baseline() {
    let repository = FakeReportRepository::default().with_observed(
        FrequencyFamily::Weekly,
        "weekly_digest",
        &["2024-01-03-06", "2024-01-17-06"],
    );
    let service = HealthCheckService::new(Arc::new(repository));

    let results = service
        .audit(
            &[job("weekly_digest", "2-weekly")],
            &window("2024-01-01-00", "2024-02-01-00"),
        )
        .await;

    assert_eq!(absent_of(&results, "weekly_digest"), ["2024-01-31-06"]);
}

#[tokio::test]
async fn weekly_job_with_no_history_reports_no_history() {
    let service = HealthCheckService::new(Arc::new(FakeReportRepository::default()));

    let results = service
        .audit(
            &[job("weekly_digest", "weekly")],
            &window("2024-01-01-00", "2024-02-01-00"),
        )
        .await;

    assert_eq!(status_of(&results, "weekly_digest"), HealthStatus::NoHistory);
    assert!(absent_of(&results, "weekly_digest").is_empty());
}

#[tokio::test]
async fn monthly_month_end_shape_is_computed_per_month() {
    let repository = FakeReportRepository::default().with_observed(
        FrequencyFamily::Monthly,
        "monthly_closeout",
        &["2024-01-31", "2024-02-29"],
    );
    let service = HealthCheckService::new(Arc::new(repository));

    let results = service
        .audit(
            &[job("monthly_closeout", "monthly")],
            &window("2024-01-01-00", "2024-03-31-23"),
        )
        .await;

    assert_eq!(absent_of(&results, "monthly_closeout"), ["2024-03-31"]);
}

#[tokio::test]
async fn monthly_year_month_shape_follows_sample() {
    let repository = FakeReportRepository::default().with_observed(
        FrequencyFamily::Monthly,
        "monthly_summary",
        &["2024-01"],
    );
    let service = HealthCheckService::new(Arc::new(repository));

    let results = service
        .audit(
            &[job("monthly_summary", "monthly")],
            &window("2024-01-01-00", "2024-03-31-23"),
        )
        .await;

    assert_eq!(
        absent_of(&results, "monthly_summary"),
        ["2024-02", "2024-03"]
    );
}

#[tokio::test]
async fn unrecognized_frequency_surfaces_without_fetching() {
    let repository = Arc::new(FakeReportRepository::default());
    let service = HealthCheckService::new(Arc::clone(&repository) as Arc<dyn ReportRepository>);

    let results = service
        .audit(
            &[job("mystery_job", "fortnightly")],
            &window("2024-01-01-00", "2024-01-02-00"),
        )
        .await;

    assert_eq!(status_of(&results, "mystery_job"), HealthStatus::Unrecognized);
    assert!(repository.fetched_families().await.is_empty());
}

#[tokio::test]
async fn empty_partitions_trigger_no_fetch() {
    let repository = Arc::new(FakeReportRepository::default().with_observed(
        FrequencyFamily::Hourly,
        "orders_hourly",
        &["2024-01-01-00"],
    ));
    let service = HealthCheckService::new(Arc::clone(&repository) as Arc<dyn ReportRepository>);

    service
        .audit(
            &[job("orders_hourly", "hourly")],
            &window("2024-01-01-00", "2024-01-01-03"),
        )
        .await;

    assert_eq!(
        repository.fetched_families().await,
        [FrequencyFamily::Hourly]
    );
}

#[tokio::test]
async fn failed_partition_reports_unknown_and_spares_the_rest() {
    let repository = FakeReportRepository::default()
        .with_failing(FrequencyFamily::Hourly)
        .with_observed(
            FrequencyFamily::Daily,
            "orders_daily",
            &["2024-01-01", "2024-01-02"],
        );
    let service = HealthCheckService::new(Arc::new(repository));

    let results = service
        .audit(
            &[job("orders_hourly", "hourly"), job("orders_daily", "daily")],
            &window("2024-01-01-00", "2024-01-02-00"),
        )
        .await;

    assert_eq!(status_of(&results, "orders_hourly"), HealthStatus::Unknown);
    assert!(absent_of(&results, "orders_hourly").is_empty());
    assert_eq!(status_of(&results, "orders_daily"), HealthStatus::Audited);
    assert!(absent_of(&results, "orders_daily").is_empty());
}

#[tokio::test]
async fn partitions_are_independent() {
    let observed = FakeReportRepository::default().with_observed(
        FrequencyFamily::Daily,
        "orders_daily",
        &["2024-01-01"],
    );
    let with_hourly = HealthCheckService::new(Arc::new(
        FakeReportRepository::default()
            .with_observed(FrequencyFamily::Daily, "orders_daily", &["2024-01-01"])
            .with_observed(FrequencyFamily::Hourly, "orders_hourly", &["2024-01-01-00"]),
    ));
    let without_hourly = HealthCheckService::new(Arc::new(observed));
    let window = window("2024-01-01-00", "2024-01-02-00");

    let full = with_hourly
        .audit(
            &[job("orders_hourly", "hourly"), job("orders_daily", "daily")],
            &window,
        )
        .await;
    let daily_only = without_hourly
        .audit(&[job("orders_daily", "daily")], &window)
        .await;

    let Some(from_full) = full
        .iter()
        .find(|report| report.job_name() == "orders_daily")
    else {
        panic!("daily report missing from full audit");
    };
    assert_eq!(daily_only, vec![from_full.clone()]);
}

#[tokio::test]
async fn audit_is_idempotent_for_identical_storage_state() {
    let repository = Arc::new(FakeReportRepository::default().with_observed(
        FrequencyFamily::Hourly,
        "orders_hourly",
        &["2024-01-01-00", "2024-01-01-02"],
    ));
    let service = HealthCheckService::new(Arc::clone(&repository) as Arc<dyn ReportRepository>);
    let jobs = [job("orders_hourly", "hourly")];
    let window = window("2024-01-01-00", "2024-01-01-03");

    let first = service.audit(&jobs, &window).await;
    let second = service.audit(&jobs, &window).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn results_keep_input_order_within_a_partition() {
    let repository = FakeReportRepository::default()
        .with_observed(FrequencyFamily::Hourly, "later_job", &["2024-01-01-00"])
        .with_observed(FrequencyFamily::Hourly, "earlier_job", &["2024-01-01-00"]);
    let service = HealthCheckService::new(Arc::new(repository));

    let results = service
        .audit(
            &[job("earlier_job", "hourly"), job("later_job", "hourly")],
            &window("2024-01-01-00", "2024-01-01-01"),
        )
        .await;

    let names: Vec<&str> = results.iter().map(JobHealth::job_name).collect();
    assert_eq!(names, ["earlier_job", "later_job"]);
}
