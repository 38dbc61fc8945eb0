use async_trait::async_trait;
use bench_app::commands::{queries, records, scoring, search};
use bench_app::AppState;
use bench_boards::BoardRegistry;
use bench_core::{AppConfig, BackendKind, SearchCategory, SubmissionOutcome};
use bench_search::{
    BackendError, DescriptorOutcome, ExecutorConfig, RawHit, RetryPolicy, SearchBackend,
    SearchExecutor,
};
use bench_store::{Collection, SqliteDocumentStore};
use chrono::NaiveDate;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const CONSULTANTS: &str = r#"[
    {
        "id": "c-java",
        "full_name": "Priya Raman",
        "skills": ["Java", "AWS", "Spring Boot", "java"],
        "roles": ["Backend Developer"],
        "visa_status": "h1b",
        "rate": { "min": 60.0, "max": 75.0 },
        "bench_since": "2026-09-01",
        "location": "Dallas, TX"
    },
    {
        "id": "c-data",
        "full_name": "Marcus Lee",
        "skills": ["Python", "SQL"],
        "visa_status": "us_citizen",
        "bench_since": "2026-10-10"
    }
]"#;

const JOBS: &str = r#"[
    { "id": "j-partial", "title": "Java Dev", "skills": ["java", "kafka"] },
    { "id": "j-full", "title": "AWS Java Dev", "skills": ["Java", "AWS"],
      "rate": { "min": 70.0, "max": 80.0 } },
    { "id": "j-closed", "title": "Old Req", "skills": ["java"], "status": "filled" },
    { "id": "j-onsite", "title": "Onsite Java", "skills": ["java"],
      "location": "Seattle, WA", "location_required": true }
]"#;

const VENDORS: &str = r#"[
    { "id": "v-ip", "company_name": "Acme IP", "tier": "implementation partner",
      "placements": 1, "no_responses": 1, "rejections": 0 },
    { "id": "v-prime", "company_name": "Prime Corp", "tier": "prime vendor",
      "placements": 4, "no_responses": 0, "rejections": 1 },
    { "id": "v-new", "company_name": "Fresh Staffing" }
]"#;

/// Backend that always answers with one hit per call.
struct StubBackend {
    kind: BackendKind,
    reply: Result<Vec<RawHit>, BackendError>,
    calls: AtomicU32,
}

impl StubBackend {
    fn ok(kind: BackendKind) -> Self {
        Self {
            kind,
            reply: Ok(vec![RawHit::new(
                "Java Developer - C2C - Remote",
                "https://www.dice.com/job-detail/123",
                "Contract role, corp to corp accepted",
            )]),
            calls: AtomicU32::new(0),
        }
    }

    fn failing(kind: BackendKind) -> Self {
        Self {
            kind,
            reply: Err(BackendError::Http {
                backend: kind,
                status: 403,
                message: "forbidden".to_string(),
            }),
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl SearchBackend for StubBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn submit(&self, _query: &str) -> Result<Vec<RawHit>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

fn executor(backends: Vec<Arc<StubBackend>>) -> SearchExecutor {
    let config = ExecutorConfig {
        concurrency_limit: 2,
        call_timeout: Duration::from_secs(5),
        retry: RetryPolicy {
            retry_budget: 0,
            backoff_base: Duration::from_millis(1),
            backoff_cap: Duration::from_millis(1),
        },
    };
    backends
        .into_iter()
        .fold(SearchExecutor::new(config), |exec, b| {
            exec.with_backend(b as Arc<dyn SearchBackend>)
        })
}

async fn state_with(config: AppConfig, backends: Vec<Arc<StubBackend>>) -> AppState {
    let store = SqliteDocumentStore::in_memory()
        .await
        .expect("open in-memory store");
    let registry = Arc::new(BoardRegistry::builtin().expect("builtin catalogue"));
    let state = AppState::from_parts(config, registry, executor(backends), Arc::new(store));

    records::import_records(&state, Collection::Consultants, CONSULTANTS)
        .await
        .expect("import consultants");
    records::import_records(&state, Collection::Jobs, JOBS)
        .await
        .expect("import jobs");
    records::import_records(&state, Collection::Vendors, VENDORS)
        .await
        .expect("import vendors");
    state
}

async fn state() -> AppState {
    state_with(AppConfig::default(), Vec::new()).await
}

#[tokio::test]
async fn test_list_platforms_by_category() {
    let state = state().await;

    assert_eq!(queries::list_platforms(&state, None).len(), 17);

    let contact = queries::list_platforms(&state, Some(SearchCategory::ContactFind));
    let ids: Vec<&str> = contact.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["linkedin-posts", "linkedin-profiles", "google-groups", "zoominfo", "rocketreach"]
    );
    assert!(contact.iter().all(|p| p.site_token.starts_with("site:")));
}

#[tokio::test]
async fn test_generate_queries_defaults_to_configured_categories() {
    let state = state().await;

    let all = queries::generate_queries(&state, "c-java", &[], &[])
        .await
        .expect("generate queries");
    assert_eq!(all.len(), 23);

    let jobs = queries::generate_queries(&state, "c-java", &[SearchCategory::JobSearch], &[])
        .await
        .expect("generate job queries");
    assert_eq!(jobs.len(), 12);
    assert!(jobs.iter().all(|d| d.category == SearchCategory::JobSearch));
}

#[tokio::test]
async fn test_generate_queries_for_platforms() {
    let state = state().await;

    let dice = queries::generate_queries(
        &state,
        "c-java",
        &[SearchCategory::JobSearch, SearchCategory::VendorHunt],
        &["dice".to_string()],
    )
    .await
    .expect("generate dice queries");
    assert_eq!(dice.len(), 2);
    assert!(dice.iter().all(|d| d.platform.as_str() == "dice"));

    let err = queries::generate_queries(&state, "c-java", &[], &["myspace".to_string()])
        .await
        .expect_err("unknown platform");
    assert_eq!(err.code, "UNKNOWN_PLATFORM");

    let err = queries::generate_queries(&state, "c-java", &[], &["Not A Platform!".to_string()])
        .await
        .expect_err("malformed platform id");
    assert_eq!(err.code, "UNKNOWN_PLATFORM");
}

#[tokio::test]
async fn test_generate_queries_for_missing_consultant() {
    let state = state().await;
    let err = queries::generate_queries(&state, "c-ghost", &[], &[])
        .await
        .expect_err("missing consultant");
    assert_eq!(err.code, "NOT_FOUND");
}

#[tokio::test]
async fn test_native_links() {
    let state = state().await;
    let links = queries::native_links(&state, "c-java")
        .await
        .expect("native links");
    assert!(!links.is_empty());
    assert!(links.iter().all(|l| l.url.starts_with("https://")));
}

#[tokio::test]
async fn test_run_search_offline() {
    let mut config = AppConfig::default();
    config.general.offline = true;
    let state = state_with(config, vec![Arc::new(StubBackend::ok(BackendKind::DirectScrape))]).await;

    let err = search::run_search(&state, "c-java", &[], &[], CancellationToken::new())
        .await
        .expect_err("offline mode");
    assert_eq!(err.code, "OFFLINE_MODE");
}

#[tokio::test]
async fn test_run_search_dedups_results() {
    let backend = Arc::new(StubBackend::ok(BackendKind::DirectScrape));
    let state = state_with(AppConfig::default(), vec![Arc::clone(&backend)]).await;

    let response = search::run_search(
        &state,
        "c-java",
        &[SearchCategory::JobSearch],
        &[],
        CancellationToken::new(),
    )
    .await
    .expect("run search");

    assert_eq!(backend.calls.load(Ordering::SeqCst), 12);
    assert_eq!(response.reports.len(), 12);
    assert_eq!(response.results.len(), 1);
    assert!(response.results[0].classification.is_contract);
    assert!(response.warnings.is_empty());
}

#[tokio::test]
async fn test_run_search_reports_unreachable_backends() {
    let backend = Arc::new(StubBackend::ok(BackendKind::DirectScrape));
    let state = state_with(AppConfig::default(), vec![backend]).await;

    // Only a backend with nothing registered is requested.
    let response = search::run_search(
        &state,
        "c-java",
        &[SearchCategory::ContactFind],
        &[BackendKind::HostedSearchApi],
        CancellationToken::new(),
    )
    .await
    .expect("search with no usable backend");

    assert!(response.results.is_empty());
    assert_eq!(response.warnings.len(), 5);
    assert!(response
        .reports
        .iter()
        .all(|r| matches!(&r.outcome, DescriptorOutcome::BackendExhausted { failures } if failures.is_empty())));
    assert!(response.warnings[0].contains("no search backend is available"));
}

#[tokio::test]
async fn test_run_search_unavailable() {
    let backend = Arc::new(StubBackend::failing(BackendKind::GeneralSearchApi));
    let state = state_with(AppConfig::default(), vec![backend]).await;

    let err = search::run_search(
        &state,
        "c-java",
        &[SearchCategory::ContactFind],
        &[BackendKind::GeneralSearchApi],
        CancellationToken::new(),
    )
    .await
    .expect_err("every call failed");
    assert_eq!(err.code, "SEARCH_UNAVAILABLE");
    let details = err.details.expect("failure details");
    assert_eq!(details["queries"], 5);
    let failed = details["failed"].as_array().expect("failed list");
    assert_eq!(failed.len(), 5);
    assert_eq!(failed[0]["platform"], "linkedin-posts");
    assert!(failed.iter().all(|f| f["category"] == "contact_find"));
    assert!(failed
        .iter()
        .all(|f| f["last_error"].as_str().is_some_and(|e| e.contains("HTTP 403"))));
}

#[tokio::test]
async fn test_run_search_cancelled() {
    let backend = Arc::new(StubBackend::ok(BackendKind::DirectScrape));
    let state = state_with(AppConfig::default(), vec![Arc::clone(&backend)]).await;

    let cancel = CancellationToken::new();
    cancel.cancel();
    let response = search::run_search(&state, "c-java", &[], &[], cancel)
        .await
        .expect("cancelled search still reports");

    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    assert!(response.results.is_empty());
    assert_eq!(response.warnings.len(), response.reports.len());
    assert!(response.warnings.iter().all(|w| w.ends_with("cancelled")));
}

#[tokio::test]
async fn test_match_jobs_ranks_open_jobs() {
    let state = state().await;
    let ranked = scoring::match_jobs(&state, "c-java")
        .await
        .expect("match jobs");

    let ids: Vec<&str> = ranked.iter().map(|r| r.job_id.as_str()).collect();
    assert_eq!(ids, vec!["j-full", "j-partial", "j-onsite"]);

    assert_eq!(ranked[0].score, 100);
    assert!(ranked[0].rate_overlap);
    assert_eq!(ranked[1].score, 50);
    assert_eq!(ranked[1].missing_skills, vec!["kafka"]);
    assert_eq!(ranked[2].score, 50);
    assert!(ranked[2].location_capped);
}

#[tokio::test]
async fn test_score_single_job() {
    let state = state().await;

    // Closed jobs can still be scored directly.
    let result = scoring::score_job(&state, "c-java", "j-closed")
        .await
        .expect("score job");
    assert_eq!(result.score, 100);

    let err = scoring::score_job(&state, "c-java", "j-ghost")
        .await
        .expect_err("missing job");
    assert_eq!(err.code, "NOT_FOUND");
}

#[tokio::test]
async fn test_rank_vendors() {
    let state = state().await;
    let ranked = scoring::rank_vendors(&state).await.expect("rank vendors");

    let ids: Vec<&str> = ranked.iter().map(|s| s.vendor_id.as_str()).collect();
    assert_eq!(ids, vec!["v-prime", "v-ip", "v-new"]);
    assert_eq!(ranked[0].reliability, 80);
    assert_eq!(ranked[1].reliability, 50);
    assert_eq!(ranked[2].reliability, 50);
    assert_eq!(ranked[2].total_outcomes, 0);
}

#[tokio::test]
async fn test_record_outcome_persists() {
    let state = state().await;

    let score = scoring::record_outcome(&state, "v-new", SubmissionOutcome::Placement)
        .await
        .expect("record outcome");
    assert_eq!(score.reliability, 100);
    assert_eq!(score.total_outcomes, 1);

    let stored = records::get_record(&state, Collection::Vendors, "v-new")
        .await
        .expect("get vendor");
    assert_eq!(stored["placements"], 1);
}

#[tokio::test]
async fn test_record_outcome_rejects_invalid_tier() {
    let state = state().await;
    records::import_records(
        &state,
        Collection::Vendors,
        r#"{ "id": "v-bad", "company_name": "Gold Inc", "tier": "gold" }"#,
    )
    .await
    .expect("import vendor");

    let err = scoring::record_outcome(&state, "v-bad", SubmissionOutcome::Rejection)
        .await
        .expect_err("invalid tier");
    assert_eq!(err.code, "INVALID_TIER");

    // Nothing was written.
    let stored = records::get_record(&state, Collection::Vendors, "v-bad")
        .await
        .expect("get vendor");
    assert_eq!(stored["rejections"], 0);
}

#[tokio::test]
async fn test_import_normalizes_and_replaces() {
    let state = state().await;

    let stored = records::get_record(&state, Collection::Consultants, "c-java")
        .await
        .expect("get consultant");
    assert_eq!(stored["skills"], serde_json::json!(["java", "aws", "spring boot"]));

    let ids = records::import_records(
        &state,
        Collection::Consultants,
        r#"{ "id": "c-java", "full_name": "Priya R.", "skills": ["Go"] }"#,
    )
    .await
    .expect("reimport consultant");
    assert_eq!(ids, vec!["c-java"]);

    let listed = records::list_records(&state, Collection::Consultants)
        .await
        .expect("list consultants");
    assert_eq!(listed.len(), 2);
    let stored = records::get_record(&state, Collection::Consultants, "c-java")
        .await
        .expect("get consultant");
    assert_eq!(stored["full_name"], "Priya R.");
}

#[tokio::test]
async fn test_import_is_all_or_nothing() {
    let state = state().await;

    let err = records::import_records(
        &state,
        Collection::Jobs,
        r#"[{ "id": "j-new", "title": "Fine" }, { "title": "No id" }]"#,
    )
    .await
    .expect_err("second record has no id");
    assert_eq!(err.code, "INVALID_JSON");

    let jobs = records::list_records(&state, Collection::Jobs)
        .await
        .expect("list jobs");
    assert_eq!(jobs.len(), 4);

    let err = records::import_records(&state, Collection::Jobs, "not json")
        .await
        .expect_err("malformed json");
    assert_eq!(err.code, "INVALID_JSON");
}

#[tokio::test]
async fn test_delete_record() {
    let state = state().await;

    assert!(records::delete_record(&state, Collection::Jobs, "j-closed")
        .await
        .expect("delete job"));
    assert!(!records::delete_record(&state, Collection::Jobs, "j-closed")
        .await
        .expect("delete again"));

    let err = records::get_record(&state, Collection::Jobs, "j-closed")
        .await
        .expect_err("deleted job");
    assert_eq!(err.code, "NOT_FOUND");
}

#[tokio::test]
async fn test_hotlist_orders_by_bench_days() {
    let state = state().await;
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");

    let entries = records::hotlist(&state, today).await.expect("hotlist");
    let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["c-java", "c-data"]);
    assert_eq!(entries[0].bench_days, 48);
    assert_eq!(entries[1].bench_days, 9);
    assert!(entries[0].line.starts_with("backend developer | java, aws, spring boot"));
}
