//! End-to-end scenarios over HTTP.
//!
//! Each test starts an in-process mock of the advisor backend on a random
//! port and drives a real `Orchestrator` against it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use advisor::{Orchestrator, Submission, WorkflowError, WorkflowState};
use api_client::{ApiClientError, ApiConfig};
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use pipeline::{FieldCollector, FnCollector};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use wine_types::{ImageAsset, RecordField, Vintage, WineCategory};

// ============================================================================
// Mock Backend
// ============================================================================

#[derive(Clone)]
struct Backend {
    identify_status: StatusCode,
    identify_body: Value,
    predict_status: StatusCode,
    predict_body: Value,
    identify_calls: Arc<AtomicUsize>,
    predict_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl Backend {
    fn new(identify_body: Value, predict_body: Value) -> Self {
        Self {
            identify_status: StatusCode::OK,
            identify_body,
            predict_status: StatusCode::OK,
            predict_body,
            identify_calls: Arc::new(AtomicUsize::new(0)),
            predict_queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn predict_queries(&self) -> Vec<HashMap<String, String>> {
        self.predict_queries.lock().unwrap().clone()
    }
}

async fn identify_handler(
    State(backend): State<Backend>,
    _upload: Bytes,
) -> (StatusCode, Json<Value>) {
    backend.identify_calls.fetch_add(1, Ordering::SeqCst);
    (backend.identify_status, Json(backend.identify_body.clone()))
}

async fn predict_handler(
    State(backend): State<Backend>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    backend.predict_queries.lock().unwrap().push(params);
    (backend.predict_status, Json(backend.predict_body.clone()))
}

async fn start_backend(backend: Backend) -> (String, tokio::task::JoinHandle<()>) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("Failed to get local address");

    let app = Router::new()
        .route("/uploadfile_identification", post(identify_handler))
        .route("/predict", get(predict_handler))
        .with_state(backend);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock backend failed");
    });

    (format!("http://{}", addr), handle)
}

fn bottle_photo() -> ImageAsset {
    ImageAsset::new(vec![0x89, b'P', b'N', b'G', 0, 1, 2], "bottle.png", "image/png").unwrap()
}

fn wine(winery: &str, cuvee: &str) -> Value {
    json!({
        "winery": winery,
        "cuvee": cuvee,
        "vintage": 2019,
        "type_of_wine": "rouge",
        "region": "rhone",
        "appellation": "gigondas",
        "cepage": "grenache, syrah",
        "alcohol": 0.145,
        "price_usd": 38.0,
        "rating": 93,
        "distance": 0.07,
    })
}

/// Collector that records every prompt and never answers
#[derive(Default)]
struct SilentSurface {
    prompts: Vec<RecordField>,
}

impl FieldCollector for SilentSurface {
    fn collect_winery(&mut self) -> Option<String> {
        self.prompts.push(RecordField::Winery);
        None
    }

    fn collect_vintage(&mut self) -> Option<Vintage> {
        self.prompts.push(RecordField::Vintage);
        None
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_complete_label_is_recommended_without_prompts() {
    let backend = Backend::new(
        json!({
            "winery": ["Clos du Pic"],
            "vintage": [2018],
            "appellation": ["AOC X"],
            "region": ["Rhône"],
        }),
        json!({
            "0": wine("domaine du cayron", "tradition"),
            "1": wine("chateau de saint cosme", "valbelle"),
        }),
    );
    let (addr, handle) = start_backend(backend.clone()).await;

    let orchestrator = Orchestrator::connect(&ApiConfig::new(addr)).unwrap();
    let mut submission = Submission::with_inputs(bottle_photo(), WineCategory::StillRed);
    let mut surface = SilentSurface::default();

    let state = orchestrator.process(&mut submission, &mut surface).await.unwrap();

    assert_eq!(state, WorkflowState::Presenting);
    assert!(surface.prompts.is_empty(), "no prompt should fire");

    let queries = backend.predict_queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0]["winery"], "clos du pic");
    assert_eq!(queries[0]["vintage"], "2018");
    assert_eq!(queries[0]["alcohol"].parse::<f64>().unwrap(), 0.0);
    assert_eq!(queries[0]["type_of_wine"], "rouge");

    let recommendations = submission.recommendations();
    assert_eq!(recommendations.len(), 2);
    assert_eq!(recommendations[0].winery, "domaine du cayron");
    assert_eq!(recommendations[1].winery, "chateau de saint cosme");

    handle.abort();
}

#[tokio::test]
async fn test_missing_winery_and_vintage_wait_for_both_answers() {
    let backend = Backend::new(
        json!({
            "winery": [],
            "vintage": [],
            "alcohol": [0.13],
            "appellation": ["Pic Saint-Loup"],
            "region": ["Languedoc"],
        }),
        json!({ "0": wine("mas bruguiere", "l'arbouse") }),
    );
    let (addr, handle) = start_backend(backend.clone()).await;

    let orchestrator = Orchestrator::connect(&ApiConfig::new(addr)).unwrap();
    let mut submission = Submission::with_inputs(bottle_photo(), WineCategory::StillRed);

    let mut surface = SilentSurface::default();
    let state = orchestrator.process(&mut submission, &mut surface).await.unwrap();
    assert_eq!(state, WorkflowState::ResolvingFields);
    assert_eq!(surface.prompts, vec![RecordField::Winery, RecordField::Vintage]);

    // Another tick with nothing typed yet
    let state = orchestrator.resume(&mut submission, &mut surface).await.unwrap();
    assert_eq!(state, WorkflowState::ResolvingFields);
    assert!(backend.predict_queries().is_empty());

    let mut answered = FnCollector::new(
        || Some("Château de Lascaux".to_string()),
        || Vintage::new(2016).ok(),
    );
    let state = orchestrator.resume(&mut submission, &mut answered).await.unwrap();
    assert_eq!(state, WorkflowState::Presenting);

    let queries = backend.predict_queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0]["winery"], "chateau de lascaux");
    assert_eq!(queries[0]["vintage"], "2016");
    assert_eq!(queries[0]["alcohol"].parse::<f64>().unwrap(), 0.13);
    assert_eq!(submission.recommendations().len(), 1);

    handle.abort();
}

#[tokio::test]
async fn test_identification_server_error_never_requests_recommendations() {
    let mut backend = Backend::new(json!({}), json!({}));
    backend.identify_status = StatusCode::INTERNAL_SERVER_ERROR;
    let (addr, handle) = start_backend(backend.clone()).await;

    let orchestrator = Orchestrator::connect(&ApiConfig::new(addr)).unwrap();
    let mut submission = Submission::with_inputs(bottle_photo(), WineCategory::StillWhite);

    let err = orchestrator
        .process(&mut submission, &mut SilentSurface::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::IdentificationFailed(ApiClientError::Status(500))
    ));
    assert_eq!(submission.state(), WorkflowState::Failed);
    assert_eq!(backend.identify_calls.load(Ordering::SeqCst), 1);
    assert!(backend.predict_queries().is_empty());

    handle.abort();
}

#[tokio::test]
async fn test_recommendation_not_found_fails_without_retry() {
    let mut backend = Backend::new(
        json!({
            "winery": ["Clos du Pic"],
            "vintage": [2018],
            "appellation": ["AOC X"],
            "region": ["Rhône"],
        }),
        json!({ "detail": "Not Found" }),
    );
    backend.predict_status = StatusCode::NOT_FOUND;
    let (addr, handle) = start_backend(backend.clone()).await;

    let orchestrator = Orchestrator::connect(&ApiConfig::new(addr)).unwrap();
    let mut submission = Submission::with_inputs(bottle_photo(), WineCategory::StillRed);

    let err = orchestrator
        .process(&mut submission, &mut SilentSurface::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::RecommendationFailed(ApiClientError::Status(404))
    ));
    assert_eq!(submission.state(), WorkflowState::Failed);
    assert!(submission.pending_record().is_none());
    assert!(submission.resolved_record().is_none());

    // Still failed on the next tick, and nothing was retried
    let state = orchestrator
        .resume(&mut submission, &mut SilentSurface::default())
        .await
        .unwrap();
    assert_eq!(state, WorkflowState::Failed);
    assert_eq!(backend.predict_queries().len(), 1);

    handle.abort();
}

#[tokio::test]
async fn test_missing_region_is_surfaced_as_precondition_violation() {
    let backend = Backend::new(
        json!({
            "winery": ["Clos du Pic"],
            "vintage": [2018],
            "appellation": ["AOC X"],
            "region": [],
        }),
        json!({ "0": wine("unused", "unused") }),
    );
    let (addr, handle) = start_backend(backend.clone()).await;

    let orchestrator = Orchestrator::connect(&ApiConfig::new(addr)).unwrap();
    let mut submission = Submission::with_inputs(bottle_photo(), WineCategory::Fortified);

    let err = orchestrator
        .process(&mut submission, &mut SilentSurface::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WorkflowError::PreconditionViolation(RecordField::Region)
    ));
    assert_eq!(submission.state(), WorkflowState::Failed);
    assert!(backend.predict_queries().is_empty());

    handle.abort();
}
