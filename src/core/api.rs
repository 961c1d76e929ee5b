//! HTTP API for LFIT
//!
//! Endpoints:
//! - POST /submit-data - Persist one reflection record
//! - GET  /get-user-data/{userId} - All records for a user (any order)
//! - GET  /get-user-report/{userId} - Full identity report
//! - POST /set-email-preferences - Upsert reminder settings
//! - GET  /get-email-preferences/{userId} - Current reminder settings
//! - GET  /check-user/{userId} - Does this user have any records?
//! - GET  /health - Health check

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::report::{build_report, validate_records};
use crate::core::store::RecordStore;
use crate::types::{EmailPreference, EngineConfig, IdentityReport, ReflectionRecord};
use crate::SUBMIT_TIME_FORMAT;

/// Shared store handle; boxed so any backend plugs in
pub type SharedStore = Box<dyn RecordStore + Send + Sync>;

/// App state
pub struct AppState {
    pub store: RwLock<SharedStore>,
    pub config: EngineConfig,
}

/// Submission payload; percent fields are renamed to scores at this boundary
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitDataRequest {
    pub user_id: String,
    #[serde(default)]
    pub start_time: String,
    pub leader_percent: f64,
    pub follower_percent: f64,
    #[serde(default)]
    pub novelty: Option<u8>,
    #[serde(default)]
    pub disruption: Option<u8>,
    #[serde(default)]
    pub ordinariness: Option<u8>,
    #[serde(default)]
    pub event_description: Option<String>,
}

/// Submission response
#[derive(Debug, Serialize)]
pub struct SubmitDataResponse {
    pub message: String,
    pub id: String,
}

/// Generic message body for errors and acks
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Check-user response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckUserResponse {
    pub exists: bool,
    pub record_count: usize,
}

/// Report query parameters
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Liminality threshold override
    pub threshold: Option<f64>,
}

type ApiError = (StatusCode, Json<MessageResponse>);

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(MessageResponse {
            message: message.into(),
        }),
    )
}

/// Create the API router
pub fn create_router(store: SharedStore, config: EngineConfig) -> Router {
    let state = Arc::new(AppState {
        store: RwLock::new(store),
        config,
    });

    Router::new()
        .route("/health", get(health))
        .route("/submit-data", post(submit_data))
        .route("/get-user-data/:user_id", get(get_user_data))
        .route("/get-user-report/:user_id", get(get_user_report))
        .route("/set-email-preferences", post(set_email_preferences))
        .route("/get-email-preferences/:user_id", get(get_email_preferences))
        .route("/check-user/:user_id", get(check_user))
        .with_state(state)
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

/// Persist one reflection record
async fn submit_data(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitDataRequest>,
) -> Result<Json<SubmitDataResponse>, ApiError> {
    let record = ReflectionRecord {
        user_id: req.user_id,
        start_time: req.start_time,
        submit_time: Utc::now().format(SUBMIT_TIME_FORMAT).to_string(),
        leader_score: req.leader_percent,
        follower_score: req.follower_percent,
        novelty: req.novelty,
        disruption: req.disruption,
        ordinariness: req.ordinariness,
        event_description: req.event_description,
    };

    // Reject bad payloads here so they never reach the store
    validate_records(std::slice::from_ref(&record), &state.config)
        .map_err(|e| error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let mut store = state.store.write().await;
    let id = store
        .append_record(&record)
        .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Error saving data: {}", e)))?;

    Ok(Json(SubmitDataResponse {
        message: "Data saved successfully".to_string(),
        id,
    }))
}

/// All records for one user; empty list when the user is unknown
async fn get_user_data(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ReflectionRecord>>, ApiError> {
    let store = state.store.read().await;
    let records = store
        .get_records(&user_id)
        .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Error reading data: {}", e)))?;
    Ok(Json(records))
}

/// Full identity report for one user
async fn get_user_report(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<IdentityReport>, ApiError> {
    let store = state.store.read().await;
    let records = store
        .get_records(&user_id)
        .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Error reading data: {}", e)))?;
    drop(store);

    if records.is_empty() {
        return Err(error_response(
            StatusCode::NOT_FOUND,
            "No data found for this user ID.",
        ));
    }

    let mut config = state.config;
    if let Some(threshold) = query.threshold {
        config.liminality_threshold = threshold;
    }

    let report = build_report(&user_id, &records, &config)
        .map_err(|e| error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    Ok(Json(report))
}

/// Upsert email preferences for one user
async fn set_email_preferences(
    State(state): State<Arc<AppState>>,
    Json(pref): Json<EmailPreference>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut store = state.store.write().await;
    store
        .set_email_preference(&pref)
        .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Error saving preferences: {}", e)))?;

    Ok(Json(MessageResponse {
        message: "Email preferences saved successfully".to_string(),
    }))
}

/// Current email preferences for one user
async fn get_email_preferences(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<EmailPreference>, ApiError> {
    let store = state.store.read().await;
    let pref = store
        .get_email_preference(&user_id)
        .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Error reading preferences: {}", e)))?;

    pref.map(Json).ok_or_else(|| {
        error_response(
            StatusCode::NOT_FOUND,
            "No email preferences found for this user ID.",
        )
    })
}

/// Does this user have any records?
async fn check_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<CheckUserResponse>, ApiError> {
    let store = state.store.read().await;
    let records = store
        .get_records(&user_id)
        .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Error reading data: {}", e)))?;

    Ok(Json(CheckUserResponse {
        exists: !records.is_empty(),
        record_count: records.len(),
    }))
}

/// Run the API server
pub async fn run_server(
    addr: &str,
    store: SharedStore,
    config: EngineConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(store, config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("LFIT API running on {}", addr);
    println!("  POST /submit-data                    - Submit a reflection");
    println!("  GET  /get-user-data/:userId          - Raw records");
    println!("  GET  /get-user-report/:userId        - Identity report");
    println!("  POST /set-email-preferences          - Save reminder settings");
    println!("  GET  /get-email-preferences/:userId  - Reminder settings");
    println!("  GET  /check-user/:userId             - Has the user any data?");
    println!("  GET  /health                         - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
