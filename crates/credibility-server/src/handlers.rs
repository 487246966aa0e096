//! HTTP request handlers for the credibility service.
//!
//! Implements the tally, vote and health check endpoints using axum.
//! Identifiers arrive in request headers; the vote itself arrives as an
//! encoded `vote` header (see [`crate::payload`]).

use crate::payload::{decode_vote, PayloadError};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router as AxumRouter,
};
use credibility_domain::{tally, DomainError, UserId, VoteOutcome, VoteRequest};
use credibility_store::{SqliteStore, StoreError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Header naming the user being rated
pub const TARGET_HEADER: &str = "target_id";
/// Header naming the viewer on tally requests
pub const USER_HEADER: &str = "user_id";
/// Header carrying the encoded vote
pub const VOTE_HEADER: &str = "vote";

/// Body returned when a vote is stored
pub const RECORDED_BODY: &str = "vote recorded";
/// Body returned when the vote matches what is already stored
pub const ALREADY_VOTED_BODY: &str = "Nothing to update, user already voted";

/// Default time a request may wait for the store
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Vote store; one connection shared across requests
    pub store: Arc<Mutex<SqliteStore>>,
    /// How long a request may wait for the store before giving up
    pub request_timeout: Duration,
}

impl AppState {
    /// Wrap an opened store
    pub fn new(store: SqliteStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the store wait limit
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// GET /credibility response
#[derive(Debug, Serialize, Deserialize)]
pub struct CredibilityResponse {
    /// Number of positive votes
    pub positives: usize,
    /// Number of negative votes
    pub negatives: usize,
    /// "Positive" or "Negative" when the viewer has voted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voted: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Database reachability
    pub database: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum ApiError {
    /// A required header is absent or empty
    MissingHeader(&'static str),
    /// Identifier, direction or self-vote rejected
    Validation(DomainError),
    /// The vote header could not be decoded
    Payload(PayloadError),
    /// Store failure
    Store(StoreError),
    /// The store stayed busy past the request deadline
    Timeout,
    /// Internal server error
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingHeader(name) => (
                StatusCode::BAD_REQUEST,
                format!("missing required request header: {}", name),
            ),
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Payload(e) => (
                StatusCode::BAD_REQUEST,
                format!("error parsing encoded vote field: {}", e),
            ),
            ApiError::Store(e) => {
                error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ApiError::Timeout => {
                warn!("Request deadline passed while waiting for the store");
                (
                    StatusCode::REQUEST_TIMEOUT,
                    "request timed out waiting for the store".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::Validation(e)
    }
}

impl From<PayloadError> for ApiError {
    fn from(e: PayloadError) -> Self {
        ApiError::Payload(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

/// Non-empty header value, decoded lossily so bad bytes fail numeric parsing
fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .filter(|v| !v.is_empty())
}

/// Like [`header`], but absence is a 400 naming the header
fn required_header(headers: &HeaderMap, name: &'static str) -> Result<String, ApiError> {
    header(headers, name).ok_or(ApiError::MissingHeader(name))
}

/// Run blocking store work off the async runtime
///
/// The request deadline only bounds the wait for the store. Once the lock
/// is held the work runs to completion, so a committed vote is never
/// reported as timed out.
async fn with_store<T, F>(state: &AppState, work: F) -> Result<T, ApiError>
where
    F: FnOnce(&mut SqliteStore) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    let mut guard = tokio::time::timeout(state.request_timeout, store.lock_owned())
        .await
        .map_err(|_| ApiError::Timeout)?;

    tokio::task::spawn_blocking(move || work(&mut *guard).map_err(ApiError::from))
        .await
        .map_err(|e| ApiError::Internal(format!("store task failed: {}", e)))?
}

/// GET /credibility - Vote counts for a target, and the viewer's own vote
async fn fetch_credibility(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CredibilityResponse>, ApiError> {
    let target = required_header(&headers, TARGET_HEADER)?;
    let user = required_header(&headers, USER_HEADER)?;
    let target = UserId::parse(&target, TARGET_HEADER)?;
    let user = UserId::parse(&user, USER_HEADER)?;

    debug!(%target, %user, "Fetching credibility");

    let record = with_store(&state, move |store| store.fetch_record(target)).await?;
    let summary = tally(record.as_ref(), Some(user));

    let response = CredibilityResponse {
        positives: summary.positives,
        negatives: summary.negatives,
        voted: summary.voted.map(|d| d.label().to_string()),
    };
    debug!(?response, "Responding with tally");

    Ok(Json(response))
}

/// POST /credibility - Cast or switch a vote on a target
async fn rate_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let target = required_header(&headers, TARGET_HEADER)?;
    let vote = required_header(&headers, VOTE_HEADER)?;
    let target = UserId::parse(&target, TARGET_HEADER)?;
    let payload = decode_vote(&vote)?;
    let request = VoteRequest::new(payload.voter, target, payload.direction)?;

    let outcome = with_store(&state, move |store| store.cast_vote(&request)).await?;

    info!(
        voter = %request.voter(),
        target = %request.target(),
        direction = %request.direction(),
        ?outcome,
        "Vote processed"
    );

    let body = match outcome {
        VoteOutcome::Recorded => RECORDED_BODY,
        VoteOutcome::AlreadyVoted => ALREADY_VOTED_BODY,
    };
    Ok((StatusCode::OK, body).into_response())
}

/// GET /health - Database reachability check
async fn health_check(State(state): State<AppState>) -> Response {
    match with_store(&state, |store| store.ping()).await {
        Ok(()) => Json(HealthCheckResponse {
            status: "healthy".to_string(),
            database: "reachable".to_string(),
        })
        .into_response(),
        Err(e) => {
            error!("Health check failed: {:?}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthCheckResponse {
                    status: "unhealthy".to_string(),
                    database: "unreachable".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/credibility", get(fetch_credibility).post(rate_user))
        .route("/health", get(health_check))
        .with_state(state)
}
