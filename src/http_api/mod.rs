use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;

use crate::{
    attendance::{Dataset, PersonId},
    cache::DatasetCache,
    persistence::PersistenceError,
    report::{self, Listing, PresenceRow, UserEntry, WeekdayStartEnd, WeekdayValue},
};

#[derive(Clone)]
pub struct AppState {
    cache: Arc<DatasetCache>,
}

impl AppState {
    pub fn new(cache: DatasetCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    pub fn with_shared(cache: Arc<DatasetCache>) -> Self {
        Self { cache }
    }

    /// Current dataset, parsed off the async executor when the cache is stale.
    async fn dataset(&self) -> Result<Arc<Dataset>, ApiError> {
        let cache = self.cache.clone();
        tokio::task::spawn_blocking(move || cache.dataset())
            .await
            .map_err(|err| ApiError::internal(format!("dataset task failed: {err}")))?
            .map_err(ApiError::from)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    SourceUnavailable(String),
    Internal(String),
}

impl ApiError {
    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

/// Only integer ids name a user; anything else is an unknown route.
fn user_id(path: Result<Path<PersonId>, PathRejection>) -> Result<PersonId, ApiError> {
    let Path(user_id) =
        path.map_err(|rejection| ApiError::NotFound(format!("unknown user id: {rejection}")))?;
    Ok(user_id)
}

impl From<PersistenceError> for ApiError {
    fn from(value: PersistenceError) -> Self {
        tracing::error!(error = %value, "failed to load attendance data");
        if value.is_source_unavailable() {
            ApiError::SourceUnavailable(value.to_string())
        } else {
            ApiError::Internal(value.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::SourceUnavailable(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "source_unavailable", message)
            }
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        let body = Json(ErrorBody { error, message });
        (status, body).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/users", get(users))
        .route("/api/v1/presence_weekday/:user_id", get(presence_weekday))
        .route("/api/v1/mean_time_weekday/:user_id", get(mean_time_weekday))
        .route("/api/v1/median_weekday/:user_id", get(median_weekday))
        .route("/api/v1/presence_start_end/:user_id", get(presence_start_end))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, cache: DatasetCache) -> std::io::Result<()> {
    let state = AppState::new(cache);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn users(State(state): State<AppState>) -> Result<Json<Vec<UserEntry>>, ApiError> {
    let dataset = state.dataset().await?;
    Ok(Json(report::users(&dataset)))
}

async fn presence_weekday(
    State(state): State<AppState>,
    path: Result<Path<PersonId>, PathRejection>,
) -> Result<Json<Listing<PresenceRow>>, ApiError> {
    let user_id = user_id(path)?;
    let dataset = state.dataset().await?;
    Ok(Json(report::presence_weekday_for(&dataset, user_id)))
}

async fn mean_time_weekday(
    State(state): State<AppState>,
    path: Result<Path<PersonId>, PathRejection>,
) -> Result<Json<Listing<WeekdayValue>>, ApiError> {
    let user_id = user_id(path)?;
    let dataset = state.dataset().await?;
    Ok(Json(report::mean_time_weekday_for(&dataset, user_id)))
}

async fn median_weekday(
    State(state): State<AppState>,
    path: Result<Path<PersonId>, PathRejection>,
) -> Result<Json<Listing<WeekdayValue>>, ApiError> {
    let user_id = user_id(path)?;
    let dataset = state.dataset().await?;
    Ok(Json(report::median_weekday_for(&dataset, user_id)))
}

async fn presence_start_end(
    State(state): State<AppState>,
    path: Result<Path<PersonId>, PathRejection>,
) -> Result<Json<Listing<WeekdayStartEnd>>, ApiError> {
    let user_id = user_id(path)?;
    let dataset = state.dataset().await?;
    Ok(Json(report::presence_start_end_for(&dataset, user_id)))
}
