use axum::{
	Json, Router,
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use shelf_domain::{SearchQuerySpec, SearchResultItem};
use shelf_service::{Error as ServiceError, SyncOutcome};

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
	#[serde(default)]
	pub keyword: Option<String>,
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/es/suggestions", get(suggestions))
		.route("/es/search", get(search))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new()
		.route("/v1/admin/sync", post(sync))
		.route("/v1/admin/cache/invalidate", post(invalidate_cache))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn suggestions(
	State(state): State<AppState>,
	Query(params): Query<SuggestParams>,
) -> Result<Json<Vec<String>>, ApiError> {
	let keyword = params.keyword.unwrap_or_default();

	tracing::debug!(keyword = %keyword, "Suggestion request received.");

	let response = state.service.suggest(&keyword).await?;

	Ok(Json(response))
}

async fn search(
	State(state): State<AppState>,
	Query(spec): Query<SearchQuerySpec>,
) -> Result<Json<Vec<SearchResultItem>>, ApiError> {
	tracing::debug!(
		keyword = spec.keyword.as_deref(),
		brand = spec.brand.as_deref(),
		category = spec.category.as_deref(),
		"Search request received."
	);

	let response = state.service.search(&spec).await?;

	Ok(Json(response))
}

async fn sync(State(state): State<AppState>) -> Result<Json<SyncOutcome>, ApiError> {
	let outcome = state.service.sync().await?;

	if matches!(outcome, SyncOutcome::Completed(_)) && state.service.cfg.cache.invalidate_on_sync {
		state.service.invalidate_cache();
	}

	Ok(Json(outcome))
}

async fn invalidate_cache(State(state): State<AppState>) -> StatusCode {
	state.service.invalidate_cache();

	StatusCode::NO_CONTENT
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let message = err.to_string();

		match err {
			ServiceError::QueryExecution { .. } =>
				ApiError::new(StatusCode::BAD_GATEWAY, "index_unavailable", message),
			ServiceError::Timeout { .. } =>
				ApiError::new(StatusCode::GATEWAY_TIMEOUT, "timeout", message),
			ServiceError::BulkSubmission { .. } =>
				ApiError::new(StatusCode::BAD_GATEWAY, "bulk_submission_failed", message),
			ServiceError::Storage { .. } =>
				ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", message),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
