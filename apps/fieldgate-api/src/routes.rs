use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;
use fieldgate_service::{FilterRequest, OutputBatch};

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/results/filter", post(filter_results))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new().route("/v1/admin/reload_policy", post(reload_policy)).with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn filter_results(
	State(state): State<AppState>,
	Json(payload): Json<FilterRequest>,
) -> Json<OutputBatch> {
	Json(state.service.filter(&payload))
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
	pub marker_field: String,
	pub allowed_fields: Vec<String>,
}

async fn reload_policy(State(state): State<AppState>) -> Result<Json<ReloadResponse>, ApiError> {
	let config = fieldgate_config::load(&state.config_path)?;

	state.service.reload(&config)?;

	let snapshot = state.service.snapshot();
	let mut allowed_fields =
		snapshot.policy.allowed_fields().iter().cloned().collect::<Vec<_>>();

	allowed_fields.sort();

	Ok(Json(ReloadResponse {
		marker_field: snapshot.policy.marker_field().to_string(),
		allowed_fields,
	}))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}
}

impl From<fieldgate_config::Error> for ApiError {
	fn from(err: fieldgate_config::Error) -> Self {
		match err {
			fieldgate_config::Error::ReadConfig { .. } => {
				tracing::warn!(error = %err, "Config reload could not read the file.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "config_unreadable", err.to_string(), None)
			},
			fieldgate_config::Error::ParseConfig { ref path, ref source } => Self::new(
				StatusCode::UNPROCESSABLE_ENTITY,
				"invalid_config",
				format!("Failed to parse config file at {path:?}: {source}"),
				None,
			),
			fieldgate_config::Error::Validation { message } =>
				Self::new(StatusCode::UNPROCESSABLE_ENTITY, "invalid_config", message, None),
		}
	}
}

impl From<fieldgate_service::Error> for ApiError {
	fn from(err: fieldgate_service::Error) -> Self {
		match err {
			fieldgate_service::Error::InvalidPolicy { message } => Self::new(
				StatusCode::UNPROCESSABLE_ENTITY,
				"invalid_policy",
				message,
				Some(vec!["privacy".to_string()]),
			),
			fieldgate_service::Error::Config { message } =>
				Self::new(StatusCode::UNPROCESSABLE_ENTITY, "invalid_config", message, None),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}
