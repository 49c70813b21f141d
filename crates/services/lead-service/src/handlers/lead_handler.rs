//! Lead handlers.
//!
//! Each endpoint answers its business method, an `OPTIONS` preflight, and
//! `405 {"error": "Method not allowed"}` for every other verb.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use common::{AppError, AppResult};
use domain::{Lead, LeadSubmission, SubmittedLead, DEFAULT_LEAD_LIMIT};

use crate::extractors::LenientJson;
use crate::state::AppState;

/// Successful submission response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLeadResponse {
    #[schema(example = true)]
    pub success: bool,
    /// Store-generated lead identifier
    #[schema(example = 1)]
    pub lead_id: i32,
    /// Store-generated creation timestamp (ISO-8601)
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<FixedOffset>,
}

impl From<SubmittedLead> for SubmitLeadResponse {
    fn from(submitted: SubmittedLead) -> Self {
        Self {
            success: true,
            lead_id: submitted.lead_id,
            created_at: submitted.created_at,
        }
    }
}

/// Lead listing response
#[derive(Debug, Serialize, ToSchema)]
pub struct ListLeadsResponse {
    #[schema(example = true)]
    pub success: bool,
    /// Leads, newest first
    pub leads: Vec<Lead>,
    /// Number of leads in this response
    pub total: usize,
}

impl From<Vec<Lead>> for ListLeadsResponse {
    fn from(leads: Vec<Lead>) -> Self {
        Self {
            success: true,
            total: leads.len(),
            leads,
        }
    }
}

/// Error body returned by every failing request
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Method not allowed")]
    pub error: String,
}

/// Query parameters for lead listing
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListLeadsQuery {
    /// Maximum number of leads to return (default 50)
    #[param(value_type = Option<u64>, example = 50)]
    pub limit: Option<String>,
}

/// Create lead routes
pub fn lead_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/submit",
            post(submit_lead)
                .options(submit_preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/list",
            get(list_leads)
                .options(list_preflight)
                .fallback(method_not_allowed),
        )
}

/// Submit a lead
#[utoipa::path(
    post,
    path = "/submit",
    tag = "Leads",
    request_body = LeadSubmission,
    responses(
        (status = 200, description = "Lead stored", body = SubmitLeadResponse),
        (status = 405, description = "Method not allowed", body = ErrorBody),
        (status = 500, description = "Malformed body or store failure", body = ErrorBody)
    )
)]
pub async fn submit_lead(
    State(state): State<AppState>,
    LenientJson(submission): LenientJson<LeadSubmission>,
) -> AppResult<Json<SubmitLeadResponse>> {
    let submitted = state.lead_service.submit_lead(submission).await?;
    Ok(Json(SubmitLeadResponse::from(submitted)))
}

/// List the most recent leads
#[utoipa::path(
    get,
    path = "/list",
    tag = "Leads",
    params(ListLeadsQuery),
    responses(
        (status = 200, description = "Most recent leads, newest first", body = ListLeadsResponse),
        (status = 405, description = "Method not allowed", body = ErrorBody),
        (status = 500, description = "Invalid limit or store failure", body = ErrorBody)
    )
)]
pub async fn list_leads(
    method: Method,
    State(state): State<AppState>,
    query: Result<Query<ListLeadsQuery>, QueryRejection>,
) -> AppResult<Json<ListLeadsResponse>> {
    // axum routes HEAD to the GET handler
    if method == Method::HEAD {
        return Err(AppError::MethodNotAllowed);
    }

    let Query(query) = query.map_err(|e| AppError::invalid_limit(e.body_text()))?;
    let limit = parse_limit(query.limit.as_deref())?;

    let leads = state.lead_service.list_leads(limit).await?;
    Ok(Json(ListLeadsResponse::from(leads)))
}

/// Parse the `limit` query value, falling back to the default when absent.
///
/// The value must be an integer in `0..=i64::MAX`, the range the store can
/// bind as a row limit. Anything else is answered with 500 like every other
/// failure (see [`AppError::status`]).
pub fn parse_limit(raw: Option<&str>) -> AppResult<u64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_LEAD_LIMIT);
    };

    let limit = raw
        .trim()
        .parse::<i64>()
        .map_err(|e| AppError::invalid_limit(format!("'{}': {}", raw, e)))?;

    u64::try_from(limit)
        .map_err(|_| AppError::invalid_limit(format!("'{}': must not be negative", raw)))
}

async fn submit_preflight() -> Response {
    preflight("POST, OPTIONS")
}

async fn list_preflight() -> Response {
    preflight("GET, OPTIONS")
}

/// CORS preflight answer: 200 with an empty body.
fn preflight(allowed_methods: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, allowed_methods),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            (header::ACCESS_CONTROL_MAX_AGE, "86400"),
        ],
    )
        .into_response()
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
