//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::health_handler::HealthResponse;
use crate::handlers::lead_handler::{ErrorBody, ListLeadsResponse, SubmitLeadResponse};
use domain::{Lead, LeadSubmission};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::lead_handler::submit_lead,
        crate::handlers::lead_handler::list_leads,
        crate::handlers::health_handler::health_check,
    ),
    components(
        schemas(
            LeadSubmission,
            Lead,
            SubmitLeadResponse,
            ListLeadsResponse,
            ErrorBody,
            HealthResponse,
        )
    ),
    tags(
        (name = "Leads", description = "Lead capture endpoints"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;
