//! HTTP request handlers for the shift allocation API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::escalation::EscalationTier;
use crate::models::{Shift, ShiftSlot};

use super::request::{
    AssignRequest, CandidatesQuery, CreateShiftRequest, EscalateRequest, InterestRequest,
    LeaveRequestBody, OccurrencesQuery, PosterQuery, RejectRequest, ResolveLeaveRequest,
    SwapRequestBody,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/shifts", post(create_shift_handler))
        .route("/shifts/:id/tiers", get(tiers_handler))
        .route("/shifts/:id/escalate", post(escalate_handler))
        .route("/shifts/:id/interests", get(interests_handler))
        .route("/shifts/:id/invoice-lines", get(invoice_lines_handler))
        .route("/slots/:id/occurrences", get(occurrences_handler))
        .route("/slots/:id/candidates", get(candidates_handler))
        .route("/interests", post(express_interest_handler))
        .route("/interests/:id/reveal", post(reveal_handler))
        .route("/rejections", post(reject_handler))
        .route("/assignments", post(assign_handler))
        .route("/leave-requests", post(file_leave_handler))
        .route("/leave-requests/:id/resolve", post(resolve_leave_handler))
        .route("/swap-requests", post(swap_handler))
        .with_state(state)
}

/// Response body for a created shift.
#[derive(Debug, Serialize)]
struct ShiftResponse {
    shift: Shift,
    slots: Vec<ShiftSlot>,
}

/// Response body for the tier listing.
#[derive(Debug, Serialize)]
struct TiersResponse {
    current_tier: EscalationTier,
    tiers: Vec<EscalationTier>,
}

fn engine_error(correlation_id: Uuid, error: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    ApiErrorResponse::from(error).into_response()
}

/// Handler for `POST /shifts`.
async fn create_shift_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateShiftRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Creating shift");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    match state.engine().create_shift(request.into()) {
        Ok((shift, slots)) => {
            info!(
                correlation_id = %correlation_id,
                shift_id = %shift.id,
                slots = slots.len(),
                "Shift created"
            );
            (StatusCode::CREATED, Json(ShiftResponse { shift, slots })).into_response()
        }
        Err(error) => engine_error(correlation_id, error),
    }
}

/// Handler for `GET /shifts/{id}/tiers`.
async fn tiers_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<Uuid>,
    Query(query): Query<PosterQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let tiers = match state.engine().tier_path_for(shift_id, query.org_admin) {
        Ok(tiers) => tiers,
        Err(error) => return engine_error(correlation_id, error),
    };
    match state.engine().current_tier_for(shift_id, query.org_admin) {
        Ok(current_tier) => {
            (StatusCode::OK, Json(TiersResponse { current_tier, tiers })).into_response()
        }
        Err(error) => engine_error(correlation_id, error),
    }
}

/// Handler for `POST /shifts/{id}/escalate`.
async fn escalate_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<Uuid>,
    Json(request): Json<EscalateRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        shift_id = %shift_id,
        tier = %request.tier,
        "Escalating shift"
    );

    match state
        .engine()
        .escalate(shift_id, request.tier, request.org_admin)
    {
        Ok(shift) => (StatusCode::OK, Json(shift)).into_response(),
        Err(error) => engine_error(correlation_id, error),
    }
}

/// Handler for `GET /shifts/{id}/interests`.
async fn interests_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<Uuid>,
    Query(query): Query<PosterQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state
        .engine()
        .interests_for_poster(shift_id, query.org_admin)
    {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(error) => engine_error(correlation_id, error),
    }
}

/// Handler for `GET /shifts/{id}/invoice-lines`.
async fn invoice_lines_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<Uuid>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.engine().invoice_lines_for_shift(shift_id) {
        Ok(lines) => (StatusCode::OK, Json(lines)).into_response(),
        Err(error) => engine_error(correlation_id, error),
    }
}

/// Handler for `GET /slots/{id}/occurrences`.
async fn occurrences_handler(
    State(state): State<AppState>,
    Path(slot_id): Path<Uuid>,
    Query(query): Query<OccurrencesQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.engine().occurrences(slot_id, query.from, query.to) {
        Ok(dates) => (StatusCode::OK, Json(dates)).into_response(),
        Err(error) => engine_error(correlation_id, error),
    }
}

/// Handler for `GET /slots/{id}/candidates`.
async fn candidates_handler(
    State(state): State<AppState>,
    Path(slot_id): Path<Uuid>,
    Query(query): Query<CandidatesQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.engine().offer_candidates(slot_id, query.slot_date) {
        Ok(candidates) => (StatusCode::OK, Json(candidates)).into_response(),
        Err(error) => engine_error(correlation_id, error),
    }
}

/// Handler for `POST /interests`.
async fn express_interest_handler(
    State(state): State<AppState>,
    Json(request): Json<InterestRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        shift_id = %request.shift_id,
        "Expressing interest"
    );

    match state
        .engine()
        .express_interest(request.user_id, request.shift_id, request.slot_id)
    {
        Ok(interest) => (StatusCode::CREATED, Json(interest)).into_response(),
        Err(error) => engine_error(correlation_id, error),
    }
}

/// Handler for `POST /interests/{id}/reveal`.
async fn reveal_handler(State(state): State<AppState>, Path(interest_id): Path<Uuid>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, interest_id = %interest_id, "Revealing interest");

    match state.engine().reveal_interest(interest_id) {
        Ok(interest) => (StatusCode::OK, Json(interest)).into_response(),
        Err(error) => engine_error(correlation_id, error),
    }
}

/// Handler for `POST /rejections`.
async fn reject_handler(
    State(state): State<AppState>,
    Json(request): Json<RejectRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state
        .engine()
        .reject_occurrence(request.user_id, request.slot_id, request.slot_date)
    {
        Ok(rejection) => (StatusCode::CREATED, Json(rejection)).into_response(),
        Err(error) => engine_error(correlation_id, error),
    }
}

/// Handler for `POST /assignments`.
async fn assign_handler(
    State(state): State<AppState>,
    Json(request): Json<AssignRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        slot_id = %request.slot_id,
        slot_date = %request.slot_date,
        "Assigning slot occurrence"
    );

    let result = if request.reassign {
        state
            .engine()
            .reassign(request.slot_id, request.slot_date, request.user_id)
    } else {
        state
            .engine()
            .assign(request.slot_id, request.slot_date, request.user_id)
    };

    match result {
        Ok(assignment) => {
            info!(
                correlation_id = %correlation_id,
                assignment_id = %assignment.id,
                unit_rate = %assignment.unit_rate,
                "Assignment locked"
            );
            (StatusCode::CREATED, Json(assignment)).into_response()
        }
        Err(error) => engine_error(correlation_id, error),
    }
}

/// Handler for `POST /leave-requests`.
async fn file_leave_handler(
    State(state): State<AppState>,
    Json(request): Json<LeaveRequestBody>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state
        .engine()
        .file_leave(request.assignment_id, request.user_id, request.leave_type)
    {
        Ok(leave) => (StatusCode::CREATED, Json(leave)).into_response(),
        Err(error) => engine_error(correlation_id, error),
    }
}

/// Handler for `POST /leave-requests/{id}/resolve`.
async fn resolve_leave_handler(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
    Json(request): Json<ResolveLeaveRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.engine().resolve_leave(request_id, request.approve) {
        Ok(leave) => (StatusCode::OK, Json(leave)).into_response(),
        Err(error) => engine_error(correlation_id, error),
    }
}

/// Handler for `POST /swap-requests`.
async fn swap_handler(
    State(state): State<AppState>,
    Json(request): Json<SwapRequestBody>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        assignment_id = %request.assignment_id,
        "Requesting swap cover"
    );

    match state
        .engine()
        .request_swap(request.assignment_id, request.user_id)
    {
        Ok(swap) => (StatusCode::CREATED, Json(swap)).into_response(),
        Err(error) => engine_error(correlation_id, error),
    }
}
