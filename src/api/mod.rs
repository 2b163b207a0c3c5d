//! HTTP API module for the shift allocation engine.
//!
//! This module provides the REST endpoints for posting shifts, escalating
//! visibility, recording interest and rejections, locking assignments, and
//! the downstream leave/swap lifecycle.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AssignRequest, CandidatesQuery, CreateShiftRequest, CreateSlotRequest, EscalateRequest,
    InterestRequest, LeaveRequestBody, OccurrencesQuery, PosterQuery, RejectRequest,
    ResolveLeaveRequest, SwapRequestBody,
};
pub use response::ApiError;
pub use state::AppState;
