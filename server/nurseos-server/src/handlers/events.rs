use audit_engine::{Event, EventQuery};
use axum::{extract::State, Json};

use crate::error::{ApiErrorResponse, ApiResult};
use crate::extractors::Query;
use crate::server::NurseOsServer;

/// List audit events, most recent first
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "events",
    params(EventQuery),
    responses(
        (status = 200, description = "Events ordered by ts descending", body = [Event]),
        (status = 400, description = "Invalid query parameters", body = ApiErrorResponse),
        (status = 503, description = "Event store unavailable", body = ApiErrorResponse)
    )
)]
pub async fn list_events(
    State(server): State<NurseOsServer>,
    Query(params): Query<EventQuery>,
) -> ApiResult<Json<Vec<Event>>> {
    let events = server.query_service.list(params).await?;
    Ok(Json(events))
}
