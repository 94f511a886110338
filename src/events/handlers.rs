use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use tracing::instrument;
use uuid::Uuid;

use crate::auth::extractors::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::events::dto::{CreateEventRequest, EventOut};
use crate::events::{repo, service};
use crate::policy;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/:id", delete(delete_event))
}

#[instrument(skip(state, acting, payload), fields(user_id = %acting.id))]
pub async fn create_event(
    State(state): State<AppState>,
    CurrentUser(acting): CurrentUser,
    Json(payload): Json<CreateEventRequest>,
) -> ApiResult<(StatusCode, Json<EventOut>)> {
    policy::require_family_member(&acting, "create an event")?;
    policy::require_same_family(&acting, payload.family_id, "create events")?;

    let (event, assignee_ids) = service::create_event(
        &state.db,
        payload.family_id,
        &payload.title,
        payload.description.as_deref(),
        payload.start_time,
        payload.end_time,
        &payload.assignee_ids,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(EventOut::from_event(event, assignee_ids)),
    ))
}

#[instrument(skip(state, acting), fields(user_id = %acting.id))]
pub async fn list_events(
    State(state): State<AppState>,
    CurrentUser(acting): CurrentUser,
) -> ApiResult<Json<Vec<EventOut>>> {
    let family_id = policy::require_family_member(&acting, "view events")?;
    let events = repo::list_by_family(&state.db, family_id).await?;
    let mut assignees = repo::assignees_by_family(&state.db, family_id).await?;

    let out = events
        .into_iter()
        .map(|e| {
            let ids = assignees.remove(&e.id).unwrap_or_default();
            EventOut::from_event(e, ids)
        })
        .collect();
    Ok(Json(out))
}

#[instrument(skip(state, acting), fields(user_id = %acting.id))]
pub async fn delete_event(
    State(state): State<AppState>,
    CurrentUser(acting): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let family_id = policy::require_family_member(&acting, "delete events")?;
    let deleted = repo::delete_scoped(&state.db, id, family_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(
            "Event not found or not authorized".to_string(),
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}
