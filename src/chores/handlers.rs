use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use tracing::instrument;
use uuid::Uuid;

use crate::auth::extractors::CurrentUser;
use crate::chores::dto::{ChoreOut, CreateChoreRequest, UpdateChoreRequest};
use crate::chores::repo;
use crate::error::{ApiError, ApiResult};
use crate::policy;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/chores", get(list_chores).post(create_chore))
        .route("/chores/:id", put(update_chore).delete(delete_chore))
}

/// Chores are self-assigned only; there is no delegation to other members.
fn require_self_assignment(acting_id: Uuid, assigned_to_id: Uuid) -> Result<(), ApiError> {
    if assigned_to_id != acting_id {
        return Err(ApiError::Forbidden(
            "You can only assign chores to yourself".to_string(),
        ));
    }
    Ok(())
}

#[instrument(skip(state, acting, payload), fields(user_id = %acting.id))]
pub async fn create_chore(
    State(state): State<AppState>,
    CurrentUser(acting): CurrentUser,
    Json(payload): Json<CreateChoreRequest>,
) -> ApiResult<(StatusCode, Json<ChoreOut>)> {
    policy::require_family_member(&acting, "create a chore")?;
    policy::require_same_family(&acting, payload.family_id, "create chores")?;
    require_self_assignment(acting.id, payload.assigned_to_id)?;

    let chore = repo::create(
        &state.db,
        &payload.title,
        payload.description.as_deref(),
        payload.family_id,
        payload.assigned_to_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(chore.into())))
}

#[instrument(skip(state, acting), fields(user_id = %acting.id))]
pub async fn list_chores(
    State(state): State<AppState>,
    CurrentUser(acting): CurrentUser,
) -> ApiResult<Json<Vec<ChoreOut>>> {
    let family_id = policy::require_family_member(&acting, "view chores")?;
    let chores = repo::list_by_family(&state.db, family_id).await?;
    Ok(Json(chores.into_iter().map(ChoreOut::from).collect()))
}

#[instrument(skip(state, acting, payload), fields(user_id = %acting.id))]
pub async fn update_chore(
    State(state): State<AppState>,
    CurrentUser(acting): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateChoreRequest>,
) -> ApiResult<Json<ChoreOut>> {
    let scope = policy::require_family_member(&acting, "update chores")?;
    policy::require_same_family(&acting, payload.family_id, "update chores")?;
    require_self_assignment(acting.id, payload.assigned_to_id)?;

    let chore = repo::update_scoped(
        &state.db,
        id,
        scope,
        &payload.title,
        payload.description.as_deref(),
        payload.family_id,
        payload.assigned_to_id,
        payload.status,
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Chore not found or not authorized".to_string()))?;
    Ok(Json(chore.into()))
}

#[instrument(skip(state, acting), fields(user_id = %acting.id))]
pub async fn delete_chore(
    State(state): State<AppState>,
    CurrentUser(acting): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let family_id = policy::require_family_member(&acting, "delete chores")?;
    let deleted = repo::delete_scoped(&state.db, id, family_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(
            "Chore not found or not authorized".to_string(),
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_assignment_accepts_own_id() {
        let me = Uuid::new_v4();
        require_self_assignment(me, me).unwrap();
    }

    #[test]
    fn self_assignment_rejects_other_member() {
        let err = require_self_assignment(Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
