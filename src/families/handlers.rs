use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tracing::instrument;
use uuid::Uuid;

use crate::auth::extractors::CurrentUser;
use crate::error::ApiResult;
use crate::families::dto::{AddMemberRequest, CreateFamilyRequest, FamilyOut, MemberOut};
use crate::families::service;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/families", post(create_family))
        .route("/families/my-family", get(my_family))
        .route("/families/:id/members", get(list_members).post(add_member))
        .route("/families/:id/members/:user_id", delete(remove_member))
}

#[instrument(skip(state, acting, payload), fields(user_id = %acting.id))]
pub async fn create_family(
    State(state): State<AppState>,
    CurrentUser(acting): CurrentUser,
    Json(payload): Json<CreateFamilyRequest>,
) -> ApiResult<(StatusCode, Json<FamilyOut>)> {
    let family = service::create_family(&state.db, &acting, &payload.name).await?;
    Ok((StatusCode::CREATED, Json(family.into())))
}

#[instrument(skip(state, acting), fields(user_id = %acting.id))]
pub async fn my_family(
    State(state): State<AppState>,
    CurrentUser(acting): CurrentUser,
) -> ApiResult<Json<FamilyOut>> {
    let family = service::my_family(&state.db, &acting).await?;
    Ok(Json(family.into()))
}

#[instrument(skip(state, acting), fields(user_id = %acting.id))]
pub async fn list_members(
    State(state): State<AppState>,
    CurrentUser(acting): CurrentUser,
    Path(family_id): Path<Uuid>,
) -> ApiResult<Json<Vec<MemberOut>>> {
    let members = service::list_members(&state.db, family_id, &acting).await?;
    Ok(Json(members.into_iter().map(MemberOut::from).collect()))
}

#[instrument(skip(state, acting, payload), fields(user_id = %acting.id))]
pub async fn add_member(
    State(state): State<AppState>,
    CurrentUser(acting): CurrentUser,
    Path(family_id): Path<Uuid>,
    Json(payload): Json<AddMemberRequest>,
) -> ApiResult<(StatusCode, Json<MemberOut>)> {
    let member = service::add_member(
        &state.db,
        family_id,
        &acting,
        &payload.username,
        &payload.email,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(member.into())))
}

#[instrument(skip(state, acting), fields(user_id = %acting.id))]
pub async fn remove_member(
    State(state): State<AppState>,
    CurrentUser(acting): CurrentUser,
    Path((family_id, user_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    service::remove_member(&state.db, family_id, user_id, &acting).await?;
    Ok(StatusCode::NO_CONTENT)
}
