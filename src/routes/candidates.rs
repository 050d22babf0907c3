use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::candidate_dto::{CreateCandidatePayload, UpdateCandidatePayload},
    error::Result,
    models::authz::Ability,
    utils::token::Claims,
    AppState,
};

#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    state
        .permission_service
        .require(&claims, Ability::CandidateView)
        .await?;
    let candidates = state.candidate_service.list().await?;
    Ok(Json(candidates))
}

#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state
        .permission_service
        .require(&claims, Ability::CandidateView)
        .await?;
    let candidate = state.candidate_service.get_by_id(id).await?;
    Ok(Json(candidate))
}

#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateCandidatePayload>,
) -> Result<impl IntoResponse> {
    state
        .permission_service
        .require(&claims, Ability::CandidateCreate)
        .await?;
    payload.validate()?;
    let candidate = state.candidate_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

#[axum::debug_handler]
pub async fn update_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCandidatePayload>,
) -> Result<impl IntoResponse> {
    state
        .permission_service
        .require(&claims, Ability::CandidateEdit)
        .await?;
    payload.validate()?;
    let candidate = state.candidate_service.update(id, payload).await?;
    Ok(Json(candidate))
}

#[axum::debug_handler]
pub async fn delete_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state
        .permission_service
        .require(&claims, Ability::CandidateDelete)
        .await?;
    state.candidate_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn advance_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state
        .permission_service
        .require(&claims, Ability::CandidateAdvance)
        .await?;
    let candidate = state.candidate_service.advance(id).await?;
    Ok(Json(candidate))
}

#[axum::debug_handler]
pub async fn revert_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state
        .permission_service
        .require(&claims, Ability::CandidateRevert)
        .await?;
    let candidate = state.candidate_service.revert(id).await?;
    Ok(Json(candidate))
}
