use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::permission_dto::{GrantPayload, MyAbilitiesResponse, RevokeResponse},
    error::{Error, Result},
    models::authz::{Ability, Role},
    utils::token::Claims,
    AppState,
};

fn parse_grant(payload: &GrantPayload) -> Result<(Role, Ability)> {
    let role = Role::parse(&payload.role)
        .ok_or_else(|| Error::BadRequest("invalid role".to_string()))?;
    let ability = Ability::parse(&payload.ability)
        .ok_or_else(|| Error::BadRequest("invalid ability".to_string()))?;
    Ok((role, ability))
}

#[axum::debug_handler]
pub async fn list_permissions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    state.permission_service.require_admin(&claims)?;
    let grants = state.permission_service.list_all().await?;
    Ok(Json(grants))
}

#[axum::debug_handler]
pub async fn grant_permission(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<GrantPayload>,
) -> Result<impl IntoResponse> {
    state.permission_service.require_admin(&claims)?;
    payload.validate()?;
    let (role, ability) = parse_grant(&payload)?;
    // Admin already holds everything; a stored row would just shadow
    // the bypass.
    if !role.is_admin() {
        state.permission_service.grant(role, ability).await?;
    }
    Ok(Json(json!({ "ok": true })))
}

#[axum::debug_handler]
pub async fn revoke_permission(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<GrantPayload>,
) -> Result<impl IntoResponse> {
    state.permission_service.require_admin(&claims)?;
    payload.validate()?;
    let (role, ability) = parse_grant(&payload)?;
    let removed = state.permission_service.revoke(role, ability).await?;
    Ok(Json(RevokeResponse { ok: true, removed }))
}

/// The caller's own ability set, for UI control visibility. Only ever
/// reveals the caller's role, never other roles' grants. The server-side
/// gate stays authoritative regardless of what the client renders.
#[axum::debug_handler]
pub async fn my_abilities(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let role = Role::parse(&claims.role)
        .ok_or_else(|| Error::Forbidden("unknown_role".to_string()))?;
    let abilities = state.permission_service.grants_for(role).await?;
    Ok(Json(MyAbilitiesResponse {
        role: role.as_str().to_string(),
        abilities: abilities.iter().map(|a| a.as_str().to_string()).collect(),
    }))
}
