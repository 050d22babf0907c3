use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::auth_dto::{AuthResponse, LoginPayload, RegisterPayload},
    dto::user_dto::{CreateUserPayload, UserResponse},
    error::{Error, Result},
    models::authz::Role,
    utils::crypto::verify_password,
    utils::token::{issue_token, Claims},
    AppState,
};

/// Self-registration always lands in the `user` role; anything more
/// privileged is assigned by an admin.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .user_service
        .create(
            CreateUserPayload {
                email: payload.email,
                password: payload.password,
                name: payload.name,
                role: None,
            },
            Role::User,
        )
        .await?;

    let config = crate::config::get_config();
    let token = issue_token(
        &config.jwt_secret,
        user.id,
        &user.email,
        &user.role,
        config.token_ttl_hours,
    )
    .map_err(|e| Error::Internal(format!("token issuance failed: {}", e)))?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserResponse::from(user),
        }),
    ))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    // Same response whether the email is unknown or the password is
    // wrong; no hint about which part failed.
    let user = state
        .user_service
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| Error::Unauthorized("invalid_credentials".to_string()))?;

    let ok = verify_password(&payload.password, &user.password_hash)
        .map_err(|e| Error::Internal(format!("password verification failed: {}", e)))?;
    if !ok {
        return Err(Error::Unauthorized("invalid_credentials".to_string()));
    }

    let config = crate::config::get_config();
    let token = issue_token(
        &config.jwt_secret,
        user.id,
        &user.email,
        &user.role,
        config.token_ttl_hours,
    )
    .map_err(|e| Error::Internal(format!("token issuance failed: {}", e)))?;

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(user),
    }))
}

#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let id = claims
        .user_id()
        .ok_or_else(|| Error::Unauthorized("invalid_token".to_string()))?;
    let user = state.user_service.get_by_id(id).await?;
    Ok(Json(UserResponse::from(user)))
}
