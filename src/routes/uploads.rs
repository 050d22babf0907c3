use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    models::authz::Ability,
    utils::token::Claims,
    AppState,
};

const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// Stores an employee photo on local disk and returns its reference URL.
/// Only the URL ever lands in the database.
#[axum::debug_handler]
pub async fn upload_photo(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    state
        .permission_service
        .require(&claims, Ability::PhotoUpload)
        .await?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("photo") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let ext = file_name
            .rsplit('.')
            .next()
            .map(|e| e.to_ascii_lowercase())
            .filter(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()))
            .ok_or_else(|| Error::BadRequest("unsupported file type".to_string()))?;

        let data = field.bytes().await?;
        if data.is_empty() {
            return Err(Error::BadRequest("empty file".to_string()));
        }

        let config = crate::config::get_config();
        tokio::fs::create_dir_all(&config.uploads_dir).await?;
        let stored_name = format!("{}.{}", Uuid::new_v4(), ext);
        let path = std::path::Path::new(&config.uploads_dir).join(&stored_name);
        tokio::fs::write(&path, &data).await?;

        tracing::info!(file = %stored_name, bytes = data.len(), "photo uploaded");
        return Ok(Json(json!({ "url": format!("/uploads/{}", stored_name) })));
    }

    Err(Error::BadRequest("missing photo field".to_string()))
}
