use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::Serialize;

use super::AppState;
use crate::{auth::AuthUser, error::AppError, upload::UploadError};

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

pub async fn image(
    State(app): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_owned();
        app.upload.check_extension(&filename)?;

        let bytes = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::from(UploadError::TooLarge {
                    max: app.upload.max_bytes(),
                })
            } else {
                AppError::from(e)
            }
        })?;
        let url = app.upload.upload_image(&filename, bytes.to_vec()).await?;

        tracing::info!(user_id = %user.id, url, "image uploaded");

        return Ok(Json(UploadResponse { url }));
    }

    Err(AppError::BadRequest(format!(
        "multipart field `{IMAGE_FIELD}` is required"
    )))
}
