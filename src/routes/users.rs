use axum::{Json, extract::State, http::StatusCode};
use yummio_user::{ChangePasswordInput, UpdateProfileInput, UserView};

use super::{AppJson, AppState};
use crate::{auth::AuthUser, error::AppError};

pub async fn get_profile(
    State(app): State<AppState>,
    user: AuthUser,
) -> Result<Json<UserView>, AppError> {
    Ok(Json(app.user_command.get_profile(&user.id).await?))
}

pub async fn update_profile(
    State(app): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<UpdateProfileInput>,
) -> Result<Json<UserView>, AppError> {
    Ok(Json(app.user_command.update_profile(&user.id, input).await?))
}

pub async fn change_password(
    State(app): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<ChangePasswordInput>,
) -> Result<StatusCode, AppError> {
    app.user_command.change_password(&user.id, input).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_profile(
    State(app): State<AppState>,
    user: AuthUser,
) -> Result<StatusCode, AppError> {
    app.user_command.delete_profile(&user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
