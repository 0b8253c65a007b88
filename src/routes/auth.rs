use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::{Value, json};
use yummio_user::{
    AuthResponse, ForgotPasswordInput, LoginInput, RefreshInput, RegisterInput, ResetPasswordInput,
};

use super::{AppJson, AppState};
use crate::error::AppError;

pub async fn register(
    State(app): State<AppState>,
    AppJson(input): AppJson<RegisterInput>,
) -> Result<impl IntoResponse, AppError> {
    let response = app.user_command.register(input).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(app): State<AppState>,
    AppJson(input): AppJson<LoginInput>,
) -> Result<Json<AuthResponse>, AppError> {
    Ok(Json(app.user_command.login(input).await?))
}

pub async fn refresh(
    State(app): State<AppState>,
    AppJson(input): AppJson<RefreshInput>,
) -> Result<Json<AuthResponse>, AppError> {
    Ok(Json(app.user_command.refresh(input).await?))
}

/// Same answer whether or not the address is registered.
pub async fn forgot_password(
    State(app): State<AppState>,
    AppJson(input): AppJson<ForgotPasswordInput>,
) -> Result<Json<Value>, AppError> {
    app.user_command.forgot_password(input).await?;

    Ok(Json(json!({
        "message": "if the address is registered, a password reset link has been sent"
    })))
}

pub async fn reset_password(
    State(app): State<AppState>,
    AppJson(input): AppJson<ResetPasswordInput>,
) -> Result<Json<Value>, AppError> {
    app.user_command.reset_password(input).await?;

    Ok(Json(json!({ "message": "password has been reset" })))
}
