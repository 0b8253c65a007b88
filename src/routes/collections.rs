use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use yummio_collection::{CollectionDetail, CollectionSummary, CreateInput, UpdateInput};

use super::{AppJson, AppState};
use crate::{auth::AuthUser, error::AppError};

pub async fn list(
    State(app): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<CollectionSummary>>, AppError> {
    Ok(Json(app.collection_query.list_mine(&user.id).await?))
}

pub async fn create(
    State(app): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateInput>,
) -> Result<impl IntoResponse, AppError> {
    let id = app.collection_command.create(&user.id, input).await?;
    let collection = app.collection_query.find(&id, Some(user.id.as_str())).await?;

    Ok((StatusCode::CREATED, Json(collection)))
}

pub async fn detail(
    State(app): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<CollectionDetail>, AppError> {
    Ok(Json(app.collection_query.find(&id, Some(user.id.as_str())).await?))
}

pub async fn update(
    State(app): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateInput>,
) -> Result<Json<CollectionDetail>, AppError> {
    app.collection_command.update(&user.id, &id, input).await?;

    Ok(Json(app.collection_query.find(&id, Some(user.id.as_str())).await?))
}

pub async fn delete(
    State(app): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app.collection_command.delete(&user.id, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_recipe(
    State(app): State<AppState>,
    user: AuthUser,
    Path((id, recipe_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    app.collection_command
        .add_recipe(&user.id, &id, &recipe_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_recipe(
    State(app): State<AppState>,
    user: AuthUser,
    Path((id, recipe_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    app.collection_command
        .remove_recipe(&user.id, &id, &recipe_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
