use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use yummio_shopping::{
    CreateInput, ItemInput, ItemRow, ListDetail, ListSummary, UpdateInput, UpdateItemInput,
};

use super::{AppJson, AppState};
use crate::{auth::AuthUser, error::AppError};

pub async fn list(
    State(app): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ListSummary>>, AppError> {
    Ok(Json(app.shopping_query.list_mine(&user.id).await?))
}

pub async fn create(
    State(app): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<CreateInput>,
) -> Result<impl IntoResponse, AppError> {
    let id = app.shopping_command.create(&user.id, input).await?;
    let list = app.shopping_query.find(&id, &user.id).await?;

    Ok((StatusCode::CREATED, Json(list)))
}

pub async fn detail(
    State(app): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ListDetail>, AppError> {
    Ok(Json(app.shopping_query.find(&id, &user.id).await?))
}

pub async fn update(
    State(app): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateInput>,
) -> Result<Json<ListDetail>, AppError> {
    app.shopping_command.update(&user.id, &id, input).await?;

    Ok(Json(app.shopping_query.find(&id, &user.id).await?))
}

pub async fn delete(
    State(app): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app.shopping_command.delete(&user.id, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_item(
    State(app): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    AppJson(input): AppJson<ItemInput>,
) -> Result<impl IntoResponse, AppError> {
    let item = app.shopping_command.add_item(&user.id, &id, input).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(app): State<AppState>,
    user: AuthUser,
    Path((id, item_id)): Path<(String, String)>,
    AppJson(input): AppJson<UpdateItemInput>,
) -> Result<Json<ItemRow>, AppError> {
    let item = app
        .shopping_command
        .update_item(&user.id, &id, &item_id, input)
        .await?;

    Ok(Json(item))
}

pub async fn delete_item(
    State(app): State<AppState>,
    user: AuthUser,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    app.shopping_command
        .delete_item(&user.id, &id, &item_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
