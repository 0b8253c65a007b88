use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use yummio_recipe::{
    RateInput, RatingSummary, RecipeDetail, RecipeFilter, RecipeInput, RecipeSummary, SortDirection,
    SortField,
};
use yummio_shared::{Page, Pagination, recipe::Difficulty};

use super::{AppJson, AppQuery, AppState};
use crate::{auth::AuthUser, error::AppError};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    page: Option<u32>,
    limit: Option<u32>,
    q: Option<String>,
    search: Option<String>,
    difficulty: Option<Difficulty>,
    #[serde(rename = "type")]
    recipe_type: Option<String>,
    /// Repeated (`tags=a&tags=b`) or comma separated (`tags=a,b`).
    #[serde(default)]
    tags: Vec<String>,
    sort_by: Option<SortField>,
    sort_order: Option<SortDirection>,
}

impl ListParams {
    fn pagination(&self) -> Pagination {
        let default = Pagination::default();
        Pagination::new(
            self.page.unwrap_or(default.page),
            self.limit.unwrap_or(default.limit),
        )
    }

    fn into_parts(self) -> (Option<String>, RecipeFilter, Pagination) {
        let pagination = self.pagination();
        let tags = self
            .tags
            .iter()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned)
            .collect();

        let filter = RecipeFilter {
            search: self.search.filter(|term| !term.trim().is_empty()),
            difficulty: self.difficulty,
            recipe_type: self.recipe_type.filter(|value| !value.trim().is_empty()),
            tags,
            sort_by: self.sort_by.unwrap_or_default(),
            sort_order: self.sort_order.unwrap_or_default(),
        };

        (self.q, filter, pagination)
    }
}

pub async fn list(
    State(app): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> Result<Json<Page<RecipeSummary>>, AppError> {
    let (_, filter, pagination) = params.into_parts();
    let page = app.recipe_query.list_public(filter, pagination).await?;

    Ok(Json(page))
}

pub async fn search(
    State(app): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> Result<Json<Page<RecipeSummary>>, AppError> {
    let (q, filter, pagination) = params.into_parts();
    let page = app
        .recipe_query
        .search(q.as_deref().unwrap_or_default(), filter, pagination)
        .await?;

    Ok(Json(page))
}

#[derive(Debug, Deserialize)]
pub struct FeaturedParams {
    limit: Option<u32>,
}

pub async fn featured(
    State(app): State<AppState>,
    AppQuery(params): AppQuery<FeaturedParams>,
) -> Result<Json<Vec<RecipeSummary>>, AppError> {
    Ok(Json(app.recipe_query.featured(params.limit).await?))
}

pub async fn mine(
    State(app): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<ListParams>,
) -> Result<Json<Page<RecipeSummary>>, AppError> {
    let (_, filter, pagination) = params.into_parts();
    let page = app
        .recipe_query
        .list_mine(&user.id, filter, pagination)
        .await?;

    Ok(Json(page))
}

pub async fn favorites(
    State(app): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<ListParams>,
) -> Result<Json<Page<RecipeSummary>>, AppError> {
    let page = app
        .recipe_query
        .list_favorites(&user.id, params.pagination())
        .await?;

    Ok(Json(page))
}

pub async fn detail(
    State(app): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<RecipeDetail>, AppError> {
    let viewer = user.as_ref().map(|user| user.id.as_str());

    Ok(Json(app.recipe_query.find(&id, viewer).await?))
}

pub async fn create(
    State(app): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<RecipeInput>,
) -> Result<impl IntoResponse, AppError> {
    let id = app.recipe_command.create(&user.id, input).await?;
    let recipe = app.recipe_query.find(&id, Some(user.id.as_str())).await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn update(
    State(app): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    AppJson(input): AppJson<RecipeInput>,
) -> Result<Json<RecipeDetail>, AppError> {
    app.recipe_command.update(&user.id, &id, input).await?;

    Ok(Json(app.recipe_query.find(&id, Some(user.id.as_str())).await?))
}

pub async fn delete(
    State(app): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app.recipe_command.delete(&user.id, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_favorite(
    State(app): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app.recipe_command.add_favorite(&user.id, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_favorite(
    State(app): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app.recipe_command.remove_favorite(&user.id, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn rate(
    State(app): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    AppJson(input): AppJson<RateInput>,
) -> Result<Json<RatingSummary>, AppError> {
    Ok(Json(app.recipe_command.rate(&user.id, &id, input).await?))
}
