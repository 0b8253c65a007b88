use sea_query::{Expr, ExprTrait, Func, Order, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::{SqliteExecutor, prelude::FromRow};
use validator::Validate;
use yummio_db::table::{
    Ingredient, Instruction, Nutrition as NutritionTable, Recipe, RecipeTag, Tag, UserFavorites,
};
use yummio_shared::recipe::Difficulty;

#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<sqlx::types::Text<Difficulty>>,
    pub recipe_type: Option<String>,
    pub rating: f64,
    pub rating_count: i64,
    pub is_public: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeSummary {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<Difficulty>,
    #[serde(rename = "type")]
    pub recipe_type: Option<String>,
    pub rating: f64,
    pub rating_count: i64,
    pub is_public: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<RecipeRow> for RecipeSummary {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            image_url: row.image_url,
            prep_time: row.prep_time,
            cook_time: row.cook_time,
            servings: row.servings,
            difficulty: row.difficulty.map(|d| d.0),
            recipe_type: row.recipe_type,
            rating: row.rating,
            rating_count: row.rating_count,
            is_public: row.is_public,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct IngredientView {
    pub id: String,
    pub name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub notes: Option<String>,
    pub order_index: i32,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InstructionView {
    pub id: String,
    pub step: i32,
    #[serde(rename = "instruction")]
    pub text: String,
    pub image_url: Option<String>,
    pub timer_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TagView {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
}

/// Nutrition facts, per recipe. Calories in kcal, sodium and cholesterol in
/// milligrams, everything else in grams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Nutrition {
    #[validate(range(min = 0))]
    pub calories: Option<i32>,
    #[validate(range(min = 0.0))]
    pub protein: Option<f64>,
    #[validate(range(min = 0.0))]
    pub carbs: Option<f64>,
    #[validate(range(min = 0.0))]
    pub fat: Option<f64>,
    #[validate(range(min = 0.0))]
    pub fiber: Option<f64>,
    #[validate(range(min = 0.0))]
    pub sugar: Option<f64>,
    #[validate(range(min = 0.0))]
    pub sodium: Option<f64>,
    #[validate(range(min = 0.0))]
    pub cholesterol: Option<f64>,
}

/// Select over live recipes with the columns of [`RecipeRow`].
pub fn summary_select() -> SelectStatement {
    Query::select()
        .columns([
            (Recipe::Table, Recipe::Id),
            (Recipe::Table, Recipe::UserId),
            (Recipe::Table, Recipe::Title),
            (Recipe::Table, Recipe::Description),
            (Recipe::Table, Recipe::ImageUrl),
            (Recipe::Table, Recipe::PrepTime),
            (Recipe::Table, Recipe::CookTime),
            (Recipe::Table, Recipe::Servings),
            (Recipe::Table, Recipe::Difficulty),
            (Recipe::Table, Recipe::RecipeType),
            (Recipe::Table, Recipe::Rating),
            (Recipe::Table, Recipe::RatingCount),
            (Recipe::Table, Recipe::IsPublic),
            (Recipe::Table, Recipe::CreatedAt),
            (Recipe::Table, Recipe::UpdatedAt),
        ])
        .from(Recipe::Table)
        .and_where(Expr::col((Recipe::Table, Recipe::DeletedAt)).is_null())
        .to_owned()
}

/// Soft-deleted recipes are never returned.
pub async fn find_recipe<'c>(
    executor: impl SqliteExecutor<'c>,
    id: &str,
) -> yummio_shared::Result<Option<RecipeRow>> {
    let statement = summary_select()
        .and_where(Expr::col((Recipe::Table, Recipe::Id)).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
        .fetch_optional(executor)
        .await?)
}

pub(crate) async fn find_ingredients<'c>(
    executor: impl SqliteExecutor<'c>,
    recipe_id: &str,
) -> yummio_shared::Result<Vec<IngredientView>> {
    let statement = Query::select()
        .columns([
            Ingredient::Id,
            Ingredient::Name,
            Ingredient::Amount,
            Ingredient::Unit,
            Ingredient::Notes,
            Ingredient::OrderIndex,
        ])
        .from(Ingredient::Table)
        .and_where(Expr::col(Ingredient::RecipeId).eq(recipe_id))
        .order_by(Ingredient::OrderIndex, Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, IngredientView, _>(&sql, values)
        .fetch_all(executor)
        .await?)
}

pub(crate) async fn find_instructions<'c>(
    executor: impl SqliteExecutor<'c>,
    recipe_id: &str,
) -> yummio_shared::Result<Vec<InstructionView>> {
    let statement = Query::select()
        .columns([
            Instruction::Id,
            Instruction::Step,
            Instruction::Text,
            Instruction::ImageUrl,
            Instruction::TimerMinutes,
        ])
        .from(Instruction::Table)
        .and_where(Expr::col(Instruction::RecipeId).eq(recipe_id))
        .order_by(Instruction::Step, Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, InstructionView, _>(&sql, values)
        .fetch_all(executor)
        .await?)
}

pub(crate) async fn find_tags<'c>(
    executor: impl SqliteExecutor<'c>,
    recipe_id: &str,
) -> yummio_shared::Result<Vec<TagView>> {
    let statement = Query::select()
        .columns([(Tag::Table, Tag::Id), (Tag::Table, Tag::Name), (Tag::Table, Tag::Color)])
        .from(Tag::Table)
        .inner_join(
            RecipeTag::Table,
            Expr::col((RecipeTag::Table, RecipeTag::TagId)).equals((Tag::Table, Tag::Id)),
        )
        .and_where(Expr::col((RecipeTag::Table, RecipeTag::RecipeId)).eq(recipe_id))
        .order_by((Tag::Table, Tag::Name), Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, TagView, _>(&sql, values)
        .fetch_all(executor)
        .await?)
}

pub(crate) async fn find_nutrition<'c>(
    executor: impl SqliteExecutor<'c>,
    recipe_id: &str,
) -> yummio_shared::Result<Option<Nutrition>> {
    let statement = Query::select()
        .columns([
            NutritionTable::Calories,
            NutritionTable::Protein,
            NutritionTable::Carbs,
            NutritionTable::Fat,
            NutritionTable::Fiber,
            NutritionTable::Sugar,
            NutritionTable::Sodium,
            NutritionTable::Cholesterol,
        ])
        .from(NutritionTable::Table)
        .and_where(Expr::col(NutritionTable::RecipeId).eq(recipe_id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, Nutrition, _>(&sql, values)
        .fetch_optional(executor)
        .await?)
}

pub(crate) async fn count_favorites<'c>(
    executor: impl SqliteExecutor<'c>,
    recipe_id: &str,
    user_id: Option<&str>,
) -> yummio_shared::Result<i64> {
    let mut statement = Query::select()
        .expr(Func::count(Expr::col(UserFavorites::UserId)))
        .from(UserFavorites::Table)
        .and_where(Expr::col(UserFavorites::RecipeId).eq(recipe_id))
        .to_owned();

    if let Some(user_id) = user_id {
        statement.and_where(Expr::col(UserFavorites::UserId).eq(user_id));
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_one(executor)
        .await?;

    Ok(count)
}
