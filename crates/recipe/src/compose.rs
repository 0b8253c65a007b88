//! Multi-table writes of the recipe aggregate.
//!
//! Every function runs on the caller's connection, which is expected to be
//! inside a transaction: a failure anywhere leaves the aggregate untouched
//! once the caller drops the transaction.

use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqliteConnection;
use time::OffsetDateTime;
use uuid::Uuid;
use yummio_db::table::{
    Ingredient, Instruction, Nutrition as NutritionTable, Rating, Recipe, RecipeTag, Tag,
};

use crate::{IngredientInput, InstructionInput, Nutrition, RecipeInput};

/// Title and description folded with Unicode case rules; SQLite `LOWER` only
/// folds ASCII.
pub(crate) fn search_text(input: &RecipeInput) -> String {
    let title = input.title.trim().to_lowercase();

    match input.description.as_deref().map(str::trim) {
        Some(description) if !description.is_empty() => {
            format!("{title}\n{}", description.to_lowercase())
        }
        _ => title,
    }
}

pub(crate) async fn insert_recipe(
    conn: &mut SqliteConnection,
    id: &str,
    user_id: &str,
    input: &RecipeInput,
) -> yummio_shared::Result<()> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(Recipe::Table)
        .columns([
            Recipe::Id,
            Recipe::UserId,
            Recipe::Title,
            Recipe::Description,
            Recipe::ImageUrl,
            Recipe::PrepTime,
            Recipe::CookTime,
            Recipe::Servings,
            Recipe::Difficulty,
            Recipe::RecipeType,
            Recipe::SearchText,
            Recipe::IsPublic,
            Recipe::CreatedAt,
            Recipe::UpdatedAt,
        ])
        .values_panic([
            id.into(),
            user_id.into(),
            input.title.trim().into(),
            input.description.to_owned().into(),
            input.image_url.to_owned().into(),
            input.prep_time.into(),
            input.cook_time.into(),
            input.servings.into(),
            input.difficulty.map(|d| d.to_string()).into(),
            input.recipe_type.to_owned().into(),
            search_text(input).into(),
            input.is_public.unwrap_or(true).into(),
            now.into(),
            now.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

/// Replaces every scalar column; `is_public` is resolved by the caller.
pub(crate) async fn update_recipe(
    conn: &mut SqliteConnection,
    id: &str,
    input: &RecipeInput,
    is_public: bool,
) -> yummio_shared::Result<()> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::update()
        .table(Recipe::Table)
        .values([
            (Recipe::Title, input.title.trim().into()),
            (Recipe::Description, input.description.to_owned().into()),
            (Recipe::ImageUrl, input.image_url.to_owned().into()),
            (Recipe::PrepTime, input.prep_time.into()),
            (Recipe::CookTime, input.cook_time.into()),
            (Recipe::Servings, input.servings.into()),
            (
                Recipe::Difficulty,
                input.difficulty.map(|d| d.to_string()).into(),
            ),
            (Recipe::RecipeType, input.recipe_type.to_owned().into()),
            (Recipe::SearchText, search_text(input).into()),
            (Recipe::IsPublic, is_public.into()),
            (Recipe::UpdatedAt, now.into()),
        ])
        .and_where(Expr::col(Recipe::Id).eq(id))
        .and_where(Expr::col(Recipe::DeletedAt).is_null())
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

pub(crate) async fn soft_delete_recipe(
    conn: &mut SqliteConnection,
    id: &str,
) -> yummio_shared::Result<()> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::update()
        .table(Recipe::Table)
        .values([(Recipe::DeletedAt, now.into()), (Recipe::UpdatedAt, now.into())])
        .and_where(Expr::col(Recipe::Id).eq(id))
        .and_where(Expr::col(Recipe::DeletedAt).is_null())
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

/// Writes ingredients, instructions, tags and nutrition of a recipe.
pub(crate) async fn replace_children(
    conn: &mut SqliteConnection,
    recipe_id: &str,
    input: &RecipeInput,
) -> yummio_shared::Result<()> {
    replace_ingredients(conn, recipe_id, &input.ingredients).await?;
    replace_instructions(conn, recipe_id, &input.instructions).await?;
    replace_tags(conn, recipe_id, &input.tags).await?;

    if let Some(nutrition) = &input.nutrition {
        upsert_nutrition(conn, recipe_id, nutrition).await?;
    }

    Ok(())
}

async fn replace_ingredients(
    conn: &mut SqliteConnection,
    recipe_id: &str,
    ingredients: &[IngredientInput],
) -> yummio_shared::Result<()> {
    let statement = Query::delete()
        .from_table(Ingredient::Table)
        .and_where(Expr::col(Ingredient::RecipeId).eq(recipe_id))
        .to_owned();
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    if ingredients.is_empty() {
        return Ok(());
    }

    let mut statement = Query::insert()
        .into_table(Ingredient::Table)
        .columns([
            Ingredient::Id,
            Ingredient::RecipeId,
            Ingredient::Name,
            Ingredient::Amount,
            Ingredient::Unit,
            Ingredient::Notes,
            Ingredient::OrderIndex,
        ])
        .to_owned();

    for (index, ingredient) in ingredients.iter().enumerate() {
        statement.values_panic([
            Uuid::new_v4().to_string().into(),
            recipe_id.into(),
            ingredient.name.trim().into(),
            ingredient.amount.into(),
            ingredient.unit.to_owned().into(),
            ingredient.notes.to_owned().into(),
            ingredient.order_index.unwrap_or(index as i32).into(),
        ]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

async fn replace_instructions(
    conn: &mut SqliteConnection,
    recipe_id: &str,
    instructions: &[InstructionInput],
) -> yummio_shared::Result<()> {
    let statement = Query::delete()
        .from_table(Instruction::Table)
        .and_where(Expr::col(Instruction::RecipeId).eq(recipe_id))
        .to_owned();
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    if instructions.is_empty() {
        return Ok(());
    }

    let mut statement = Query::insert()
        .into_table(Instruction::Table)
        .columns([
            Instruction::Id,
            Instruction::RecipeId,
            Instruction::Step,
            Instruction::Text,
            Instruction::ImageUrl,
            Instruction::TimerMinutes,
        ])
        .to_owned();

    for instruction in instructions {
        statement.values_panic([
            Uuid::new_v4().to_string().into(),
            recipe_id.into(),
            instruction.step.into(),
            instruction.text.trim().into(),
            instruction.image_url.to_owned().into(),
            instruction.timer_minutes.into(),
        ]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

/// Resolves a tag name to its id, creating the tag on first use.
async fn resolve_tag(conn: &mut SqliteConnection, name: &str) -> yummio_shared::Result<String> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(Tag::Table)
        .columns([Tag::Id, Tag::Name, Tag::CreatedAt])
        .values_panic([Uuid::new_v4().to_string().into(), name.into(), now.into()])
        .on_conflict(OnConflict::column(Tag::Name).do_nothing().to_owned())
        .to_owned();
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let statement = Query::select()
        .column(Tag::Id)
        .from(Tag::Table)
        .and_where(Expr::col(Tag::Name).eq(name))
        .to_owned();
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let (id,) = sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_one(&mut *conn)
        .await?;

    Ok(id)
}

async fn replace_tags(
    conn: &mut SqliteConnection,
    recipe_id: &str,
    names: &[String],
) -> yummio_shared::Result<()> {
    let statement = Query::delete()
        .from_table(RecipeTag::Table)
        .and_where(Expr::col(RecipeTag::RecipeId).eq(recipe_id))
        .to_owned();
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let mut tag_ids: Vec<String> = vec![];
    for name in crate::command::unique_tag_names(names) {
        let id = resolve_tag(conn, &name).await?;
        if !tag_ids.contains(&id) {
            tag_ids.push(id);
        }
    }

    if tag_ids.is_empty() {
        return Ok(());
    }

    let mut statement = Query::insert()
        .into_table(RecipeTag::Table)
        .columns([RecipeTag::RecipeId, RecipeTag::TagId])
        .to_owned();

    for tag_id in tag_ids {
        statement.values_panic([recipe_id.into(), tag_id.into()]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

async fn upsert_nutrition(
    conn: &mut SqliteConnection,
    recipe_id: &str,
    nutrition: &Nutrition,
) -> yummio_shared::Result<()> {
    let statement = Query::insert()
        .into_table(NutritionTable::Table)
        .columns([
            NutritionTable::Id,
            NutritionTable::RecipeId,
            NutritionTable::Calories,
            NutritionTable::Protein,
            NutritionTable::Carbs,
            NutritionTable::Fat,
            NutritionTable::Fiber,
            NutritionTable::Sugar,
            NutritionTable::Sodium,
            NutritionTable::Cholesterol,
        ])
        .values_panic([
            Uuid::new_v4().to_string().into(),
            recipe_id.into(),
            nutrition.calories.into(),
            nutrition.protein.into(),
            nutrition.carbs.into(),
            nutrition.fat.into(),
            nutrition.fiber.into(),
            nutrition.sugar.into(),
            nutrition.sodium.into(),
            nutrition.cholesterol.into(),
        ])
        .on_conflict(
            OnConflict::column(NutritionTable::RecipeId)
                .update_columns([
                    NutritionTable::Calories,
                    NutritionTable::Protein,
                    NutritionTable::Carbs,
                    NutritionTable::Fat,
                    NutritionTable::Fiber,
                    NutritionTable::Sugar,
                    NutritionTable::Sodium,
                    NutritionTable::Cholesterol,
                ])
                .to_owned(),
        )
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

/// Inserts the rating of a user, or updates it in place when one exists.
pub(crate) async fn upsert_rating(
    conn: &mut SqliteConnection,
    user_id: &str,
    recipe_id: &str,
    value: i32,
    review: Option<String>,
) -> yummio_shared::Result<()> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(Rating::Table)
        .columns([
            Rating::Id,
            Rating::UserId,
            Rating::RecipeId,
            Rating::Value,
            Rating::Review,
            Rating::CreatedAt,
            Rating::UpdatedAt,
        ])
        .values_panic([
            Uuid::new_v4().to_string().into(),
            user_id.into(),
            recipe_id.into(),
            value.into(),
            review.into(),
            now.into(),
            now.into(),
        ])
        .on_conflict(
            OnConflict::columns([Rating::UserId, Rating::RecipeId])
                .update_columns([Rating::Value, Rating::Review, Rating::UpdatedAt])
                .to_owned(),
        )
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

/// Recomputes the mean and count of a recipe's ratings from the full set.
pub(crate) async fn recompute_rating(
    conn: &mut SqliteConnection,
    recipe_id: &str,
) -> yummio_shared::Result<(f64, i64)> {
    let statement = Query::select()
        .expr(Expr::cust("COALESCE(AVG(\"value\"), 0.0)"))
        .expr(Expr::cust("COUNT(*)"))
        .from(Rating::Table)
        .and_where(Expr::col(Rating::RecipeId).eq(recipe_id))
        .to_owned();
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let (rating, rating_count) = sqlx::query_as_with::<_, (f64, i64), _>(&sql, values)
        .fetch_one(&mut *conn)
        .await?;

    let statement = Query::update()
        .table(Recipe::Table)
        .values([
            (Recipe::Rating, rating.into()),
            (Recipe::RatingCount, rating_count.into()),
        ])
        .and_where(Expr::col(Recipe::Id).eq(recipe_id))
        .to_owned();
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok((rating, rating_count))
}
