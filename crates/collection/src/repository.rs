use sea_query::{
    Alias, Expr, ExprTrait, Func, Order, Query, SelectStatement, SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqliteExecutor, prelude::FromRow};
use yummio_db::table::{Collection, CollectionRecipes, Recipe};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CollectionRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_public: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CollectionSummary {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub collection: CollectionRow,
    pub recipe_count: i64,
}

fn select() -> SelectStatement {
    Query::select()
        .columns([
            (Collection::Table, Collection::Id),
            (Collection::Table, Collection::UserId),
            (Collection::Table, Collection::Name),
            (Collection::Table, Collection::Description),
            (Collection::Table, Collection::ImageUrl),
            (Collection::Table, Collection::IsPublic),
            (Collection::Table, Collection::CreatedAt),
            (Collection::Table, Collection::UpdatedAt),
        ])
        .from(Collection::Table)
        .and_where(Expr::col((Collection::Table, Collection::DeletedAt)).is_null())
        .to_owned()
}

pub(crate) async fn find<'c>(
    executor: impl SqliteExecutor<'c>,
    id: &str,
) -> yummio_shared::Result<Option<CollectionRow>> {
    let statement = select()
        .and_where(Expr::col((Collection::Table, Collection::Id)).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, CollectionRow, _>(&sql, values)
        .fetch_optional(executor)
        .await?)
}

/// Live collections of a user, each with the number of linked recipes the
/// user can still see.
pub(crate) async fn find_by_owner<'c>(
    executor: impl SqliteExecutor<'c>,
    user_id: &str,
) -> yummio_shared::Result<Vec<CollectionSummary>> {
    let statement = select()
        .expr_as(
            Func::count(Expr::col((Recipe::Table, Recipe::Id))),
            Alias::new("recipe_count"),
        )
        .left_join(
            CollectionRecipes::Table,
            Expr::col((CollectionRecipes::Table, CollectionRecipes::CollectionId))
                .equals((Collection::Table, Collection::Id)),
        )
        .left_join(
            Recipe::Table,
            Expr::col((Recipe::Table, Recipe::Id))
                .equals((CollectionRecipes::Table, CollectionRecipes::RecipeId))
                .and(Expr::col((Recipe::Table, Recipe::DeletedAt)).is_null())
                .and(
                    Expr::col((Recipe::Table, Recipe::IsPublic))
                        .eq(true)
                        .or(Expr::col((Recipe::Table, Recipe::UserId)).eq(user_id)),
                ),
        )
        .and_where(Expr::col((Collection::Table, Collection::UserId)).eq(user_id))
        .group_by_col((Collection::Table, Collection::Id))
        .order_by((Collection::Table, Collection::CreatedAt), Order::Desc)
        .order_by((Collection::Table, Collection::Id), Order::Desc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, CollectionSummary, _>(&sql, values)
        .fetch_all(executor)
        .await?)
}
