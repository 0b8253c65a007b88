use sea_query::{Expr, ExprTrait, Func, Order, Query as SqlQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::Validate;
use yummio_db::table::Recipe;
use yummio_shared::{Page, Pagination};

use super::filter::{apply_filter, apply_order};
use crate::{RecipeFilter, RecipeRow, RecipeSummary, Scope, summary_select};

pub const FEATURED_MIN_RATING: f64 = 4.0;
pub const DEFAULT_FEATURED_LIMIT: u32 = 6;

impl super::Query {
    /// Paged listing of the recipes in `scope` matching `filter`.
    ///
    /// `total` counts every match regardless of the requested page.
    pub async fn filter(
        &self,
        scope: Scope,
        filter: RecipeFilter,
        pagination: Pagination,
    ) -> yummio_shared::Result<Page<RecipeSummary>> {
        filter.validate()?;
        pagination.validate()?;

        let mut count_statement = SqlQuery::select()
            .expr(Func::count_distinct(Expr::col((Recipe::Table, Recipe::Id))))
            .from(Recipe::Table)
            .to_owned();
        apply_filter(&mut count_statement, &scope, &filter);

        let (sql, values) = count_statement.build_sqlx(SqliteQueryBuilder);
        let (total,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        let mut statement = summary_select();
        apply_filter(&mut statement, &scope, &filter);
        apply_order(&mut statement, &filter);
        statement
            .limit(u64::from(pagination.limit))
            .offset(pagination.offset());

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            total as u64,
            pagination,
        ))
    }

    pub async fn list_public(
        &self,
        filter: RecipeFilter,
        pagination: Pagination,
    ) -> yummio_shared::Result<Page<RecipeSummary>> {
        self.filter(Scope::Public, filter, pagination).await
    }

    /// Public recipes whose title or description contains `term`.
    pub async fn search(
        &self,
        term: &str,
        filter: RecipeFilter,
        pagination: Pagination,
    ) -> yummio_shared::Result<Page<RecipeSummary>> {
        if term.trim().is_empty() {
            yummio_shared::user!("search query is required");
        }

        let filter = RecipeFilter {
            search: Some(term.trim().to_owned()),
            ..filter
        };

        self.filter(Scope::Public, filter, pagination).await
    }

    /// Every recipe of the user, private ones included.
    pub async fn list_mine(
        &self,
        user_id: &str,
        filter: RecipeFilter,
        pagination: Pagination,
    ) -> yummio_shared::Result<Page<RecipeSummary>> {
        self.filter(Scope::Owner(user_id.to_owned()), filter, pagination)
            .await
    }

    pub async fn list_favorites(
        &self,
        user_id: &str,
        pagination: Pagination,
    ) -> yummio_shared::Result<Page<RecipeSummary>> {
        self.filter(
            Scope::Favorites(user_id.to_owned()),
            RecipeFilter::default(),
            pagination,
        )
        .await
    }

    /// Best rated public recipes, ties broken by number of ratings.
    pub async fn featured(&self, limit: Option<u32>) -> yummio_shared::Result<Vec<RecipeSummary>> {
        let limit = limit.unwrap_or(DEFAULT_FEATURED_LIMIT);
        if !(1..=yummio_shared::MAX_LIMIT).contains(&limit) {
            yummio_shared::user!("limit must be between 1 and {}", yummio_shared::MAX_LIMIT);
        }

        let statement = summary_select()
            .and_where(Expr::col((Recipe::Table, Recipe::IsPublic)).eq(true))
            .and_where(Expr::col((Recipe::Table, Recipe::Rating)).gte(FEATURED_MIN_RATING))
            .order_by((Recipe::Table, Recipe::Rating), Order::Desc)
            .order_by((Recipe::Table, Recipe::RatingCount), Order::Desc)
            .order_by((Recipe::Table, Recipe::CreatedAt), Order::Desc)
            .limit(u64::from(limit))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
