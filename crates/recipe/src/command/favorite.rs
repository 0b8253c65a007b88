use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;
use yummio_db::table::UserFavorites;

use crate::repository;

impl super::Command {
    /// Idempotent: favoriting twice keeps a single entry.
    #[tracing::instrument(skip(self))]
    pub async fn add_favorite(&self, user_id: &str, recipe_id: &str) -> yummio_shared::Result<()> {
        let mut tx = self.write_db.begin().await?;

        if repository::find_recipe(&mut *tx, recipe_id).await?.is_none() {
            yummio_shared::not_found!("recipe not found");
        }

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let statement = Query::insert()
            .into_table(UserFavorites::Table)
            .columns([
                UserFavorites::UserId,
                UserFavorites::RecipeId,
                UserFavorites::CreatedAt,
            ])
            .values_panic([user_id.into(), recipe_id.into(), now.into()])
            .on_conflict(
                OnConflict::columns([UserFavorites::UserId, UserFavorites::RecipeId])
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_favorite(
        &self,
        user_id: &str,
        recipe_id: &str,
    ) -> yummio_shared::Result<()> {
        let mut tx = self.write_db.begin().await?;

        if repository::find_recipe(&mut *tx, recipe_id).await?.is_none() {
            yummio_shared::not_found!("recipe not found");
        }

        let statement = Query::delete()
            .from_table(UserFavorites::Table)
            .and_where(Expr::col(UserFavorites::UserId).eq(user_id))
            .and_where(Expr::col(UserFavorites::RecipeId).eq(recipe_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(())
    }
}
