use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;
use yummio_db::table::CollectionRecipes;
use yummio_shared::access;

impl super::Command {
    /// Links a recipe the owner can see. Linking twice is a no-op.
    #[tracing::instrument(skip(self))]
    pub async fn add_recipe(
        &self,
        user_id: &str,
        id: &str,
        recipe_id: &str,
    ) -> yummio_shared::Result<()> {
        let mut tx = self.write_db.begin().await?;
        Self::load_owned(&mut tx, id, user_id, "modify").await?;

        let Some(recipe) = yummio_recipe::find_recipe(&mut *tx, recipe_id).await? else {
            yummio_shared::not_found!("recipe not found");
        };

        access::ensure_readable(&recipe.user_id, recipe.is_public, Some(user_id), "recipe")?;

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let statement = Query::insert()
            .into_table(CollectionRecipes::Table)
            .columns([
                CollectionRecipes::CollectionId,
                CollectionRecipes::RecipeId,
                CollectionRecipes::CreatedAt,
            ])
            .values_panic([id.into(), recipe_id.into(), now.into()])
            .on_conflict(
                OnConflict::columns([CollectionRecipes::CollectionId, CollectionRecipes::RecipeId])
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
    pub async fn remove_recipe(
        &self,
        user_id: &str,
        id: &str,
        recipe_id: &str,
    ) -> yummio_shared::Result<()> {
        let mut tx = self.write_db.begin().await?;
        Self::load_owned(&mut tx, id, user_id, "modify").await?;

        let statement = Query::delete()
            .from_table(CollectionRecipes::Table)
            .and_where(Expr::col(CollectionRecipes::CollectionId).eq(id))
            .and_where(Expr::col(CollectionRecipes::RecipeId).eq(recipe_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(())
    }
}
