use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;
use validator::Validate;
use yummio_db::table::Collection;

use super::UpdateInput;

impl super::Command {
    /// Applies only the fields present in `input`.
    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        input: UpdateInput,
    ) -> yummio_shared::Result<()> {
        input.validate()?;

        let mut tx = self.write_db.begin().await?;
        Self::load_owned(&mut tx, id, user_id, "update").await?;

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let mut values: Vec<(Collection, Expr)> = vec![(Collection::UpdatedAt, now.into())];

        if let Some(name) = input.name {
            values.push((Collection::Name, name.trim().into()));
        }

        if let Some(description) = input.description.into_update() {
            values.push((Collection::Description, description.into()));
        }

        if let Some(image_url) = input.image_url.into_update() {
            values.push((Collection::ImageUrl, image_url.into()));
        }

        if let Some(is_public) = input.is_public {
            values.push((Collection::IsPublic, is_public.into()));
        }

        let statement = Query::update()
            .table(Collection::Table)
            .values(values)
            .and_where(Expr::col(Collection::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, user_id: &str, id: &str) -> yummio_shared::Result<()> {
        let mut tx = self.write_db.begin().await?;
        Self::load_owned(&mut tx, id, user_id, "delete").await?;

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let statement = Query::update()
            .table(Collection::Table)
            .values([
                (Collection::DeletedAt, now.into()),
                (Collection::UpdatedAt, now.into()),
            ])
            .and_where(Expr::col(Collection::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!("collection deleted");

        Ok(())
    }
}
