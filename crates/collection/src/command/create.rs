use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;
use yummio_db::table::Collection;

use super::CreateInput;

impl super::Command {
    #[tracing::instrument(skip(self, input))]
    pub async fn create(&self, user_id: &str, input: CreateInput) -> yummio_shared::Result<String> {
        input.validate()?;

        let id = Uuid::new_v4().to_string();
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let statement = Query::insert()
            .into_table(Collection::Table)
            .columns([
                Collection::Id,
                Collection::UserId,
                Collection::Name,
                Collection::Description,
                Collection::ImageUrl,
                Collection::IsPublic,
                Collection::CreatedAt,
                Collection::UpdatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                user_id.into(),
                input.name.trim().into(),
                input.description.into(),
                input.image_url.into(),
                input.is_public.unwrap_or(false).into(),
                now.into(),
                now.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        tracing::info!(collection_id = %id, "collection created");

        Ok(id)
    }
}
