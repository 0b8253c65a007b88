use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqliteConnection;
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;
use yummio_db::table::{ShoppingList, ShoppingListItem};

use super::{CreateInput, ItemInput, UpdateInput};

/// Inserts items with their position defaulting to the submission index.
pub(super) async fn insert_items(
    conn: &mut SqliteConnection,
    list_id: &str,
    items: &[ItemInput],
    first_index: i32,
) -> yummio_shared::Result<Vec<String>> {
    if items.is_empty() {
        return Ok(vec![]);
    }

    let now = OffsetDateTime::now_utc().unix_timestamp();
    let mut ids = Vec::with_capacity(items.len());
    let mut statement = Query::insert()
        .into_table(ShoppingListItem::Table)
        .columns([
            ShoppingListItem::Id,
            ShoppingListItem::ListId,
            ShoppingListItem::Name,
            ShoppingListItem::Amount,
            ShoppingListItem::Unit,
            ShoppingListItem::Notes,
            ShoppingListItem::Completed,
            ShoppingListItem::OrderIndex,
            ShoppingListItem::CreatedAt,
            ShoppingListItem::UpdatedAt,
        ])
        .to_owned();

    for (index, item) in items.iter().enumerate() {
        let position = match item.order_index {
            Some(order_index) => order_index,
            None => match i32::try_from(index)
                .ok()
                .and_then(|index| first_index.checked_add(index))
                .filter(|position| *position <= super::MAX_ORDER_INDEX)
            {
                Some(position) => position,
                None => yummio_shared::user!("shopping list has no free position left"),
            },
        };
        let id = Uuid::new_v4().to_string();
        statement.values_panic([
            id.to_owned().into(),
            list_id.into(),
            item.name.trim().into(),
            item.amount.into(),
            item.unit.to_owned().into(),
            item.notes.to_owned().into(),
            item.completed.into(),
            position.into(),
            now.into(),
            now.into(),
        ]);
        ids.push(id);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(ids)
}

impl super::Command {
    /// Creates the list and all of its items in one transaction.
    #[tracing::instrument(skip(self, input))]
    pub async fn create(&self, user_id: &str, input: CreateInput) -> yummio_shared::Result<String> {
        input.validate()?;

        let id = Uuid::new_v4().to_string();
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let statement = Query::insert()
            .into_table(ShoppingList::Table)
            .columns([
                ShoppingList::Id,
                ShoppingList::UserId,
                ShoppingList::Name,
                ShoppingList::CreatedAt,
                ShoppingList::UpdatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                user_id.into(),
                input.name.trim().into(),
                now.into(),
                now.into(),
            ])
            .to_owned();

        let mut tx = self.write_db.begin().await?;

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        insert_items(&mut tx, &id, &input.items, 0).await?;

        tx.commit().await?;

        tracing::info!(list_id = %id, items = input.items.len(), "shopping list created");

        Ok(id)
    }

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

        if let Some(name) = input.name {
            let now = OffsetDateTime::now_utc().unix_timestamp();
            let statement = Query::update()
                .table(ShoppingList::Table)
                .values([
                    (ShoppingList::Name, name.trim().into()),
                    (ShoppingList::UpdatedAt, now.into()),
                ])
                .and_where(Expr::col(ShoppingList::Id).eq(id))
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, user_id: &str, id: &str) -> yummio_shared::Result<()> {
        let mut tx = self.write_db.begin().await?;
        Self::load_owned(&mut tx, id, user_id, "delete").await?;

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let statement = Query::update()
            .table(ShoppingList::Table)
            .values([
                (ShoppingList::DeletedAt, now.into()),
                (ShoppingList::UpdatedAt, now.into()),
            ])
            .and_where(Expr::col(ShoppingList::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!("shopping list deleted");

        Ok(())
    }
}
