use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;
use validator::Validate;
use yummio_db::table::{ShoppingList, ShoppingListItem};

use super::{ItemInput, UpdateItemInput, list::insert_items};
use crate::{ItemRow, repository};

impl super::Command {
    /// Appends an item after the last one unless a position is given.
    #[tracing::instrument(skip(self, input))]
    pub async fn add_item(
        &self,
        user_id: &str,
        list_id: &str,
        input: ItemInput,
    ) -> yummio_shared::Result<ItemRow> {
        input.validate()?;

        let mut tx = self.write_db.begin().await?;
        Self::load_owned(&mut tx, list_id, user_id, "modify").await?;

        let next = repository::next_order_index(&mut *tx, list_id).await?;
        let ids = insert_items(&mut tx, list_id, std::slice::from_ref(&input), next).await?;
        touch_list(&mut tx, list_id).await?;

        let Some(item) = repository::find_item(&mut *tx, &ids[0]).await? else {
            yummio_shared::server!("item missing after insert");
        };

        tx.commit().await?;

        Ok(item)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update_item(
        &self,
        user_id: &str,
        list_id: &str,
        item_id: &str,
        input: UpdateItemInput,
    ) -> yummio_shared::Result<ItemRow> {
        input.validate()?;

        let mut tx = self.write_db.begin().await?;
        Self::load_owned_item(&mut tx, list_id, item_id, user_id, "modify").await?;

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let mut values: Vec<(ShoppingListItem, Expr)> =
            vec![(ShoppingListItem::UpdatedAt, now.into())];

        if let Some(name) = input.name {
            values.push((ShoppingListItem::Name, name.trim().into()));
        }

        if let Some(amount) = input.amount.into_update() {
            values.push((ShoppingListItem::Amount, amount.into()));
        }

        if let Some(unit) = input.unit.into_update() {
            values.push((ShoppingListItem::Unit, unit.into()));
        }

        if let Some(notes) = input.notes.into_update() {
            values.push((ShoppingListItem::Notes, notes.into()));
        }

        if let Some(completed) = input.completed {
            values.push((ShoppingListItem::Completed, completed.into()));
        }

        if let Some(order_index) = input.order_index {
            values.push((ShoppingListItem::OrderIndex, order_index.into()));
        }

        let statement = Query::update()
            .table(ShoppingListItem::Table)
            .values(values)
            .and_where(Expr::col(ShoppingListItem::Id).eq(item_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        touch_list(&mut tx, list_id).await?;

        let Some(item) = repository::find_item(&mut *tx, item_id).await? else {
            yummio_shared::server!("item missing after update");
        };

        tx.commit().await?;

        Ok(item)
    }

    /// Removes the item; remaining items keep their positions.
    #[tracing::instrument(skip(self))]
    pub async fn delete_item(
        &self,
        user_id: &str,
        list_id: &str,
        item_id: &str,
    ) -> yummio_shared::Result<()> {
        let mut tx = self.write_db.begin().await?;
        Self::load_owned_item(&mut tx, list_id, item_id, user_id, "modify").await?;

        let statement = Query::delete()
            .from_table(ShoppingListItem::Table)
            .and_where(Expr::col(ShoppingListItem::Id).eq(item_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        touch_list(&mut tx, list_id).await?;

        tx.commit().await?;

        Ok(())
    }
}

async fn touch_list(conn: &mut sqlx::SqliteConnection, list_id: &str) -> yummio_shared::Result<()> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::update()
        .table(ShoppingList::Table)
        .value(ShoppingList::UpdatedAt, now)
        .and_where(Expr::col(ShoppingList::Id).eq(list_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}
