use sea_query::{
    Alias, Expr, ExprTrait, Func, Order, Query, SelectStatement, SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqliteExecutor, prelude::FromRow};
use yummio_db::table::{ShoppingList, ShoppingListItem};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ListRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ItemRow {
    pub id: String,
    pub list_id: String,
    pub name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub notes: Option<String>,
    pub completed: bool,
    pub order_index: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ListSummary {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub list: ListRow,
    pub item_count: i64,
    pub completed_count: i64,
}

fn list_select() -> SelectStatement {
    Query::select()
        .columns([
            (ShoppingList::Table, ShoppingList::Id),
            (ShoppingList::Table, ShoppingList::UserId),
            (ShoppingList::Table, ShoppingList::Name),
            (ShoppingList::Table, ShoppingList::CreatedAt),
            (ShoppingList::Table, ShoppingList::UpdatedAt),
        ])
        .from(ShoppingList::Table)
        .and_where(Expr::col((ShoppingList::Table, ShoppingList::DeletedAt)).is_null())
        .to_owned()
}

fn item_select() -> SelectStatement {
    Query::select()
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
        .from(ShoppingListItem::Table)
        .to_owned()
}

pub(crate) async fn find_list<'c>(
    executor: impl SqliteExecutor<'c>,
    id: &str,
) -> yummio_shared::Result<Option<ListRow>> {
    let statement = list_select()
        .and_where(Expr::col((ShoppingList::Table, ShoppingList::Id)).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, ListRow, _>(&sql, values)
        .fetch_optional(executor)
        .await?)
}

pub(crate) async fn find_lists_by_owner<'c>(
    executor: impl SqliteExecutor<'c>,
    user_id: &str,
) -> yummio_shared::Result<Vec<ListSummary>> {
    let statement = list_select()
        .expr_as(
            Func::count(Expr::col((ShoppingListItem::Table, ShoppingListItem::Id))),
            Alias::new("item_count"),
        )
        .expr_as(
            Expr::cust(r#"COALESCE(SUM("shopping_list_item"."completed"), 0)"#),
            Alias::new("completed_count"),
        )
        .left_join(
            ShoppingListItem::Table,
            Expr::col((ShoppingListItem::Table, ShoppingListItem::ListId))
                .equals((ShoppingList::Table, ShoppingList::Id)),
        )
        .and_where(Expr::col((ShoppingList::Table, ShoppingList::UserId)).eq(user_id))
        .group_by_col((ShoppingList::Table, ShoppingList::Id))
        .order_by((ShoppingList::Table, ShoppingList::CreatedAt), Order::Desc)
        .order_by((ShoppingList::Table, ShoppingList::Id), Order::Desc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, ListSummary, _>(&sql, values)
        .fetch_all(executor)
        .await?)
}

pub(crate) async fn find_item<'c>(
    executor: impl SqliteExecutor<'c>,
    id: &str,
) -> yummio_shared::Result<Option<ItemRow>> {
    let statement = item_select()
        .and_where(Expr::col(ShoppingListItem::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, ItemRow, _>(&sql, values)
        .fetch_optional(executor)
        .await?)
}

/// Items of a list in display order.
pub(crate) async fn find_items<'c>(
    executor: impl SqliteExecutor<'c>,
    list_id: &str,
) -> yummio_shared::Result<Vec<ItemRow>> {
    let statement = item_select()
        .and_where(Expr::col(ShoppingListItem::ListId).eq(list_id))
        .order_by(ShoppingListItem::OrderIndex, Order::Asc)
        .order_by(ShoppingListItem::CreatedAt, Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, ItemRow, _>(&sql, values)
        .fetch_all(executor)
        .await?)
}

/// Next free position at the end of a list, 0 when it is empty.
pub(crate) async fn next_order_index<'c>(
    executor: impl SqliteExecutor<'c>,
    list_id: &str,
) -> yummio_shared::Result<i32> {
    let statement = Query::select()
        .expr(Func::max(Expr::col(ShoppingListItem::OrderIndex)))
        .from(ShoppingListItem::Table)
        .and_where(Expr::col(ShoppingListItem::ListId).eq(list_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let (max,) = sqlx::query_as_with::<_, (Option<i32>,), _>(&sql, values)
        .fetch_one(executor)
        .await?;

    match max {
        None => Ok(0),
        Some(max) if max < crate::MAX_ORDER_INDEX => Ok(max + 1),
        Some(_) => yummio_shared::user!("shopping list has no free position left"),
    }
}
