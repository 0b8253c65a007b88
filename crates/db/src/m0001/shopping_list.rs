use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{ShoppingList, ShoppingListItem, User};

pub(super) fn create_table() -> TableCreateStatement {
    Table::create()
        .table(ShoppingList::Table)
        .col(
            ColumnDef::new(ShoppingList::Id)
                .string()
                .not_null()
                .string_len(36)
                .primary_key(),
        )
        .col(
            ColumnDef::new(ShoppingList::UserId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(
            ColumnDef::new(ShoppingList::Name)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(ShoppingList::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(ShoppingList::UpdatedAt)
                .big_integer()
                .not_null(),
        )
        .col(ColumnDef::new(ShoppingList::DeletedAt).big_integer().null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_shopping_list_user")
                .from(ShoppingList::Table, ShoppingList::UserId)
                .to(User::Table, User::Id),
        )
        .to_owned()
}

pub(super) fn drop_table() -> TableDropStatement {
    Table::drop().table(ShoppingList::Table).to_owned()
}

pub(super) fn create_idx_user() -> IndexCreateStatement {
    Index::create()
        .name("idx_shopping_list_user")
        .table(ShoppingList::Table)
        .col(ShoppingList::UserId)
        .col(ShoppingList::DeletedAt)
        .to_owned()
}

pub(super) fn drop_idx_user() -> IndexDropStatement {
    Index::drop()
        .name("idx_shopping_list_user")
        .table(ShoppingList::Table)
        .to_owned()
}

pub(super) fn create_item_table() -> TableCreateStatement {
    Table::create()
        .table(ShoppingListItem::Table)
        .col(
            ColumnDef::new(ShoppingListItem::Id)
                .string()
                .not_null()
                .string_len(36)
                .primary_key(),
        )
        .col(
            ColumnDef::new(ShoppingListItem::ListId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(
            ColumnDef::new(ShoppingListItem::Name)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(ColumnDef::new(ShoppingListItem::Amount).double())
        .col(ColumnDef::new(ShoppingListItem::Unit).string().string_len(50))
        .col(ColumnDef::new(ShoppingListItem::Notes).text())
        .col(
            ColumnDef::new(ShoppingListItem::Completed)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(ShoppingListItem::OrderIndex)
                .integer()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(ShoppingListItem::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(ShoppingListItem::UpdatedAt)
                .big_integer()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_shopping_list_item_list")
                .from(ShoppingListItem::Table, ShoppingListItem::ListId)
                .to(ShoppingList::Table, ShoppingList::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

pub(super) fn drop_item_table() -> TableDropStatement {
    Table::drop().table(ShoppingListItem::Table).to_owned()
}

pub(super) fn create_idx_item_list() -> IndexCreateStatement {
    Index::create()
        .name("idx_shopping_list_item_list")
        .table(ShoppingListItem::Table)
        .col(ShoppingListItem::ListId)
        .col(ShoppingListItem::OrderIndex)
        .to_owned()
}

pub(super) fn drop_idx_item_list() -> IndexDropStatement {
    Index::drop()
        .name("idx_shopping_list_item_list")
        .table(ShoppingListItem::Table)
        .to_owned()
}
