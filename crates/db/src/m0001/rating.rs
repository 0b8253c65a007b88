use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Rating, Recipe, User, UserFavorites};

pub(super) fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Rating::Table)
        .col(
            ColumnDef::new(Rating::Id)
                .string()
                .not_null()
                .string_len(36)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Rating::UserId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(
            ColumnDef::new(Rating::RecipeId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(ColumnDef::new(Rating::Value).integer().not_null())
        .col(ColumnDef::new(Rating::Review).text())
        .col(ColumnDef::new(Rating::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(Rating::UpdatedAt).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_rating_user")
                .from(Rating::Table, Rating::UserId)
                .to(User::Table, User::Id),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_rating_recipe")
                .from(Rating::Table, Rating::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

pub(super) fn drop_table() -> TableDropStatement {
    Table::drop().table(Rating::Table).to_owned()
}

pub(super) fn create_uk_user_recipe() -> IndexCreateStatement {
    Index::create()
        .name("uk_rating_user_recipe")
        .table(Rating::Table)
        .col(Rating::UserId)
        .col(Rating::RecipeId)
        .unique()
        .to_owned()
}

pub(super) fn drop_uk_user_recipe() -> IndexDropStatement {
    Index::drop()
        .name("uk_rating_user_recipe")
        .table(Rating::Table)
        .to_owned()
}

pub(super) fn create_idx_recipe() -> IndexCreateStatement {
    Index::create()
        .name("idx_rating_recipe")
        .table(Rating::Table)
        .col(Rating::RecipeId)
        .to_owned()
}

pub(super) fn drop_idx_recipe() -> IndexDropStatement {
    Index::drop()
        .name("idx_rating_recipe")
        .table(Rating::Table)
        .to_owned()
}

pub(super) fn create_favorites_table() -> TableCreateStatement {
    Table::create()
        .table(UserFavorites::Table)
        .col(
            ColumnDef::new(UserFavorites::UserId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(
            ColumnDef::new(UserFavorites::RecipeId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(
            ColumnDef::new(UserFavorites::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .primary_key(
            Index::create()
                .col(UserFavorites::UserId)
                .col(UserFavorites::RecipeId),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_user_favorites_user")
                .from(UserFavorites::Table, UserFavorites::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_user_favorites_recipe")
                .from(UserFavorites::Table, UserFavorites::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

pub(super) fn drop_favorites_table() -> TableDropStatement {
    Table::drop().table(UserFavorites::Table).to_owned()
}

pub(super) fn create_idx_favorites_recipe() -> IndexCreateStatement {
    Index::create()
        .name("idx_user_favorites_recipe")
        .table(UserFavorites::Table)
        .col(UserFavorites::RecipeId)
        .to_owned()
}

pub(super) fn drop_idx_favorites_recipe() -> IndexDropStatement {
    Index::drop()
        .name("idx_user_favorites_recipe")
        .table(UserFavorites::Table)
        .to_owned()
}
