use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Collection, CollectionRecipes, Recipe, User};

pub(super) fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Collection::Table)
        .col(
            ColumnDef::new(Collection::Id)
                .string()
                .not_null()
                .string_len(36)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Collection::UserId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(
            ColumnDef::new(Collection::Name)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(ColumnDef::new(Collection::Description).text())
        .col(ColumnDef::new(Collection::ImageUrl).string())
        .col(
            ColumnDef::new(Collection::IsPublic)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(Collection::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(Collection::UpdatedAt)
                .big_integer()
                .not_null(),
        )
        .col(ColumnDef::new(Collection::DeletedAt).big_integer().null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_collection_user")
                .from(Collection::Table, Collection::UserId)
                .to(User::Table, User::Id),
        )
        .to_owned()
}

pub(super) fn drop_table() -> TableDropStatement {
    Table::drop().table(Collection::Table).to_owned()
}

pub(super) fn create_idx_user() -> IndexCreateStatement {
    Index::create()
        .name("idx_collection_user")
        .table(Collection::Table)
        .col(Collection::UserId)
        .col(Collection::DeletedAt)
        .to_owned()
}

pub(super) fn drop_idx_user() -> IndexDropStatement {
    Index::drop()
        .name("idx_collection_user")
        .table(Collection::Table)
        .to_owned()
}

pub(super) fn create_recipes_table() -> TableCreateStatement {
    Table::create()
        .table(CollectionRecipes::Table)
        .col(
            ColumnDef::new(CollectionRecipes::CollectionId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(
            ColumnDef::new(CollectionRecipes::RecipeId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(
            ColumnDef::new(CollectionRecipes::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .primary_key(
            Index::create()
                .col(CollectionRecipes::CollectionId)
                .col(CollectionRecipes::RecipeId),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_collection_recipes_collection")
                .from(CollectionRecipes::Table, CollectionRecipes::CollectionId)
                .to(Collection::Table, Collection::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_collection_recipes_recipe")
                .from(CollectionRecipes::Table, CollectionRecipes::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

pub(super) fn drop_recipes_table() -> TableDropStatement {
    Table::drop().table(CollectionRecipes::Table).to_owned()
}
