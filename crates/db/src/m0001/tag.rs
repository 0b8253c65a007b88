use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Recipe, RecipeTag, Tag};

pub(super) fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Tag::Table)
        .col(
            ColumnDef::new(Tag::Id)
                .string()
                .not_null()
                .string_len(36)
                .primary_key(),
        )
        .col(ColumnDef::new(Tag::Name).string().not_null().string_len(50))
        .col(ColumnDef::new(Tag::Color).string().string_len(20))
        .col(ColumnDef::new(Tag::CreatedAt).big_integer().not_null())
        .to_owned()
}

pub(super) fn drop_table() -> TableDropStatement {
    Table::drop().table(Tag::Table).to_owned()
}

pub(super) fn create_uk_name() -> IndexCreateStatement {
    Index::create()
        .name("uk_tag_name")
        .table(Tag::Table)
        .col(Tag::Name)
        .unique()
        .to_owned()
}

pub(super) fn drop_uk_name() -> IndexDropStatement {
    Index::drop().name("uk_tag_name").table(Tag::Table).to_owned()
}

pub(super) fn create_recipe_tag_table() -> TableCreateStatement {
    Table::create()
        .table(RecipeTag::Table)
        .col(
            ColumnDef::new(RecipeTag::RecipeId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(
            ColumnDef::new(RecipeTag::TagId)
                .string()
                .not_null()
                .string_len(36),
        )
        .primary_key(
            Index::create()
                .col(RecipeTag::RecipeId)
                .col(RecipeTag::TagId),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_tag_recipe")
                .from(RecipeTag::Table, RecipeTag::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_tag_tag")
                .from(RecipeTag::Table, RecipeTag::TagId)
                .to(Tag::Table, Tag::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

pub(super) fn drop_recipe_tag_table() -> TableDropStatement {
    Table::drop().table(RecipeTag::Table).to_owned()
}

pub(super) fn create_idx_recipe_tag() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_tag_tag")
        .table(RecipeTag::Table)
        .col(RecipeTag::TagId)
        .to_owned()
}

pub(super) fn drop_idx_recipe_tag() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_tag_tag")
        .table(RecipeTag::Table)
        .to_owned()
}
