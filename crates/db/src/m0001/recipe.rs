use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Ingredient, Instruction, Nutrition, Recipe, User};

pub(super) fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Recipe::Table)
        .col(
            ColumnDef::new(Recipe::Id)
                .string()
                .not_null()
                .string_len(36)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Recipe::UserId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(
            ColumnDef::new(Recipe::Title)
                .string()
                .not_null()
                .string_len(200),
        )
        .col(ColumnDef::new(Recipe::Description).text())
        .col(ColumnDef::new(Recipe::ImageUrl).string())
        .col(ColumnDef::new(Recipe::PrepTime).integer())
        .col(ColumnDef::new(Recipe::CookTime).integer())
        .col(ColumnDef::new(Recipe::Servings).integer())
        .col(ColumnDef::new(Recipe::Difficulty).string().string_len(10))
        .col(ColumnDef::new(Recipe::RecipeType).string().string_len(50))
        .col(
            ColumnDef::new(Recipe::SearchText)
                .text()
                .not_null()
                .default(""),
        )
        .col(
            ColumnDef::new(Recipe::Rating)
                .double()
                .not_null()
                .default(0.0),
        )
        .col(
            ColumnDef::new(Recipe::RatingCount)
                .integer()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(Recipe::IsPublic)
                .boolean()
                .not_null()
                .default(true),
        )
        .col(ColumnDef::new(Recipe::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(Recipe::UpdatedAt).big_integer().not_null())
        .col(ColumnDef::new(Recipe::DeletedAt).big_integer().null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_user")
                .from(Recipe::Table, Recipe::UserId)
                .to(User::Table, User::Id),
        )
        .to_owned()
}

pub(super) fn drop_table() -> TableDropStatement {
    Table::drop().table(Recipe::Table).to_owned()
}

pub(super) fn create_idx_user() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_user")
        .table(Recipe::Table)
        .col(Recipe::UserId)
        .col(Recipe::DeletedAt)
        .to_owned()
}

pub(super) fn drop_idx_user() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_user")
        .table(Recipe::Table)
        .to_owned()
}

pub(super) fn create_idx_public() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_public")
        .table(Recipe::Table)
        .col(Recipe::IsPublic)
        .col(Recipe::DeletedAt)
        .col(Recipe::CreatedAt)
        .to_owned()
}

pub(super) fn drop_idx_public() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_public")
        .table(Recipe::Table)
        .to_owned()
}

pub(super) fn create_ingredient_table() -> TableCreateStatement {
    Table::create()
        .table(Ingredient::Table)
        .col(
            ColumnDef::new(Ingredient::Id)
                .string()
                .not_null()
                .string_len(36)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Ingredient::RecipeId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(ColumnDef::new(Ingredient::Name).string().not_null())
        .col(ColumnDef::new(Ingredient::Amount).double())
        .col(ColumnDef::new(Ingredient::Unit).string().string_len(50))
        .col(ColumnDef::new(Ingredient::Notes).text())
        .col(
            ColumnDef::new(Ingredient::OrderIndex)
                .integer()
                .not_null()
                .default(0),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_ingredient_recipe")
                .from(Ingredient::Table, Ingredient::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

pub(super) fn drop_ingredient_table() -> TableDropStatement {
    Table::drop().table(Ingredient::Table).to_owned()
}

pub(super) fn create_idx_ingredient() -> IndexCreateStatement {
    Index::create()
        .name("idx_ingredient_recipe")
        .table(Ingredient::Table)
        .col(Ingredient::RecipeId)
        .col(Ingredient::OrderIndex)
        .to_owned()
}

pub(super) fn drop_idx_ingredient() -> IndexDropStatement {
    Index::drop()
        .name("idx_ingredient_recipe")
        .table(Ingredient::Table)
        .to_owned()
}

pub(super) fn create_instruction_table() -> TableCreateStatement {
    Table::create()
        .table(Instruction::Table)
        .col(
            ColumnDef::new(Instruction::Id)
                .string()
                .not_null()
                .string_len(36)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Instruction::RecipeId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(ColumnDef::new(Instruction::Step).integer().not_null())
        .col(ColumnDef::new(Instruction::Text).text().not_null())
        .col(ColumnDef::new(Instruction::ImageUrl).string())
        .col(ColumnDef::new(Instruction::TimerMinutes).integer())
        .foreign_key(
            ForeignKey::create()
                .name("fk_instruction_recipe")
                .from(Instruction::Table, Instruction::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

pub(super) fn drop_instruction_table() -> TableDropStatement {
    Table::drop().table(Instruction::Table).to_owned()
}

pub(super) fn create_idx_instruction() -> IndexCreateStatement {
    Index::create()
        .name("idx_instruction_recipe")
        .table(Instruction::Table)
        .col(Instruction::RecipeId)
        .col(Instruction::Step)
        .to_owned()
}

pub(super) fn drop_idx_instruction() -> IndexDropStatement {
    Index::drop()
        .name("idx_instruction_recipe")
        .table(Instruction::Table)
        .to_owned()
}

pub(super) fn create_nutrition_table() -> TableCreateStatement {
    Table::create()
        .table(Nutrition::Table)
        .col(
            ColumnDef::new(Nutrition::Id)
                .string()
                .not_null()
                .string_len(36)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Nutrition::RecipeId)
                .string()
                .not_null()
                .string_len(36),
        )
        .col(ColumnDef::new(Nutrition::Calories).integer())
        .col(ColumnDef::new(Nutrition::Protein).double())
        .col(ColumnDef::new(Nutrition::Carbs).double())
        .col(ColumnDef::new(Nutrition::Fat).double())
        .col(ColumnDef::new(Nutrition::Fiber).double())
        .col(ColumnDef::new(Nutrition::Sugar).double())
        .col(ColumnDef::new(Nutrition::Sodium).double())
        .col(ColumnDef::new(Nutrition::Cholesterol).double())
        .foreign_key(
            ForeignKey::create()
                .name("fk_nutrition_recipe")
                .from(Nutrition::Table, Nutrition::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

pub(super) fn drop_nutrition_table() -> TableDropStatement {
    Table::drop().table(Nutrition::Table).to_owned()
}

pub(super) fn create_uk_nutrition() -> IndexCreateStatement {
    Index::create()
        .name("uk_nutrition_recipe")
        .table(Nutrition::Table)
        .col(Nutrition::RecipeId)
        .unique()
        .to_owned()
}

pub(super) fn drop_uk_nutrition() -> IndexDropStatement {
    Index::drop()
        .name("uk_nutrition_recipe")
        .table(Nutrition::Table)
        .to_owned()
}
