mod collection;
mod rating;
mod recipe;
mod shopping_list;
mod tag;
mod user;

use sqlx_migrator::vec_box;

use crate::operation::Schema;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "yummio",
    "m0001",
    vec_box![],
    vec_box![
        Schema::Table(user::create_table, user::drop_table),
        Schema::Index(user::create_uk_email, user::drop_uk_email),
        Schema::Table(recipe::create_table, recipe::drop_table),
        Schema::Index(recipe::create_idx_user, recipe::drop_idx_user),
        Schema::Index(recipe::create_idx_public, recipe::drop_idx_public),
        Schema::Table(recipe::create_ingredient_table, recipe::drop_ingredient_table),
        Schema::Index(recipe::create_idx_ingredient, recipe::drop_idx_ingredient),
        Schema::Table(recipe::create_instruction_table, recipe::drop_instruction_table),
        Schema::Index(recipe::create_idx_instruction, recipe::drop_idx_instruction),
        Schema::Table(recipe::create_nutrition_table, recipe::drop_nutrition_table),
        Schema::Index(recipe::create_uk_nutrition, recipe::drop_uk_nutrition),
        Schema::Table(tag::create_table, tag::drop_table),
        Schema::Index(tag::create_uk_name, tag::drop_uk_name),
        Schema::Table(tag::create_recipe_tag_table, tag::drop_recipe_tag_table),
        Schema::Index(tag::create_idx_recipe_tag, tag::drop_idx_recipe_tag),
        Schema::Table(rating::create_table, rating::drop_table),
        Schema::Index(rating::create_uk_user_recipe, rating::drop_uk_user_recipe),
        Schema::Index(rating::create_idx_recipe, rating::drop_idx_recipe),
        Schema::Table(rating::create_favorites_table, rating::drop_favorites_table),
        Schema::Index(rating::create_idx_favorites_recipe, rating::drop_idx_favorites_recipe),
        Schema::Table(collection::create_table, collection::drop_table),
        Schema::Index(collection::create_idx_user, collection::drop_idx_user),
        Schema::Table(collection::create_recipes_table, collection::drop_recipes_table),
        Schema::Table(shopping_list::create_table, shopping_list::drop_table),
        Schema::Index(shopping_list::create_idx_user, shopping_list::drop_idx_user),
        Schema::Table(shopping_list::create_item_table, shopping_list::drop_item_table),
        Schema::Index(shopping_list::create_idx_item_list, shopping_list::drop_idx_item_list)
    ]
);
