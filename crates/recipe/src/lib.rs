mod command;
mod compose;
mod query;
mod repository;

pub use command::*;
pub use query::*;
pub use repository::{
    IngredientView, InstructionView, Nutrition, RecipeRow, RecipeSummary, TagView, find_recipe,
    summary_select,
};
