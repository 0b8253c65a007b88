mod filter;
mod list;

use std::ops::Deref;

use serde::Serialize;
use yummio_shared::access;

use crate::{IngredientView, InstructionView, Nutrition, RecipeSummary, TagView, repository};

pub use filter::{RecipeFilter, Scope, SortDirection, SortField};

#[derive(Clone)]
pub struct Query(pub yummio_shared::State);

impl Deref for Query {
    type Target = yummio_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A recipe with every child collection and the favorite counters.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: RecipeSummary,
    pub ingredients: Vec<IngredientView>,
    pub instructions: Vec<InstructionView>,
    pub tags: Vec<TagView>,
    pub nutrition: Option<Nutrition>,
    pub favorite_count: i64,
    pub is_favorited: bool,
}

impl Query {
    /// Loads the full aggregate from a single read transaction.
    ///
    /// Private recipes are only readable by their owner.
    pub async fn find(&self, id: &str, viewer: Option<&str>) -> yummio_shared::Result<RecipeDetail> {
        let mut tx = self.read_db.begin().await?;

        let Some(recipe) = repository::find_recipe(&mut *tx, id).await? else {
            yummio_shared::not_found!("recipe not found");
        };

        access::ensure_readable(&recipe.user_id, recipe.is_public, viewer, "recipe")?;

        let ingredients = repository::find_ingredients(&mut *tx, id).await?;
        let instructions = repository::find_instructions(&mut *tx, id).await?;
        let tags = repository::find_tags(&mut *tx, id).await?;
        let nutrition = repository::find_nutrition(&mut *tx, id).await?;
        let favorite_count = repository::count_favorites(&mut *tx, id, None).await?;
        let is_favorited = match viewer {
            Some(user_id) => repository::count_favorites(&mut *tx, id, Some(user_id)).await? > 0,
            None => false,
        };

        tx.commit().await?;

        Ok(RecipeDetail {
            recipe: recipe.into(),
            ingredients,
            instructions,
            tags,
            nutrition,
            favorite_count,
            is_favorited,
        })
    }
}
