use std::{collections::HashSet, ops::Deref};

use serde::Deserialize;
use validator::{Validate, ValidationError};
use yummio_shared::recipe::Difficulty;

use crate::Nutrition;

mod create;
mod delete;
mod favorite;
mod rate;
mod update;

pub use rate::{RateInput, RatingSummary};

pub struct Command {
    state: yummio_shared::State,
}

impl Deref for Command {
    type Target = yummio_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: yummio_shared::State) -> Self {
        Self { state }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IngredientInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub amount: Option<f64>,
    #[validate(length(max = 50))]
    pub unit: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
    #[validate(range(min = 0))]
    pub order_index: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InstructionInput {
    #[validate(range(min = 1))]
    pub step: i32,
    #[serde(rename = "instruction")]
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
    pub image_url: Option<String>,
    #[validate(range(min = 0))]
    pub timer_minutes: Option<i32>,
}

/// Full description of a recipe, used on create and on update.
///
/// Children are replaced wholesale on update. `is_public` keeps the stored
/// value on update when absent and defaults to public on create.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_recipe"))]
pub struct RecipeInput {
    #[validate(length(min = 2, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[validate(range(min = 0))]
    pub prep_time: Option<i32>,
    #[validate(range(min = 0))]
    pub cook_time: Option<i32>,
    #[validate(range(min = 0))]
    pub servings: Option<i32>,
    pub difficulty: Option<Difficulty>,
    #[serde(rename = "type")]
    #[validate(length(max = 50))]
    pub recipe_type: Option<String>,
    pub is_public: Option<bool>,
    #[serde(default)]
    #[validate(nested)]
    pub ingredients: Vec<IngredientInput>,
    #[serde(default)]
    #[validate(nested)]
    pub instructions: Vec<InstructionInput>,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub tags: Vec<String>,
    #[validate(nested)]
    pub nutrition: Option<Nutrition>,
}

fn validate_recipe(input: &RecipeInput) -> Result<(), ValidationError> {
    let mut steps = HashSet::new();
    if !input.instructions.iter().all(|i| steps.insert(i.step)) {
        return Err(ValidationError::new("duplicate_step")
            .with_message("instruction steps must be unique".into()));
    }

    if input
        .tags
        .iter()
        .any(|tag| tag.trim().is_empty() || tag.trim().chars().count() > 50)
    {
        return Err(ValidationError::new("tag_length")
            .with_message("tags must be between 1 and 50 characters".into()));
    }

    Ok(())
}

/// Trimmed and deduplicated tag names, in submission order. Case is kept.
pub(crate) fn unique_tag_names(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();

    names
        .iter()
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty() && seen.insert(name.to_owned()))
        .collect()
}
