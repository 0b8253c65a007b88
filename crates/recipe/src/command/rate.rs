use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{compose, repository};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RateInput {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[validate(length(max = 1000))]
    pub review: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingSummary {
    pub recipe_id: String,
    pub rating: f64,
    pub rating_count: i64,
}

impl super::Command {
    /// Records the user's rating and recomputes the recipe's mean in the
    /// same transaction, so concurrent raters never lose an update.
    #[tracing::instrument(skip(self, input))]
    pub async fn rate(
        &self,
        user_id: &str,
        recipe_id: &str,
        input: RateInput,
    ) -> yummio_shared::Result<RatingSummary> {
        input.validate()?;

        let mut tx = self.write_db.begin().await?;

        if repository::find_recipe(&mut *tx, recipe_id).await?.is_none() {
            yummio_shared::not_found!("recipe not found");
        }

        compose::upsert_rating(&mut tx, user_id, recipe_id, input.rating, input.review).await?;
        let (rating, rating_count) = compose::recompute_rating(&mut tx, recipe_id).await?;

        tx.commit().await?;

        tracing::info!(rating, rating_count, "recipe rated");

        Ok(RatingSummary {
            recipe_id: recipe_id.to_owned(),
            rating,
            rating_count,
        })
    }
}
