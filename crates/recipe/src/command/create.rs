use uuid::Uuid;
use validator::Validate;

use crate::{RecipeInput, compose};

impl super::Command {
    #[tracing::instrument(skip(self, input))]
    pub async fn create(&self, user_id: &str, input: RecipeInput) -> yummio_shared::Result<String> {
        input.validate()?;

        let id = Uuid::new_v4().to_string();
        let mut tx = self.write_db.begin().await?;

        compose::insert_recipe(&mut tx, &id, user_id, &input).await?;
        compose::replace_children(&mut tx, &id, &input).await?;

        tx.commit().await?;

        tracing::info!(recipe_id = %id, "recipe created");

        Ok(id)
    }
}
