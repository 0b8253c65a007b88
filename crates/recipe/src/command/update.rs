use validator::Validate;
use yummio_shared::access;

use crate::{RecipeInput, compose, repository};

impl super::Command {
    #[tracing::instrument(skip(self, input))]
    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        input: RecipeInput,
    ) -> yummio_shared::Result<()> {
        input.validate()?;

        let mut tx = self.write_db.begin().await?;

        let Some(recipe) = repository::find_recipe(&mut *tx, id).await? else {
            yummio_shared::not_found!("recipe not found");
        };

        access::ensure_owner(&recipe.user_id, user_id, "update", "recipe")?;

        let is_public = input.is_public.unwrap_or(recipe.is_public);
        compose::update_recipe(&mut tx, id, &input, is_public).await?;
        compose::replace_children(&mut tx, id, &input).await?;

        tx.commit().await?;

        tracing::info!("recipe updated");

        Ok(())
    }
}
