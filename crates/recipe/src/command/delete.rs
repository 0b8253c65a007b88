use yummio_shared::access;

use crate::{compose, repository};

impl super::Command {
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, user_id: &str, id: &str) -> yummio_shared::Result<()> {
        let mut tx = self.write_db.begin().await?;

        let Some(recipe) = repository::find_recipe(&mut *tx, id).await? else {
            yummio_shared::not_found!("recipe not found");
        };

        access::ensure_owner(&recipe.user_id, user_id, "delete", "recipe")?;
        compose::soft_delete_recipe(&mut tx, id).await?;

        tx.commit().await?;

        tracing::info!("recipe deleted");

        Ok(())
    }
}
