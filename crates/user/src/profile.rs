use serde::Deserialize;
use validator::Validate;
use yummio_shared::Patch;

use crate::{UserView, repository};

#[derive(Deserialize, Validate, Default)]
pub struct UpdateProfileInput {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Patch<String>,
}

#[derive(Deserialize, Validate)]
pub struct ChangePasswordInput {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 6, max = 100))]
    pub new_password: String,
}

impl crate::Command {
    pub async fn get_profile(&self, user_id: &str) -> yummio_shared::Result<UserView> {
        let Some(user) =
            repository::find(&self.read_db, repository::FindType::Id(user_id.to_owned())).await?
        else {
            yummio_shared::not_found!("user not found");
        };

        Ok(user.into())
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update_profile(
        &self,
        user_id: &str,
        input: UpdateProfileInput,
    ) -> yummio_shared::Result<UserView> {
        input.validate()?;

        let updated = repository::update(
            &self.write_db,
            user_id,
            repository::UpdateInput {
                name: input.name.map(|n| n.trim().to_owned()),
                avatar_url: input.avatar_url.into_update(),
                ..Default::default()
            },
        )
        .await?;

        if !updated {
            yummio_shared::not_found!("user not found");
        }

        let Some(user) =
            repository::find(&self.write_db, repository::FindType::Id(user_id.to_owned())).await?
        else {
            yummio_shared::not_found!("user not found");
        };

        Ok(user.into())
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn change_password(
        &self,
        user_id: &str,
        input: ChangePasswordInput,
    ) -> yummio_shared::Result<()> {
        input.validate()?;

        let Some(user) =
            repository::find(&self.read_db, repository::FindType::Id(user_id.to_owned())).await?
        else {
            yummio_shared::not_found!("user not found");
        };

        if !self.hasher.verify(&input.current_password, &user.password) {
            tracing::warn!("password change rejected");
            yummio_shared::unauthorized!("current password is incorrect");
        }

        let password_hash = self.hasher.hash(&input.new_password)?;
        repository::update(
            &self.write_db,
            user_id,
            repository::UpdateInput {
                password: Some(password_hash),
                ..Default::default()
            },
        )
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_profile(&self, user_id: &str) -> yummio_shared::Result<()> {
        let deleted = repository::update(
            &self.write_db,
            user_id,
            repository::UpdateInput {
                deleted: true,
                ..Default::default()
            },
        )
        .await?;

        if !deleted {
            yummio_shared::not_found!("user not found");
        }

        tracing::info!("user deleted");

        Ok(())
    }
}
