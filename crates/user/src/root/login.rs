use serde::Deserialize;
use validator::Validate;

use crate::repository;

const INVALID_CREDENTIALS: &str = "invalid email or password";

#[derive(Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl super::Command {
    #[tracing::instrument(skip_all)]
    pub async fn login(&self, input: LoginInput) -> yummio_shared::Result<super::AuthResponse> {
        input.validate()?;

        let email = super::normalize_email(&input.email);

        let Some(user) =
            repository::find(&self.read_db, repository::FindType::Email(email)).await?
        else {
            tracing::warn!("login rejected: unknown account");
            yummio_shared::unauthorized!("{INVALID_CREDENTIALS}");
        };

        if !self.hasher.verify(&input.password, &user.password) {
            tracing::warn!(user_id = %user.id, "login rejected: bad password");
            yummio_shared::unauthorized!("{INVALID_CREDENTIALS}");
        }

        tracing::info!(user_id = %user.id, "user logged in");

        self.issue_pair(user.into())
    }
}
