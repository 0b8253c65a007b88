use serde::Deserialize;
use validator::Validate;

use crate::{repository, token::TokenKind};

#[derive(Deserialize, Validate)]
pub struct ForgotPasswordInput {
    #[validate(email)]
    pub email: String,
}

#[derive(Deserialize, Validate)]
pub struct ResetPasswordInput {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 6, max = 100))]
    pub new_password: String,
}

impl super::Command {
    /// Succeeds whether or not the address belongs to an account.
    #[tracing::instrument(skip_all)]
    pub async fn forgot_password(&self, input: ForgotPasswordInput) -> yummio_shared::Result<()> {
        input.validate()?;

        let email = super::normalize_email(&input.email);
        let Some(user) =
            repository::find(&self.read_db, repository::FindType::Email(email)).await?
        else {
            tracing::info!("password reset requested for unknown address");
            return Ok(());
        };

        let token = self.tokens.issue(&user.id, &user.email, TokenKind::Reset)?;

        if let Err(e) = self.notifier.send(&user.email, &token).await {
            tracing::warn!(user_id = %user.id, error = %e, "failed to deliver password reset");
        }

        Ok(())
    }

    #[tracing::instrument(skip_all)]
    pub async fn reset_password(&self, input: ResetPasswordInput) -> yummio_shared::Result<()> {
        input.validate()?;

        let claims = self.tokens.validate_kind(&input.token, TokenKind::Reset)?;
        let password_hash = self.hasher.hash(&input.new_password)?;

        let updated = repository::update(
            &self.write_db,
            &claims.sub,
            repository::UpdateInput {
                password: Some(password_hash),
                ..Default::default()
            },
        )
        .await?;

        if !updated {
            yummio_shared::unauthorized!("invalid token");
        }

        tracing::info!(user_id = %claims.sub, "password reset");

        Ok(())
    }
}
