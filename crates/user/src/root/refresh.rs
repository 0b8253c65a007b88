use serde::Deserialize;
use validator::Validate;

use crate::{repository, token::TokenKind};

#[derive(Deserialize, Validate)]
pub struct RefreshInput {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

impl super::Command {
    #[tracing::instrument(skip_all)]
    pub async fn refresh(&self, input: RefreshInput) -> yummio_shared::Result<super::AuthResponse> {
        input.validate()?;

        let claims = self
            .tokens
            .validate_kind(&input.refresh_token, TokenKind::Refresh)?;

        let Some(user) =
            repository::find(&self.read_db, repository::FindType::Id(claims.sub)).await?
        else {
            yummio_shared::unauthorized!("invalid token");
        };

        self.issue_pair(user.into())
    }
}
