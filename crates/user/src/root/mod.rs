use std::{ops::Deref, sync::Arc};

use serde::Serialize;

use crate::{Notifier, password::Hasher, token::{TokenKind, Tokens}};

mod login;
mod password;
mod refresh;
mod register;

pub use crate::repository::UserView;
pub use login::LoginInput;
pub use password::{ForgotPasswordInput, ResetPasswordInput};
pub use refresh::RefreshInput;
pub use register::RegisterInput;

pub struct Command {
    state: yummio_shared::State,
    pub(crate) hasher: Hasher,
    pub(crate) tokens: Tokens,
    notifier: Arc<dyn Notifier>,
}

impl Deref for Command {
    type Target = yummio_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserView,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
}

impl Command {
    pub fn new(
        state: yummio_shared::State,
        hasher: Hasher,
        tokens: Tokens,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            state,
            hasher,
            tokens,
            notifier,
        }
    }

    pub fn tokens(&self) -> &Tokens {
        &self.tokens
    }

    fn issue_pair(&self, user: UserView) -> yummio_shared::Result<AuthResponse> {
        let access_token = self.tokens.issue(&user.id, &user.email, TokenKind::Access)?;
        let refresh_token = self
            .tokens
            .issue(&user.id, &user.email, TokenKind::Refresh)?;

        Ok(AuthResponse {
            access_token,
            refresh_token,
            expires_in: self.tokens.ttl(TokenKind::Access).as_secs(),
            user,
        })
    }
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
