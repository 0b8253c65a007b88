use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use yummio_user::token::TokenKind;

use crate::{error::AppError, routes::AppState};

type BearerHeader = TypedHeader<Authorization<Bearer>>;

/// Principal resolved from an `Authorization: Bearer <access token>` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

fn authenticate(token: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let claims = state
        .user_command
        .tokens()
        .validate_kind(token, TokenKind::Access)?;

    Ok(AuthUser {
        id: claims.sub,
        email: claims.email,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            <BearerHeader as FromRequestParts<AppState>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AppError::Domain(yummio_shared::Error::Unauthorized(
                        "missing bearer token".to_owned(),
                    ))
                })?;

        authenticate(bearer.token(), state)
    }
}

/// Anonymous when the header is absent; a present but invalid token is still rejected.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !parts
            .headers
            .contains_key(axum::http::header::AUTHORIZATION)
        {
            return Ok(None);
        }

        <Self as FromRequestParts<AppState>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}
