use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use time::OffsetDateTime;
use uuid::Uuid;

const INVALID_TOKEN: &str = "invalid token";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and validates HS256 signed tokens.
#[derive(Clone)]
pub struct Tokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
    reset_ttl: Duration,
}

impl Tokens {
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration, reset_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
            reset_ttl,
        }
    }

    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
            TokenKind::Reset => self.reset_ttl,
        }
    }

    pub fn issue(
        &self,
        user_id: &str,
        email: &str,
        kind: TokenKind,
    ) -> yummio_shared::Result<String> {
        self.issue_with_ttl(user_id, email, kind, self.ttl(kind))
    }

    pub fn issue_with_ttl(
        &self,
        user_id: &str,
        email: &str,
        kind: TokenKind,
        ttl: Duration,
    ) -> yummio_shared::Result<String> {
        let iat = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            sub: user_id.to_owned(),
            email: email.to_owned(),
            kind,
            iat,
            exp: iat.saturating_add(ttl.as_secs() as i64),
        };

        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> yummio_shared::Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| yummio_shared::Error::Server(format!("token encode: {e}")))
    }

    /// Every failure (bad signature, expiry, malformed payload) reports the same reason.
    pub fn validate(&self, token: &str) -> yummio_shared::Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        let claims = match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!(error = %e, "token rejected");
                yummio_shared::unauthorized!("{INVALID_TOKEN}");
            }
        };

        if Uuid::parse_str(&claims.sub).is_err() || claims.exp <= claims.iat {
            yummio_shared::unauthorized!("{INVALID_TOKEN}");
        }

        Ok(claims)
    }

    pub fn validate_kind(&self, token: &str, kind: TokenKind) -> yummio_shared::Result<Claims> {
        let claims = self.validate(token)?;

        if claims.kind != kind {
            yummio_shared::unauthorized!("{INVALID_TOKEN}");
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(secret: &str) -> Tokens {
        Tokens::new(
            secret,
            Duration::from_secs(60),
            Duration::from_secs(120),
            Duration::from_secs(30),
        )
    }

    fn user_id() -> String {
        Uuid::new_v4().to_string()
    }

    #[test]
    fn issued_token_carries_claims() -> yummio_shared::Result<()> {
        let tokens = tokens("0123456789abcdef0123456789abcdef");
        let id = user_id();
        let token = tokens.issue(&id, "ann@x.com", TokenKind::Access)?;
        let claims = tokens.validate(&token)?;

        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "ann@x.com");
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.exp - claims.iat, 60);

        Ok(())
    }

    #[test]
    fn kind_mismatch_is_rejected() -> yummio_shared::Result<()> {
        let tokens = tokens("0123456789abcdef0123456789abcdef");
        let token = tokens.issue(&user_id(), "ann@x.com", TokenKind::Refresh)?;

        assert!(tokens.validate_kind(&token, TokenKind::Refresh).is_ok());
        let err = tokens
            .validate_kind(&token, TokenKind::Access)
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid token");

        Ok(())
    }

    #[test]
    fn foreign_secret_is_rejected() -> yummio_shared::Result<()> {
        let token = tokens("0123456789abcdef0123456789abcdef").issue(
            &user_id(),
            "ann@x.com",
            TokenKind::Access,
        )?;
        let err = tokens("fedcba9876543210fedcba9876543210")
            .validate(&token)
            .unwrap_err();

        assert!(matches!(err, yummio_shared::Error::Unauthorized(_)));

        Ok(())
    }

    #[test]
    fn tampered_payload_is_rejected() -> yummio_shared::Result<()> {
        let tokens = tokens("0123456789abcdef0123456789abcdef");
        let token = tokens.issue(&user_id(), "ann@x.com", TokenKind::Access)?;
        let mut parts: Vec<String> = token.split('.').map(str::to_owned).collect();
        parts[1] = parts[1].chars().rev().collect();

        assert!(tokens.validate(&parts.join(".")).is_err());
        assert!(tokens.validate("not.a.token").is_err());
        assert!(tokens.validate("").is_err());

        Ok(())
    }

    #[test]
    fn expired_token_is_rejected() -> yummio_shared::Result<()> {
        let tokens = tokens("0123456789abcdef0123456789abcdef");
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let token = tokens.sign(&Claims {
            sub: user_id(),
            email: "ann@x.com".to_owned(),
            kind: TokenKind::Access,
            iat: now - 120,
            exp: now - 60,
        })?;

        assert_eq!(tokens.validate(&token).unwrap_err().to_string(), "invalid token");

        Ok(())
    }

    #[test]
    fn unknown_kind_and_missing_fields_fail_closed() -> anyhow::Result<()> {
        let secret = "0123456789abcdef0123456789abcdef";
        let tokens = tokens(secret);
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let key = EncodingKey::from_secret(secret.as_bytes());

        let unknown_kind = serde_json::json!({
            "sub": user_id(), "email": "ann@x.com", "kind": "admin", "iat": now, "exp": now + 60
        });
        let token = encode(&Header::default(), &unknown_kind, &key)?;
        assert!(tokens.validate(&token).is_err());

        let missing_email = serde_json::json!({
            "sub": user_id(), "kind": "access", "iat": now, "exp": now + 60
        });
        let token = encode(&Header::default(), &missing_email, &key)?;
        assert!(tokens.validate(&token).is_err());

        let bad_subject = serde_json::json!({
            "sub": "42", "email": "ann@x.com", "kind": "access", "iat": now, "exp": now + 60
        });
        let token = encode(&Header::default(), &bad_subject, &key)?;
        assert!(tokens.validate(&token).is_err());

        Ok(())
    }
}
