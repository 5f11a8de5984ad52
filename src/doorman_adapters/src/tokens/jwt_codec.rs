use chrono::Utc;
use doorman_core::{
    AccessTokenClaims, RefreshTokenClaims, SessionId, TokenCodec, TokenError, UserId,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const TOKEN_AUDIENCE: &str = "user";

/// Secret and lifetime for one token class.
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: Secret<String>,
    pub ttl: chrono::Duration,
}

impl TokenConfig {
    fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

/// HS256 codec with independent access and refresh secrets.
#[derive(Clone)]
pub struct JwtTokenCodec {
    access: TokenConfig,
    refresh: TokenConfig,
}

impl JwtTokenCodec {
    pub fn new(access: TokenConfig, refresh: TokenConfig) -> Self {
        Self { access, refresh }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    #[serde(rename = "sessionId")]
    session_id: Uuid,
    #[serde(rename = "userId")]
    user_id: Uuid,
    aud: String,
    iat: usize,
    exp: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct RefreshClaims {
    #[serde(rename = "sessionId")]
    session_id: Uuid,
    aud: String,
    iat: usize,
    exp: usize,
}

fn timestamps(ttl: chrono::Duration) -> Result<(usize, usize), TokenError> {
    let now = Utc::now();
    let exp = now
        .checked_add_signed(ttl)
        .ok_or(TokenError::Unexpected("Token TTL out of range".to_string()))?
        .timestamp();

    let iat: usize = now
        .timestamp()
        .try_into()
        .map_err(|_| TokenError::Unexpected("Timestamp out of range".to_string()))?;
    let exp: usize = exp
        .try_into()
        .map_err(|_| TokenError::Unexpected("Timestamp out of range".to_string()))?;

    Ok((iat, exp))
}

fn sign<C: Serialize>(claims: &C, config: &TokenConfig) -> Result<String, TokenError> {
    encode(
        &jsonwebtoken::Header::default(),
        claims,
        &EncodingKey::from_secret(config.as_bytes()),
    )
    .map_err(|e| TokenError::Unexpected(e.to_string()))
}

fn verify<C: for<'de> Deserialize<'de>>(token: &str, config: &TokenConfig) -> Result<C, TokenError> {
    let mut validation = Validation::default();
    validation.set_audience(&[TOKEN_AUDIENCE]);

    decode::<C>(
        token,
        &DecodingKey::from_secret(config.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}

impl TokenCodec for JwtTokenCodec {
    fn sign_access(&self, claims: &AccessTokenClaims) -> Result<String, TokenError> {
        let (iat, exp) = timestamps(self.access.ttl)?;
        sign(
            &AccessClaims {
                session_id: claims.session_id.as_uuid(),
                user_id: claims.user_id.as_uuid(),
                aud: TOKEN_AUDIENCE.to_string(),
                iat,
                exp,
            },
            &self.access,
        )
    }

    fn sign_refresh(&self, claims: &RefreshTokenClaims) -> Result<String, TokenError> {
        let (iat, exp) = timestamps(self.refresh.ttl)?;
        sign(
            &RefreshClaims {
                session_id: claims.session_id.as_uuid(),
                aud: TOKEN_AUDIENCE.to_string(),
                iat,
                exp,
            },
            &self.refresh,
        )
    }

    fn verify_access(&self, token: &str) -> Result<AccessTokenClaims, TokenError> {
        let claims: AccessClaims = verify(token, &self.access)?;
        Ok(AccessTokenClaims {
            session_id: SessionId::from(claims.session_id),
            user_id: UserId::from(claims.user_id),
        })
    }

    fn verify_refresh(&self, token: &str) -> Result<RefreshTokenClaims, TokenError> {
        let claims: RefreshClaims = verify(token, &self.refresh)?;
        Ok(RefreshTokenClaims {
            session_id: SessionId::from(claims.session_id),
        })
    }
}
