use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use alokah_auth_types::token::{AccessClaims, RefreshClaims, TokenError, validate_refresh_token};

use crate::domain::repository::UserRepository;
use crate::error::AuthServiceError;

/// Signing material and lifetimes for both token kinds. Access and refresh
/// tokens are signed with independent secrets.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_expiry_secs: u64,
    pub refresh_expiry_secs: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

fn map_token_err(e: TokenError) -> AuthServiceError {
    match e {
        TokenError::Expired => AuthServiceError::TokenExpired,
        TokenError::InvalidSignature | TokenError::Malformed => AuthServiceError::InvalidToken,
    }
}

pub fn issue_access_token(
    user_id: Uuid,
    config: &TokenConfig,
) -> Result<String, AuthServiceError> {
    let claims = AccessClaims {
        sub: user_id.to_string(),
        exp: now_secs() + config.access_expiry_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.access_secret.as_bytes()),
    )
    .map_err(|e| AuthServiceError::Internal(e.into()))
}

/// Mint a refresh token. The returned token id is embedded as the `tid`
/// claim — groundwork for a revocation list, unchecked today.
pub fn issue_refresh_token(
    user_id: Uuid,
    config: &TokenConfig,
) -> Result<(String, Uuid), AuthServiceError> {
    let token_id = Uuid::new_v4();
    let claims = RefreshClaims {
        sub: user_id.to_string(),
        tid: token_id.to_string(),
        exp: now_secs() + config.refresh_expiry_secs,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.refresh_secret.as_bytes()),
    )
    .map_err(|e| AuthServiceError::Internal(e.into()))?;
    Ok((token, token_id))
}

#[derive(Debug)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub refresh_token_id: Uuid,
}

/// Both credentials for a fresh login.
pub fn issue_token_pair(user_id: Uuid, config: &TokenConfig) -> Result<TokenPair, AuthServiceError> {
    let access_token = issue_access_token(user_id, config)?;
    let (refresh_token, refresh_token_id) = issue_refresh_token(user_id, config)?;
    Ok(TokenPair {
        access_token,
        refresh_token,
        refresh_token_id,
    })
}

// ── RefreshToken ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RefreshTokenOutput {
    pub user_id: Uuid,
    pub access_token: String,
}

pub struct RefreshTokenUseCase<U: UserRepository> {
    pub users: U,
    pub config: TokenConfig,
}

impl<U: UserRepository> RefreshTokenUseCase<U> {
    pub async fn execute(
        &self,
        refresh_token_value: &str,
    ) -> Result<RefreshTokenOutput, AuthServiceError> {
        // Signature failure and expiry surface as distinct kinds; the access
        // token's own state is irrelevant here.
        let info = validate_refresh_token(refresh_token_value, &self.config.refresh_secret)
            .map_err(map_token_err)?;

        let user = self
            .users
            .find_by_id(info.user_id)
            .await?
            .ok_or(AuthServiceError::InvalidToken)?;

        let access_token = issue_access_token(user.id, &self.config)?;

        Ok(RefreshTokenOutput {
            user_id: user.id,
            access_token,
        })
    }
}

