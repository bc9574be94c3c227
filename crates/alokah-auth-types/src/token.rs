//! JWT access- and refresh-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test))]
use serde::Serialize;
use uuid::Uuid;

/// User identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct AccessTokenInfo {
    pub user_id: Uuid,
    pub expires_at: u64,
}

/// Identity plus token id extracted from a validated refresh token.
/// The token id (`tid`) exists for future revocation tracking; nothing
/// consults it today.
#[derive(Debug, Clone)]
pub struct RefreshTokenInfo {
    pub user_id: Uuid,
    pub token_id: Uuid,
    pub expires_at: u64,
}

/// Errors returned by token validation.
///
/// Signature failure and expiry are deliberately distinct variants — clients
/// re-authenticate on the former and refresh on the latter.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// Access-token claims: the owning user and expiry, nothing else.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test), derive(Serialize))]
pub struct AccessClaims {
    /// User ID (UUID string).
    pub sub: String,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Refresh-token claims.
///
/// [`Serialize`] requires the **`USE_ONLY_IN_AUTH_SERVICE`** cargo feature.
/// Only the auth service enables it because it is the sole token issuer.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test), derive(Serialize))]
pub struct RefreshClaims {
    /// User ID (UUID string).
    pub sub: String,
    /// Random token id minted per login (UUID string).
    pub tid: String,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

// ── Core decode (private) ────────────────────────────────────────────────

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s — tolerates clock skew between services.
fn decode_jwt<C: serde::de::DeserializeOwned>(token: &str, secret: &str) -> Result<C, TokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<C>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    Ok(data.claims)
}

// ── Public: all consumers ────────────────────────────────────────────────

/// Validate a bearer access token, returning the parsed identity.
///
/// This is the primary public API for token validation: every protected
/// handler calls it to turn the `Authorization` header into a user id.
pub fn validate_access_token(token: &str, secret: &str) -> Result<AccessTokenInfo, TokenError> {
    let claims: AccessClaims = decode_jwt(token, secret)?;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| TokenError::Malformed)?;
    Ok(AccessTokenInfo {
        user_id,
        expires_at: claims.exp,
    })
}

// ── Feature-gated: auth service only ─────────────────────────────────────

/// Validate a refresh token and return the parsed identity + token id.
///
/// Used by the auth service's refresh flow — validates the refresh token,
/// then looks up the user from the `sub` claim to issue a new access token.
///
/// Requires the `USE_ONLY_IN_AUTH_SERVICE` feature; no other consumer should
/// ever see a refresh token.
#[cfg(any(feature = "USE_ONLY_IN_AUTH_SERVICE", test))]
pub fn validate_refresh_token(token: &str, secret: &str) -> Result<RefreshTokenInfo, TokenError> {
    let claims: RefreshClaims = decode_jwt(token, secret)?;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| TokenError::Malformed)?;
    let token_id = claims
        .tid
        .parse::<Uuid>()
        .map_err(|_| TokenError::Malformed)?;
    Ok(RefreshTokenInfo {
        user_id,
        token_id,
        expires_at: claims.exp,
    })
}
