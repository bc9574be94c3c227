pub mod admin;
pub mod otp;
pub mod password;
pub mod token;

use serde::Serialize;
use uuid::Uuid;

use alokah_auth_types::bearer::BearerToken;
use alokah_auth_types::token::{TokenError, validate_access_token};

use crate::domain::types::{Contact, User};
use crate::error::AuthServiceError;
use crate::state::AppState;

/// Resolve the calling user from a bearer access token.
pub(crate) fn require_user_id(
    token: &BearerToken,
    state: &AppState,
) -> Result<Uuid, AuthServiceError> {
    validate_access_token(&token.0, &state.tokens.access_secret)
        .map(|info| info.user_id)
        .map_err(|e| match e {
            TokenError::Expired => AuthServiceError::TokenExpired,
            TokenError::InvalidSignature | TokenError::Malformed => AuthServiceError::InvalidToken,
        })
}

/// Build the destination from an email/phone request pair. Email wins when
/// both are supplied, matching how clients populate these forms.
pub(crate) fn contact_from(
    email: Option<String>,
    phone: Option<String>,
) -> Result<Contact, AuthServiceError> {
    let email = email.filter(|v| !v.is_empty());
    let phone = phone.filter(|v| !v.is_empty());
    match (email, phone) {
        (Some(addr), _) => Ok(Contact::Email(addr)),
        (None, Some(number)) => Ok(Contact::Phone(number)),
        (None, None) => Err(AuthServiceError::Validation(
            "either email or phone is missing".into(),
        )),
    }
}

/// Public view of a user embedded in login/verification responses.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: alokah_auth_types::role::UserRole,
    #[serde(serialize_with = "alokah_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}
