use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Auth service domain error variants.
///
/// `InvalidToken` and `TokenExpired` stay separate even though both map to
/// 401: clients re-authenticate on the former and refresh on the latter.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Too many requests")]
    RateLimited { retry_after_seconds: u64 },
    #[error("user not found")]
    UserNotFound,
    #[error("OTP not found")]
    OtpNotFound,
    #[error("OTP has expired")]
    OtpExpired,
    #[error("OTP is incorrect")]
    OtpMismatch,
    #[error("invalid secret")]
    InvalidSecret,
    #[error("invalid password")]
    InvalidPassword,
    #[error("user already has a password")]
    PasswordAlreadySet,
    #[error("user has not set a password")]
    PasswordNotSet,
    #[error("user is not active")]
    UserInactive,
    #[error("invalid token")]
    InvalidToken,
    #[error("token expired")]
    TokenExpired,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("account already exists for this contact")]
    Conflict,
    #[error("phone verification is not supported yet")]
    Unsupported,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AuthServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::OtpNotFound => "OTP_NOT_FOUND",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::OtpMismatch => "OTP_MISMATCH",
            Self::InvalidSecret => "INVALID_SECRET",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::PasswordAlreadySet => "PASSWORD_ALREADY_SET",
            Self::PasswordNotSet => "PASSWORD_NOT_SET",
            Self::UserInactive => "USER_INACTIVE",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Conflict => "CONFLICT",
            Self::Unsupported => "UNSUPPORTED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_)
            | Self::OtpExpired
            | Self::OtpMismatch
            | Self::InvalidSecret
            | Self::InvalidPassword
            | Self::PasswordAlreadySet
            | Self::PasswordNotSet
            | Self::UserInactive
            | Self::Conflict
            | Self::Unsupported => StatusCode::BAD_REQUEST,
            Self::InvalidToken | Self::TokenExpired | Self::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::OtpNotFound => StatusCode::NOT_FOUND,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "success": false,
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::RateLimited {
            retry_after_seconds,
        } = self
        {
            body["retryAfterSeconds"] = serde_json::json!(retry_after_seconds);
        }
        (status, axum::Json(body)).into_response()
    }
}
