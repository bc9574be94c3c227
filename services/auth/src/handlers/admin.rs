use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use alokah_core::response::ApiResponse;

use crate::domain::types::{OtpPurpose, SecretKind};
use crate::error::AuthServiceError;
use crate::handlers::{UserResponse, contact_from};
use crate::state::AppState;
use crate::usecase::admin::{
    AddSecretInput, AddSecretUseCase, RegisterAdminInput, RegisterAdminUseCase,
};
use crate::usecase::otp::{VerifyOtpInput, VerifyOtpUseCase};
use crate::usecase::token::issue_access_token;

// ── POST /admin/users ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterAdminRequest {
    pub email: Option<String>,
    pub secret: Option<String>,
}

pub async fn register_admin(
    State(state): State<AppState>,
    Json(body): Json<RegisterAdminRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let email = body
        .email
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AuthServiceError::Validation("email is required".into()))?;
    let secret = body
        .secret
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AuthServiceError::Validation("secret is required".into()))?;

    let usecase = RegisterAdminUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        secrets: state.secret_repo(),
        mailer: state.mailer.clone(),
        cooldown: state.admin_otp_cooldown,
        tokens: state.tokens.clone(),
    };
    let out = usecase.execute(RegisterAdminInput { email, secret }).await?;

    if out.created {
        return Ok(ApiResponse::created("user created successfully").with_data(json!({
            "user": UserResponse::from(&out.user),
            "token": out.token,
        })));
    }

    // Existing account: a fresh verification OTP is already on its way. Only
    // verified admins get a token back on this path.
    if out.user.is_email_verified {
        Ok(
            ApiResponse::ok("user already exists and verified").with_data(json!({
                "token": out.token,
            })),
        )
    } else {
        Ok(ApiResponse::ok(
            "user already exists and not verified, please verify your email",
        ))
    }
}

// ── POST /admin/otp/verify ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyAdminOtpRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub otp: Option<String>,
}

pub async fn verify_admin_otp(
    State(state): State<AppState>,
    Json(body): Json<VerifyAdminOtpRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let contact = contact_from(body.email, body.phone)?;
    let code = body
        .otp
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AuthServiceError::Validation("otp is missing".into()))?;

    let channel = contact.channel();
    let usecase = VerifyOtpUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
    };
    let out = usecase
        .execute(VerifyOtpInput {
            contact,
            code,
            channel,
            purpose: OtpPurpose::Verification,
        })
        .await?;

    // Admin console logins are short-lived; no refresh cookie on this path.
    let token = issue_access_token(out.user.id, &state.tokens)?;
    Ok(ApiResponse::ok("OTP verified successfully").with_data(json!({
        "token": token,
    })))
}

// ── POST /admin/secrets ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddSecretRequest {
    pub secret: Option<String>,
    pub kind: Option<String>,
}

pub async fn add_secret(
    State(state): State<AppState>,
    Json(body): Json<AddSecretRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let secret = body
        .secret
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AuthServiceError::Validation("secret is required".into()))?;
    let kind = match body.kind.as_deref() {
        None => SecretKind::Auth,
        Some(raw) => SecretKind::parse(raw)
            .ok_or_else(|| AuthServiceError::Validation("unknown secret kind".into()))?,
    };

    let usecase = AddSecretUseCase {
        secrets: state.secret_repo(),
    };
    let stored = usecase.execute(AddSecretInput { secret, kind }).await?;

    Ok(ApiResponse::ok("secret added successfully").with_data(json!({
        "id": stored.id,
        "kind": stored.kind.as_str(),
        "expiresAt": stored.expires_at,
    })))
}
