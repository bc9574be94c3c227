use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;

use alokah_auth_types::cookie::set_refresh_token_cookie;
use alokah_core::response::ApiResponse;

use crate::domain::types::{OtpChannel, OtpPurpose};
use crate::error::AuthServiceError;
use crate::handlers::{UserResponse, contact_from};
use crate::state::AppState;
use crate::usecase::otp::{SendOtpInput, SendOtpUseCase, VerifyOtpInput, VerifyOtpUseCase};
use crate::usecase::token::issue_token_pair;

// ── POST /auth/otp ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendOtpRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub purpose: Option<String>,
}

pub async fn send_otp(
    State(state): State<AppState>,
    Json(body): Json<SendOtpRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let contact = contact_from(body.email, body.phone)?;
    let purpose = body
        .purpose
        .as_deref()
        .and_then(OtpPurpose::parse)
        .ok_or_else(|| AuthServiceError::Validation("purpose is missing".into()))?;

    let usecase = SendOtpUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        mailer: state.mailer.clone(),
        cooldown: state.otp_cooldown,
    };
    usecase.execute(SendOtpInput { contact, purpose }).await?;

    Ok(ApiResponse::<serde_json::Value>::ok("OTP sent successfully"))
}

// ── POST /auth/otp/verify ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub otp: Option<String>,
    #[serde(rename = "type")]
    pub channel: Option<String>,
    pub purpose: Option<String>,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let contact = contact_from(body.email, body.phone)?;
    let code = body
        .otp
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AuthServiceError::Validation("otp is missing".into()))?;
    let channel = body.channel.as_deref().and_then(OtpChannel::parse);
    let purpose = body.purpose.as_deref().and_then(OtpPurpose::parse);
    let (channel, purpose) = channel.zip(purpose).ok_or_else(|| {
        AuthServiceError::Validation("purpose or type is missing".into())
    })?;

    let usecase = VerifyOtpUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
    };
    let out = usecase
        .execute(VerifyOtpInput {
            contact,
            code,
            channel,
            purpose,
        })
        .await?;

    let tokens = issue_token_pair(out.user.id, &state.tokens)?;
    let jar = set_refresh_token_cookie(jar, tokens.refresh_token, state.cookie_domain.clone());

    let response = ApiResponse::ok(format!("user {} succeeded", purpose.as_str())).with_data(json!({
        "token": tokens.access_token,
        "user": UserResponse::from(&out.user),
    }));
    Ok((jar, response))
}
