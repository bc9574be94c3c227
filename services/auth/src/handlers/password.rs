use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;

use alokah_auth_types::bearer::BearerToken;
use alokah_auth_types::cookie::set_refresh_token_cookie;
use alokah_core::response::ApiResponse;

use crate::error::AuthServiceError;
use crate::handlers::{UserResponse, contact_from, require_user_id};
use crate::state::AppState;
use crate::usecase::password::{
    ChangePasswordUseCase, SetPasswordUseCase, SignInWithPasswordInput, SignInWithPasswordUseCase,
};

// ── POST /auth/password ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetPasswordRequest {
    pub password: Option<String>,
}

pub async fn set_password(
    State(state): State<AppState>,
    token: BearerToken,
    Json(body): Json<SetPasswordRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let user_id = require_user_id(&token, &state)?;
    let password = body
        .password
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AuthServiceError::Validation("password is required".into()))?;

    let usecase = SetPasswordUseCase {
        users: state.user_repo(),
    };
    usecase.execute(user_id, &password).await?;

    Ok(ApiResponse::<serde_json::Value>::ok(
        "password set successfully",
    ))
}

// ── POST /auth/login/password ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignInPasswordRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}

pub async fn sign_in_password(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignInPasswordRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let contact = contact_from(body.email, body.phone)?;
    let password = body
        .password
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AuthServiceError::Validation("password is required".into()))?;

    let usecase = SignInWithPasswordUseCase {
        users: state.user_repo(),
        config: state.tokens.clone(),
    };
    let out = usecase
        .execute(SignInWithPasswordInput { contact, password })
        .await?;

    let jar = set_refresh_token_cookie(jar, out.tokens.refresh_token, state.cookie_domain.clone());
    let response = ApiResponse::ok("logged in successfully").with_data(json!({
        "token": out.tokens.access_token,
        "user": UserResponse::from(&out.user),
    }));
    Ok((jar, response))
}

// ── PATCH /auth/password ─────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

pub async fn change_password(
    State(state): State<AppState>,
    token: BearerToken,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let user_id = require_user_id(&token, &state)?;
    let (old_password, new_password) = body
        .old_password
        .filter(|v| !v.is_empty())
        .zip(body.new_password.filter(|v| !v.is_empty()))
        .ok_or_else(|| {
            AuthServiceError::Validation("oldPassword and newPassword are required".into())
        })?;

    let usecase = ChangePasswordUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(user_id, &old_password, &new_password)
        .await?;

    Ok(ApiResponse::<serde_json::Value>::ok(
        "password changed successfully",
    ))
}
