use axum::{extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde_json::json;

use alokah_auth_types::cookie::{REFRESH_TOKEN_COOKIE, clear_refresh_cookie};
use alokah_core::response::ApiResponse;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::token::RefreshTokenUseCase;

// ── POST /auth/token/refresh ─────────────────────────────────────────────────

pub async fn refresh_access_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthServiceError> {
    let refresh_value = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_owned())
        .ok_or(AuthServiceError::Unauthorized)?;

    let usecase = RefreshTokenUseCase {
        users: state.user_repo(),
        config: state.tokens.clone(),
    };
    let out = usecase.execute(&refresh_value).await?;

    Ok(
        ApiResponse::ok("access token refreshed successfully").with_data(json!({
            "token": out.access_token,
        })),
    )
}

// ── POST /auth/logout ────────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthServiceError> {
    let jar = clear_refresh_cookie(jar, state.cookie_domain.clone());
    Ok((
        jar,
        ApiResponse::<serde_json::Value>::ok("logged out successfully"),
    ))
}
