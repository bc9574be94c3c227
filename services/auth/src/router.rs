use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use alokah_core::health::{healthz, readyz};
use alokah_core::middleware::request_id_layer;

use crate::handlers::{
    admin::{add_secret, register_admin, verify_admin_otp},
    otp::{send_otp, verify_otp},
    password::{change_password, set_password, sign_in_password},
    token::{logout, refresh_access_token},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // OTP
        .route("/auth/otp", post(send_otp))
        .route("/auth/otp/verify", post(verify_otp))
        // Session
        .route("/auth/token/refresh", post(refresh_access_token))
        .route("/auth/logout", post(logout))
        // Password
        .route("/auth/password", post(set_password))
        .route("/auth/password", patch(change_password))
        .route("/auth/login/password", post(sign_in_password))
        // Admin
        .route("/admin/users", post(register_admin))
        .route("/admin/otp/verify", post(verify_admin_otp))
        .route("/admin/secrets", post(add_secret))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
