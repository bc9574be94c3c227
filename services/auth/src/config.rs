/// Auth service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AuthConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing access tokens. Env var: `JWT_SECRET_KEY`.
    pub access_token_secret: String,
    /// HMAC secret for signing refresh tokens. Env var: `JWT_REFRESH_SECRET_KEY`.
    pub refresh_token_secret: String,
    /// Access-token lifetime in seconds (default 7 days). Env var: `JWT_EXPIRES_IN_SECS`.
    pub access_token_expiry_secs: u64,
    /// Refresh-token lifetime in seconds (default 30 days). Env var: `JWT_REFRESH_EXPIRES_IN_SECS`.
    pub refresh_token_expiry_secs: u64,
    /// Cookie domain attribute for the refresh cookie.
    pub cookie_domain: String,
    /// TCP port to listen on (default 4000). Env var: `AUTH_PORT`.
    pub auth_port: u16,
    /// Transactional mail API endpoint. Env var: `MAIL_API_URL`.
    pub mail_api_url: String,
    /// Mail API key; when unset the service logs mail instead of sending it.
    pub mail_api_key: Option<String>,
    /// Sender address for outbound mail. Env var: `MAIL_FROM_EMAIL`.
    pub mail_from_email: String,
    /// Optional sender display name. Env var: `MAIL_FROM_NAME`.
    pub mail_from_name: Option<String>,
    /// Cooldown between OTP sends on the login/verification flows (default 30s).
    pub otp_cooldown_secs: i64,
    /// Cooldown on the admin-registration flow (default 5s). Kept separate:
    /// the two windows are product policy, not an accident to unify.
    pub admin_otp_cooldown_secs: i64,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            access_token_secret: std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY"),
            refresh_token_secret: std::env::var("JWT_REFRESH_SECRET_KEY")
                .expect("JWT_REFRESH_SECRET_KEY"),
            access_token_expiry_secs: std::env::var("JWT_EXPIRES_IN_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(604_800),
            refresh_token_expiry_secs: std::env::var("JWT_REFRESH_EXPIRES_IN_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2_592_000),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            auth_port: std::env::var("AUTH_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4000),
            mail_api_url: std::env::var("MAIL_API_URL")
                .unwrap_or_else(|_| "https://api.brevo.com/v3/smtp/email".to_owned()),
            mail_api_key: std::env::var("MAIL_API_KEY")
                .ok()
                .filter(|v| !v.is_empty()),
            mail_from_email: std::env::var("MAIL_FROM_EMAIL").expect("MAIL_FROM_EMAIL"),
            mail_from_name: std::env::var("MAIL_FROM_NAME").ok(),
            otp_cooldown_secs: std::env::var("OTP_COOLDOWN_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            admin_otp_cooldown_secs: std::env::var("ADMIN_OTP_COOLDOWN_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }
}
