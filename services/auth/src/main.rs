use sea_orm::Database;
use tracing::info;

use alokah_auth::config::AuthConfig;
use alokah_auth::infra::mailer::{HttpMailer, LogMailer, MailerImpl};
use alokah_auth::router::build_router;
use alokah_auth::state::AppState;
use alokah_auth::usecase::cooldown::Cooldown;
use alokah_auth::usecase::token::TokenConfig;
use alokah_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AuthConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = match config.mail_api_key.clone() {
        Some(api_key) => MailerImpl::Http(HttpMailer::new(
            config.mail_api_url.clone(),
            api_key,
            config.mail_from_email.clone(),
            config.mail_from_name.clone(),
        )),
        None => MailerImpl::Log(LogMailer),
    };

    let state = AppState {
        db,
        mailer,
        tokens: TokenConfig {
            access_secret: config.access_token_secret,
            refresh_secret: config.refresh_token_secret,
            access_expiry_secs: config.access_token_expiry_secs,
            refresh_expiry_secs: config.refresh_token_expiry_secs,
        },
        cookie_domain: config.cookie_domain,
        otp_cooldown: Cooldown::from_secs(config.otp_cooldown_secs),
        admin_otp_cooldown: Cooldown::from_secs(config.admin_otp_cooldown_secs),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("auth service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
