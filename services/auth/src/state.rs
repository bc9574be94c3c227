use sea_orm::DatabaseConnection;

use crate::infra::db::{DbOtpRepository, DbSecretRepository, DbUserRepository};
use crate::infra::mailer::MailerImpl;
use crate::usecase::cooldown::Cooldown;
use crate::usecase::token::TokenConfig;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mailer: MailerImpl,
    pub tokens: TokenConfig,
    pub cookie_domain: String,
    pub otp_cooldown: Cooldown,
    pub admin_otp_cooldown: Cooldown,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn secret_repo(&self) -> DbSecretRepository {
        DbSecretRepository {
            db: self.db.clone(),
        }
    }
}
