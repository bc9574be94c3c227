use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use alokah_auth_types::role::UserRole;

use crate::crypto;
use crate::domain::repository::{Mailer, OtpRepository, SecretRepository, UserRepository};
use crate::domain::types::{
    ASSOCIATE_ID_LEN, Contact, OtpPurpose, SECRET_TTL_DAYS, SecretKind, StoredSecret, User,
};
use crate::error::AuthServiceError;
use crate::usecase::cooldown::Cooldown;
use crate::usecase::otp::issue_code;
use crate::usecase::token::{TokenConfig, issue_access_token};

// ── AddSecret ────────────────────────────────────────────────────────────────

pub struct AddSecretInput {
    pub secret: String,
    pub kind: SecretKind,
}

pub struct AddSecretUseCase<S: SecretRepository> {
    pub secrets: S,
}

impl<S: SecretRepository> AddSecretUseCase<S> {
    /// Persist a hashed registration secret valid for 60 days.
    pub async fn execute(&self, input: AddSecretInput) -> Result<StoredSecret, AuthServiceError> {
        let now = Utc::now();
        let stored = StoredSecret {
            id: Uuid::new_v4(),
            kind: input.kind,
            secret_hash: crypto::hash_secret(&input.secret),
            expires_at: now + Duration::days(SECRET_TTL_DAYS),
            created_at: now,
        };
        self.secrets.create(&stored).await?;
        Ok(stored)
    }
}

// ── RegisterAdmin ────────────────────────────────────────────────────────────

pub struct RegisterAdminInput {
    pub email: String,
    pub secret: String,
}

#[derive(Debug)]
pub struct RegisterAdminOutput {
    pub user: User,
    pub token: String,
    /// `false` when the account already existed and only a fresh OTP went out.
    pub created: bool,
}

pub struct RegisterAdminUseCase<U, O, S, M>
where
    U: UserRepository,
    O: OtpRepository,
    S: SecretRepository,
    M: Mailer,
{
    pub users: U,
    pub otps: O,
    pub secrets: S,
    pub mailer: M,
    /// Registration runs a tighter window than the login flows.
    pub cooldown: Cooldown,
    pub tokens: TokenConfig,
}

impl<U, O, S, M> RegisterAdminUseCase<U, O, S, M>
where
    U: UserRepository,
    O: OtpRepository,
    S: SecretRepository,
    M: Mailer,
{
    pub async fn execute(
        &self,
        input: RegisterAdminInput,
    ) -> Result<RegisterAdminOutput, AuthServiceError> {
        let now = Utc::now();

        // Gate on the stored AUTH secret: present, unexpired, and matching.
        let stored = self
            .secrets
            .find_latest_by_kind(SecretKind::Auth)
            .await?
            .ok_or(AuthServiceError::InvalidSecret)?;
        if stored.expires_at <= now {
            return Err(AuthServiceError::InvalidSecret);
        }
        if !crypto::verify_secret(&input.secret, &stored.secret_hash) {
            return Err(AuthServiceError::InvalidSecret);
        }

        let contact = Contact::Email(input.email.clone());

        if let Some(user) = self.users.find_by_contact(&contact).await? {
            issue_code(
                &self.otps,
                &self.mailer,
                &user,
                &contact,
                OtpPurpose::Verification,
                self.cooldown,
            )
            .await?;
            let token = issue_access_token(user.id, &self.tokens)?;
            return Ok(RegisterAdminOutput {
                user,
                token,
                created: false,
            });
        }

        let associate_id = self.generate_associate_id().await?;
        let mut user = User::provision(&contact, UserRole::SuperAdmin, now);
        user.associate_id = Some(associate_id);
        self.users.create(&user).await?;

        issue_code(
            &self.otps,
            &self.mailer,
            &user,
            &contact,
            OtpPurpose::Verification,
            self.cooldown,
        )
        .await?;

        let token = issue_access_token(user.id, &self.tokens)?;
        Ok(RegisterAdminOutput {
            user,
            token,
            created: true,
        })
    }

    /// Draw 4-digit candidates until one is free. The space is small (10k
    /// values) but the admin population is smaller by orders of magnitude.
    async fn generate_associate_id(&self) -> Result<String, AuthServiceError> {
        loop {
            let candidate = {
                let mut rng = rand::rng();
                format!(
                    "{:0width$}",
                    rng.random_range(0..10u32.pow(ASSOCIATE_ID_LEN as u32)),
                    width = ASSOCIATE_ID_LEN
                )
            };
            if self
                .users
                .find_by_associate_id(&candidate)
                .await?
                .is_none()
            {
                return Ok(candidate);
            }
        }
    }
}

