use uuid::Uuid;

use crate::crypto;
use crate::domain::repository::UserRepository;
use crate::domain::types::{Contact, User, UserPatch};
use crate::error::AuthServiceError;
use crate::usecase::token::{TokenConfig, TokenPair, issue_token_pair};

// ── SetPassword ──────────────────────────────────────────────────────────────

pub struct SetPasswordUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetPasswordUseCase<U> {
    /// First-time password opt-in for an active OTP-only account.
    pub async fn execute(&self, user_id: Uuid, password: &str) -> Result<(), AuthServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        if !user.is_active {
            return Err(AuthServiceError::UserInactive);
        }
        if user.is_password_login {
            return Err(AuthServiceError::PasswordAlreadySet);
        }

        self.users
            .update(
                user.id,
                &UserPatch {
                    password_hash: Some(crypto::hash_secret(password)),
                    is_password_login: Some(true),
                    ..Default::default()
                },
            )
            .await?;
        Ok(())
    }
}

// ── SignInWithPassword ───────────────────────────────────────────────────────

pub struct SignInWithPasswordInput {
    pub contact: Contact,
    pub password: String,
}

#[derive(Debug)]
pub struct SignInWithPasswordOutput {
    pub user: User,
    pub tokens: TokenPair,
}

pub struct SignInWithPasswordUseCase<U: UserRepository> {
    pub users: U,
    pub config: TokenConfig,
}

impl<U: UserRepository> SignInWithPasswordUseCase<U> {
    pub async fn execute(
        &self,
        input: SignInWithPasswordInput,
    ) -> Result<SignInWithPasswordOutput, AuthServiceError> {
        let user = self
            .users
            .find_by_contact(&input.contact)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        if !user.is_password_login {
            return Err(AuthServiceError::PasswordNotSet);
        }
        let stored = user
            .password_hash
            .as_deref()
            .ok_or(AuthServiceError::PasswordNotSet)?;
        if !crypto::verify_secret(&input.password, stored) {
            return Err(AuthServiceError::InvalidPassword);
        }

        let tokens = issue_token_pair(user.id, &self.config)?;
        Ok(SignInWithPasswordOutput { user, tokens })
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ChangePasswordUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        if !user.is_password_login {
            return Err(AuthServiceError::Forbidden);
        }
        let stored = user
            .password_hash
            .as_deref()
            .ok_or(AuthServiceError::Forbidden)?;
        if !crypto::verify_secret(old_password, stored) {
            return Err(AuthServiceError::InvalidPassword);
        }

        self.users
            .update(
                user.id,
                &UserPatch {
                    password_hash: Some(crypto::hash_secret(new_password)),
                    ..Default::default()
                },
            )
            .await?;
        Ok(())
    }
}

