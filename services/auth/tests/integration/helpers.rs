use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use alokah_auth::crypto;
use alokah_auth::domain::repository::{
    Mailer, OtpRepository, SecretRepository, UserRepository,
};
use alokah_auth::domain::types::{
    Contact, MailMessage, Otp, SECRET_TTL_DAYS, SecretKind, StoredSecret, User, UserPatch,
};
use alokah_auth::error::AuthServiceError;
use alokah_auth::usecase::token::TokenConfig;
use alokah_auth_types::role::UserRole;

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the internal list for post-execution inspection.
    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

fn contact_matches(user: &User, contact: &Contact) -> bool {
    match contact {
        Contact::Email(addr) => user.email.as_deref() == Some(addr.as_str()),
        Contact::Phone(number) => user.phone.as_deref() == Some(number.as_str()),
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_contact(&self, contact: &Contact) -> Result<Option<User>, AuthServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| contact_matches(u, contact))
            .cloned())
    }

    async fn find_by_associate_id(&self, id: &str) -> Result<Option<User>, AuthServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.associate_id.as_deref() == Some(id))
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), AuthServiceError> {
        let mut users = self.users.lock().unwrap();
        // same uniqueness the real store enforces via unique indexes
        let duplicate = users.iter().any(|u| {
            (u.email.is_some() && u.email == user.email)
                || (u.phone.is_some() && u.phone == user.phone)
        });
        if duplicate {
            return Err(AuthServiceError::Conflict);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<User, AuthServiceError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AuthServiceError::UserNotFound)?;
        if let Some(v) = patch.is_email_verified {
            user.is_email_verified = v;
        }
        if let Some(v) = patch.is_active {
            user.is_active = v;
        }
        if let Some(ref v) = patch.password_hash {
            user.password_hash = Some(v.clone());
        }
        if let Some(v) = patch.is_password_login {
            user.is_password_login = v;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

// ── MockOtpRepo ──────────────────────────────────────────────────────────────

pub struct MockOtpRepo {
    pub rows: Arc<Mutex<Vec<Otp>>>,
}

impl MockOtpRepo {
    pub fn new(rows: Vec<Otp>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn rows_handle(&self) -> Arc<Mutex<Vec<Otp>>> {
        Arc::clone(&self.rows)
    }
}

fn otp_matches(otp: &Otp, contact: &Contact) -> bool {
    match contact {
        Contact::Email(addr) => otp.email.as_deref() == Some(addr.as_str()),
        Contact::Phone(number) => otp.phone.as_deref() == Some(number.as_str()),
    }
}

impl OtpRepository for MockOtpRepo {
    async fn find_latest_by_contact(
        &self,
        contact: &Contact,
    ) -> Result<Option<Otp>, AuthServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|o| otp_matches(o, contact))
            .max_by_key(|o| (o.created_at, o.id))
            .cloned())
    }

    async fn create(&self, otp: &Otp) -> Result<(), AuthServiceError> {
        self.rows.lock().unwrap().push(otp.clone());
        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: Uuid) -> Result<u64, AuthServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|o| o.user_id != Some(user_id));
        Ok((before - rows.len()) as u64)
    }
}

// ── MockSecretRepo ───────────────────────────────────────────────────────────

pub struct MockSecretRepo {
    pub rows: Arc<Mutex<Vec<StoredSecret>>>,
}

impl MockSecretRepo {
    pub fn new(rows: Vec<StoredSecret>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl SecretRepository for MockSecretRepo {
    async fn find_latest_by_kind(
        &self,
        kind: SecretKind,
    ) -> Result<Option<StoredSecret>, AuthServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.kind == kind)
            .max_by_key(|s| s.created_at)
            .cloned())
    }

    async fn create(&self, secret: &StoredSecret) -> Result<(), AuthServiceError> {
        self.rows.lock().unwrap().push(secret.clone());
        Ok(())
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

pub struct MockMailer {
    pub sent: Arc<Mutex<Vec<MailMessage>>>,
    pub delivered: bool,
}

impl MockMailer {
    pub fn delivering() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            delivered: true,
        }
    }

    pub fn bouncing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            delivered: false,
        }
    }

    /// Plaintext code embedded in the most recent mail's template data.
    pub fn last_code(&self) -> String {
        let sent = self.sent.lock().unwrap();
        sent.last().unwrap().data["otp"].as_str().unwrap().to_owned()
    }
}

impl Mailer for MockMailer {
    async fn send(&self, message: &MailMessage) -> Result<bool, AuthServiceError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(self.delivered)
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn email_contact() -> Contact {
    Contact::Email("guest@alokah.app".to_owned())
}

pub fn test_user(contact: &Contact) -> User {
    User::provision(contact, UserRole::User, Utc::now())
}

pub fn active_user(contact: &Contact) -> User {
    let mut user = test_user(contact);
    user.is_active = true;
    user
}

pub fn password_user(contact: &Contact, password: &str) -> User {
    let mut user = active_user(contact);
    user.password_hash = Some(crypto::hash_secret(password));
    user.is_password_login = true;
    user
}

pub fn auth_secret(plaintext: &str) -> StoredSecret {
    let now = Utc::now();
    StoredSecret {
        id: Uuid::new_v4(),
        kind: SecretKind::Auth,
        secret_hash: crypto::hash_secret(plaintext),
        expires_at: now + Duration::days(SECRET_TTL_DAYS),
        created_at: now,
    }
}

pub fn test_token_config() -> TokenConfig {
    TokenConfig {
        access_secret: "access-secret-for-tests".to_owned(),
        refresh_secret: "refresh-secret-for-tests".to_owned(),
        access_expiry_secs: 604_800,
        refresh_expiry_secs: 2_592_000,
    }
}
