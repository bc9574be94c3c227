#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{Contact, MailMessage, Otp, SecretKind, StoredSecret, User, UserPatch};
use crate::error::AuthServiceError;

/// Repository for account records.
///
/// The store enforces uniqueness on email, phone, and associate id; `create`
/// surfaces a duplicate as [`AuthServiceError::Conflict`]. That constraint is
/// what makes the concurrent find-or-create race benign.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthServiceError>;
    async fn find_by_contact(&self, contact: &Contact) -> Result<Option<User>, AuthServiceError>;
    async fn find_by_associate_id(&self, id: &str) -> Result<Option<User>, AuthServiceError>;
    async fn create(&self, user: &User) -> Result<(), AuthServiceError>;
    /// Apply a partial update and return the updated record.
    async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<User, AuthServiceError>;
}

/// Repository for one-time codes.
pub trait OtpRepository: Send + Sync {
    /// Most recently created code for a destination. Ties on `created_at`
    /// break by id descending, so the answer is deterministic.
    async fn find_latest_by_contact(
        &self,
        contact: &Contact,
    ) -> Result<Option<Otp>, AuthServiceError>;

    async fn create(&self, otp: &Otp) -> Result<(), AuthServiceError>;

    /// Delete every code owned by a user. Returns the number removed.
    /// This is the single-use guard: one successful verification burns all
    /// outstanding codes, not just the matched one.
    async fn delete_all_for_user(&self, user_id: Uuid) -> Result<u64, AuthServiceError>;
}

/// Repository for registration secrets.
pub trait SecretRepository: Send + Sync {
    /// Most recently created secret of a kind.
    async fn find_latest_by_kind(
        &self,
        kind: SecretKind,
    ) -> Result<Option<StoredSecret>, AuthServiceError>;

    async fn create(&self, secret: &StoredSecret) -> Result<(), AuthServiceError>;
}

/// Outbound notification port.
///
/// `Ok(false)` means the provider accepted the request but reported
/// non-delivery; a transport failure is an `Err`. Callers treat both as a
/// failed send but the distinction matters for logging.
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<bool, AuthServiceError>;
}
