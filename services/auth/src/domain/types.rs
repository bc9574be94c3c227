use chrono::{DateTime, Utc};
use uuid::Uuid;

use alokah_auth_types::role::UserRole;

/// Destination an OTP can be issued to. Every flow addresses exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contact {
    Email(String),
    Phone(String),
}

impl Contact {
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Email(addr) => Some(addr),
            Self::Phone(_) => None,
        }
    }

    pub fn phone(&self) -> Option<&str> {
        match self {
            Self::Phone(number) => Some(number),
            Self::Email(_) => None,
        }
    }

    /// Delivery channel implied by the destination.
    pub fn channel(&self) -> OtpChannel {
        match self {
            Self::Email(_) => OtpChannel::Email,
            Self::Phone(_) => OtpChannel::Phone,
        }
    }
}

/// Account record.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Short numeric id assigned to admin accounts at registration.
    pub associate_id: Option<String>,
    /// Stored form from [`crate::crypto::hash_secret`]; `None` until the user
    /// opts into password login.
    pub password_hash: Option<String>,
    pub is_email_verified: bool,
    pub is_active: bool,
    pub is_password_login: bool,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Fresh, unverified account for a destination. Used by the
    /// auto-provisioning paths (first OTP request for an unknown contact).
    pub fn provision(contact: &Contact, role: UserRole, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: contact.email().map(str::to_owned),
            phone: contact.phone().map(str::to_owned),
            associate_id: None,
            password_hash: None,
            is_email_verified: false,
            is_active: false,
            is_password_login: false,
            role,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Typed partial update for a user row. Only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub is_email_verified: Option<bool>,
    pub is_active: Option<bool>,
    pub password_hash: Option<String>,
    pub is_password_login: Option<bool>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.is_email_verified.is_none()
            && self.is_active.is_none()
            && self.password_hash.is_none()
            && self.is_password_login.is_none()
    }
}

/// OTP delivery channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpChannel {
    Email,
    Phone,
}

impl OtpChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            _ => None,
        }
    }
}

/// Why an OTP was issued. Verification proves contact ownership at signup;
/// Login is the passwordless sign-in path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    Verification,
    Login,
}

impl OtpPurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verification => "verification",
            Self::Login => "login",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "verification" => Some(Self::Verification),
            "login" => Some(Self::Login),
            _ => None,
        }
    }
}

/// One issued OTP challenge. The stored code is always hashed.
#[derive(Debug, Clone)]
pub struct Otp {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub code_hash: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub channel: OtpChannel,
    pub purpose: OtpPurpose,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Otp {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Kind of a stored registration secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    Auth,
}

impl SecretKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "auth" => Some(Self::Auth),
            _ => None,
        }
    }
}

/// Hashed shared secret gating privileged registration.
#[derive(Debug, Clone)]
pub struct StoredSecret {
    pub id: Uuid,
    pub kind: SecretKind,
    pub secret_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Outbound mail handed to the notification port. `data` holds the template
/// parameters — for OTP mail that includes the plaintext code, which exists
/// only in memory for the duration of the send.
#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: String,
    pub template: String,
    pub data: serde_json::Value,
    pub attachments: Vec<MailAttachment>,
}

/// Bundled asset referenced from a mail template (e.g. the inline logo).
#[derive(Debug, Clone)]
pub struct MailAttachment {
    pub filename: String,
    pub content_id: String,
}

/// Template name for the OTP mail.
pub const OTP_MAIL_TEMPLATE: &str = "SendEmailOtp";

/// Inline logo shipped with every OTP mail.
pub const MAIL_LOGO_ATTACHMENT: &str = "alokah.png";

/// OTP time-to-live in seconds.
pub const OTP_TTL_SECS: i64 = 300;

/// Registration secret time-to-live in days.
pub const SECRET_TTL_DAYS: i64 = 60;

/// Length of the admin associate id (digits).
pub const ASSOCIATE_ID_LEN: usize = 4;
