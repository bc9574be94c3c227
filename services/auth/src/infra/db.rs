use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};
use uuid::Uuid;

use alokah_auth_schema::{otps, secrets, users};
use alokah_auth_types::role::UserRole;

use crate::domain::repository::{OtpRepository, SecretRepository, UserRepository};
use crate::domain::types::{
    Contact, Otp, OtpChannel, OtpPurpose, SecretKind, StoredSecret, User, UserPatch,
};
use crate::error::AuthServiceError;

/// Duplicate contact/associate-id inserts surface as `Conflict`; everything
/// else is an internal failure with the query context attached.
fn map_insert_err(e: sea_orm::DbErr, ctx: &'static str) -> AuthServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AuthServiceError::Conflict,
        _ => AuthServiceError::Internal(anyhow::Error::new(e).context(ctx)),
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_contact(&self, contact: &Contact) -> Result<Option<User>, AuthServiceError> {
        let query = match contact {
            Contact::Email(addr) => {
                users::Entity::find().filter(users::Column::Email.eq(addr.as_str()))
            }
            Contact::Phone(number) => {
                users::Entity::find().filter(users::Column::Phone.eq(number.as_str()))
            }
        };
        let model = query.one(&self.db).await.context("find user by contact")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_associate_id(&self, id: &str) -> Result<Option<User>, AuthServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::AssociateId.eq(id))
            .one(&self.db)
            .await
            .context("find user by associate id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), AuthServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            phone: Set(user.phone.clone()),
            associate_id: Set(user.associate_id.clone()),
            password_hash: Set(user.password_hash.clone()),
            is_email_verified: Set(user.is_email_verified),
            is_active: Set(user.is_active),
            is_password_login: Set(user.is_password_login),
            role: Set(user.role.as_u8() as i16),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_insert_err(e, "create user"))?;
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<User, AuthServiceError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(v) = patch.is_email_verified {
            am.is_email_verified = Set(v);
        }
        if let Some(v) = patch.is_active {
            am.is_active = Set(v);
        }
        if let Some(ref v) = patch.password_hash {
            am.password_hash = Set(Some(v.clone()));
        }
        if let Some(v) = patch.is_password_login {
            am.is_password_login = Set(v);
        }
        am.updated_at = Set(Utc::now());
        let model = am.update(&self.db).await.context("update user")?;
        Ok(user_from_model(model))
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        phone: model.phone,
        associate_id: model.associate_id,
        password_hash: model.password_hash,
        is_email_verified: model.is_email_verified,
        is_active: model.is_active,
        is_password_login: model.is_password_login,
        // unknown values cannot appear: writes go through UserRole::as_u8
        role: UserRole::from_u8(model.role as u8).unwrap_or(UserRole::User),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── OTP repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn find_latest_by_contact(
        &self,
        contact: &Contact,
    ) -> Result<Option<Otp>, AuthServiceError> {
        let query = match contact {
            Contact::Email(addr) => {
                otps::Entity::find().filter(otps::Column::Email.eq(addr.as_str()))
            }
            Contact::Phone(number) => {
                otps::Entity::find().filter(otps::Column::Phone.eq(number.as_str()))
            }
        };
        // id is the deterministic tie-break for equal creation timestamps
        let model = query
            .order_by_desc(otps::Column::CreatedAt)
            .order_by_desc(otps::Column::Id)
            .one(&self.db)
            .await
            .context("find latest otp by contact")?;
        model.map(otp_from_model).transpose()
    }

    async fn create(&self, otp: &Otp) -> Result<(), AuthServiceError> {
        otps::ActiveModel {
            id: Set(otp.id),
            user_id: Set(otp.user_id),
            code_hash: Set(otp.code_hash.clone()),
            email: Set(otp.email.clone()),
            phone: Set(otp.phone.clone()),
            channel: Set(otp.channel.as_str().to_owned()),
            purpose: Set(otp.purpose.as_str().to_owned()),
            expires_at: Set(otp.expires_at),
            created_at: Set(otp.created_at),
        }
        .insert(&self.db)
        .await
        .context("create otp")?;
        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: Uuid) -> Result<u64, AuthServiceError> {
        let result = otps::Entity::delete_many()
            .filter(otps::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("delete otps for user")?;
        Ok(result.rows_affected)
    }
}

fn otp_from_model(model: otps::Model) -> Result<Otp, AuthServiceError> {
    let channel = OtpChannel::parse(&model.channel)
        .ok_or_else(|| anyhow::anyhow!("unknown otp channel {:?}", model.channel))?;
    let purpose = OtpPurpose::parse(&model.purpose)
        .ok_or_else(|| anyhow::anyhow!("unknown otp purpose {:?}", model.purpose))?;
    Ok(Otp {
        id: model.id,
        user_id: model.user_id,
        code_hash: model.code_hash,
        email: model.email,
        phone: model.phone,
        channel,
        purpose,
        expires_at: model.expires_at,
        created_at: model.created_at,
    })
}

// ── Secret repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSecretRepository {
    pub db: DatabaseConnection,
}

impl SecretRepository for DbSecretRepository {
    async fn find_latest_by_kind(
        &self,
        kind: SecretKind,
    ) -> Result<Option<StoredSecret>, AuthServiceError> {
        let model = secrets::Entity::find()
            .filter(secrets::Column::Kind.eq(kind.as_str()))
            .order_by_desc(secrets::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find latest secret by kind")?;
        model.map(secret_from_model).transpose()
    }

    async fn create(&self, secret: &StoredSecret) -> Result<(), AuthServiceError> {
        secrets::ActiveModel {
            id: Set(secret.id),
            kind: Set(secret.kind.as_str().to_owned()),
            secret_hash: Set(secret.secret_hash.clone()),
            expires_at: Set(secret.expires_at),
            created_at: Set(secret.created_at),
        }
        .insert(&self.db)
        .await
        .context("create secret")?;
        Ok(())
    }
}

fn secret_from_model(model: secrets::Model) -> Result<StoredSecret, AuthServiceError> {
    let kind = SecretKind::parse(&model.kind)
        .ok_or_else(|| anyhow::anyhow!("unknown secret kind {:?}", model.kind))?;
    Ok(StoredSecret {
        id: model.id,
        kind,
        secret_hash: model.secret_hash,
        expires_at: model.expires_at,
        created_at: model.created_at,
    })
}
