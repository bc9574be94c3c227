use sea_orm::entity::prelude::*;

/// Account record. Either `email` or `phone` is always present; both carry
/// unique indexes so concurrent first-time signups cannot create duplicates.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: Option<String>,
    #[sea_orm(unique)]
    pub phone: Option<String>,
    /// Short numeric id assigned to admin accounts at registration.
    #[sea_orm(unique)]
    pub associate_id: Option<String>,
    /// PBKDF2 stored form (`saltHex:derivedKeyHex`). Null until the user
    /// opts into password login.
    pub password_hash: Option<String>,
    pub is_email_verified: bool,
    pub is_active: bool,
    pub is_password_login: bool,
    pub role: i16,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::otps::Entity")]
    Otps,
}

impl Related<super::otps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Otps.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
