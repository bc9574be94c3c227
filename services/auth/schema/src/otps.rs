use sea_orm::entity::prelude::*;

/// One-time code challenge sent to an email or phone destination.
///
/// `code_hash` is the PBKDF2 stored form — plaintext codes are never
/// persisted. `user_id` is null when the code was issued before the owning
/// account existed. All codes for a user are deleted on the first successful
/// verification.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "otps")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub code_hash: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Delivery channel: "email" | "phone".
    pub channel: String,
    /// Issuance purpose: "verification" | "login".
    pub purpose: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
