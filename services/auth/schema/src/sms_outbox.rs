use sea_orm::entity::prelude::*;

/// Pending SMS carrying an issued OTP, written in the same transaction as the OTP.
/// `attempts`, `next_attempt_at` and `sent_at` are left for a future SMS gateway to drive.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sms_outbox")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub otp_id: Uuid,
    pub payload: Json,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub next_attempt_at: chrono::DateTime<chrono::Utc>,
    pub sent_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::otps::Entity",
        from = "Column::OtpId",
        to = "super::otps::Column::Id",
        on_delete = "Cascade"
    )]
    Otp,
}

impl Related<super::otps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Otp.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
