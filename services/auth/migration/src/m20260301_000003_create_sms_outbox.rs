use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let timestamp = |col: SmsOutbox| {
            ColumnDef::new(col)
                .timestamp_with_time_zone()
                .not_null()
                .to_owned()
        };

        manager
            .create_table(
                Table::create()
                    .table(SmsOutbox::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SmsOutbox::Id).uuid().not_null().primary_key())
                    // One message per OTP.
                    .col(ColumnDef::new(SmsOutbox::OtpId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(SmsOutbox::Payload).json_binary().not_null())
                    .col(
                        ColumnDef::new(SmsOutbox::Attempts)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(SmsOutbox::LastError).text())
                    .col(timestamp(SmsOutbox::CreatedAt))
                    .col(timestamp(SmsOutbox::NextAttemptAt))
                    .col(ColumnDef::new(SmsOutbox::SentAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .from(SmsOutbox::Table, SmsOutbox::OtpId)
                            .to(Otps::Table, Otps::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(SmsOutbox::Table)
                    .col(SmsOutbox::SentAt)
                    .col(SmsOutbox::NextAttemptAt)
                    .name("idx_sms_outbox_pending")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SmsOutbox::Table).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
enum SmsOutbox {
    Table,
    Id,
    OtpId,
    Payload,
    Attempts,
    LastError,
    CreatedAt,
    NextAttemptAt,
    SentAt,
}

#[derive(Iden)]
enum Otps {
    Table,
    Id,
}
