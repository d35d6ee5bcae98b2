use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::FirstName).string())
                    .col(ColumnDef::new(Users::LastName).string())
                    .col(ColumnDef::new(Users::Email).string())
                    .col(ColumnDef::new(Users::MobileNumber).string().not_null())
                    .col(ColumnDef::new(Users::CountryCode).integer().not_null())
                    .col(ColumnDef::new(Users::TimeZone).string())
                    .col(ColumnDef::new(Users::Gender).string())
                    .col(ColumnDef::new(Users::UserType).string())
                    .col(ColumnDef::new(Users::UserStatus).string())
                    .col(ColumnDef::new(Users::Facebook).string())
                    .col(ColumnDef::new(Users::Linkedin).string())
                    .col(ColumnDef::new(Users::Instagram).string())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One user per lookup key.
        manager
            .create_index(
                Index::create()
                    .table(Users::Table)
                    .col(Users::MobileNumber)
                    .col(Users::CountryCode)
                    .name("uq_users_mobile_number_country_code")
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    MobileNumber,
    CountryCode,
    TimeZone,
    Gender,
    UserType,
    UserStatus,
    Facebook,
    Linkedin,
    Instagram,
    CreatedAt,
    UpdatedAt,
}
