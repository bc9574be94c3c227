use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Secrets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Secrets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Secrets::Kind).string().not_null())
                    .col(ColumnDef::new(Secrets::SecretHash).string().not_null())
                    .col(
                        ColumnDef::new(Secrets::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Secrets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Secrets::Table)
                    .col(Secrets::Kind)
                    .col(Secrets::CreatedAt)
                    .name("idx_secrets_kind_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Secrets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Secrets {
    Table,
    Id,
    Kind,
    SecretHash,
    ExpiresAt,
    CreatedAt,
}
