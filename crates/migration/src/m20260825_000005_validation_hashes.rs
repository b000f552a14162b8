use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ValidationHashes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ValidationHashes::HashCode)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ValidationHashes::Seed).string_len(12).not_null())
                    .col(ColumnDef::new(ValidationHashes::UserId).string().not_null())
                    .col(ColumnDef::new(ValidationHashes::Purpose).string().not_null())
                    .col(ColumnDef::new(ValidationHashes::ExpiresAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_validation_hashes_user_id")
                            .from(ValidationHashes::Table, ValidationHashes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The mint path relies on this index to reject a second live token
        // for the same owner and purpose; there is no application pre-check.
        manager
            .create_index(
                Index::create()
                    .name("idx_validation_hashes_user_purpose")
                    .table(ValidationHashes::Table)
                    .col(ValidationHashes::UserId)
                    .col(ValidationHashes::Purpose)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let _ = manager
            .drop_index(
                Index::drop()
                    .name("idx_validation_hashes_user_purpose")
                    .to_owned(),
            )
            .await;

        manager
            .drop_table(Table::drop().table(ValidationHashes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ValidationHashes {
    Table,
    HashCode,
    Seed,
    UserId,
    Purpose,
    ExpiresAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
