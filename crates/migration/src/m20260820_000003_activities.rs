use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Activities::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Activities::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Activities::UserId).string().not_null())
                    .col(ColumnDef::new(Activities::Kind).small_integer().not_null())
                    .col(ColumnDef::new(Activities::SubjectType).small_integer().not_null())
                    .col(ColumnDef::new(Activities::SubjectId).string().not_null())
                    .col(ColumnDef::new(Activities::OccurredAt).big_integer().not_null())
                    .col(
                        ColumnDef::new(Activities::Audited)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activities_user_id")
                            .from(Activities::Table, Activities::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activities_user_id")
                    .table(Activities::Table)
                    .col(Activities::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        // Feed generators read the log newest-first.
        manager
            .create_index(
                Index::create()
                    .name("idx_activities_occurred_at")
                    .table(Activities::Table)
                    .col(Activities::OccurredAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let _ = manager
            .drop_index(Index::drop().name("idx_activities_occurred_at").to_owned())
            .await;
        let _ = manager
            .drop_index(Index::drop().name("idx_activities_user_id").to_owned())
            .await;

        manager
            .drop_table(Table::drop().table(Activities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Activities {
    Table,
    Id,
    UserId,
    Kind,
    SubjectType,
    SubjectId,
    OccurredAt,
    Audited,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
