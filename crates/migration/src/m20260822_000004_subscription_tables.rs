use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Per-user notification switchboard (one row per user).
        manager
            .create_table(
                Table::create()
                    .table(SubscriptionSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubscriptionSettings::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SubscriptionSettings::UserId).string().not_null())
                    .col(
                        ColumnDef::new(SubscriptionSettings::EnableNotifications)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SubscriptionSettings::MemberJoins)
                            .string_len(1)
                            .not_null()
                            .default("n"),
                    )
                    .col(
                        ColumnDef::new(SubscriptionSettings::NewQuestion)
                            .string_len(1)
                            .not_null()
                            .default("d"),
                    )
                    .col(
                        ColumnDef::new(SubscriptionSettings::NewQuestionWatchedTags)
                            .string_len(1)
                            .not_null()
                            .default("i"),
                    )
                    .col(
                        ColumnDef::new(SubscriptionSettings::SubscribedQuestions)
                            .string_len(1)
                            .not_null()
                            .default("i"),
                    )
                    .col(
                        ColumnDef::new(SubscriptionSettings::AllQuestions)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SubscriptionSettings::AllQuestionsWatchedTags)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SubscriptionSettings::QuestionsAsked)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SubscriptionSettings::QuestionsAnswered)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SubscriptionSettings::QuestionsCommented)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SubscriptionSettings::QuestionsViewed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SubscriptionSettings::NotifyAnswers)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SubscriptionSettings::NotifyReplyToComments)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SubscriptionSettings::NotifyCommentsOwnPost)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SubscriptionSettings::NotifyComments)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SubscriptionSettings::NotifyAccepted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscription_settings_user_id")
                            .from(SubscriptionSettings::Table, SubscriptionSettings::UserId)
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
                    .name("idx_subscription_settings_user_id")
                    .table(SubscriptionSettings::Table)
                    .col(SubscriptionSettings::UserId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Digest email subscriptions (one row per subscriber and feed scope).
        manager
            .create_table(
                Table::create()
                    .table(EmailFeedSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmailFeedSettings::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EmailFeedSettings::SubscriberId).string().not_null())
                    .col(ColumnDef::new(EmailFeedSettings::FeedType).string_len(16).not_null())
                    .col(
                        ColumnDef::new(EmailFeedSettings::Frequency)
                            .string_len(1)
                            .not_null()
                            .default("n"),
                    )
                    .col(ColumnDef::new(EmailFeedSettings::AddedAt).big_integer().not_null())
                    .col(ColumnDef::new(EmailFeedSettings::ReportedAt).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_email_feed_settings_subscriber_id")
                            .from(EmailFeedSettings::Table, EmailFeedSettings::SubscriberId)
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
                    .name("idx_email_feed_settings_subscriber_feed")
                    .table(EmailFeedSettings::Table)
                    .col(EmailFeedSettings::SubscriberId)
                    .col(EmailFeedSettings::FeedType)
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
                    .name("idx_email_feed_settings_subscriber_feed")
                    .to_owned(),
            )
            .await;
        let _ = manager
            .drop_index(Index::drop().name("idx_subscription_settings_user_id").to_owned())
            .await;

        manager
            .drop_table(Table::drop().table(EmailFeedSettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubscriptionSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SubscriptionSettings {
    Table,
    Id,
    UserId,
    EnableNotifications,
    MemberJoins,
    NewQuestion,
    NewQuestionWatchedTags,
    SubscribedQuestions,
    AllQuestions,
    AllQuestionsWatchedTags,
    QuestionsAsked,
    QuestionsAnswered,
    QuestionsCommented,
    QuestionsViewed,
    NotifyAnswers,
    NotifyReplyToComments,
    NotifyCommentsOwnPost,
    NotifyComments,
    NotifyAccepted,
}

#[derive(DeriveIden)]
enum EmailFeedSettings {
    Table,
    Id,
    SubscriberId,
    FeedType,
    Frequency,
    AddedAt,
    ReportedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
