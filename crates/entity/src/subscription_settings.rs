use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

/// Per-user notification switchboard. Exactly one row per user; created on
/// demand with the defaults below.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscription_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub user_id: String,

    /// Master switch; when false no notification is generated at all.
    pub enable_notifications: bool,

    // Notify when...
    pub member_joins: NotificationFrequency,
    pub new_question: NotificationFrequency,
    pub new_question_watched_tags: NotificationFrequency,
    pub subscribed_questions: NotificationFrequency,

    // Auto-subscribe to...
    pub all_questions: bool,
    pub all_questions_watched_tags: bool,
    pub questions_asked: bool,
    pub questions_answered: bool,
    pub questions_commented: bool,
    pub questions_viewed: bool,

    // Notify activity on subscribed questions when...
    pub notify_answers: bool,
    pub notify_reply_to_comments: bool,
    pub notify_comments_own_post: bool,
    pub notify_comments: bool,
    pub notify_accepted: bool,
}

/// How quickly an event class reaches the user. Stored as the one-character
/// codes the notification tables were built around.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum NotificationFrequency {
    #[sea_orm(string_value = "i")]
    Instantly,
    #[sea_orm(string_value = "d")]
    Daily,
    #[sea_orm(string_value = "w")]
    Weekly,
    #[sea_orm(string_value = "n")]
    Never,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl ActiveModelBehavior for ActiveModel {}
