use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

/// Digest email subscription for one feed scope.
///
/// At most one row per (subscriber, feed_type); a second insert for the same
/// pair is rejected by the unique index.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "email_feed_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub subscriber_id: String,

    pub feed_type: FeedType,

    pub frequency: Frequency,

    /// Unix timestamp (seconds).
    pub added_at: i64,

    /// Unix timestamp (seconds); stamped each time a digest goes out.
    pub reported_at: Option<i64>,
}

/// Which slice of the forum the digest covers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum FeedType {
    #[sea_orm(string_value = "q_all")]
    EntireForum,
    #[sea_orm(string_value = "q_ask")]
    QuestionsAsked,
    #[sea_orm(string_value = "q_ans")]
    QuestionsAnswered,
    #[sea_orm(string_value = "q_sel")]
    SelectedQuestions,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum Frequency {
    #[sea_orm(string_value = "w")]
    Weekly,
    #[sea_orm(string_value = "d")]
    Daily,
    #[sea_orm(string_value = "n")]
    NoEmail,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::SubscriberId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Subscriber,
}

impl ActiveModelBehavior for ActiveModel {}
