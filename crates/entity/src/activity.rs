use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only record of a user action.
///
/// `subject_type` + `subject_id` form a tagged reference to the entity the
/// action touched. The tag set is closed, so every stored subject decodes to
/// a known content kind instead of a runtime-resolved generic pointer.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The acting user.
    pub user_id: String,

    pub kind: ActivityKind,

    pub subject_type: SubjectType,

    pub subject_id: String,

    /// Unix timestamp (seconds).
    pub occurred_at: i64,

    /// Set once moderation has reviewed the record; the only mutable field.
    pub audited: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
pub enum ActivityKind {
    #[sea_orm(num_value = 1)]
    AskQuestion,
    #[sea_orm(num_value = 2)]
    Answer,
    #[sea_orm(num_value = 3)]
    CommentQuestion,
    #[sea_orm(num_value = 4)]
    CommentAnswer,
    #[sea_orm(num_value = 5)]
    MarkAnswer,
    #[sea_orm(num_value = 6)]
    UpdateQuestion,
    #[sea_orm(num_value = 7)]
    UpdateAnswer,
}

/// Discriminant for the tagged subject reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
pub enum SubjectType {
    #[sea_orm(num_value = 1)]
    Question,
    #[sea_orm(num_value = 2)]
    Answer,
    #[sea_orm(num_value = 3)]
    QuestionComment,
    #[sea_orm(num_value = 4)]
    AnswerComment,
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
