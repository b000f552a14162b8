use std::sync::Arc;

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};

use entity::activity::{self, ActivityKind, SubjectType};
use entity::{answer, comment, question};
use entity::{Answer, Comment, Question};

use crate::clock::Clock;
use crate::error::ActivityError;
use crate::util::uuid_v4;

/// Downstream consumer of new audit entries (badge awarding, moderation
/// queues, email digesters). Delivery is synchronous and best-effort: each
/// observer sees every appended record exactly once, on the recording call,
/// and there is no retry.
pub trait ActivityObserver: Send + Sync {
    fn on_activity(&self, record: &activity::Model);
}

/// Strongly-typed reference to the entity an activity touched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActivitySubject {
    Question(String),
    Answer(String),
    QuestionComment(String),
    AnswerComment(String),
}

impl ActivitySubject {
    pub fn subject_type(&self) -> SubjectType {
        match self {
            Self::Question(_) => SubjectType::Question,
            Self::Answer(_) => SubjectType::Answer,
            Self::QuestionComment(_) => SubjectType::QuestionComment,
            Self::AnswerComment(_) => SubjectType::AnswerComment,
        }
    }

    pub fn subject_id(&self) -> &str {
        match self {
            Self::Question(id)
            | Self::Answer(id)
            | Self::QuestionComment(id)
            | Self::AnswerComment(id) => id,
        }
    }

    pub fn of_record(record: &activity::Model) -> Self {
        let id = record.subject_id.clone();
        match record.subject_type {
            SubjectType::Question => Self::Question(id),
            SubjectType::Answer => Self::Answer(id),
            SubjectType::QuestionComment => Self::QuestionComment(id),
            SubjectType::AnswerComment => Self::AnswerComment(id),
        }
    }
}

/// Append-only log of user actions.
pub struct ActivityLog {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
    observers: Vec<Arc<dyn ActivityObserver>>,
}

impl ActivityLog {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self {
            db,
            clock,
            observers: Vec::new(),
        }
    }

    pub fn register(&mut self, observer: Arc<dyn ActivityObserver>) {
        self.observers.push(observer);
    }

    /// Append one record and notify every registered observer with it.
    ///
    /// Whether `subject` actually fits `kind` is not checked here; a
    /// malformed pairing surfaces later, loudly, in [`resolve_question`].
    ///
    /// [`resolve_question`]: ActivityLog::resolve_question
    pub async fn record(
        &self,
        actor_id: &str,
        kind: ActivityKind,
        subject: ActivitySubject,
    ) -> Result<activity::Model, ActivityError> {
        let row = activity::ActiveModel {
            id: Set(uuid_v4()),
            user_id: Set(actor_id.to_owned()),
            kind: Set(kind),
            subject_type: Set(subject.subject_type()),
            subject_id: Set(subject.subject_id().to_owned()),
            occurred_at: Set(self.clock.now_ts()),
            audited: Set(false),
        };

        let record = row.insert(&self.db).await?;

        for observer in &self.observers {
            observer.on_activity(&record);
        }

        Ok(record)
    }

    /// Flip the moderation flag; the one mutation an activity row permits.
    pub async fn mark_audited(
        &self,
        record: activity::Model,
    ) -> Result<activity::Model, ActivityError> {
        let mut active = record.into_active_model();
        active.audited = Set(true);
        Ok(active.update(&self.db).await?)
    }

    /// Walk from an activity record to the question it happened under.
    ///
    /// The dispatch is exhaustive over [`ActivityKind`]; a subject reference
    /// that cannot belong to the record's kind, or one that no longer
    /// resolves, is an error, never a silent default.
    pub async fn resolve_question(
        &self,
        record: &activity::Model,
    ) -> Result<question::Model, ActivityError> {
        let subject = ActivitySubject::of_record(record);
        let question_id = match (record.kind, &subject) {
            (
                ActivityKind::AskQuestion | ActivityKind::UpdateQuestion,
                ActivitySubject::Question(id),
            ) => id.clone(),
            (
                ActivityKind::Answer | ActivityKind::MarkAnswer | ActivityKind::UpdateAnswer,
                ActivitySubject::Answer(id),
            ) => self.answer(id).await?.question_id,
            (ActivityKind::CommentQuestion, ActivitySubject::QuestionComment(id)) => {
                self.comment(id).await?.question_id.ok_or_else(|| mismatch(record))?
            }
            (ActivityKind::CommentAnswer, ActivitySubject::AnswerComment(id)) => {
                let answer_id = self.comment(id).await?.answer_id.ok_or_else(|| mismatch(record))?;
                self.answer(&answer_id).await?.question_id
            }
            _ => return Err(mismatch(record)),
        };

        Question::find_by_id(question_id.as_str())
            .one(&self.db)
            .await?
            .ok_or(ActivityError::MissingSubject(question_id))
    }

    async fn answer(&self, id: &str) -> Result<answer::Model, ActivityError> {
        Answer::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ActivityError::MissingSubject(id.to_owned()))
    }

    async fn comment(&self, id: &str) -> Result<comment::Model, ActivityError> {
        Comment::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ActivityError::MissingSubject(id.to_owned()))
    }
}

fn mismatch(record: &activity::Model) -> ActivityError {
    ActivityError::SubjectMismatch {
        kind: record.kind,
        subject: record.subject_type,
    }
}

/// Feed phrase for an activity kind ("<user> asked <question>").
pub fn label(kind: ActivityKind) -> &'static str {
    match kind {
        ActivityKind::AskQuestion => "asked",
        ActivityKind::Answer => "answered",
        ActivityKind::MarkAnswer => "marked an answer",
        ActivityKind::UpdateQuestion => "edited",
        ActivityKind::CommentQuestion => "commented",
        ActivityKind::CommentAnswer => "commented an answer",
        ActivityKind::UpdateAnswer => "edited an answer",
    }
}
