use sea_orm::DbErr;
use thiserror::Error;

use entity::activity::{ActivityKind, SubjectType};

/// Failure outcomes of minting a validation token.
///
/// A `Conflict` means a live token already exists for the same owner and
/// purpose; the manager neither pre-checks nor retries, so concurrent mints
/// for the same pair are expected to occasionally land here.
#[derive(Debug, Error)]
pub enum MintError {
    #[error("a token for this user and purpose already exists")]
    Conflict,
    #[error("purpose must be a non-empty tag")]
    InvalidPurpose,
    #[error("storage error: {0}")]
    Storage(#[from] DbErr),
}

#[derive(Debug, Error)]
pub enum ActivityError {
    /// The stored subject reference cannot belong to an activity of this
    /// kind. Kept loud: it means the writer recorded a malformed entry.
    #[error("subject {subject:?} is not valid for activity kind {kind:?}")]
    SubjectMismatch {
        kind: ActivityKind,
        subject: SubjectType,
    },
    #[error("activity subject no longer exists: {0}")]
    MissingSubject(String),
    #[error("storage error: {0}")]
    Storage(#[from] DbErr),
}

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("email feed setting already exists")]
    AlreadySubscribed,
    #[error("storage error: {0}")]
    Storage(#[from] DbErr),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {key}: {source}")]
    InvalidVar {
        key: &'static str,
        source: std::num::ParseIntError,
    },
}
