use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Single-use proof-of-intent token backing the passwordless-link flows
/// (account confirmation, password reset, email change).
///
/// `hash_code` is the opaque value embedded in the out-of-band link and is
/// the keyed digest itself; the row is deleted the first time a matching
/// digest is redeemed. The unique (user, purpose) index keeps at most one
/// live token per owner and purpose.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "validation_hashes")]
pub struct Model {
    /// Hex HMAC-SHA256 output.
    #[sea_orm(primary_key, auto_increment = false)]
    pub hash_code: String,

    /// Random 12-character alphanumeric string folded into the digest.
    pub seed: String,

    pub user_id: String,

    /// What the token authorizes ("confirm-email", "reset-password", ...).
    pub purpose: String,

    /// Unix timestamp (seconds).
    pub expires_at: i64,
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
