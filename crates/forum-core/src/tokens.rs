use std::sync::Arc;

use hmac::{Hmac, Mac};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, SqlErr};
use sha2::Sha256;
use tracing::debug;

use entity::validation_hash;
use entity::ValidationHash;

use crate::clock::Clock;
use crate::config::DEFAULT_TOKEN_TTL_SECS;
use crate::error::MintError;
use crate::util::{hex_encode, random_seed};

/// Mints and redeems single-use proof tokens tied to a user and a purpose.
///
/// The token code is a keyed digest over seed, context, user and purpose,
/// so possessing the code proves the link was issued by this server for
/// exactly that user, purpose and context. Nothing secret is stored in
/// recoverable form; the server key lives only in config.
pub struct TokenService {
    db: DatabaseConnection,
    secret: Vec<u8>,
    clock: Arc<dyn Clock>,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(db: DatabaseConnection, secret: impl Into<Vec<u8>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            db,
            secret: secret.into(),
            clock,
            ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }

    pub fn with_ttl(mut self, secs: i64) -> Self {
        self.ttl_secs = secs;
        self
    }

    /// Mint a token for `user_id` and `purpose`.
    ///
    /// `context` is an ordered sequence of opaque values folded into the
    /// digest (e.g. the email address being confirmed); redemption must
    /// supply the same values in the same order. `expires_at` defaults to
    /// the configured TTL from now.
    ///
    /// There is at most one live token per (user, purpose). The loser of a
    /// concurrent mint race gets `MintError::Conflict`; callers decide
    /// whether to retry or surface the failure.
    pub async fn mint(
        &self,
        user_id: &str,
        purpose: &str,
        context: &[&str],
        expires_at: Option<i64>,
    ) -> Result<validation_hash::Model, MintError> {
        if purpose.is_empty() {
            return Err(MintError::InvalidPurpose);
        }

        let seed = random_seed();
        let code = token_digest(&self.secret, &seed, context, user_id, purpose);
        let expires_at = expires_at.unwrap_or_else(|| self.clock.now_ts() + self.ttl_secs);

        let row = validation_hash::ActiveModel {
            hash_code: Set(code),
            seed: Set(seed),
            user_id: Set(user_id.to_owned()),
            purpose: Set(purpose.to_owned()),
            expires_at: Set(expires_at),
        };

        match row.insert(&self.db).await {
            Ok(model) => Ok(model),
            Err(err) => {
                if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    debug!(user_id, purpose, "mint lost a uniqueness race");
                    Err(MintError::Conflict)
                } else {
                    Err(MintError::Storage(err))
                }
            }
        }
    }

    /// Redeem `code` for `user_id` and `purpose`.
    ///
    /// Returns `true` exactly once per token, and only when purpose, owner,
    /// context and expiry all check out. Every rejection reason (unknown
    /// code, mismatch, expiry, storage fault) collapses to `false` so the
    /// caller cannot be used as a guessing oracle; the reasons are visible
    /// only in debug logs.
    ///
    /// A token whose digest matches is consumed whether or not it expired:
    /// an expired token cannot be retried either.
    pub async fn validate(
        &self,
        code: &str,
        user_id: &str,
        purpose: &str,
        context: &[&str],
    ) -> bool {
        let row = match ValidationHash::find_by_id(code).one(&self.db).await {
            Ok(Some(row)) => row,
            Ok(None) => {
                debug!(purpose, "validation token not found");
                return false;
            }
            Err(err) => {
                debug!(error = %err, "validation token lookup failed");
                return false;
            }
        };

        if row.purpose != purpose {
            debug!(purpose, stored = %row.purpose, "token purpose mismatch");
            return false;
        }
        if row.user_id != user_id {
            debug!(purpose, "token owner mismatch");
            return false;
        }

        let expected = token_digest(&self.secret, &row.seed, context, user_id, purpose);
        if !bool::from(subtle::ConstantTimeEq::ct_eq(
            expected.as_bytes(),
            row.hash_code.as_bytes(),
        )) {
            debug!(purpose, "token digest mismatch");
            return false;
        }

        // The digest matched, so the token is spent regardless of outcome.
        // delete-then-check keeps redemption single-use when two callers
        // race: only the one whose delete removed the row may succeed.
        let deleted = match ValidationHash::delete_by_id(row.hash_code.as_str())
            .exec(&self.db)
            .await
        {
            Ok(res) => res.rows_affected == 1,
            Err(err) => {
                debug!(error = %err, "token delete failed");
                false
            }
        };
        if !deleted {
            debug!(purpose, "token already consumed");
            return false;
        }

        if row.expires_at < self.clock.now_ts() {
            debug!(purpose, "token expired");
            return false;
        }

        true
    }
}

fn token_digest(
    secret: &[u8],
    seed: &str,
    context: &[&str],
    user_id: &str,
    purpose: &str,
) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC-SHA256 accepts keys of any length");
    mac.update(seed.as_bytes());
    for part in context {
        mac.update(part.as_bytes());
    }
    mac.update(user_id.as_bytes());
    mac.update(purpose.as_bytes());
    hex_encode(&mac.finalize().into_bytes())
}
