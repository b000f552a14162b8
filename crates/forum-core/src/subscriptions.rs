use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set, SqlErr,
};
use tracing::debug;

use entity::email_feed_setting::{self, FeedType, Frequency};
use entity::subscription_settings::{self, NotificationFrequency};
use entity::SubscriptionSettings;

use crate::clock::Clock;
use crate::error::SubscriptionError;
use crate::util::uuid_v4;

/// How far back a digest for this cadence reaches; `NoEmail` opts out.
pub fn frequency_delta(frequency: Frequency) -> Option<chrono::Duration> {
    match frequency {
        Frequency::Weekly => Some(chrono::Duration::days(7)),
        Frequency::Daily => Some(chrono::Duration::days(1)),
        Frequency::NoEmail => None,
    }
}

/// Notification preference storage: the per-user settings singleton and the
/// per-(user, feed scope) digest subscriptions.
pub struct Subscriptions {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl Subscriptions {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Fetch the user's settings row, creating it with defaults on first use.
    pub async fn ensure_settings(
        &self,
        user_id: &str,
    ) -> Result<subscription_settings::Model, SubscriptionError> {
        if let Some(existing) = self.find_settings(user_id).await? {
            return Ok(existing);
        }

        match default_settings(user_id).insert(&self.db).await {
            Ok(model) => Ok(model),
            // Lost a creation race; the winner's row is the singleton.
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => self
                .find_settings(user_id)
                .await?
                .ok_or(SubscriptionError::Storage(err)),
            Err(err) => Err(err.into()),
        }
    }

    /// Subscribe a user to a digest feed scope.
    ///
    /// At most one subscription per (user, feed scope); a duplicate is
    /// rejected, not updated.
    pub async fn subscribe(
        &self,
        subscriber_id: &str,
        feed_type: FeedType,
        frequency: Frequency,
    ) -> Result<email_feed_setting::Model, SubscriptionError> {
        let row = email_feed_setting::ActiveModel {
            id: Set(uuid_v4()),
            subscriber_id: Set(subscriber_id.to_owned()),
            feed_type: Set(feed_type),
            frequency: Set(frequency),
            added_at: Set(self.clock.now_ts()),
            reported_at: Set(None),
        };

        match row.insert(&self.db).await {
            Ok(model) => Ok(model),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!(subscriber_id, ?feed_type, "duplicate feed subscription rejected");
                Err(SubscriptionError::AlreadySubscribed)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Stamp a subscription after its digest has been sent.
    pub async fn mark_reported(
        &self,
        setting: email_feed_setting::Model,
    ) -> Result<email_feed_setting::Model, SubscriptionError> {
        let mut active = setting.into_active_model();
        active.reported_at = Set(Some(self.clock.now_ts()));
        Ok(active.update(&self.db).await?)
    }

    async fn find_settings(
        &self,
        user_id: &str,
    ) -> Result<Option<subscription_settings::Model>, SubscriptionError> {
        Ok(SubscriptionSettings::find()
            .filter(subscription_settings::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?)
    }
}

fn default_settings(user_id: &str) -> subscription_settings::ActiveModel {
    subscription_settings::ActiveModel {
        id: Set(uuid_v4()),
        user_id: Set(user_id.to_owned()),
        enable_notifications: Set(true),
        member_joins: Set(NotificationFrequency::Never),
        new_question: Set(NotificationFrequency::Daily),
        new_question_watched_tags: Set(NotificationFrequency::Instantly),
        subscribed_questions: Set(NotificationFrequency::Instantly),
        all_questions: Set(false),
        all_questions_watched_tags: Set(false),
        questions_asked: Set(true),
        questions_answered: Set(true),
        questions_commented: Set(false),
        questions_viewed: Set(false),
        notify_answers: Set(true),
        notify_reply_to_comments: Set(true),
        notify_comments_own_post: Set(true),
        notify_comments: Set(false),
        notify_accepted: Set(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_table_matches_cadence() {
        assert_eq!(frequency_delta(Frequency::Weekly), Some(chrono::Duration::days(7)));
        assert_eq!(frequency_delta(Frequency::Daily), Some(chrono::Duration::days(1)));
        assert_eq!(frequency_delta(Frequency::NoEmail), None);
    }
}
