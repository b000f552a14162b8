pub mod user;
pub mod question;
pub mod answer;
pub mod comment;
pub mod activity;
pub mod subscription_settings;
pub mod email_feed_setting;
pub mod validation_hash;

pub use user::Entity as User;
pub use question::Entity as Question;
pub use answer::Entity as Answer;
pub use comment::Entity as Comment;
pub use activity::Entity as Activity;
pub use subscription_settings::Entity as SubscriptionSettings;
pub use email_feed_setting::Entity as EmailFeedSetting;
pub use validation_hash::Entity as ValidationHash;
