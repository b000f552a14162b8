//! Core services of the forum backend: single-use validation tokens, the
//! activity audit log, and per-user notification preferences.
//!
//! The HTTP layer, templating and admin surfaces live elsewhere; everything
//! here speaks sea-orm against the schema in the `migration` crate.

pub mod activity;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod subscriptions;
pub mod tokens;
pub mod util;

pub use activity::{label, ActivityLog, ActivityObserver, ActivitySubject};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{ActivityError, ConfigError, MintError, SubscriptionError};
pub use subscriptions::Subscriptions;
pub use tokens::TokenService;
