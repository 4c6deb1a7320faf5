pub mod badge;
pub mod config;
pub mod error;
pub mod ids;
pub mod reputation;
pub mod store;

pub use badge::{BadgeSignal, BadgeTier, TierDefinition, MIN_REVIEWS, TIER_DEFINITIONS};
pub use config::{Config, ConfigPaths};
pub use error::SyncError;
pub use ids::BusinessId;
pub use reputation::{BusinessReputation, ReputationSnapshot};
pub use store::{ReputationRecord, ReputationStore};
