use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unknown business: {0}")]
    UnknownBusiness(String),
    #[error("unknown badge tier: {0}")]
    InvalidTier(String),
}
