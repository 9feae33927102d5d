use chrono::NaiveDateTime;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, NotifyError>;

/// Failure reported by the host notification or alarm service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("{service} service unavailable")]
    Unavailable { service: &'static str },

    #[error("{service} service rejected the request: {reason}")]
    Rejected {
        service: &'static str,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("notification {0} has no fire time")]
    MissingFireTime(i32),

    #[error("fire time {0} does not exist in the local time zone")]
    InvalidFireTime(NaiveDateTime),

    #[error("deferred notification payload: {0}")]
    Serialization(#[from] serde_json::Error),
}
