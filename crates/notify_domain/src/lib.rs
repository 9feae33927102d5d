pub mod alarm;
pub mod error;
pub mod notifications;
pub mod repeat;
pub mod request;
pub mod time;

pub use crate::alarm::{AlarmKey, DeferredNotification, ScheduledAlarm};
pub use crate::error::{NotifyError, PlatformError};
pub use crate::notifications::NotificationPlatform;
pub use crate::repeat::{next_occurrence, RepeatPolicy};
pub use crate::request::NotificationRequest;
