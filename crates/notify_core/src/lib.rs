pub mod clock;
pub mod config;
pub mod icon;
pub mod memory;
pub mod scheduler;

pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::config::SchedulerConfig;
pub use crate::icon::{HttpIconSource, IconError, IconSource};
pub use crate::memory::InMemoryPlatform;
pub use crate::scheduler::{NotificationScheduler, NotificationSchedulerBuilder};
