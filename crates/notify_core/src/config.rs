use std::time::Duration;

use notify_domain::notifications::{IconId, Importance, NotificationChannel};
use tracing::warn;

#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    pub package_name: String,
    pub channel_name: String,
    pub channel_importance: Importance,
    /// Icon chosen by the application. Falls back to `default_icon` when unset.
    pub small_icon: IconId,
    pub default_icon: IconId,
    /// Payload position holding the large-icon URL.
    pub image_slot: usize,
    pub icon_fetch_timeout: Duration,
    pub delete_label: String,
    pub edit_label: String,
}

impl SchedulerConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(name) = std::env::var("NOTIFY_PACKAGE_NAME") {
            let name = name.trim();
            if !name.is_empty() {
                config.package_name = name.to_string();
            }
        }
        if let Some(id) = parse_var::<i32>("NOTIFY_SMALL_ICON_ID") {
            config.small_icon = IconId(id);
        }
        if let Some(id) = parse_var::<i32>("NOTIFY_DEFAULT_ICON_ID") {
            config.default_icon = IconId(id);
        }
        if let Some(slot) = parse_var::<usize>("NOTIFY_IMAGE_SLOT") {
            config.image_slot = slot;
        }
        if let Some(millis) = parse_var::<u64>("NOTIFY_ICON_TIMEOUT_MS") {
            if millis > 0 {
                config.icon_fetch_timeout = Duration::from_millis(millis);
            }
        }
        if let Ok(label) = std::env::var("NOTIFY_DELETE_LABEL") {
            config.delete_label = label;
        }
        if let Ok(label) = std::env::var("NOTIFY_EDIT_LABEL") {
            config.edit_label = label;
        }
        config
    }

    pub fn channel(&self) -> NotificationChannel {
        NotificationChannel {
            id: format!("{}.general", self.package_name),
            name: self.channel_name.clone(),
            importance: self.channel_importance,
        }
    }

    pub fn effective_small_icon(&self) -> IconId {
        if self.small_icon.is_set() {
            self.small_icon
        } else {
            self.default_icon
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            package_name: "local.notifications".to_string(),
            channel_name: "General".to_string(),
            channel_importance: Importance::Default,
            small_icon: IconId(0),
            default_icon: IconId(1),
            image_slot: 4,
            icon_fetch_timeout: Duration::from_secs(10),
            delete_label: "Delete".to_string(),
            edit_label: "Edit".to_string(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable setting");
            None
        }
    }
}
