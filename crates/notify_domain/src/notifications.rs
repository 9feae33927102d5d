use serde::{Deserialize, Serialize};

use crate::{
    alarm::{AlarmKey, ScheduledAlarm},
    error::PlatformError,
};

/// Platform drawable/resource identifier. `0` means "not configured".
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct IconId(pub i32);

impl IconId {
    pub fn is_set(self) -> bool {
        self.0 != 0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionType {
    ShowWeb,
    Edit,
    Delete,
}

/// What the application receives when the user taps the notification or one
/// of its buttons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionDispatch {
    pub id: i32,
    pub action_type: ActionType,
    pub payload: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingAction {
    pub request_code: i32,
    pub dispatch: ActionDispatch,
    pub one_shot: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationAction {
    pub label: String,
    pub icon: IconId,
    pub pending: PendingAction,
}

/// Decoded bitmap attached as the notification's large icon.
#[derive(Clone, PartialEq, Eq)]
pub struct LargeIcon {
    pub source: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for LargeIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LargeIcon")
            .field("source", &self.source)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rgba_len", &self.rgba.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltNotification {
    pub title: String,
    pub body: String,
    pub channel_id: Option<String>,
    pub small_icon: IconId,
    pub large_icon: Option<LargeIcon>,
    pub content_action: PendingAction,
    pub actions: Vec<NotificationAction>,
    pub auto_cancel: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Importance {
    Min,
    Low,
    #[default]
    Default,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationChannel {
    pub id: String,
    pub name: String,
    pub importance: Importance,
}

/// Host notification and alarm services. Each platform backend implements
/// this; the scheduler never talks to the OS any other way.
pub trait NotificationPlatform: Send + Sync {
    /// Whether notifications must be posted to a channel.
    fn supports_channels(&self) -> bool {
        true
    }

    fn create_channel(&self, channel: &NotificationChannel) -> Result<(), PlatformError>;

    fn post(&self, id: i32, notification: &BuiltNotification) -> Result<(), PlatformError>;

    /// Must succeed when nothing with `id` is displayed.
    fn cancel_notification(&self, id: i32) -> Result<(), PlatformError>;

    /// One-shot alarm; replaces any alarm already armed under the same key.
    fn arm_alarm(&self, alarm: &ScheduledAlarm) -> Result<(), PlatformError>;

    /// Must succeed when nothing is armed under `key`.
    fn cancel_alarm(&self, key: &AlarmKey) -> Result<(), PlatformError>;
}
