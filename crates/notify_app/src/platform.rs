use notify_core::InMemoryPlatform;
use notify_domain::{
    alarm::{AlarmKey, ScheduledAlarm},
    error::PlatformError,
    notifications::{BuiltNotification, NotificationChannel, NotificationPlatform},
};
use tracing::info;

/// Desktop stand-in for the OS services: records everything in memory and
/// traces each call.
#[derive(Debug, Default)]
pub struct TracingPlatform {
    inner: InMemoryPlatform,
}

impl TracingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_alarms(&self) -> Vec<ScheduledAlarm> {
        self.inner.pending_alarms()
    }

    pub fn displayed_count(&self) -> usize {
        self.inner.displayed_count()
    }
}

impl NotificationPlatform for TracingPlatform {
    fn supports_channels(&self) -> bool {
        self.inner.supports_channels()
    }

    fn create_channel(&self, channel: &NotificationChannel) -> Result<(), PlatformError> {
        info!(id = %channel.id, name = %channel.name, importance = ?channel.importance, "create channel");
        self.inner.create_channel(channel)
    }

    fn post(&self, id: i32, notification: &BuiltNotification) -> Result<(), PlatformError> {
        let actions: Vec<&str> = notification
            .actions
            .iter()
            .map(|action| action.label.as_str())
            .collect();
        info!(
            id,
            title = %notification.title,
            body = %notification.body,
            channel = ?notification.channel_id,
            large_icon = notification.large_icon.is_some(),
            ?actions,
            "post notification"
        );
        self.inner.post(id, notification)
    }

    fn cancel_notification(&self, id: i32) -> Result<(), PlatformError> {
        info!(id, "cancel notification");
        self.inner.cancel_notification(id)
    }

    fn arm_alarm(&self, alarm: &ScheduledAlarm) -> Result<(), PlatformError> {
        info!(
            key = %alarm.key,
            id = ?alarm.key.notification_id(),
            trigger_at = alarm.trigger_at_millis,
            "arm alarm"
        );
        self.inner.arm_alarm(alarm)
    }

    fn cancel_alarm(&self, key: &AlarmKey) -> Result<(), PlatformError> {
        info!(%key, id = ?key.notification_id(), "cancel alarm");
        self.inner.cancel_alarm(key)
    }
}
