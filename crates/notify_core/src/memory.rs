use std::collections::HashMap;

use notify_domain::{
    alarm::{AlarmKey, ScheduledAlarm},
    error::PlatformError,
    notifications::{BuiltNotification, NotificationChannel, NotificationPlatform},
};
use parking_lot::Mutex;

/// Platform that keeps everything in memory. Backs the tests and the desktop
/// demo, where there is no OS alarm service to hand alarms to.
#[derive(Debug)]
pub struct InMemoryPlatform {
    supports_channels: bool,
    state: Mutex<PlatformState>,
}

#[derive(Debug, Default)]
struct PlatformState {
    unavailable: bool,
    channel_creations: usize,
    channels: HashMap<String, NotificationChannel>,
    displayed: HashMap<i32, BuiltNotification>,
    alarms: HashMap<AlarmKey, ScheduledAlarm>,
}

impl InMemoryPlatform {
    pub fn new() -> Self {
        Self {
            supports_channels: true,
            state: Mutex::new(PlatformState::default()),
        }
    }

    /// Behaves like an OS release that predates notification channels.
    pub fn without_channels() -> Self {
        Self {
            supports_channels: false,
            ..Self::new()
        }
    }

    /// Makes every subsequent service call fail with `Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().unavailable = unavailable;
    }

    pub fn channels(&self) -> Vec<NotificationChannel> {
        self.state.lock().channels.values().cloned().collect()
    }

    pub fn channel_creations(&self) -> usize {
        self.state.lock().channel_creations
    }

    pub fn displayed(&self, id: i32) -> Option<BuiltNotification> {
        self.state.lock().displayed.get(&id).cloned()
    }

    pub fn displayed_count(&self) -> usize {
        self.state.lock().displayed.len()
    }

    pub fn pending_alarms(&self) -> Vec<ScheduledAlarm> {
        let mut alarms: Vec<ScheduledAlarm> = self.state.lock().alarms.values().cloned().collect();
        alarms.sort_by(|a, b| {
            a.trigger_at_millis
                .cmp(&b.trigger_at_millis)
                .then_with(|| a.key.as_str().cmp(b.key.as_str()))
        });
        alarms
    }

    pub fn pending_alarm(&self, key: &AlarmKey) -> Option<ScheduledAlarm> {
        self.state.lock().alarms.get(key).cloned()
    }

    /// Removes and returns every alarm due at `now_millis`, earliest first.
    pub fn take_due(&self, now_millis: i64) -> Vec<ScheduledAlarm> {
        let mut state = self.state.lock();
        let due_keys: Vec<AlarmKey> = state
            .alarms
            .iter()
            .filter(|(_, alarm)| alarm.trigger_at_millis <= now_millis)
            .map(|(key, _)| key.clone())
            .collect();
        let mut due: Vec<ScheduledAlarm> = due_keys
            .iter()
            .filter_map(|key| state.alarms.remove(key))
            .collect();
        due.sort_by_key(|alarm| alarm.trigger_at_millis);
        due
    }

    fn check(&self, state: &PlatformState, service: &'static str) -> Result<(), PlatformError> {
        if state.unavailable {
            return Err(PlatformError::Unavailable { service });
        }
        Ok(())
    }
}

impl Default for InMemoryPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationPlatform for InMemoryPlatform {
    fn supports_channels(&self) -> bool {
        self.supports_channels
    }

    fn create_channel(&self, channel: &NotificationChannel) -> Result<(), PlatformError> {
        let mut state = self.state.lock();
        self.check(&state, "notification")?;
        state.channel_creations += 1;
        state.channels.insert(channel.id.clone(), channel.clone());
        Ok(())
    }

    fn post(&self, id: i32, notification: &BuiltNotification) -> Result<(), PlatformError> {
        let mut state = self.state.lock();
        self.check(&state, "notification")?;
        if let Some(channel_id) = &notification.channel_id {
            if !state.channels.contains_key(channel_id) {
                return Err(PlatformError::Rejected {
                    service: "notification",
                    reason: format!("unknown channel `{channel_id}`"),
                });
            }
        }
        state.displayed.insert(id, notification.clone());
        Ok(())
    }

    fn cancel_notification(&self, id: i32) -> Result<(), PlatformError> {
        let mut state = self.state.lock();
        self.check(&state, "notification")?;
        state.displayed.remove(&id);
        Ok(())
    }

    fn arm_alarm(&self, alarm: &ScheduledAlarm) -> Result<(), PlatformError> {
        let mut state = self.state.lock();
        self.check(&state, "alarm")?;
        state.alarms.insert(alarm.key.clone(), alarm.clone());
        Ok(())
    }

    fn cancel_alarm(&self, key: &AlarmKey) -> Result<(), PlatformError> {
        let mut state = self.state.lock();
        self.check(&state, "alarm")?;
        state.alarms.remove(key);
        Ok(())
    }
}
