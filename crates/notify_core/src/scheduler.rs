use std::sync::Arc;

use notify_domain::{
    alarm::{AlarmKey, DeferredNotification, ScheduledAlarm},
    error::{NotifyError, Result},
    notifications::{
        ActionDispatch, ActionType, BuiltNotification, LargeIcon, NotificationAction,
        NotificationPlatform, PendingAction,
    },
    repeat::next_occurrence,
    request::NotificationRequest,
};
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

use crate::{
    clock::{Clock, SystemClock},
    config::SchedulerConfig,
    icon::{self, HttpIconSource, IconError, IconSource},
};

/// Shows notifications now or arms alarms to show them later, re-arming
/// repeating ones each time they are displayed.
pub struct NotificationScheduler {
    platform: Arc<dyn NotificationPlatform>,
    icons: Arc<dyn IconSource>,
    clock: Arc<dyn Clock>,
    config: SchedulerConfig,
    /// Held across channel creation so concurrent posts create it once.
    channel_ready: Mutex<bool>,
}

pub struct NotificationSchedulerBuilder {
    platform: Arc<dyn NotificationPlatform>,
    icons: Option<Arc<dyn IconSource>>,
    clock: Option<Arc<dyn Clock>>,
    config: SchedulerConfig,
}

impl NotificationSchedulerBuilder {
    pub fn new(platform: Arc<dyn NotificationPlatform>) -> Self {
        Self {
            platform,
            icons: None,
            clock: None,
            config: SchedulerConfig::default(),
        }
    }

    pub fn with_icon_source(mut self, icons: Arc<dyn IconSource>) -> Self {
        self.icons = Some(icons);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> NotificationScheduler {
        NotificationScheduler {
            platform: self.platform,
            icons: self
                .icons
                .unwrap_or_else(|| Arc::new(HttpIconSource::new())),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            config: self.config,
            channel_ready: Mutex::new(false),
        }
    }
}

impl NotificationScheduler {
    pub fn builder(platform: Arc<dyn NotificationPlatform>) -> NotificationSchedulerBuilder {
        NotificationSchedulerBuilder::new(platform)
    }

    /// Shows `request` at its fire time, or right away when it has none.
    pub async fn submit(&self, request: &NotificationRequest) -> Result<Option<ScheduledAlarm>> {
        if request.fire_time.is_some() {
            self.show_at(request).map(Some)
        } else {
            self.show_now(request).await
        }
    }

    /// Displays the notification immediately. A repeating request also arms
    /// its next occurrence, which is returned. The next alarm is prepared
    /// before anything is posted, and a next occurrence that falls into a DST
    /// gap fires just past it.
    #[instrument(skip(self, request), fields(id = request.id, repeat = ?request.repeat))]
    pub async fn show_now(&self, request: &NotificationRequest) -> Result<Option<ScheduledAlarm>> {
        let rearm = self.next_alarm(request)?;
        let large_icon = self.load_large_icon(request).await;
        let channel_id = self.ensure_channel()?;
        let notification = self.build_notification(request, channel_id, large_icon);

        self.platform.post(request.id, &notification)?;
        debug!("notification posted");

        if let Some(alarm) = &rearm {
            self.platform.arm_alarm(alarm)?;
            debug!(trigger_at = alarm.trigger_at_millis, key = %alarm.key, "next occurrence armed");
        }
        Ok(rearm)
    }

    /// Serializes the request and arms a one-shot alarm for its fire time,
    /// replacing whatever was pending for the same id.
    #[instrument(skip(self, request), fields(id = request.id))]
    pub fn show_at(&self, request: &NotificationRequest) -> Result<ScheduledAlarm> {
        let fire_time = request
            .fire_time
            .ok_or(NotifyError::MissingFireTime(request.id))?;
        let trigger_at = self.clock.to_epoch_millis(fire_time)?;
        let alarm = self.deferred_alarm(request, fire_time, trigger_at)?;

        self.platform.arm_alarm(&alarm)?;
        debug!(%fire_time, trigger_at, key = %alarm.key, "alarm armed");
        Ok(alarm)
    }

    /// Drops the pending alarm and the displayed notification for `id`.
    #[instrument(skip(self))]
    pub fn cancel(&self, id: i32) -> Result<()> {
        self.platform.cancel_alarm(&AlarmKey::for_id(id))?;
        self.platform.cancel_notification(id)?;
        Ok(())
    }
}

impl NotificationScheduler {
    fn next_alarm(&self, request: &NotificationRequest) -> Result<Option<ScheduledAlarm>> {
        if !request.repeat.is_repeating() {
            return Ok(None);
        }
        let next = next_occurrence(self.clock.now(), request.repeat);
        let trigger_at = self.clock.to_epoch_millis_past_gap(next)?;
        self.deferred_alarm(request, next, trigger_at).map(Some)
    }

    fn deferred_alarm(
        &self,
        request: &NotificationRequest,
        fire_time: NaiveDateTime,
        trigger_at: i64,
    ) -> Result<ScheduledAlarm> {
        let deferred =
            DeferredNotification::from_request(request, fire_time, self.config.effective_small_icon());
        ScheduledAlarm::new(&deferred, trigger_at)
    }

    fn ensure_channel(&self) -> Result<Option<String>> {
        if !self.platform.supports_channels() {
            return Ok(None);
        }
        let channel = self.config.channel();
        let mut ready = self.channel_ready.lock();
        if !*ready {
            self.platform.create_channel(&channel)?;
            *ready = true;
            debug!(channel = %channel.id, "notification channel created");
        }
        Ok(Some(channel.id))
    }

    async fn load_large_icon(&self, request: &NotificationRequest) -> Option<LargeIcon> {
        let url = icon::icon_url(request.payload_entry(self.config.image_slot))?;
        let timeout = self.config.icon_fetch_timeout;
        let fetched = match tokio::time::timeout(timeout, self.icons.fetch(&url)).await {
            Ok(result) => result,
            Err(_) => Err(IconError::Timeout(timeout)),
        };
        match fetched {
            Ok(icon) => Some(icon),
            Err(err) => {
                warn!(%url, %err, "large icon unavailable, using default icon");
                None
            }
        }
    }

    fn build_notification(
        &self,
        request: &NotificationRequest,
        channel_id: Option<String>,
        large_icon: Option<LargeIcon>,
    ) -> BuiltNotification {
        let icon = self.config.effective_small_icon();
        let action = |offset: i32, action_type: ActionType| PendingAction {
            request_code: request.id.wrapping_add(offset),
            dispatch: ActionDispatch {
                id: request.id,
                action_type,
                payload: request.payload.clone(),
            },
            one_shot: true,
        };

        BuiltNotification {
            title: request.title.clone(),
            body: request.body.clone(),
            channel_id,
            small_icon: icon,
            large_icon,
            content_action: action(0, ActionType::ShowWeb),
            actions: vec![
                NotificationAction {
                    label: self.config.delete_label.clone(),
                    icon,
                    pending: action(2, ActionType::Delete),
                },
                NotificationAction {
                    label: self.config.edit_label.clone(),
                    icon,
                    pending: action(1, ActionType::Edit),
                },
            ],
            auto_cancel: true,
        }
    }
}
