use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    notifications::IconId,
    repeat::RepeatPolicy,
    request::NotificationRequest,
};

const ALARM_KEY_PREFIX: &str = "local-notification:";

/// Identity of a pending alarm. Arming an alarm whose key is already armed
/// replaces it, which is what keeps one pending alarm per notification id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlarmKey(String);

impl AlarmKey {
    pub fn for_id(id: i32) -> Self {
        Self(format!("{ALARM_KEY_PREFIX}{id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn notification_id(&self) -> Option<i32> {
        self.0.strip_prefix(ALARM_KEY_PREFIX)?.parse().ok()
    }
}

impl fmt::Display for AlarmKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The record handed to the alarm service and read back by whatever delivers
/// the alarm once it fires.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeferredNotification {
    pub title: String,
    pub body: String,
    pub id: i32,
    pub fire_time: NaiveDateTime,
    pub repeat: RepeatPolicy,
    pub icon_id: IconId,
    pub payload: Vec<String>,
}

impl DeferredNotification {
    pub fn from_request(request: &NotificationRequest, fire_time: NaiveDateTime, icon_id: IconId) -> Self {
        Self {
            title: request.title.clone(),
            body: request.body.clone(),
            id: request.id,
            fire_time,
            repeat: request.repeat,
            icon_id,
            payload: request.payload.clone(),
        }
    }

    pub fn into_request(self) -> NotificationRequest {
        NotificationRequest {
            title: self.title,
            body: self.body,
            id: self.id,
            fire_time: Some(self.fire_time),
            repeat: self.repeat,
            payload: self.payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledAlarm {
    pub key: AlarmKey,
    pub trigger_at_millis: i64,
    pub payload: String,
}

impl ScheduledAlarm {
    pub fn new(deferred: &DeferredNotification, trigger_at_millis: i64) -> Result<Self> {
        Ok(Self {
            key: AlarmKey::for_id(deferred.id),
            trigger_at_millis,
            payload: serde_json::to_string(deferred)?,
        })
    }

    pub fn decode(&self) -> Result<DeferredNotification> {
        Ok(serde_json::from_str(&self.payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn alarm_key_carries_notification_id() {
        let key = AlarmKey::for_id(-17);
        assert_eq!(key.notification_id(), Some(-17));
        assert_ne!(key, AlarmKey::for_id(17));
    }

    #[test]
    fn armed_payload_restores_request() {
        let fire_time = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(7, 15, 0)
            .unwrap();
        let request = NotificationRequest::new("Water plants", "Balcony first")
            .with_id(12)
            .with_repeat(RepeatPolicy::Weekly)
            .with_payload(["a", "b", "", "d", "https://example.com/fern.png"])
            .at(fire_time);

        let deferred = DeferredNotification::from_request(&request, fire_time, IconId(3));
        let alarm = ScheduledAlarm::new(&deferred, 1_748_762_100_000).unwrap();
        assert_eq!(alarm.key, AlarmKey::for_id(12));

        let decoded = alarm.decode().unwrap();
        assert_eq!(decoded.icon_id, IconId(3));
        assert_eq!(decoded.into_request(), request);
    }
}
