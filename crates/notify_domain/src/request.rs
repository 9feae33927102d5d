use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::repeat::RepeatPolicy;

/// A notification the caller wants shown, now or at `fire_time`.
///
/// `id` names the schedule slot: a later request with the same id supersedes
/// whatever is pending for it. `payload` is opaque here and travels unchanged
/// into every action dispatched back to the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub id: i32,
    pub fire_time: Option<NaiveDateTime>,
    pub repeat: RepeatPolicy,
    pub payload: Vec<String>,
}

impl NotificationRequest {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn with_repeat(mut self, repeat: RepeatPolicy) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_payload<I, S>(mut self, payload: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.payload = payload.into_iter().map(Into::into).collect();
        self
    }

    pub fn at(mut self, fire_time: NaiveDateTime) -> Self {
        self.fire_time = Some(fire_time);
        self
    }

    /// Payload entry at `slot`, ignoring blanks.
    pub fn payload_entry(&self, slot: usize) -> Option<&str> {
        self.payload
            .get(slot)
            .map(|entry| entry.trim())
            .filter(|entry| !entry.is_empty())
    }
}
