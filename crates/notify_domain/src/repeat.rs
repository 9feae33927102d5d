use chrono::{Days, Months, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Recurrence rule applied when a fired notification re-arms itself.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RepeatPolicy {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    EveryTwentySeconds,
}

impl RepeatPolicy {
    /// Maps the legacy integer codes `0..=5`. Anything else is non-repeating.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => RepeatPolicy::Daily,
            2 => RepeatPolicy::Weekly,
            3 => RepeatPolicy::Monthly,
            4 => RepeatPolicy::Yearly,
            5 => RepeatPolicy::EveryTwentySeconds,
            _ => RepeatPolicy::None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            RepeatPolicy::None => 0,
            RepeatPolicy::Daily => 1,
            RepeatPolicy::Weekly => 2,
            RepeatPolicy::Monthly => 3,
            RepeatPolicy::Yearly => 4,
            RepeatPolicy::EveryTwentySeconds => 5,
        }
    }

    pub fn is_repeating(self) -> bool {
        self != RepeatPolicy::None
    }

    /// Advances `time` by one period. `None` for non-repeating policies or on overflow.
    pub fn advance(self, time: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            RepeatPolicy::None => None,
            RepeatPolicy::Daily => time.checked_add_days(Days::new(1)),
            RepeatPolicy::Weekly => time.checked_add_days(Days::new(7)),
            RepeatPolicy::Monthly => time.checked_add_months(Months::new(1)),
            RepeatPolicy::Yearly => time.checked_add_months(Months::new(12)),
            RepeatPolicy::EveryTwentySeconds => time.checked_add_signed(TimeDelta::seconds(20)),
        }
    }

    /// Parses the names accepted on the command line and in config files.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        if let Ok(code) = normalized.parse::<i32>() {
            return Some(Self::from_code(code));
        }
        match normalized.as_str() {
            "none" | "never" => Some(RepeatPolicy::None),
            "daily" | "day" => Some(RepeatPolicy::Daily),
            "weekly" | "week" => Some(RepeatPolicy::Weekly),
            "monthly" | "month" => Some(RepeatPolicy::Monthly),
            "yearly" | "year" => Some(RepeatPolicy::Yearly),
            "every_twenty_seconds" | "20s" => Some(RepeatPolicy::EveryTwentySeconds),
            _ => None,
        }
    }
}

/// Next fire time for a re-arming notification. Leaves `time` untouched when
/// the policy does not repeat.
pub fn next_occurrence(time: NaiveDateTime, policy: RepeatPolicy) -> NaiveDateTime {
    policy.advance(time).unwrap_or(time)
}
