use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use notify_core::{FixedClock, InMemoryPlatform, NotificationScheduler};
use notify_domain::{next_occurrence, AlarmKey, NotificationRequest, RepeatPolicy};

fn morning() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, 7)
        .expect("valid date")
        .and_hms_opt(9, 0, 0)
        .expect("valid time")
}

fn millis(wall: NaiveDateTime) -> i64 {
    wall.and_utc().timestamp_millis()
}

fn scheduler_at(now: NaiveDateTime) -> (Arc<InMemoryPlatform>, NotificationScheduler) {
    let platform = Arc::new(InMemoryPlatform::new());
    let scheduler = NotificationScheduler::builder(platform.clone())
        .with_clock(Arc::new(FixedClock::utc(now)))
        .build();
    (platform, scheduler)
}

#[test]
fn rescheduling_same_id_keeps_only_latest_alarm() {
    let (platform, scheduler) = scheduler_at(morning());
    let first = morning() + chrono::TimeDelta::hours(4);
    let second = morning() + chrono::TimeDelta::hours(2);

    scheduler
        .show_at(&NotificationRequest::new("Call Mom", "first").with_id(7).at(first))
        .expect("arm first");
    scheduler
        .show_at(&NotificationRequest::new("Call Mom", "second").with_id(7).at(second))
        .expect("arm second");
    scheduler
        .show_at(&NotificationRequest::new("Pay rent", "other slot").with_id(8).at(first))
        .expect("arm other id");

    let pending = platform
        .pending_alarm(&AlarmKey::for_id(7))
        .expect("alarm for id 7");
    assert_eq!(pending.trigger_at_millis, millis(second));
    assert_eq!(pending.decode().expect("decode").body, "second");
    assert_eq!(platform.pending_alarms().len(), 2);
}

#[tokio::test]
async fn cancel_after_show_at_leaves_nothing_behind() {
    let (platform, scheduler) = scheduler_at(morning());
    let later = morning() + chrono::TimeDelta::minutes(30);

    scheduler
        .show_now(&NotificationRequest::new("Visible", "now").with_id(3))
        .await
        .expect("show now");
    scheduler
        .show_at(&NotificationRequest::new("Later", "soon").with_id(3).at(later))
        .expect("arm");

    scheduler.cancel(3).expect("cancel");

    assert!(platform.displayed(3).is_none());
    assert!(platform.pending_alarms().is_empty());
    assert!(platform.take_due(millis(later) + 1).is_empty());
}

#[tokio::test]
async fn fired_repeating_alarm_rearms_following_occurrence() {
    let (platform, scheduler) = scheduler_at(morning());
    let request = NotificationRequest::new("Weekly review", "Sunday planning")
        .with_id(21)
        .with_repeat(RepeatPolicy::Weekly)
        .with_payload(["review", "org", "", "", ""])
        .at(morning());

    let submitted = scheduler
        .submit(&request)
        .await
        .expect("submit")
        .expect("deferred request arms an alarm");
    assert_eq!(submitted.trigger_at_millis, millis(morning()));

    let due = platform.take_due(millis(morning()));
    assert_eq!(due.len(), 1);
    let delivered = due[0].decode().expect("decode").into_request();
    assert_eq!(delivered, request);

    let immediate = NotificationRequest {
        fire_time: None,
        ..delivered
    };
    let rearmed = scheduler
        .submit(&immediate)
        .await
        .expect("show delivered notification")
        .expect("weekly repeat re-arms");

    let next = next_occurrence(morning(), RepeatPolicy::Weekly);
    assert_eq!(rearmed.trigger_at_millis, millis(next));
    assert_eq!(platform.pending_alarms(), vec![rearmed]);
    assert_eq!(
        platform.displayed(21).expect("displayed").body,
        "Sunday planning"
    );
}
