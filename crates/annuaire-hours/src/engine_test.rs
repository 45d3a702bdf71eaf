use std::collections::BTreeMap;

use annuaire_core::DayHours;
use chrono::{NaiveDate, TimeZone};

use super::*;

/// 2026-10-12 is a Monday; `day` 0..=6 walks Monday to Sunday.
fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 12 + day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap()
}

const MONDAY: u32 = 0;
const WEDNESDAY: u32 = 2;
const SUNDAY: u32 = 6;

fn structured_today(entry: DayHours) -> Schedule {
    let mut days = BTreeMap::new();
    days.insert("lundi".to_string(), entry);
    Schedule::Structured(days)
}

#[test]
fn structured_open_during_window() {
    let schedule = structured_today(DayHours::window("08:00", "18:00"));
    let result = status(Some(&schedule), at(MONDAY, 9, 0));
    assert_eq!(result.status, OpenState::Open);
    assert_eq!(result.message, "Ouvert · ferme à 18:00");
    assert_eq!(result.color, StatusColor::Green);
}

#[test]
fn structured_closing_soon_near_close() {
    let schedule = structured_today(DayHours::window("08:00", "18:00"));
    let result = status(Some(&schedule), at(MONDAY, 17, 45));
    assert_eq!(result.status, OpenState::ClosingSoon);
    assert_eq!(result.message, "Ferme bientôt · à 18:00");
    assert_eq!(result.color, StatusColor::Orange);
}

#[test]
fn closing_soon_threshold_is_inclusive_at_thirty_minutes() {
    let schedule = structured_today(DayHours::window("08:00", "18:00"));
    assert_eq!(
        status(Some(&schedule), at(MONDAY, 17, 30)).status,
        OpenState::ClosingSoon
    );
    assert_eq!(
        status(Some(&schedule), at(MONDAY, 17, 29)).status,
        OpenState::Open
    );
}

#[test]
fn structured_closed_after_hours() {
    let schedule = structured_today(DayHours::window("08:00", "18:00"));
    let result = status(Some(&schedule), at(MONDAY, 19, 0));
    assert_eq!(result.status, OpenState::Closed);
    assert_eq!(result.message, "Fermé");
    assert_eq!(result.color, StatusColor::Red);

    let at_close = status(Some(&schedule), at(MONDAY, 18, 0));
    assert_eq!(at_close.status, OpenState::Closed);
}

#[test]
fn structured_closed_before_opening_says_when() {
    let schedule = structured_today(DayHours::window("08:00", "18:00"));
    let result = status(Some(&schedule), at(MONDAY, 7, 15));
    assert_eq!(result.status, OpenState::Closed);
    assert_eq!(result.message, "Fermé · ouvre à 08:00");
}

#[test]
fn closed_flag_is_closed_at_any_time() {
    let schedule = structured_today(DayHours {
        open: Some("08:00".into()),
        close: Some("18:00".into()),
        closed: true,
    });
    for hour in [0, 9, 12, 17, 23] {
        let result = status(Some(&schedule), at(MONDAY, hour, 0));
        assert_eq!(result.status, OpenState::Closed);
        assert_eq!(result.message, MSG_CLOSED_TODAY);
    }
}

#[test]
fn structured_missing_times_is_unknown() {
    let schedule = structured_today(DayHours {
        open: Some("08:00".into()),
        close: None,
        closed: false,
    });
    let result = status(Some(&schedule), at(MONDAY, 9, 0));
    assert_eq!(result.status, OpenState::Unknown);
    assert_eq!(result.message, MSG_UNKNOWN);
    assert_eq!(result.color, StatusColor::Gray);
}

#[test]
fn structured_without_entry_for_today_is_unknown() {
    let schedule = structured_today(DayHours::window("08:00", "18:00"));
    assert_eq!(
        status(Some(&schedule), at(WEDNESDAY, 10, 0)).status,
        OpenState::Unknown
    );
}

#[test]
fn text_range_open_midweek() {
    let schedule = Schedule::from("Lun-Ven: 8h-18h");
    assert_eq!(
        status(Some(&schedule), at(WEDNESDAY, 10, 0)).status,
        OpenState::Open
    );
}

#[test]
fn text_range_unknown_on_sunday() {
    let schedule = Schedule::from("Lun-Ven: 8h-18h");
    let result = status(Some(&schedule), at(SUNDAY, 10, 0));
    assert_eq!(result.status, OpenState::Unknown);
}

#[test]
fn text_explicit_closure_is_closed() {
    let schedule = Schedule::from("Lun-Sam: 11h-23h, Dim: Fermé");
    assert_eq!(
        status(Some(&schedule), at(SUNDAY, 12, 0)).status,
        OpenState::Closed
    );
}

#[test]
fn text_whole_week_window() {
    let schedule = Schedule::from("7h-21h");
    assert_eq!(status(Some(&schedule), at(SUNDAY, 20, 40)).status, OpenState::ClosingSoon);
}

#[test]
fn round_the_clock_never_closes() {
    let schedule = Schedule::from("Ouvert 24h/24");
    let result = status(Some(&schedule), at(WEDNESDAY, 23, 50));
    assert_eq!(result.status, OpenState::Open);
    assert_eq!(result.message, MSG_ROUND_THE_CLOCK);
}

#[test]
fn overnight_window_stays_open_past_midnight() {
    let schedule = Schedule::from("Lun-Sam: 18h-2h");
    assert_eq!(
        status(Some(&schedule), at(MONDAY, 23, 0)).status,
        OpenState::Open
    );
    // Tuesday 01:45 still belongs to Monday's window.
    let result = status(Some(&schedule), at(MONDAY + 1, 1, 45));
    assert_eq!(result.status, OpenState::ClosingSoon);
    assert_eq!(result.message, "Ferme bientôt · à 02:00");
    assert_eq!(
        status(Some(&schedule), at(MONDAY + 1, 3, 0)).status,
        OpenState::Closed
    );
}

#[test]
fn missing_empty_and_unsupported_are_unknown() {
    let now = at(MONDAY, 10, 0);
    assert_eq!(status(None, now).status, OpenState::Unknown);
    assert_eq!(status(Some(&Schedule::from("")), now).status, OpenState::Unknown);
    assert_eq!(
        status(Some(&Schedule::Structured(BTreeMap::new())), now).status,
        OpenState::Unknown
    );
    let unsupported = Schedule::Unsupported(serde_json::json!(true));
    assert_eq!(status(Some(&unsupported), now).status, OpenState::Unknown);
}

#[test]
fn expand_always_returns_seven_days_monday_first() {
    let schedules = [
        None,
        Some(Schedule::from("Lun-Ven: 8h-18h")),
        Some(Schedule::from("n'importe quoi")),
        Some(Schedule::Unsupported(serde_json::json!([1, 2, 3]))),
        Some(structured_today(DayHours::closed())),
    ];
    for schedule in &schedules {
        let week = expand(schedule.as_ref());
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].day, Weekday::Mon);
        assert_eq!(week[6].day, Weekday::Sun);
    }
}

#[test]
fn expand_renders_closed_missing_and_windows() {
    let mut days = BTreeMap::new();
    days.insert("lundi".to_string(), DayHours::window("08:00", "18:00"));
    days.insert(
        "mardi".to_string(),
        DayHours {
            open: Some("08:00".into()),
            close: Some("18:00".into()),
            closed: true,
        },
    );
    let week = expand(Some(&Schedule::Structured(days)));

    assert_eq!(week[0].display(), "08:00 - 18:00");
    assert_eq!(week[0].label(), "Lundi");
    assert!(week[1].closed);
    assert_eq!(week[1].display(), LABEL_CLOSED);
    assert!(!week[2].closed);
    assert_eq!(week[2].display(), LABEL_MISSING);
}

#[test]
fn expand_text_schedule_normalizes_times() {
    let week = expand(Some(&Schedule::from("Lun-Ven: 8h-18h30, Sam: 9h-13h")));
    assert_eq!(week[0].open.as_deref(), Some("08:00"));
    assert_eq!(week[4].close.as_deref(), Some("18:30"));
    assert_eq!(week[5].display(), "09:00 - 13:00");
    assert_eq!(week[6].display(), LABEL_MISSING);
}

#[test]
fn live_status_serializes_for_ui() {
    let schedule = structured_today(DayHours::window("08:00", "18:00"));
    let json = serde_json::to_value(status(Some(&schedule), at(MONDAY, 17, 45))).unwrap();
    assert_eq!(json["status"], "closing-soon");
    assert_eq!(json["color"], "orange");
}

#[test]
fn local_time_applies_offset() {
    let utc = Utc.with_ymd_and_hms(2026, 10, 12, 23, 30, 0).unwrap();
    assert_eq!(local_time(utc, 0), at(MONDAY, 23, 30));
    assert_eq!(local_time(utc, 60), at(MONDAY + 1, 0, 30));
    assert_eq!(local_time(utc, 100_000), at(MONDAY, 23, 30));
}
