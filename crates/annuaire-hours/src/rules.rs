//! Normalized per-day rules derived from either schedule shape.

use annuaire_core::{DayHours, Schedule};

use crate::text::parse_text;
use crate::weekday::{from_key, index};

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// What a schedule says about one day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRule {
    Closed,
    /// Minutes since midnight. `close <= open` means the window runs past
    /// midnight into the next day.
    Open { open: u16, close: u16 },
}

impl DayRule {
    #[must_use]
    pub fn spans_midnight(self) -> bool {
        matches!(self, DayRule::Open { open, close } if close <= open)
    }
}

/// Per-day rules, Monday-first. `None` means the schedule says nothing
/// usable about that day.
pub type WeekRules = [Option<DayRule>; 7];

/// Parses `"HH:MM"`, `"H:MM"`, `"8h"`, `"8h30"` into minutes since midnight.
/// `"24:00"` is accepted as end-of-day.
#[must_use]
pub fn parse_clock(raw: &str) -> Option<u16> {
    let raw = raw.trim().to_ascii_lowercase();
    let (hours, minutes) = match raw.split_once([':', 'h']) {
        Some((h, m)) => (h.trim(), m.trim()),
        None => (raw.as_str(), ""),
    };
    clock_minutes(hours, (!minutes.is_empty()).then_some(minutes))
}

/// Builds minutes since midnight from already-split hour and minute digits.
pub(crate) fn clock_minutes(hours: &str, minutes: Option<&str>) -> Option<u16> {
    if hours.is_empty() || hours.len() > 2 || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let h: u16 = hours.parse().ok()?;
    let m: u16 = match minutes {
        Some(m) if m.len() == 2 && m.bytes().all(|b| b.is_ascii_digit()) => m.parse().ok()?,
        Some(_) => return None,
        None => 0,
    };
    let total = h * 60 + m;
    (m < 60 && total <= MINUTES_PER_DAY).then_some(total)
}

/// Formats minutes since midnight as `"HH:MM"`.
#[must_use]
pub fn format_clock(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Derives the rule for one structured-map entry.
#[must_use]
pub fn structured_rule(entry: &DayHours) -> Option<DayRule> {
    if entry.closed {
        return Some(DayRule::Closed);
    }
    let open = parse_clock(entry.open.as_deref()?)?;
    let close = parse_clock(entry.close.as_deref()?)?;
    Some(DayRule::Open { open, close })
}

/// Expands any schedule shape into seven day rules.
#[must_use]
pub fn week_rules(schedule: Option<&Schedule>) -> WeekRules {
    match schedule {
        Some(Schedule::Structured(days)) => {
            let mut rules: WeekRules = [None; 7];
            for (key, entry) in days {
                if let Some(day) = from_key(key) {
                    let slot = &mut rules[index(day)];
                    if slot.is_none() {
                        *slot = structured_rule(entry);
                    }
                }
            }
            rules
        }
        Some(Schedule::Text(text)) => parse_text(text),
        Some(Schedule::Unsupported(_)) | None => [None; 7],
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn parse_clock_formats() {
        assert_eq!(parse_clock("08:00"), Some(480));
        assert_eq!(parse_clock("8:30"), Some(510));
        assert_eq!(parse_clock("18h"), Some(1080));
        assert_eq!(parse_clock("7h45"), Some(465));
        assert_eq!(parse_clock("24:00"), Some(1440));
        assert_eq!(parse_clock(" 9 "), Some(540));
    }

    #[test]
    fn parse_clock_rejects_garbage() {
        assert_eq!(parse_clock(""), None);
        assert_eq!(parse_clock("25:00"), None);
        assert_eq!(parse_clock("24:30"), None);
        assert_eq!(parse_clock("08:75"), None);
        assert_eq!(parse_clock("8:5"), None);
        assert_eq!(parse_clock("midi"), None);
    }

    #[test]
    fn format_clock_pads() {
        assert_eq!(format_clock(480), "08:00");
        assert_eq!(format_clock(1439), "23:59");
    }

    #[test]
    fn closed_flag_wins_over_times() {
        let entry = DayHours {
            open: Some("08:00".into()),
            close: Some("18:00".into()),
            closed: true,
        };
        assert_eq!(structured_rule(&entry), Some(DayRule::Closed));
    }

    #[test]
    fn missing_times_yield_no_rule() {
        let entry = DayHours {
            open: Some("08:00".into()),
            close: None,
            closed: false,
        };
        assert_eq!(structured_rule(&entry), None);
    }

    #[test]
    fn structured_keys_map_to_weekdays() {
        let mut days = BTreeMap::new();
        days.insert("Lundi".to_string(), DayHours::window("08:00", "18:00"));
        days.insert("sunday".to_string(), DayHours::closed());
        days.insert("holiday".to_string(), DayHours::closed());
        let rules = week_rules(Some(&Schedule::Structured(days)));
        assert_eq!(rules[0], Some(DayRule::Open { open: 480, close: 1080 }));
        assert_eq!(rules[6], Some(DayRule::Closed));
        assert!(rules[1..6].iter().all(Option::is_none));
    }

    #[test]
    fn unsupported_and_missing_yield_nothing() {
        let unsupported = Schedule::Unsupported(serde_json::json!(42));
        assert_eq!(week_rules(Some(&unsupported)), [None; 7]);
        assert_eq!(week_rules(None), [None; 7]);
    }

    #[test]
    fn overnight_windows_are_detected() {
        assert!(DayRule::Open { open: 1200, close: 120 }.spans_midnight());
        assert!(!DayRule::Open { open: 480, close: 1080 }.spans_midnight());
        assert!(!DayRule::Closed.spans_midnight());
    }
}
