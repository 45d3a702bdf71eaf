//! Live open/closed status and weekly projection of a schedule.

use annuaire_core::Schedule;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Timelike, Utc, Weekday};
use serde::Serialize;

use crate::rules::{format_clock, week_rules, DayRule, WeekRules, MINUTES_PER_DAY};
use crate::weekday::{french_label, index, WEEK};

/// Minutes before closing at which an open business reports closing soon.
pub const CLOSING_SOON_MINUTES: u16 = 30;

pub const MSG_UNKNOWN: &str = "Horaires non disponibles";
pub const MSG_CLOSED_TODAY: &str = "Fermé aujourd'hui";
pub const MSG_CLOSED: &str = "Fermé";
pub const MSG_ROUND_THE_CLOCK: &str = "Ouvert 24h/24";
pub const LABEL_CLOSED: &str = "Fermé";
pub const LABEL_MISSING: &str = "Horaires non renseignés";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpenState {
    Open,
    ClosingSoon,
    Closed,
    Unknown,
}

impl std::fmt::Display for OpenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenState::Open => write!(f, "open"),
            OpenState::ClosingSoon => write!(f, "closing-soon"),
            OpenState::Closed => write!(f, "closed"),
            OpenState::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Orange,
    Red,
    Gray,
}

impl OpenState {
    #[must_use]
    pub fn color(self) -> StatusColor {
        match self {
            OpenState::Open => StatusColor::Green,
            OpenState::ClosingSoon => StatusColor::Orange,
            OpenState::Closed => StatusColor::Red,
            OpenState::Unknown => StatusColor::Gray,
        }
    }
}

/// The `{status, message, color}` triple shown next to a business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveStatus {
    pub status: OpenState,
    pub message: String,
    pub color: StatusColor,
}

impl LiveStatus {
    fn new(status: OpenState, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            color: status.color(),
        }
    }

    fn unknown() -> Self {
        Self::new(OpenState::Unknown, MSG_UNKNOWN)
    }
}

/// One row of the weekly hours table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    pub day: Weekday,
    /// `"HH:MM"`, absent when closed or unknown.
    pub open: Option<String>,
    pub close: Option<String>,
    pub closed: bool,
}

impl DaySchedule {
    fn from_rule(day: Weekday, rule: Option<DayRule>) -> Self {
        match rule {
            Some(DayRule::Open { open, close }) => Self {
                day,
                open: Some(format_clock(open)),
                close: Some(format_clock(close)),
                closed: false,
            },
            Some(DayRule::Closed) => Self {
                day,
                open: None,
                close: None,
                closed: true,
            },
            None => Self {
                day,
                open: None,
                close: None,
                closed: false,
            },
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        french_label(self.day)
    }

    /// `"08:00 - 18:00"`, `"Fermé"`, or `"Horaires non renseignés"`.
    #[must_use]
    pub fn display(&self) -> String {
        if self.closed {
            return LABEL_CLOSED.to_string();
        }
        match (&self.open, &self.close) {
            (Some(open), Some(close)) => format!("{open} - {close}"),
            _ => LABEL_MISSING.to_string(),
        }
    }
}

/// Projects a schedule onto the seven days of the week, Monday first.
#[must_use]
pub fn expand(schedule: Option<&Schedule>) -> [DaySchedule; 7] {
    let rules = week_rules(schedule);
    WEEK.map(|day| DaySchedule::from_rule(day, rules[index(day)]))
}

/// Live status of `schedule` at local time `now`.
#[must_use]
pub fn status(schedule: Option<&Schedule>, now: NaiveDateTime) -> LiveStatus {
    let rules = week_rules(schedule);
    let result = status_from_rules(&rules, now);
    if result.status == OpenState::Unknown && schedule.is_some_and(|s| !s.is_empty()) {
        tracing::debug!(weekday = %now.weekday(), "schedule has no usable entry for today");
    }
    result
}

fn status_from_rules(rules: &WeekRules, now: NaiveDateTime) -> LiveStatus {
    let today = index(now.weekday());
    let minute = minute_of_day(now);

    // A window opened yesterday may still be running after midnight.
    let yesterday = rules[(today + 6) % 7];
    if let Some(DayRule::Open { open, close }) = yesterday {
        if close <= open && minute < close {
            return open_status(close - minute, close);
        }
    }

    let Some(rule) = rules[today] else {
        return LiveStatus::unknown();
    };

    match rule {
        DayRule::Closed => LiveStatus::new(OpenState::Closed, MSG_CLOSED_TODAY),
        DayRule::Open {
            open: 0,
            close: MINUTES_PER_DAY,
        } if rules[(today + 1) % 7] == Some(rule) => {
            LiveStatus::new(OpenState::Open, MSG_ROUND_THE_CLOCK)
        }
        DayRule::Open { open, close } if close > open => {
            if minute < open {
                closed_until(open)
            } else if minute < close {
                open_status(close - minute, close)
            } else {
                LiveStatus::new(OpenState::Closed, MSG_CLOSED)
            }
        }
        DayRule::Open { open, close } => {
            // Runs past midnight: open from `open` until the day ends.
            if minute >= open {
                open_status(MINUTES_PER_DAY - minute + close, close)
            } else {
                closed_until(open)
            }
        }
    }
}

fn open_status(remaining: u16, close: u16) -> LiveStatus {
    let close = format_clock(close % MINUTES_PER_DAY);
    if remaining <= CLOSING_SOON_MINUTES {
        LiveStatus::new(OpenState::ClosingSoon, format!("Ferme bientôt · à {close}"))
    } else {
        LiveStatus::new(OpenState::Open, format!("Ouvert · ferme à {close}"))
    }
}

fn closed_until(open: u16) -> LiveStatus {
    LiveStatus::new(
        OpenState::Closed,
        format!("Fermé · ouvre à {}", format_clock(open)),
    )
}

fn minute_of_day(now: NaiveDateTime) -> u16 {
    // hour < 24 and minute < 60, so the product always fits.
    u16::try_from(now.hour() * 60 + now.minute()).unwrap_or(0)
}

/// Converts a UTC instant to wall-clock time at the given offset.
///
/// Offsets outside ±24h fall back to UTC.
#[must_use]
pub fn local_time(at: DateTime<Utc>, utc_offset_minutes: i32) -> NaiveDateTime {
    FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60))
        .map_or_else(|| at.naive_utc(), |offset| at.with_timezone(&offset).naive_local())
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
