//! Opening-hours interpretation.
//!
//! A business schedule is either a per-day map or loosely formatted French
//! text. Both shapes are reduced to seven [`rules::DayRule`] slots, from
//! which [`status`] derives the live open/closing-soon/closed/unknown state
//! and [`expand`] renders the weekly table. Malformed input never errors; it
//! degrades to unknown hours.

pub mod engine;
pub mod rules;
pub mod text;
pub mod weekday;

pub use engine::{
    expand, local_time, status, DaySchedule, LiveStatus, OpenState, StatusColor,
    CLOSING_SOON_MINUTES,
};
pub use rules::{parse_clock, week_rules, DayRule, WeekRules};
pub use text::parse_text;
