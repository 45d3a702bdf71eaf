//! Working-hours representations as they arrive from submissions and storage.
//!
//! Interpretation lives in `annuaire-hours`; this module only fixes the shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Opening window for a single day in a structured schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    /// `"HH:MM"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<String>,
    /// `"HH:MM"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<String>,
    #[serde(default)]
    pub closed: bool,
}

impl DayHours {
    #[must_use]
    pub fn window(open: &str, close: &str) -> Self {
        Self {
            open: Some(open.to_string()),
            close: Some(close.to_string()),
            closed: false,
        }
    }

    #[must_use]
    pub fn closed() -> Self {
        Self {
            open: None,
            close: None,
            closed: true,
        }
    }
}

/// A business's working hours.
///
/// Serialized untagged so stored records keep their original JSON shape: an
/// object keyed by day name, a free-text string, or anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Schedule {
    /// Free text such as `"Lun-Ven: 8h-18h, Sam: 9h-13h"`.
    Text(String),
    /// Per-day map keyed by day name (`"lundi"`, `"monday"`, ...).
    Structured(BTreeMap<String, DayHours>),
    /// Any other JSON shape. Always interpreted as unknown hours.
    Unsupported(serde_json::Value),
}

impl Schedule {
    /// Returns `true` when the schedule carries no usable content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Schedule::Text(text) => text.trim().is_empty(),
            Schedule::Structured(days) => days.is_empty(),
            Schedule::Unsupported(_) => true,
        }
    }
}

impl From<&str> for Schedule {
    fn from(text: &str) -> Self {
        Schedule::Text(text.to_string())
    }
}

impl FromIterator<(String, DayHours)> for Schedule {
    fn from_iter<I: IntoIterator<Item = (String, DayHours)>>(iter: I) -> Self {
        Schedule::Structured(iter.into_iter().collect())
    }
}
