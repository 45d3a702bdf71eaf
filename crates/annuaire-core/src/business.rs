use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::geo::Coordinates;
use crate::schedule::Schedule;

/// Opaque business identifier.
///
/// Stored records may carry the id as a JSON string or a JSON number; both
/// deserialize to the same decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BusinessId(String);

impl BusinessId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Builds the next numeric id: the current millisecond clock, or one past
    /// `last` when the clock has not moved beyond it.
    ///
    /// Returns `None` when `last` is already `i64::MAX`.
    #[must_use]
    pub fn next_after(last: Option<i64>, now_millis: i64) -> Option<Self> {
        let next = match last {
            Some(last) if last >= now_millis => last.checked_add(1)?,
            _ => now_millis,
        };
        Some(Self(next.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer value of the id, read the way a lenient integer parse would:
    /// surrounding whitespace ignored, optional sign, then leading digits.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        coerce_integer(&self.0)
    }

    /// Compares against `query` as provided, then by integer coercion of both
    /// sides, so `"42"` matches an id stored as `42` or `"0042"`.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        if self.0 == query {
            return true;
        }
        match (self.as_integer(), coerce_integer(query)) {
            (Some(ours), Some(theirs)) => ours == theirs,
            _ => false,
        }
    }
}

impl std::fmt::Display for BusinessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BusinessId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

fn coerce_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// The fixed set of directory categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Restaurant,
    Hotel,
    Pharmacie,
    Supermarche,
    Banque,
    Sante,
    Education,
    Beaute,
    Boutique,
    Garage,
    Loisirs,
    Services,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Restaurant,
        Category::Hotel,
        Category::Pharmacie,
        Category::Supermarche,
        Category::Banque,
        Category::Sante,
        Category::Education,
        Category::Beaute,
        Category::Boutique,
        Category::Garage,
        Category::Loisirs,
        Category::Services,
    ];

    /// Stable identifier used in storage and on the command line.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Category::Restaurant => "restaurant",
            Category::Hotel => "hotel",
            Category::Pharmacie => "pharmacie",
            Category::Supermarche => "supermarche",
            Category::Banque => "banque",
            Category::Sante => "sante",
            Category::Education => "education",
            Category::Beaute => "beaute",
            Category::Boutique => "boutique",
            Category::Garage => "garage",
            Category::Loisirs => "loisirs",
            Category::Services => "services",
        }
    }

    /// Display label in French.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Restaurant => "Restaurant",
            Category::Hotel => "Hôtel",
            Category::Pharmacie => "Pharmacie",
            Category::Supermarche => "Supermarché",
            Category::Banque => "Banque",
            Category::Sante => "Santé",
            Category::Education => "Éducation",
            Category::Beaute => "Beauté",
            Category::Boutique => "Boutique",
            Category::Garage => "Garage",
            Category::Loisirs => "Loisirs",
            Category::Services => "Services",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == wanted || c.label().to_lowercase() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Moderation state. Transitions only go `Pending -> Approved` or
/// `Pending -> Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for BusinessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusinessStatus::Pending => write!(f, "pending"),
            BusinessStatus::Approved => write!(f, "approved"),
            BusinessStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Data entered through the submission form. Unknown fields are kept in
/// `extra` and carried onto the created record untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSubmission {
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        alias = "hours",
        alias = "workingHours",
        skip_serializing_if = "Option::is_none"
    )]
    pub schedule: Option<Schedule>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BusinessSubmission {
    #[must_use]
    pub fn new(name: impl Into<String>, category: Category, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category,
            address: address.into(),
            phone: None,
            email: None,
            description: None,
            schedule: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
        self
    }
}

/// A directory entry in either the pending or the approved pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: BusinessId,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        alias = "hours",
        alias = "workingHours",
        skip_serializing_if = "Option::is_none"
    )]
    pub schedule: Option<Schedule>,
    pub status: BusinessStatus,
    /// Only meaningful once approved.
    #[serde(default)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Business {
    /// Creates a pending record from a submission.
    #[must_use]
    pub fn from_submission(
        id: BusinessId,
        submission: BusinessSubmission,
        coordinates: Coordinates,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: submission.name,
            category: submission.category,
            address: submission.address,
            coordinates: Some(coordinates),
            phone: submission.phone,
            email: submission.email,
            description: submission.description,
            schedule: submission.schedule,
            status: BusinessStatus::Pending,
            is_active: false,
            created_at: now,
            approved_at: None,
            status_updated_at: None,
            extra: submission.extra,
        }
    }

    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.status == BusinessStatus::Approved && self.is_active
    }
}

#[cfg(test)]
#[path = "business_test.rs"]
mod tests;
