//! French weekday labels and the Monday-first week ordering.
//!
//! Day tokens in free-text schedules are French and ranges are read in
//! Monday-first order, so `"Sam-Lun"` covers no day at all.

use annuaire_core::text::fold;
use chrono::Weekday;

/// Monday-first, the order used by ranges and weekly tables.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Position in [`WEEK`].
#[must_use]
pub fn index(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

#[must_use]
pub fn french_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Lundi",
        Weekday::Tue => "Mardi",
        Weekday::Wed => "Mercredi",
        Weekday::Thu => "Jeudi",
        Weekday::Fri => "Vendredi",
        Weekday::Sat => "Samedi",
        Weekday::Sun => "Dimanche",
    }
}

#[must_use]
pub fn abbreviation(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Lun",
        Weekday::Tue => "Mar",
        Weekday::Wed => "Mer",
        Weekday::Thu => "Jeu",
        Weekday::Fri => "Ven",
        Weekday::Sat => "Sam",
        Weekday::Sun => "Dim",
    }
}

fn english_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Weekday named by a French abbreviation or full name (`"Lun"`, `"mardi"`).
#[must_use]
pub fn from_token(token: &str) -> Option<Weekday> {
    let folded = fold(token);
    let folded = folded.trim_end_matches('.');
    if folded.len() < 3 {
        return None;
    }
    WEEK.into_iter()
        .find(|&day| fold(french_label(day)).starts_with(folded) || fold(abbreviation(day)) == folded)
}

/// Weekday named by a structured-schedule key: French (`"lundi"`) or
/// English (`"monday"`), any case.
#[must_use]
pub fn from_key(key: &str) -> Option<Weekday> {
    let folded = fold(key);
    WEEK.into_iter()
        .find(|&day| folded == fold(french_label(day)) || folded == english_key(day))
}
