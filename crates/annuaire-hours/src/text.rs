//! Free-text schedule parsing.
//!
//! Recognized forms, after case and accent folding:
//!
//! - a bare window applying to every day: `"8h-18h"`, `"08:00 - 20:00"`
//! - round-the-clock markers: `"24h/24"`, `"24/7"`
//! - day or day-range segments: `"Lun-Ven: 8h-18h"`, `"Samedi 9h30 à 13h"`,
//!   `"Lun-Ven de 8h à 18h"`, `"Dim: Fermé"`
//! - day lists sharing one window: `"Lun, Mer et Ven: 8h-12h"`
//!
//! The first segment covering a day wins. Days no segment covers stay unset.

use std::sync::LazyLock;

use annuaire_core::text::fold;
use regex::{Captures, Regex};

use crate::rules::{clock_minutes, DayRule, WeekRules, MINUTES_PER_DAY};
use crate::weekday::{from_token, index};

const DAY: &str = r"(?:lun(?:di)?|mar(?:di)?|mer(?:credi)?|jeu(?:di)?|ven(?:dredi)?|sam(?:edi)?|dim(?:anche)?)\b\.?";

const WINDOW: &str = r"(?P<oh>\d{1,2})(?:\s*[h:]\s*(?P<om>\d{2})?)?\s*(?:-|–|a)\s*(?P<ch>\d{1,2})(?:\s*[h:]\s*(?P<cm>\d{2})?)?";

static DAY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\b{DAY}")).expect("valid day token regex"));

const RANGE: &str = r"\s*(?:-|–|au|a)\s*";

static SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b(?P<from>{DAY})(?:{RANGE}(?P<to>{DAY}))?"))
        .expect("valid day span regex")
});

// Days or ranges joined by commas or "et", then the hours.
static SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    let span = format!(r"{DAY}(?:{RANGE}{DAY})?");
    Regex::new(&format!(
        r"\b(?P<days>{span}(?:\s*(?:,|&|\bet\b)\s*{span})*)\s*:?\s*(?:de\s+)?(?:{WINDOW}|(?P<closed>ferme\w*|closed))"
    ))
    .expect("valid schedule segment regex")
});

static BARE_WINDOW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(WINDOW).expect("valid window regex"));

static ROUND_THE_CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"24\s*h?\s*/\s*(?:24|7)").expect("valid 24/7 regex"));

/// Parses a free-text schedule into Monday-first day rules.
#[must_use]
pub fn parse_text(text: &str) -> WeekRules {
    let folded = fold(text);
    let mut rules: WeekRules = [None; 7];

    if !DAY_TOKEN.is_match(&folded) {
        let whole_week = if ROUND_THE_CLOCK.is_match(&folded) {
            Some(DayRule::Open {
                open: 0,
                close: MINUTES_PER_DAY,
            })
        } else {
            BARE_WINDOW.captures(&folded).and_then(|caps| window(&caps))
        };
        if whole_week.is_some() {
            rules = [whole_week; 7];
        }
        return rules;
    }

    for caps in SEGMENT.captures_iter(&folded) {
        let rule = if caps.name("closed").is_some() {
            Some(DayRule::Closed)
        } else {
            window(&caps)
        };
        let (Some(rule), Some(days)) = (rule, caps.name("days")) else {
            continue;
        };

        for span in SPAN.captures_iter(days.as_str()) {
            let Some(from) = span.name("from").and_then(|m| day_index(m.as_str())) else {
                continue;
            };
            let to = match span.name("to") {
                Some(m) => match day_index(m.as_str()) {
                    Some(to) => to,
                    None => continue,
                },
                None => from,
            };

            // Reversed ranges cover nothing in a Monday-first week.
            if from > to {
                continue;
            }
            for slot in &mut rules[from..=to] {
                if slot.is_none() {
                    *slot = Some(rule);
                }
            }
        }
    }

    rules
}

fn day_index(token: &str) -> Option<usize> {
    from_token(token).map(index)
}

fn window(caps: &Captures<'_>) -> Option<DayRule> {
    let open = clock_minutes(caps.name("oh")?.as_str(), caps.name("om").map(|m| m.as_str()))?;
    let close = clock_minutes(caps.name("ch")?.as_str(), caps.name("cm").map(|m| m.as_str()))?;
    Some(DayRule::Open { open, close })
}
