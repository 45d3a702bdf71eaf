//! Plain-text and JSON output for command handlers.

use annuaire_core::Business;
use annuaire_hours::{expand, status, LiveStatus};
use annuaire_registry::last_changed;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::navigation::NavigationLinks;

/// Everything `show` prints about a single business.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BusinessView<'a> {
    #[serde(flatten)]
    pub business: &'a Business,
    pub live_status: LiveStatus,
    pub last_changed: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationLinks>,
}

impl<'a> BusinessView<'a> {
    pub(crate) fn new(business: &'a Business, now: NaiveDateTime) -> Self {
        Self {
            business,
            live_status: status(business.schedule.as_ref(), now),
            last_changed: last_changed(business),
            navigation: business
                .coordinates
                .map(|c| NavigationLinks::to(c.point())),
        }
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

/// One row per business: id, category, live status and name.
pub(crate) fn print_table<'a>(
    businesses: impl IntoIterator<Item = &'a Business>,
    now: NaiveDateTime,
) {
    println!("{:<15}{:<13}{:<15}NAME", "ID", "CATEGORY", "STATUS");
    for business in businesses {
        let live = status(business.schedule.as_ref(), now);
        println!(
            "{:<15}{:<13}{:<15}{}",
            business.id,
            business.category,
            live.status,
            truncate(&business.name, 50)
        );
    }
}

pub(crate) fn print_business(view: &BusinessView<'_>) {
    let b = view.business;
    println!("{} ({})", b.name, b.category.label());
    println!("ID: {}", b.id);
    println!(
        "Statut: {}{}",
        b.status,
        if b.is_active { "" } else { " (inactif)" }
    );
    if !b.address.is_empty() {
        println!("Adresse: {}", b.address);
    }
    if let Some(phone) = &b.phone {
        println!("Téléphone: {phone}");
    }
    if let Some(email) = &b.email {
        println!("Email: {email}");
    }
    if let Some(description) = &b.description {
        println!("Description: {description}");
    }
    if let Some(c) = b.coordinates {
        println!("Position: {:.5}, {:.5} ({})", c.lat, c.lng, c.precision);
    }
    println!("Horaires: {}", view.live_status.message);
    println!(
        "Mis à jour: {}",
        view.last_changed.format("%Y-%m-%d %H:%M UTC")
    );
    if let Some(links) = &view.navigation {
        println!();
        println!("Google Maps: {}", links.google);
        println!("Waze: {}", links.waze);
        println!("Plans: {}", links.apple);
    }
}

pub(crate) fn print_week(business: &Business) {
    for day in expand(business.schedule.as_ref()) {
        println!("{:<10}{}", day.label(), day.display());
    }
}

#[cfg(test)]
mod tests {
    use annuaire_core::{
        BusinessId, BusinessSubmission, Category, Coordinates, Precision, Schedule,
    };
    use chrono::{NaiveDate, Utc};

    use super::*;

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("Pâtisserie", 3), "Pât...");
        assert_eq!(truncate("Court", 10), "Court");
    }

    #[test]
    fn view_serializes_flat_with_status_and_links() {
        let business = Business::from_submission(
            BusinessId::new("1"),
            BusinessSubmission::new("Le Damier", Category::Restaurant, "Kaloum")
                .with_schedule(Schedule::from("Lun-Dim: 8h-22h")),
            Coordinates {
                lat: 9.5,
                lng: -13.7,
                precision: Precision::High,
            },
            Utc::now(),
        );
        let now = NaiveDate::from_ymd_opt(2026, 10, 12)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();

        let json = serde_json::to_value(BusinessView::new(&business, now)).unwrap();
        assert_eq!(json["name"], "Le Damier");
        assert_eq!(json["liveStatus"]["status"], "open");
        assert_eq!(
            json["lastChanged"],
            serde_json::to_value(business.created_at).unwrap()
        );
        assert!(json["navigation"]["waze"]
            .as_str()
            .unwrap()
            .contains("9.500000,-13.700000"));
    }
}
