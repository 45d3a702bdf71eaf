//! Command handlers for the directory.
//!
//! Each handler receives an already opened registry; `main` owns config
//! loading and storage setup. Unknown ids are reported as errors here even
//! though the registry itself treats them as no-ops.

use std::path::Path;

use annuaire_core::text::fold;
use annuaire_core::{Business, BusinessSubmission, Category, GeoPoint, Schedule};
use annuaire_geo::resolve_address;
use annuaire_registry::{BusinessRegistry, Favorites, JsonDirRepository};
use chrono::NaiveDateTime;

use crate::render::{print_business, print_json, print_table, print_week, BusinessView};

pub(crate) type Registry = BusinessRegistry<JsonDirRepository>;

/// Output settings shared by every handler.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Output {
    pub json: bool,
    /// Local wall-clock time used for live opening status.
    pub now: NaiveDateTime,
}

impl Output {
    fn list(&self, businesses: &[&Business], empty: &str) -> anyhow::Result<()> {
        if self.json {
            return print_json(businesses);
        }
        if businesses.is_empty() {
            println!("{empty}");
            return Ok(());
        }
        print_table(businesses.iter().copied(), self.now);
        Ok(())
    }

    fn record(&self, business: &Business) -> anyhow::Result<()> {
        let view = BusinessView::new(business, self.now);
        if self.json {
            return print_json(&view);
        }
        print_business(&view);
        Ok(())
    }
}

/// Fields collected by `submit`.
#[derive(Debug)]
pub(crate) struct SubmitArgs {
    pub name: String,
    pub category: Category,
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub hours: Option<String>,
}

pub(crate) fn run_submit(
    registry: &mut Registry,
    out: Output,
    args: SubmitArgs,
) -> anyhow::Result<()> {
    let mut submission = BusinessSubmission::new(args.name, args.category, args.address);
    submission.phone = args.phone;
    submission.email = args.email;
    submission.description = args.description;
    submission.schedule = args.hours.as_deref().map(Schedule::from);

    let business = registry.submit(submission)?;
    if out.json {
        return print_json(&business);
    }
    println!(
        "submitted {} as {}; awaiting approval",
        business.name, business.id
    );
    Ok(())
}

pub(crate) fn run_pending(registry: &Registry, out: Output) -> anyhow::Result<()> {
    let pending: Vec<&Business> = registry.pending().iter().collect();
    out.list(&pending, "no businesses awaiting approval")
}

pub(crate) fn run_approve(registry: &mut Registry, out: Output, id: &str) -> anyhow::Result<()> {
    let business = registry
        .approve(id)?
        .ok_or_else(|| anyhow::anyhow!("no pending business with id '{id}'"))?;
    if out.json {
        return print_json(&business);
    }
    println!("approved {} ({})", business.name, business.id);
    Ok(())
}

pub(crate) fn run_reject(registry: &mut Registry, out: Output, id: &str) -> anyhow::Result<()> {
    let business = registry
        .reject(id)?
        .ok_or_else(|| anyhow::anyhow!("no pending business with id '{id}'"))?;
    if out.json {
        return print_json(&business);
    }
    println!("rejected {} ({})", business.name, business.id);
    Ok(())
}

pub(crate) fn run_toggle(registry: &mut Registry, out: Output, id: &str) -> anyhow::Result<()> {
    let business = registry
        .toggle_active(id)?
        .ok_or_else(|| anyhow::anyhow!("no approved business with id '{id}'"))?;
    if out.json {
        return print_json(&business);
    }
    let state = if business.is_active {
        "active"
    } else {
        "inactive"
    };
    println!("{} ({}) is now {state}", business.name, business.id);
    Ok(())
}

pub(crate) fn run_remove(registry: &mut Registry, out: Output, id: &str) -> anyhow::Result<()> {
    let business = registry
        .remove(id)?
        .ok_or_else(|| anyhow::anyhow!("no approved business with id '{id}'"))?;
    if out.json {
        return print_json(&business);
    }
    println!("removed {} ({})", business.name, business.id);
    Ok(())
}

pub(crate) fn run_show(registry: &Registry, out: Output, id: &str) -> anyhow::Result<()> {
    let business = registry
        .find_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("business '{id}' not found"))?;
    out.record(business)
}

pub(crate) fn run_category(
    registry: &Registry,
    out: Output,
    category: Category,
) -> anyhow::Result<()> {
    let businesses = registry.by_category(category);
    out.list(
        &businesses,
        &format!("no approved businesses in {}", category.label()),
    )
}

pub(crate) fn run_search(registry: &Registry, out: Output, query: &str) -> anyhow::Result<()> {
    let businesses = registry.search(query);
    out.list(&businesses, &format!("nothing matches '{query}'"))
}

pub(crate) fn run_near(
    registry: &Registry,
    out: Output,
    origin: GeoPoint,
    radius_km: f64,
) -> anyhow::Result<()> {
    let ranked = registry.nearest(origin, radius_km);
    if out.json {
        return print_json(&ranked);
    }
    if ranked.is_empty() {
        println!("no businesses within {radius_km} km");
        return Ok(());
    }
    println!("{:<15}{:<10}{:<13}NAME", "ID", "KM", "CATEGORY");
    for r in &ranked {
        println!(
            "{:<15}{:<10.2}{:<13}{}",
            r.item.id, r.distance, r.item.category, r.item.name
        );
    }
    Ok(())
}

pub(crate) fn run_hours(registry: &Registry, out: Output, id: &str) -> anyhow::Result<()> {
    let business = registry
        .find_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("business '{id}' not found"))?;
    let live = annuaire_hours::status(business.schedule.as_ref(), out.now);
    if out.json {
        let week = annuaire_hours::expand(business.schedule.as_ref());
        return print_json(&serde_json::json!({ "liveStatus": live, "week": week }));
    }
    println!("{}: {}", business.name, live.message);
    print_week(business);
    Ok(())
}

pub(crate) fn run_resolve(out: Output, address: &str) -> anyhow::Result<()> {
    let coordinates = resolve_address(address);
    if out.json {
        return print_json(&coordinates);
    }
    println!(
        "{:.5}, {:.5} ({})",
        coordinates.lat, coordinates.lng, coordinates.precision
    );
    Ok(())
}

/// Submit and approve every seed entry whose name is not already present.
///
/// # Errors
///
/// Returns an error if the seed file is invalid or the registry cannot be
/// persisted.
pub(crate) fn run_seed(registry: &mut Registry, path: &Path, dry_run: bool) -> anyhow::Result<()> {
    let seed = annuaire_core::load_seed(path)?;

    if dry_run {
        let names: Vec<&str> = seed.businesses.iter().map(|b| b.name.as_str()).collect();
        println!(
            "dry-run: would seed {} businesses: [{}]",
            names.len(),
            names.join(", ")
        );
        return Ok(());
    }

    let mut added = 0usize;
    let mut skipped = 0usize;
    for submission in seed.businesses {
        let wanted = fold(&submission.name);
        let exists = registry
            .pending()
            .iter()
            .chain(registry.approved())
            .any(|b| fold(&b.name) == wanted);
        if exists {
            tracing::debug!(name = %submission.name, "seed entry already present");
            skipped += 1;
            continue;
        }

        let created = registry.submit(submission)?;
        registry.approve(created.id.as_str())?;
        added += 1;
    }

    tracing::info!(added, skipped, path = %path.display(), "seed complete");
    println!("seeded {added} businesses ({skipped} already present)");
    Ok(())
}

pub(crate) fn run_favorites_add(
    favorites: &mut Favorites<JsonDirRepository>,
    registry: &Registry,
    id: &str,
) -> anyhow::Result<()> {
    let business = registry
        .find_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("business '{id}' not found"))?;
    if favorites.add(business.id.as_str())? {
        println!("added {} to favorites", business.name);
    } else {
        println!("{} is already a favorite", business.name);
    }
    Ok(())
}

pub(crate) fn run_favorites_remove(
    favorites: &mut Favorites<JsonDirRepository>,
    id: &str,
) -> anyhow::Result<()> {
    if favorites.remove(id)? {
        println!("removed {id} from favorites");
    } else {
        println!("{id} was not a favorite");
    }
    Ok(())
}

pub(crate) fn run_favorites_list(
    favorites: &Favorites<JsonDirRepository>,
    registry: &Registry,
    out: Output,
) -> anyhow::Result<()> {
    let businesses = favorites.resolve(registry);
    out.list(&businesses, "no favorites yet")
}
