mod directory;
mod navigation;
mod render;

use std::path::PathBuf;

use annuaire_core::{Category, GeoPoint};
use annuaire_registry::{Favorites, JsonDirRepository};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::directory::{Output, Registry, SubmitArgs};

#[derive(Debug, Parser)]
#[command(name = "annuaire")]
#[command(about = "Conakry business directory")]
struct Cli {
    /// Print records as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Submit a business for moderation
    Submit {
        /// Business name
        name: String,
        /// Category slug or label (e.g. pharmacie, "Santé")
        #[arg(long)]
        category: Category,
        /// Street address or neighbourhood
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Opening hours as free text (e.g. "Lun-Ven: 8h-18h")
        #[arg(long)]
        hours: Option<String>,
    },
    /// List businesses awaiting moderation
    Pending,
    /// Approve a pending business
    Approve { id: String },
    /// Reject and discard a pending business
    Reject { id: String },
    /// Switch an approved business on or off
    Toggle { id: String },
    /// Permanently delete an approved business
    Remove { id: String },
    /// Show one business with its live status and navigation links
    Show { id: String },
    /// List approved businesses in a category
    Category { category: Category },
    /// Rank active businesses by distance from a point
    Near {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Search radius in kilometers (defaults to ANNUAIRE_DEFAULT_RADIUS_KM)
        #[arg(long)]
        radius: Option<f64>,
        /// Reported accuracy of the position, in meters
        #[arg(long)]
        accuracy: Option<f64>,
    },
    /// Search active businesses by name, description, address or category
    Search { query: String },
    /// Show the weekly hours and live status of a business
    Hours { id: String },
    /// Resolve an address to coordinates without storing anything
    Resolve { address: String },
    /// Load businesses from the seed file
    Seed {
        /// Seed file (defaults to ANNUAIRE_SEED_PATH)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Print what would be seeded without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Manage bookmarked businesses
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommands,
    },
}

#[derive(Debug, Subcommand)]
enum FavoritesCommands {
    /// Bookmark a business
    Add { id: String },
    /// Remove a bookmark
    Remove { id: String },
    /// List bookmarked businesses
    List,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("annuaire: no command given; run `annuaire --help`");
        return Ok(());
    };

    let config = annuaire_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let out = Output {
        json: cli.json,
        now: annuaire_hours::local_time(Utc::now(), config.utc_offset_minutes),
    };

    let mut registry = Registry::open(JsonDirRepository::new(&config.data_dir))?;

    match command {
        Commands::Submit {
            name,
            category,
            address,
            phone,
            email,
            description,
            hours,
        } => directory::run_submit(
            &mut registry,
            out,
            SubmitArgs {
                name,
                category,
                address,
                phone,
                email,
                description,
                hours,
            },
        ),
        Commands::Pending => directory::run_pending(&registry, out),
        Commands::Approve { id } => directory::run_approve(&mut registry, out, &id),
        Commands::Reject { id } => directory::run_reject(&mut registry, out, &id),
        Commands::Toggle { id } => directory::run_toggle(&mut registry, out, &id),
        Commands::Remove { id } => directory::run_remove(&mut registry, out, &id),
        Commands::Show { id } => directory::run_show(&registry, out, &id),
        Commands::Category { category } => directory::run_category(&registry, out, category),
        Commands::Near {
            lat,
            lng,
            radius,
            accuracy,
        } => {
            let mut origin = GeoPoint::new(lat, lng);
            if let Some(meters) = accuracy {
                origin = origin.with_accuracy(meters);
            }
            let radius = radius.unwrap_or(config.default_radius_km);
            directory::run_near(&registry, out, origin, radius)
        }
        Commands::Search { query } => directory::run_search(&registry, out, &query),
        Commands::Hours { id } => directory::run_hours(&registry, out, &id),
        Commands::Resolve { address } => directory::run_resolve(out, &address),
        Commands::Seed { path, dry_run } => {
            let path = path.unwrap_or_else(|| config.seed_path.clone());
            directory::run_seed(&mut registry, &path, dry_run)
        }
        Commands::Favorites { command } => {
            let mut favorites = Favorites::open(JsonDirRepository::new(&config.data_dir))?;
            match command {
                FavoritesCommands::Add { id } => {
                    directory::run_favorites_add(&mut favorites, &registry, &id)
                }
                FavoritesCommands::Remove { id } => {
                    directory::run_favorites_remove(&mut favorites, &id)
                }
                FavoritesCommands::List => {
                    directory::run_favorites_list(&favorites, &registry, out)
                }
            }
        }
    }
}
