//! gear-planner - Command line front end for the loadout calculator
//!
//! Catalogs are read from a directory of `<Category>.json` files and
//! loadouts from a directory of TOML files.

use anyhow::{Context, Result};
use clap::Parser;
use gear_core::{CatalogSet, GearCategory, GearItem, LevelBracket, School, SortKey};
use loadout_core::LoadoutRegistry;
use stat_core::calculate_stats;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Wizard gear loadout calculator
#[derive(Parser)]
#[command(name = "gear-planner")]
#[command(
    about = "Aggregate gear, jewel, and pet talent bonuses into a stat sheet",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Directory holding the per-category catalog JSON files
    #[arg(short, long, value_name = "DIR", default_value = "data")]
    catalogs: PathBuf,

    /// Directory holding loadout TOML files
    #[arg(short, long, value_name = "DIR", default_value = "loadouts")]
    loadouts: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Calculate the stat sheet of a saved loadout
    Stats {
        /// Loadout ID
        #[arg(value_name = "ID")]
        id: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List one catalog, filtered and sorted
    List {
        /// Gear category (e.g. hats, robes, jewels)
        #[arg(value_name = "CATEGORY")]
        category: GearCategory,

        /// Character level; selects the matching level bracket
        #[arg(long)]
        level: Option<u32>,

        /// Only items usable by this school
        #[arg(long)]
        school: Option<School>,

        /// Sort key: name, damage, or resistance
        #[arg(long, default_value = "name")]
        sort: SortKey,
    },

    /// Show the jewel sockets granted by a saved loadout
    Sockets {
        /// Loadout ID
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Grouped text sheet
    Text,
    /// JSON object keyed by stat
    Json,
    /// One line per projected row
    Rows,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalogs = CatalogSet::load(&cli.catalogs)
        .with_context(|| format!("Failed to load catalogs from {}", cli.catalogs.display()))?;

    match cli.command {
        Command::Stats { id, format } => {
            let registry = load_registry(&cli.loadouts)?;
            let selection = registry.resolve(&id, &catalogs)?;
            let sheet = calculate_stats(&selection);
            match format {
                OutputFormat::Text => print!("{}", sheet),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sheet)?),
                OutputFormat::Rows => {
                    for row in sheet.rows() {
                        match row.school {
                            Some(school) => println!("{} / {}: {}", row.stat, school, row.value),
                            None => println!("{}: {}", row.stat, row.value),
                        }
                    }
                }
            }
        }
        Command::List {
            category,
            level,
            school,
            sort,
        } => {
            let bracket = level.and_then(LevelBracket::for_level);
            let items = catalogs.view(category, bracket, school, sort)?;
            for item in &items {
                println!("{}", list_line(item, sort));
            }
            tracing::info!(%category, shown = items.len(), "listed catalog");
        }
        Command::Sockets { id } => {
            let registry = load_registry(&cli.loadouts)?;
            let selection = registry.resolve(&id, &catalogs)?;
            println!("{}", selection.total_sockets());
        }
    }

    Ok(())
}

fn load_registry(dir: &std::path::Path) -> Result<LoadoutRegistry> {
    LoadoutRegistry::load(dir)
        .with_context(|| format!("Failed to load loadouts from {}", dir.display()))
}

fn list_line(item: &GearItem, sort: SortKey) -> String {
    let mut line = item.label().to_string();
    if let Some(level) = &item.level {
        line.push_str(&format!("  [{}]", level));
    }
    for kind in sort.bonus_kinds() {
        line.push_str(&format!("  {} {}", kind, item.bonus_value(kind)));
    }
    line
}
