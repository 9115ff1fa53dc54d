//! loadout_core - Saved loadouts resolved against gear catalogs
//!
//! A loadout is a TOML file naming the chosen item per gear category, the
//! socketed jewels, and the pet talents. The registry loads a directory of
//! them; resolution turns one into a `stat_core::Selection` borrowing from a
//! `gear_core::CatalogSet`.

mod config;
mod loadout;
mod registry;
mod resolve;

pub use loadout::Loadout;
pub use registry::LoadoutRegistry;
pub use resolve::resolve;

use std::path::PathBuf;
use thiserror::Error;

/// Error loading loadout configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path}': {message}")]
    Validation { message: String, path: PathBuf },
}

/// Error turning a loadout into a selection
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Unknown loadout: {0}")]
    UnknownLoadout(String),
    #[error("No item named '{name}' in {category}")]
    UnknownItem { category: String, name: String },
    #[error("Catalog not loaded: {0}")]
    MissingCatalog(String),
    #[error("Jewels selected but the chosen gear has no sockets")]
    NoSockets,
    #[error("{selected} jewels selected but only {sockets} sockets available")]
    TooManyJewels { selected: usize, sockets: u32 },
    #[error("Invalid gear category: {0}")]
    InvalidCategory(String),
    #[error("Invalid loadout: {0}")]
    InvalidLoadout(String),
}
