//! gear_core - Gear catalogs for a wizard loadout planner
//!
//! This library provides:
//! - GearItem: the published catalog schema, decoded leniently
//! - Value normalization: formatted bonus text ("+12%", "1,200") to numbers
//! - CatalogSet: per-category catalogs with level/school filtering and sorting
//! - Socket provisioning: jewel sockets granted by selected gear
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use gear_core::{CatalogSet, GearCategory, LevelBracket, School, SortKey};
//!
//! let catalogs = CatalogSet::load(Path::new("data/"))?;
//! let hats = catalogs.view(
//!     GearCategory::Hats,
//!     LevelBracket::for_level(45),
//!     Some(School::Fire),
//!     SortKey::Damage,
//! )?;
//! ```

pub mod catalog;
pub mod item;
pub mod normalize;
pub mod sockets;
pub mod types;

pub use catalog::{filter_items, sort_items, CatalogSet, LevelBracket, SortKey, LEVEL_BRACKETS};
pub use item::{BonusEntry, BonusValue, GearItem, LevelRequirement, SchoolType};
pub use normalize::{normalize, ValueFormat};
pub use sockets::compute_sockets;
pub use types::{GearCategory, School, UnknownName};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading or querying gear catalogs
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path:?}': {error}")]
    Parse {
        error: serde_json::Error,
        path: Option<PathBuf>,
    },
    #[error("Catalog not loaded: {0}")]
    MissingCategory(String),
}
