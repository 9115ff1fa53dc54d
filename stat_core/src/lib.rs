//! stat_core - Stat aggregation for wizard gear loadouts
//!
//! This library provides:
//! - StatAccumulator: folds item bonuses and pet talents into per-school and scalar totals
//! - Bonus routing: one table mapping each bonus kind to its target stat and scoping rule
//! - StatSheet: the immutable projection handed to presentation layers
//! - calculate_stats: the single entry point over a Selection
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use stat_core::prelude::*;
//! use gear_core::{CatalogSet, GearCategory};
//!
//! let catalogs = CatalogSet::load(Path::new("data/"))?;
//! let hat = catalogs.find(GearCategory::Hats, "Hat of the Tempest").unwrap();
//!
//! let selection = Selection::new()
//!     .with_gear(GearCategory::Hats, hat)
//!     .with_talent(0, PetTalentSlot::new("damage", 3.0).with_school("storm"));
//! let sheet = calculate_stats(&selection);
//! println!("{}", sheet);
//! ```

pub mod calculation;
pub mod prelude;
pub mod routing;
pub mod stat_block;
pub mod talent;
pub mod types;

// Core API - what most users need
pub use calculation::{calculate_stats, Selection};
pub use stat_block::{project, StatAccumulator, StatRow, StatSheet};
pub use talent::{PetTalentSlot, PetTalents, TalentType, PET_TALENT_SLOTS};
pub use types::{ScalarStat, SchoolStat, SchoolValues};

// Advanced: bonus routing
pub use routing::{route_for, BonusRoute, Scoping, BONUS_ROUTES};

// Re-export commonly needed gear_core types
pub use gear_core::{BonusValue, GearCategory, GearItem, School};
