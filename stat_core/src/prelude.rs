//! Prelude module for convenient imports
//!
//! ```rust
//! use stat_core::prelude::*;
//! ```

// Calculation
pub use crate::calculation::{calculate_stats, Selection};
pub use crate::talent::{PetTalentSlot, TalentType};

// Results
pub use crate::stat_block::{StatAccumulator, StatSheet};
pub use crate::types::{ScalarStat, SchoolStat};

// Re-exports from gear_core
pub use gear_core::{GearCategory, GearItem, School};
