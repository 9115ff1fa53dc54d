mod aggregator;
mod sheet;

pub use aggregator::StatAccumulator;
pub use sheet::{project, StatRow, StatSheet};
