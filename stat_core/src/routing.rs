//! Bonus-kind routing table
//!
//! Every catalog bonus kind the aggregator understands maps to one target
//! stat and one scoping rule. Kinds missing from the table are ignored.

use crate::types::{ScalarStat, SchoolStat};
use gear_core::ValueFormat;

/// How a bonus value is spread over the accumulators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scoping {
    /// A single value lands on every school. Per-key values land on every
    /// school under "global", or on the named school; other keys are dropped.
    PerSchool(SchoolStat),
    /// A single value, or the sum of all per-key values
    Summed(ScalarStat),
    /// Only per-key values count: "incoming" and "outgoing" healing
    Healing,
    /// Only a single value counts; per-key values contribute nothing
    SingleOnly(ScalarStat),
}

/// Routing for one bonus kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusRoute {
    pub kind: &'static str,
    pub scoping: Scoping,
    pub format: ValueFormat,
}

const fn route(kind: &'static str, scoping: Scoping, format: ValueFormat) -> BonusRoute {
    BonusRoute { kind, scoping, format }
}

/// All recognized bonus kinds
pub const BONUS_ROUTES: &[BonusRoute] = &[
    route("Damage", Scoping::PerSchool(SchoolStat::PercentDamage), ValueFormat::Standard),
    route("Flat Damage", Scoping::PerSchool(SchoolStat::FlatDamage), ValueFormat::Standard),
    route("Resistance", Scoping::PerSchool(SchoolStat::PercentResistance), ValueFormat::Standard),
    route("Flat Resistance", Scoping::PerSchool(SchoolStat::FlatResistance), ValueFormat::Standard),
    route("Accuracy", Scoping::PerSchool(SchoolStat::Accuracy), ValueFormat::Standard),
    route("Critical", Scoping::PerSchool(SchoolStat::Critical), ValueFormat::Standard),
    route("Critical Block", Scoping::PerSchool(SchoolStat::CriticalBlock), ValueFormat::Standard),
    route("Armor Piercing", Scoping::PerSchool(SchoolStat::ArmorPiercing), ValueFormat::Standard),
    route("Pip Conversion", Scoping::PerSchool(SchoolStat::PipConversion), ValueFormat::Standard),
    route("Stun Resistance", Scoping::Summed(ScalarStat::StunResistance), ValueFormat::Standard),
    route("Healing", Scoping::Healing, ValueFormat::Standard),
    route("Power Pip", Scoping::Summed(ScalarStat::PowerPips), ValueFormat::StripLetters),
    route("Shadow Pip", Scoping::Summed(ScalarStat::ShadowPips), ValueFormat::StripLetters),
    route("Archmastery", Scoping::Summed(ScalarStat::Archmastery), ValueFormat::StripLetters),
    route("Health", Scoping::Summed(ScalarStat::Health), ValueFormat::Standard),
    route("Mana", Scoping::SingleOnly(ScalarStat::Mana), ValueFormat::Standard),
    route("Energy", Scoping::SingleOnly(ScalarStat::Energy), ValueFormat::Standard),
];

/// Look up the routing for a bonus kind (exact, case-sensitive match)
pub fn route_for(kind: &str) -> Option<&'static BonusRoute> {
    BONUS_ROUTES.iter().find(|route| route.kind == kind)
}
