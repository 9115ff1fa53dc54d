//! StatAccumulator - Folds item bonuses and pet talents into running totals

use crate::routing::{route_for, Scoping};
use crate::talent::{PetTalentSlot, TalentTarget, TalentType};
use crate::types::{ScalarStat, SchoolStat, SchoolValues};
use gear_core::{BonusEntry, BonusValue, GearItem, School};

/// Running totals for one calculation
///
/// Created fresh for every calculation. Applying the same item or talent
/// twice counts it twice.
#[derive(Debug, Clone, Default)]
pub struct StatAccumulator {
    schools: [SchoolValues; SchoolStat::COUNT],
    scalars: [f64; ScalarStat::COUNT],
}

impl StatAccumulator {
    /// Create a new empty accumulator
    pub fn new() -> Self {
        StatAccumulator::default()
    }

    pub fn school(&self, stat: SchoolStat) -> &SchoolValues {
        &self.schools[stat.index()]
    }

    pub fn scalar(&self, stat: ScalarStat) -> f64 {
        self.scalars[stat.index()]
    }

    pub(crate) fn school_totals(&self) -> &[SchoolValues; SchoolStat::COUNT] {
        &self.schools
    }

    pub(crate) fn scalar_totals(&self) -> &[f64; ScalarStat::COUNT] {
        &self.scalars
    }

    fn add_school(&mut self, stat: SchoolStat, school: School, value: f64) {
        tracing::trace!(%stat, %school, value, "contribution");
        self.schools[stat.index()].add(school, value);
    }

    fn add_every_school(&mut self, stat: SchoolStat, value: f64) {
        tracing::trace!(%stat, value, "contribution to every school");
        self.schools[stat.index()].add_all(value);
    }

    fn add_scalar(&mut self, stat: ScalarStat, value: f64) {
        tracing::trace!(%stat, value, "contribution");
        self.scalars[stat.index()] += value;
    }

    /// Apply every bonus of a selected item; `None` is an empty selection
    pub fn apply_item(&mut self, item: Option<&GearItem>) {
        let Some(item) = item else {
            return;
        };
        for entry in &item.bonuses {
            self.apply_bonus(entry);
        }
    }

    /// Apply one bonus entry according to its routing
    pub fn apply_bonus(&mut self, entry: &BonusEntry) {
        let Some(route) = route_for(&entry.kind) else {
            tracing::debug!(kind = %entry.kind, "ignoring unrecognized bonus kind");
            return;
        };
        let format = route.format;

        match (route.scoping, &entry.value) {
            (Scoping::PerSchool(stat), BonusValue::Single(raw)) => {
                self.add_every_school(stat, format.parse(raw));
            }
            (Scoping::PerSchool(stat), BonusValue::PerKey(pairs)) => {
                for (key, raw) in pairs {
                    let value = format.parse(raw);
                    if key.eq_ignore_ascii_case("global") {
                        self.add_every_school(stat, value);
                    } else if let Some(school) = School::parse(key) {
                        self.add_school(stat, school, value);
                    } else {
                        tracing::debug!(kind = %entry.kind, key = %key, "dropping unknown sub-key");
                    }
                }
            }
            (Scoping::Summed(stat), value) => {
                for raw in value.texts() {
                    self.add_scalar(stat, format.parse(raw));
                }
            }
            (Scoping::Healing, BonusValue::PerKey(pairs)) => {
                for (key, raw) in pairs {
                    let value = format.parse(raw);
                    if key.eq_ignore_ascii_case("incoming") {
                        self.add_scalar(ScalarStat::IncomingHealing, value);
                    } else if key.eq_ignore_ascii_case("outgoing") {
                        self.add_scalar(ScalarStat::OutgoingHealing, value);
                    } else {
                        tracing::debug!(kind = %entry.kind, key = %key, "dropping unknown sub-key");
                    }
                }
            }
            (Scoping::Healing, BonusValue::Single(_)) => {
                tracing::debug!(kind = %entry.kind, "ignoring healing bonus without direction");
            }
            (Scoping::SingleOnly(stat), BonusValue::Single(raw)) => {
                self.add_scalar(stat, format.parse(raw));
            }
            (Scoping::SingleOnly(stat), BonusValue::PerKey(_)) => {
                // Per-key Mana/Energy values never contributed to the totals
                tracing::warn!(kind = %entry.kind, %stat, "per-key value contributes nothing");
            }
        }
    }

    /// Apply one pet talent slot
    ///
    /// Slots without a type or a usable magnitude are skipped. Unrecognized
    /// types and schools are reported and otherwise ignored.
    pub fn apply_talent(&mut self, slot: &PetTalentSlot) {
        if slot.is_empty() {
            return;
        }
        let (Some(name), Some(magnitude)) = (slot.talent_type.as_deref(), slot.magnitude) else {
            return;
        };
        let Some(talent) = TalentType::parse(name) else {
            tracing::warn!(talent_type = %name, "unrecognized pet talent type");
            return;
        };

        match talent.target() {
            TalentTarget::School(stat) => {
                let school = slot
                    .school
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("global"));
                match school {
                    None => self.add_every_school(stat, magnitude),
                    Some(name) => match School::parse(name) {
                        Some(school) => self.add_school(stat, school, magnitude),
                        None => {
                            tracing::warn!(%talent, school = %name, "unknown pet talent school")
                        }
                    },
                }
            }
            TalentTarget::Scalar(stat) => self.add_scalar(stat, magnitude),
        }
    }
}
