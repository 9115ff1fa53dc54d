//! Loadout calculation entry point

use crate::stat_block::{project, StatAccumulator, StatSheet};
use crate::talent::{PetTalentSlot, PetTalents, PET_TALENT_SLOTS};
use gear_core::{compute_sockets, GearCategory, GearItem};
use std::collections::BTreeMap;

/// Everything chosen for one calculation: at most one item per gear
/// category, the socketed jewels, and the pet talent slots
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    gear: BTreeMap<GearCategory, &'a GearItem>,
    jewels: Vec<&'a GearItem>,
    talents: PetTalents,
}

impl<'a> Selection<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an item for a category, replacing any previous choice.
    /// Jewels are socketed instead.
    pub fn equip(&mut self, category: GearCategory, item: &'a GearItem) {
        if category.is_jewel() {
            self.jewels.push(item);
        } else {
            self.gear.insert(category, item);
        }
    }

    pub fn socket(&mut self, jewel: &'a GearItem) {
        self.jewels.push(jewel);
    }

    /// Set a talent slot; indexes past the last slot are ignored
    pub fn set_talent(&mut self, index: usize, slot: PetTalentSlot) {
        if index < PET_TALENT_SLOTS {
            self.talents[index] = slot;
        } else {
            tracing::debug!(index, "ignoring talent beyond the last slot");
        }
    }

    pub fn with_gear(mut self, category: GearCategory, item: &'a GearItem) -> Self {
        self.equip(category, item);
        self
    }

    pub fn with_jewel(mut self, jewel: &'a GearItem) -> Self {
        self.socket(jewel);
        self
    }

    pub fn with_talent(mut self, index: usize, slot: PetTalentSlot) -> Self {
        self.set_talent(index, slot);
        self
    }

    pub fn gear(&self, category: GearCategory) -> Option<&'a GearItem> {
        self.gear.get(&category).copied()
    }

    pub fn jewels(&self) -> &[&'a GearItem] {
        &self.jewels
    }

    pub fn talents(&self) -> &PetTalents {
        &self.talents
    }

    /// Jewel sockets granted by the selected gear
    pub fn total_sockets(&self) -> u32 {
        compute_sockets(self.gear.iter().map(|(&category, &item)| (category, item)))
    }
}

/// Calculate the stat sheet for a selection
///
/// Folds every selected item, then every jewel, then every talent into a
/// fresh accumulator and projects it. Never fails: malformed data
/// contributes nothing.
pub fn calculate_stats(selection: &Selection<'_>) -> StatSheet {
    let mut acc = StatAccumulator::new();
    for &item in selection.gear.values() {
        acc.apply_item(Some(item));
    }
    for &jewel in &selection.jewels {
        acc.apply_item(Some(jewel));
    }
    for slot in &selection.talents {
        acc.apply_talent(slot);
    }
    tracing::debug!(
        gear = selection.gear.len(),
        jewels = selection.jewels.len(),
        "calculated stat sheet"
    );
    project(&acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ScalarStat, SchoolStat};
    use gear_core::{BonusValue, School};

    #[test]
    fn test_fresh_totals_per_calculation() {
        let hat = GearItem::new("Hat").with_bonus("Health", BonusValue::single("+100"));
        let selection = Selection::new().with_gear(GearCategory::Hats, &hat);

        let first = calculate_stats(&selection);
        let second = calculate_stats(&selection);
        assert_eq!(first, second);
        assert!((second.scalar(ScalarStat::Health) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_equip_replaces_previous_choice() {
        let old = GearItem::new("Old").with_bonus("Health", BonusValue::single("+10"));
        let new = GearItem::new("New").with_bonus("Health", BonusValue::single("+20"));
        let mut selection = Selection::new();
        selection.equip(GearCategory::Boots, &old);
        selection.equip(GearCategory::Boots, &new);

        let sheet = calculate_stats(&selection);
        assert!((sheet.scalar(ScalarStat::Health) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_jewels_and_talents_fold_in() {
        let robe = GearItem::new("Robe").with_sockets(2);
        let opal =
            GearItem::new("Opal").with_bonus("Damage", BonusValue::per_key([("storm", "+4%")]));
        let selection = Selection::new()
            .with_gear(GearCategory::Robes, &robe)
            .with_gear(GearCategory::Jewels, &opal)
            .with_jewel(&opal)
            .with_talent(0, PetTalentSlot::new("damage", 1.0).with_school("storm"));

        assert_eq!(selection.jewels().len(), 2);
        let sheet = calculate_stats(&selection);
        assert!((sheet.value(SchoolStat::PercentDamage, School::Storm) - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_total_sockets() {
        let hat = GearItem::new("Hat").with_sockets(2);
        let robe = GearItem::new("Robe").with_sockets(1);
        let selection = Selection::new()
            .with_gear(GearCategory::Hats, &hat)
            .with_gear(GearCategory::Robes, &robe);
        assert_eq!(selection.total_sockets(), 3);
        assert_eq!(selection.gear(GearCategory::Boots).map(|i| i.name.as_str()), None);
    }

    #[test]
    fn test_talent_index_out_of_range_ignored() {
        let selection =
            Selection::new().with_talent(PET_TALENT_SLOTS, PetTalentSlot::new("health", 5.0));
        let sheet = calculate_stats(&selection);
        assert_eq!(sheet.scalar(ScalarStat::Health), 0.0);
    }
}
