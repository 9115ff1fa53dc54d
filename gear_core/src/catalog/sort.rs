//! Catalog ordering

use crate::item::GearItem;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison key for ordering a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    /// Damage, then Critical, then Pierce, all descending
    Damage,
    /// Resistance, then Health, then Critical Block, all descending
    Resistance,
}

impl SortKey {
    /// Bonus kinds compared in order, each descending
    pub fn bonus_kinds(self) -> &'static [&'static str] {
        match self {
            SortKey::Name => &[],
            SortKey::Damage => &["Damage", "Critical", "Pierce"],
            SortKey::Resistance => &["Resistance", "Health", "Critical Block"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Damage => "damage",
            SortKey::Resistance => "resistance",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = crate::types::UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "damage" => Ok(SortKey::Damage),
            "resistance" => Ok(SortKey::Resistance),
            _ => Err(crate::types::UnknownName(s.to_string())),
        }
    }
}

/// Compare two items under a key. Ties always fall back to ascending name.
pub fn compare_items(a: &GearItem, b: &GearItem, key: SortKey) -> Ordering {
    for kind in key.bonus_kinds() {
        let ord = b
            .bonus_value(kind)
            .partial_cmp(&a.bonus_value(kind))
            .unwrap_or(Ordering::Equal);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.name.cmp(&b.name)
}

/// Stable in-place sort of owned or borrowed items
pub fn sort_items<T: AsRef<GearItem>>(items: &mut [T], key: SortKey) {
    items.sort_by(|a, b| compare_items(a.as_ref(), b.as_ref(), key));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::BonusValue;

    fn with(name: &str, bonuses: &[(&str, &str)]) -> GearItem {
        bonuses.iter().fold(GearItem::new(name), |item, (kind, value)| {
            item.with_bonus(*kind, BonusValue::single(*value))
        })
    }

    fn order(items: &[GearItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_sort_by_name() {
        let mut items = vec![with("Charlie", &[]), with("Alpha", &[]), with("Bravo", &[])];
        sort_items(&mut items, SortKey::Name);
        assert_eq!(order(&items), vec!["Alpha", "Bravo", "Charlie"]);
    }

    #[test]
    fn test_damage_primary_descending() {
        let mut items = vec![
            with("Low", &[("Damage", "+5%")]),
            with("High", &[("Damage", "+15%")]),
            with("None", &[]),
        ];
        sort_items(&mut items, SortKey::Damage);
        assert_eq!(order(&items), vec!["High", "Low", "None"]);
    }

    #[test]
    fn test_damage_tie_broken_by_critical() {
        let mut items = vec![
            with("Soft", &[("Damage", "+10%"), ("Critical", "+20")]),
            with("Sharp", &[("Damage", "+10%"), ("Critical", "+40")]),
        ];
        sort_items(&mut items, SortKey::Damage);
        assert_eq!(order(&items), vec!["Sharp", "Soft"]);
    }

    #[test]
    fn test_damage_tie_broken_by_pierce_then_name() {
        let mut items = vec![
            with("Zulu", &[("Damage", "+10%"), ("Critical", "+20")]),
            with("Yankee", &[("Damage", "+10%"), ("Critical", "+20"), ("Pierce", "+2%")]),
            with("Alpha", &[("Damage", "+10%"), ("Critical", "+20")]),
        ];
        sort_items(&mut items, SortKey::Damage);
        assert_eq!(order(&items), vec!["Yankee", "Alpha", "Zulu"]);
    }

    #[test]
    fn test_resistance_keys() {
        let mut items = vec![
            with("Thin", &[("Resistance", "+5%"), ("Health", "+100")]),
            with("Thick", &[("Resistance", "+5%"), ("Health", "+300")]),
            with("Blocky", &[("Resistance", "+5%"), ("Health", "+300"), ("Critical Block", "+30")]),
            with("Walled", &[("Resistance", "+12%")]),
        ];
        sort_items(&mut items, SortKey::Resistance);
        assert_eq!(order(&items), vec!["Walled", "Blocky", "Thick", "Thin"]);
    }

    #[test]
    fn test_per_key_value_uses_first_sub_key() {
        let mut items = vec![
            GearItem::new("Split").with_bonus(
                "Damage",
                BonusValue::per_key([("Fire", "+3%"), ("Ice", "+50%")]),
            ),
            with("Flat", &[("Damage", "+4%")]),
        ];
        sort_items(&mut items, SortKey::Damage);
        assert_eq!(order(&items), vec!["Flat", "Split"]);
    }

    #[test]
    fn test_malformed_values_sort_as_zero() {
        let mut items = vec![
            with("Broken", &[("Damage", "lots")]),
            with("Negative", &[("Damage", "-1%")]),
            with("Absent", &[]),
        ];
        sort_items(&mut items, SortKey::Damage);
        assert_eq!(order(&items), vec!["Absent", "Broken", "Negative"]);
    }

    #[test]
    fn test_sort_borrowed_items() {
        let owned = vec![with("B", &[("Damage", "+1%")]), with("A", &[("Damage", "+2%")])];
        let mut view: Vec<&GearItem> = owned.iter().collect();
        sort_items(&mut view, SortKey::Damage);
        assert_eq!(view[0].name, "A");
        assert_eq!(owned[0].name, "B");
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("Damage".parse::<SortKey>().unwrap(), SortKey::Damage);
        assert_eq!(" resistance ".parse::<SortKey>().unwrap(), SortKey::Resistance);
        assert!("price".parse::<SortKey>().is_err());
    }
}
