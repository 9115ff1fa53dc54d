//! Level and school filtering of a catalog
//!
//! Filtering borrows from the cached catalog and never reorders or mutates it.

use crate::item::{GearItem, LevelRequirement};
use crate::normalize::parse_leading_integer;
use crate::types::School;
use serde::{Deserialize, Serialize};

/// A closed character-level range used to narrow catalogs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBracket {
    pub min: u32,
    pub max: u32,
}

/// The fixed, contiguous brackets covering levels 1 through 170
pub const LEVEL_BRACKETS: [LevelBracket; 6] = [
    LevelBracket { min: 1, max: 29 },
    LevelBracket { min: 30, max: 59 },
    LevelBracket { min: 60, max: 99 },
    LevelBracket { min: 100, max: 129 },
    LevelBracket { min: 130, max: 159 },
    LevelBracket { min: 160, max: 170 },
];

impl LevelBracket {
    /// Bracket containing a character level; `None` outside 1..=170
    pub fn for_level(level: u32) -> Option<LevelBracket> {
        LEVEL_BRACKETS.iter().copied().find(|b| b.contains(level))
    }

    /// Bracket for a typed level ("45", " 130 ", "12abc"); `None` when the
    /// text has no leading integer or falls outside every bracket
    pub fn from_input(text: &str) -> Option<LevelBracket> {
        let level = parse_leading_integer(text)?;
        Self::for_level(u32::try_from(level).ok()?)
    }

    pub fn contains(&self, level: u32) -> bool {
        level >= self.min && level <= self.max
    }
}

/// Whether an item is offered to a character in the given bracket
///
/// "any level" always passes; otherwise the listed level (ignoring a trailing
/// "+") must fall inside the bracket. Missing or unparsable levels fail.
pub fn level_allows(item: &GearItem, bracket: LevelBracket) -> bool {
    match item.level_requirement() {
        Some(LevelRequirement::AnyLevel) => true,
        Some(requirement) => requirement.level().is_some_and(|level| bracket.contains(level)),
        None => false,
    }
}

/// Whether an item is usable by the given school
///
/// An excluded school is always rejected, even for "any" items. Otherwise
/// "any" passes and anything else must name the school.
pub fn school_allows(item: &GearItem, school: School) -> bool {
    if item
        .excluded_schools()
        .iter()
        .any(|excluded| excluded == school.as_str())
    {
        tracing::debug!(item = %item.name, %school, "excluded: school cannot use item");
        return false;
    }
    item.school_type.is_any() || item.school_type.matches(school)
}

/// Items valid for an optional level bracket and optional school, in catalog order
pub fn filter_items<'a>(
    items: &'a [GearItem],
    bracket: Option<LevelBracket>,
    school: Option<School>,
) -> Vec<&'a GearItem> {
    items
        .iter()
        .filter(|item| bracket.map_or(true, |b| level_allows(item, b)))
        .filter(|item| school.map_or(true, |s| school_allows(item, s)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leveled(name: &str, level: &str) -> GearItem {
        GearItem::new(name).with_level(level).with_school("Any")
    }

    fn names(items: &[&GearItem]) -> Vec<String> {
        items.iter().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn test_brackets_are_contiguous() {
        for pair in LEVEL_BRACKETS.windows(2) {
            assert_eq!(pair[0].max + 1, pair[1].min);
        }
        assert_eq!(LEVEL_BRACKETS[0].min, 1);
        assert_eq!(LEVEL_BRACKETS[5].max, 170);
    }

    #[test]
    fn test_bracket_for_level() {
        assert_eq!(LevelBracket::for_level(1), Some(LevelBracket { min: 1, max: 29 }));
        assert_eq!(LevelBracket::for_level(59), Some(LevelBracket { min: 30, max: 59 }));
        assert_eq!(LevelBracket::for_level(160), Some(LevelBracket { min: 160, max: 170 }));
        assert_eq!(LevelBracket::for_level(0), None);
        assert_eq!(LevelBracket::for_level(171), None);
    }

    #[test]
    fn test_bracket_from_input() {
        assert_eq!(LevelBracket::from_input(" 45 "), LevelBracket::for_level(45));
        assert_eq!(LevelBracket::from_input("abc"), None);
        assert_eq!(LevelBracket::from_input("-3"), None);
    }

    #[test]
    fn test_level_filtering() {
        let items = vec![
            leveled("Mid", "45"),
            leveled("Next", "60"),
            leveled("Anywhere", "any level"),
            leveled("Plus", "30+"),
            GearItem::new("Unknown").with_school("Any"),
            leveled("Garbled", "soon"),
        ];
        let bracket = LevelBracket { min: 30, max: 59 };

        let kept = filter_items(&items, Some(bracket), None);
        assert_eq!(names(&kept), vec!["Mid", "Anywhere", "Plus"]);
    }

    #[test]
    fn test_no_bracket_keeps_everything() {
        let items = vec![leveled("A", "45"), GearItem::new("B")];
        assert_eq!(filter_items(&items, None, None).len(), 2);
    }

    #[test]
    fn test_school_filtering() {
        let items = vec![
            GearItem::new("Fire Hat").with_school("Fire"),
            GearItem::new("Ice Hat").with_school("Ice"),
            GearItem::new("Universal Hat").with_school("Any"),
            GearItem::new("Fire Banned").with_school("Fire").with_excluded("Fire"),
            GearItem::new("No School"),
        ];

        let kept = filter_items(&items, None, Some(School::Fire));
        assert_eq!(names(&kept), vec!["Fire Hat", "Universal Hat"]);
    }

    #[test]
    fn test_exclusion_applies_to_non_any_items() {
        let item = GearItem::new("Robe").with_school("Fire").with_excluded("Ice, Fire");
        assert!(!school_allows(&item, School::Fire));
        assert!(!school_allows(&item, School::Ice));
    }

    #[test]
    fn test_exclusion_beats_any() {
        let item = GearItem::new("Shared Amulet").with_school("any").with_excluded("Fire");
        assert!(!school_allows(&item, School::Fire));
        assert!(school_allows(&item, School::Ice));
    }

    #[test]
    fn test_no_school_keeps_everything() {
        let items = vec![GearItem::new("a").with_school("Fire"), GearItem::new("b")];
        assert_eq!(filter_items(&items, None, None).len(), 2);
    }

    #[test]
    fn test_filter_does_not_touch_source() {
        let items = vec![leveled("B", "10"), leveled("A", "45")];
        let _ = filter_items(&items, LevelBracket::for_level(45), Some(School::Fire));
        assert_eq!(items[0].name, "B");
        assert_eq!(items.len(), 2);
    }
}
