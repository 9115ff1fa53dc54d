//! Stat identifiers and per-school value storage

use gear_core::School;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Stats tracked separately for each of the eight schools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolStat {
    PercentDamage,
    FlatDamage,
    PercentResistance,
    FlatResistance,
    Accuracy,
    Critical,
    CriticalBlock,
    ArmorPiercing,
    PipConversion,
}

impl SchoolStat {
    pub const COUNT: usize = 9;

    /// Get all school-scoped stats in projection order
    pub fn all() -> &'static [SchoolStat] {
        &[
            SchoolStat::PercentDamage,
            SchoolStat::FlatDamage,
            SchoolStat::PercentResistance,
            SchoolStat::FlatResistance,
            SchoolStat::Accuracy,
            SchoolStat::Critical,
            SchoolStat::CriticalBlock,
            SchoolStat::ArmorPiercing,
            SchoolStat::PipConversion,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            SchoolStat::PercentDamage => "Damage",
            SchoolStat::FlatDamage => "Flat Damage",
            SchoolStat::PercentResistance => "Resistance",
            SchoolStat::FlatResistance => "Flat Resistance",
            SchoolStat::Accuracy => "Accuracy",
            SchoolStat::Critical => "Critical",
            SchoolStat::CriticalBlock => "Critical Block",
            SchoolStat::ArmorPiercing => "Armor Piercing",
            SchoolStat::PipConversion => "Pip Conversion",
        }
    }
}

impl fmt::Display for SchoolStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stats with a single total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarStat {
    StunResistance,
    IncomingHealing,
    OutgoingHealing,
    PowerPips,
    ShadowPips,
    Archmastery,
    Health,
    Mana,
    Energy,
}

impl ScalarStat {
    pub const COUNT: usize = 9;

    /// Get all scalar stats in projection order
    pub fn all() -> &'static [ScalarStat] {
        &[
            ScalarStat::StunResistance,
            ScalarStat::IncomingHealing,
            ScalarStat::OutgoingHealing,
            ScalarStat::PowerPips,
            ScalarStat::ShadowPips,
            ScalarStat::Archmastery,
            ScalarStat::Health,
            ScalarStat::Mana,
            ScalarStat::Energy,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            ScalarStat::StunResistance => "Stun Resistance",
            ScalarStat::IncomingHealing => "Incoming Healing",
            ScalarStat::OutgoingHealing => "Outgoing Healing",
            ScalarStat::PowerPips => "Power Pip",
            ScalarStat::ShadowPips => "Shadow Pip",
            ScalarStat::Archmastery => "Archmastery",
            ScalarStat::Health => "Health",
            ScalarStat::Mana => "Mana",
            ScalarStat::Energy => "Energy",
        }
    }

    /// Whether this stat is shown with the vitals rather than the other stats
    pub fn is_vital(self) -> bool {
        matches!(self, ScalarStat::Health | ScalarStat::Mana | ScalarStat::Energy)
    }
}

impl fmt::Display for ScalarStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One running total per school
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SchoolValues([f64; School::COUNT]);

impl SchoolValues {
    pub fn get(&self, school: School) -> f64 {
        self.0[school.index()]
    }

    pub fn add(&mut self, school: School, value: f64) {
        self.0[school.index()] += value;
    }

    /// Add the same value to every school
    pub fn add_all(&mut self, value: f64) {
        for total in &mut self.0 {
            *total += value;
        }
    }

    /// Values in school display order
    pub fn iter(&self) -> impl Iterator<Item = (School, f64)> + '_ {
        School::all().iter().map(move |&school| (school, self.get(school)))
    }
}

impl Index<School> for SchoolValues {
    type Output = f64;

    fn index(&self, school: School) -> &f64 {
        &self.0[school.index()]
    }
}

impl Serialize for SchoolValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(School::COUNT))?;
        for (school, value) in self.iter() {
            map.serialize_entry(school.as_str(), &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_order_matches_index() {
        for (i, stat) in SchoolStat::all().iter().enumerate() {
            assert_eq!(stat.index(), i);
        }
        for (i, stat) in ScalarStat::all().iter().enumerate() {
            assert_eq!(stat.index(), i);
        }
        assert_eq!(SchoolStat::all().len(), SchoolStat::COUNT);
        assert_eq!(ScalarStat::all().len(), ScalarStat::COUNT);
    }

    #[test]
    fn test_school_values_add() {
        let mut values = SchoolValues::default();
        values.add_all(5.0);
        values.add(School::Fire, 10.0);
        assert!((values[School::Fire] - 15.0).abs() < f64::EPSILON);
        assert!((values.get(School::Shadow) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_school_values_serialize_in_school_order() {
        let mut values = SchoolValues::default();
        values.add(School::Ice, 3.0);
        let json = serde_json::to_string(&values).unwrap();
        assert!(json.starts_with(r#"{"fire":0.0,"ice":3.0,"storm""#));
    }
}
