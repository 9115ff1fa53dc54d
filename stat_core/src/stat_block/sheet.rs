//! StatSheet - Immutable projection of a finished calculation

use super::aggregator::StatAccumulator;
use crate::types::{ScalarStat, SchoolStat, SchoolValues};
use gear_core::School;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// One projected row
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatRow {
    pub stat: &'static str,
    /// Set for school-scoped rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<School>,
    pub value: f64,
}

/// Final totals, detached from the accumulator that produced them
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatSheet {
    schools: [SchoolValues; SchoolStat::COUNT],
    scalars: [f64; ScalarStat::COUNT],
}

/// Reshape accumulated totals into a stat sheet
pub fn project(acc: &StatAccumulator) -> StatSheet {
    StatSheet {
        schools: *acc.school_totals(),
        scalars: *acc.scalar_totals(),
    }
}

impl StatSheet {
    /// Every row in fixed order: each school stat once per school, then
    /// each scalar stat
    pub fn rows(&self) -> Vec<StatRow> {
        let school_rows = SchoolStat::all().iter().flat_map(move |&stat| {
            self.school_values(stat).iter().map(move |(school, value)| StatRow {
                stat: stat.label(),
                school: Some(school),
                value,
            })
        });
        let scalar_rows = ScalarStat::all().iter().map(|&stat| StatRow {
            stat: stat.label(),
            school: None,
            value: self.scalar(stat),
        });
        school_rows.chain(scalar_rows).collect()
    }

    pub fn school_values(&self, stat: SchoolStat) -> &SchoolValues {
        &self.schools[stat.index()]
    }

    pub fn value(&self, stat: SchoolStat, school: School) -> f64 {
        self.schools[stat.index()].get(school)
    }

    pub fn scalar(&self, stat: ScalarStat) -> f64 {
        self.scalars[stat.index()]
    }
}

impl Serialize for StatSheet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SchoolStat::COUNT + ScalarStat::COUNT))?;
        for &stat in SchoolStat::all() {
            map.serialize_entry(stat.label(), self.school_values(stat))?;
        }
        for &stat in ScalarStat::all() {
            map.serialize_entry(stat.label(), &self.scalar(stat))?;
        }
        map.end()
    }
}

fn write_school_line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    values: &SchoolValues,
) -> fmt::Result {
    write!(f, "  {:<16}", label)?;
    for (school, value) in values.iter() {
        write!(f, " {}:{}", school, value)?;
    }
    writeln!(f)
}

impl fmt::Display for StatSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "══ Damage ══")?;
        write_school_line(f, "Percent", self.school_values(SchoolStat::PercentDamage))?;
        write_school_line(f, "Flat", self.school_values(SchoolStat::FlatDamage))?;

        writeln!(f, "══ Resistance ══")?;
        write_school_line(f, "Percent", self.school_values(SchoolStat::PercentResistance))?;
        write_school_line(f, "Flat", self.school_values(SchoolStat::FlatResistance))?;

        writeln!(f, "══ Offense ══")?;
        for &stat in &SchoolStat::all()[4..] {
            write_school_line(f, stat.label(), self.school_values(stat))?;
        }

        writeln!(f, "══ Other Stats ══")?;
        for &stat in ScalarStat::all().iter().filter(|s| !s.is_vital()) {
            writeln!(f, "  {:<16} {}", stat.label(), self.scalar(stat))?;
        }

        writeln!(f, "══ Vitals ══")?;
        for &stat in ScalarStat::all().iter().filter(|s| s.is_vital()) {
            writeln!(f, "  {:<16} {}", stat.label(), self.scalar(stat))?;
        }
        Ok(())
    }
}
