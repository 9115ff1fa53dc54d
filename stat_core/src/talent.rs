//! Pet talent slots

use crate::types::{ScalarStat, SchoolStat};
use gear_core::normalize::parse_leading_decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of pet talent slots
pub const PET_TALENT_SLOTS: usize = 5;

/// The five pet talent slots, in order
pub type PetTalents = [PetTalentSlot; PET_TALENT_SLOTS];

/// Recognized pet talent types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TalentType {
    Damage,
    Resistance,
    Accuracy,
    CriticalRating,
    CriticalBlockRating,
    ArmorPiercing,
    PipConversion,
    StunResistance,
    IncomingHealing,
    OutgoingHealing,
    PowerPips,
    ShadowPipBonus,
    Archmastery,
    Health,
    Mana,
    Energy,
}

/// Where a talent's magnitude lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TalentTarget {
    School(SchoolStat),
    Scalar(ScalarStat),
}

impl TalentType {
    pub fn all() -> &'static [TalentType] {
        &[
            TalentType::Damage,
            TalentType::Resistance,
            TalentType::Accuracy,
            TalentType::CriticalRating,
            TalentType::CriticalBlockRating,
            TalentType::ArmorPiercing,
            TalentType::PipConversion,
            TalentType::StunResistance,
            TalentType::IncomingHealing,
            TalentType::OutgoingHealing,
            TalentType::PowerPips,
            TalentType::ShadowPipBonus,
            TalentType::Archmastery,
            TalentType::Health,
            TalentType::Mana,
            TalentType::Energy,
        ]
    }

    /// Name as offered in the talent picker
    pub fn as_str(self) -> &'static str {
        match self {
            TalentType::Damage => "damage",
            TalentType::Resistance => "resistance",
            TalentType::Accuracy => "accuracy",
            TalentType::CriticalRating => "critical rating",
            TalentType::CriticalBlockRating => "critical block rating",
            TalentType::ArmorPiercing => "armor piercing",
            TalentType::PipConversion => "pip conversion",
            TalentType::StunResistance => "stun resistance",
            TalentType::IncomingHealing => "incoming healing",
            TalentType::OutgoingHealing => "outgoing healing",
            TalentType::PowerPips => "power pips",
            TalentType::ShadowPipBonus => "shadow pip bonus",
            TalentType::Archmastery => "archmastery",
            TalentType::Health => "health",
            TalentType::Mana => "mana",
            TalentType::Energy => "energy",
        }
    }

    /// Case-insensitive lookup, ignoring surrounding whitespace
    pub fn parse(name: &str) -> Option<TalentType> {
        let name = name.trim().to_lowercase();
        TalentType::all().iter().copied().find(|t| t.as_str() == name)
    }

    pub fn target(self) -> TalentTarget {
        match self {
            TalentType::Damage => TalentTarget::School(SchoolStat::PercentDamage),
            TalentType::Resistance => TalentTarget::School(SchoolStat::PercentResistance),
            TalentType::Accuracy => TalentTarget::School(SchoolStat::Accuracy),
            TalentType::CriticalRating => TalentTarget::School(SchoolStat::Critical),
            TalentType::CriticalBlockRating => TalentTarget::School(SchoolStat::CriticalBlock),
            TalentType::ArmorPiercing => TalentTarget::School(SchoolStat::ArmorPiercing),
            TalentType::PipConversion => TalentTarget::School(SchoolStat::PipConversion),
            TalentType::StunResistance => TalentTarget::Scalar(ScalarStat::StunResistance),
            TalentType::IncomingHealing => TalentTarget::Scalar(ScalarStat::IncomingHealing),
            TalentType::OutgoingHealing => TalentTarget::Scalar(ScalarStat::OutgoingHealing),
            TalentType::PowerPips => TalentTarget::Scalar(ScalarStat::PowerPips),
            TalentType::ShadowPipBonus => TalentTarget::Scalar(ScalarStat::ShadowPips),
            TalentType::Archmastery => TalentTarget::Scalar(ScalarStat::Archmastery),
            TalentType::Health => TalentTarget::Scalar(ScalarStat::Health),
            TalentType::Mana => TalentTarget::Scalar(ScalarStat::Mana),
            TalentType::Energy => TalentTarget::Scalar(ScalarStat::Energy),
        }
    }

    /// Whether the talent may name a school
    pub fn is_school_scoped(self) -> bool {
        matches!(self.target(), TalentTarget::School(_))
    }
}

impl fmt::Display for TalentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pet talent slot as selected by the user
///
/// Type and school are kept as entered; they are resolved when the slot is
/// applied so an unrecognized entry can be reported without failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetTalentSlot {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub talent_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
}

impl PetTalentSlot {
    pub fn new(talent_type: impl Into<String>, magnitude: f64) -> Self {
        PetTalentSlot {
            talent_type: Some(talent_type.into()),
            magnitude: Some(magnitude),
            school: None,
        }
    }

    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.school = Some(school.into());
        self
    }

    /// Build a slot from raw form input. A magnitude with no leading number
    /// leaves the slot without one, so it is skipped when applied.
    pub fn from_input(talent_type: &str, raw_magnitude: &str, school: Option<&str>) -> Self {
        let talent_type = talent_type.trim();
        PetTalentSlot {
            talent_type: (!talent_type.is_empty()).then(|| talent_type.to_string()),
            magnitude: parse_leading_decimal(raw_magnitude),
            school: school.map(str::to_string),
        }
    }

    /// Whether the slot contributes nothing: no type or no usable magnitude
    pub fn is_empty(&self) -> bool {
        let has_type = self.talent_type.as_deref().is_some_and(|t| !t.trim().is_empty());
        let has_magnitude = self.magnitude.is_some_and(|m| !m.is_nan());
        !(has_type && has_magnitude)
    }
}
