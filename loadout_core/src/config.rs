use serde::Deserialize;
use std::collections::BTreeMap;

/// TOML configuration for a loadout file
#[derive(Debug, Deserialize)]
pub struct LoadoutFileConfig {
    pub loadout: LoadoutConfig,
    /// Category name to chosen item; `jewels` takes a list
    #[serde(default)]
    pub gear: BTreeMap<String, GearChoice>,
    #[serde(default)]
    pub talents: Vec<TalentConfig>,
}

/// Configuration for the loadout itself
#[derive(Debug, Deserialize)]
pub struct LoadoutConfig {
    pub id: String,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub school: Option<String>,
}

/// A gear entry names one item, or several for jewels
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GearChoice {
    One(String),
    Many(Vec<String>),
}

/// Configuration for a single pet talent slot
#[derive(Debug, Deserialize)]
pub struct TalentConfig {
    #[serde(rename = "type")]
    pub talent_type: String,
    pub magnitude: MagnitudeConfig,
    #[serde(default)]
    pub school: Option<String>,
}

/// Magnitude can be a number or text as typed into the form
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MagnitudeConfig {
    Integer(i64),
    Float(f64),
    Text(String),
}
