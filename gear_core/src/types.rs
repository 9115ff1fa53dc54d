use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight combat schools, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum School {
    Fire,
    Ice,
    Storm,
    Myth,
    Life,
    Death,
    Balance,
    Shadow,
}

impl School {
    /// Number of schools
    pub const COUNT: usize = 8;

    /// Get all schools in display order
    pub fn all() -> &'static [School] {
        &[
            School::Fire,
            School::Ice,
            School::Storm,
            School::Myth,
            School::Life,
            School::Death,
            School::Balance,
            School::Shadow,
        ]
    }

    /// Position of this school in display order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase identifier as it appears in catalog sub-keys
    pub fn as_str(self) -> &'static str {
        match self {
            School::Fire => "fire",
            School::Ice => "ice",
            School::Storm => "storm",
            School::Myth => "myth",
            School::Life => "life",
            School::Death => "death",
            School::Balance => "balance",
            School::Shadow => "shadow",
        }
    }

    /// Case-insensitive lookup, ignoring surrounding whitespace
    pub fn parse(name: &str) -> Option<School> {
        let name = name.trim();
        School::all()
            .iter()
            .copied()
            .find(|school| school.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for School {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            School::Fire => write!(f, "Fire"),
            School::Ice => write!(f, "Ice"),
            School::Storm => write!(f, "Storm"),
            School::Myth => write!(f, "Myth"),
            School::Life => write!(f, "Life"),
            School::Death => write!(f, "Death"),
            School::Balance => write!(f, "Balance"),
            School::Shadow => write!(f, "Shadow"),
        }
    }
}

impl FromStr for School {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        School::parse(s).ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// Gear categories, each backed by its own catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GearCategory {
    Amulet,
    Athames,
    Boots,
    Decks,
    Hats,
    Jewels,
    Rings,
    Robes,
    Wands,
}

impl GearCategory {
    /// Get all categories
    pub fn all() -> &'static [GearCategory] {
        &[
            GearCategory::Amulet,
            GearCategory::Athames,
            GearCategory::Boots,
            GearCategory::Decks,
            GearCategory::Hats,
            GearCategory::Jewels,
            GearCategory::Rings,
            GearCategory::Robes,
            GearCategory::Wands,
        ]
    }

    /// Categories worn in a gear slot (everything except jewels)
    pub fn equipment() -> impl Iterator<Item = GearCategory> {
        Self::all().iter().copied().filter(|c| !c.is_jewel())
    }

    /// Jewels occupy sockets rather than a gear slot
    pub fn is_jewel(self) -> bool {
        matches!(self, GearCategory::Jewels)
    }

    /// Catalog name, also used for catalog file names
    pub fn as_str(self) -> &'static str {
        match self {
            GearCategory::Amulet => "Amulet",
            GearCategory::Athames => "Athames",
            GearCategory::Boots => "Boots",
            GearCategory::Decks => "Decks",
            GearCategory::Hats => "Hats",
            GearCategory::Jewels => "Jewels",
            GearCategory::Rings => "Rings",
            GearCategory::Robes => "Robes",
            GearCategory::Wands => "Wands",
        }
    }

    /// Stem of the published catalog file; the amulet catalog is
    /// published under its plural name
    pub fn file_stem(self) -> &'static str {
        match self {
            GearCategory::Amulet => "Amulets",
            other => other.as_str(),
        }
    }

    /// Case-insensitive lookup that also accepts the singular/plural form
    /// ("hat", "amulets", "Wand")
    pub fn parse(name: &str) -> Option<GearCategory> {
        let name = name.trim();
        let singular = name.strip_suffix('s').unwrap_or(name);
        GearCategory::all().iter().copied().find(|category| {
            let canonical = category.as_str();
            let canonical_singular = canonical.strip_suffix('s').unwrap_or(canonical);
            canonical.eq_ignore_ascii_case(name)
                || canonical_singular.eq_ignore_ascii_case(singular)
        })
    }
}

impl fmt::Display for GearCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GearCategory {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GearCategory::parse(s).ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// A name that did not match any known school or category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown name: {0}")]
pub struct UnknownName(pub String);
