use crate::normalize::{normalize, parse_leading_integer};
use crate::types::{GearCategory, School};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bonus kind under which the catalog records school restrictions
pub const EXCLUDED_SCHOOLS_KIND: &str = "Wizards Cannot Use";

/// One equippable catalog entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GearItem {
    /// Unique key within its category
    #[serde(rename = "Name")]
    pub name: String,
    /// Optional label shown instead of the name
    #[serde(rename = "displayName", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Category the item was loaded from (catalog documents omit it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<GearCategory>,
    /// Level requirement text: "45", "45+", or "any level"
    #[serde(
        default,
        deserialize_with = "lenient_text_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub level: Option<String>,
    /// School restriction; "any" for unrestricted
    #[serde(rename = "School Type", default, skip_serializing_if = "SchoolType::is_missing")]
    pub school_type: SchoolType,
    /// Comma-separated schools barred from using the item
    #[serde(
        rename = "Wizards Cannot Use",
        default,
        deserialize_with = "lenient_text_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub excluded: Option<String>,
    /// Number of jewel sockets the item grants
    #[serde(default, deserialize_with = "lenient_socket_count")]
    pub sockets: u32,
    /// Bonuses in catalog order
    #[serde(default, deserialize_with = "flatten_bonus_objects")]
    pub bonuses: Vec<BonusEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub tradeable: bool,
    #[serde(default)]
    pub no_auction: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl GearItem {
    /// Create an item with a name and no other data
    pub fn new(name: impl Into<String>) -> Self {
        GearItem {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.school_type = SchoolType::Single(school.into());
        self
    }

    pub fn with_excluded(mut self, schools: impl Into<String>) -> Self {
        self.excluded = Some(schools.into());
        self
    }

    pub fn with_sockets(mut self, sockets: u32) -> Self {
        self.sockets = sockets;
        self
    }

    pub fn with_bonus(mut self, kind: impl Into<String>, value: BonusValue) -> Self {
        self.bonuses.push(BonusEntry::new(kind, value));
        self
    }

    /// Text shown to the user
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Parsed level requirement, if the level text is usable
    pub fn level_requirement(&self) -> Option<LevelRequirement> {
        self.level.as_deref().and_then(LevelRequirement::parse)
    }

    /// First bonus entry of the given kind
    pub fn bonus(&self, kind: &str) -> Option<&BonusValue> {
        self.bonuses
            .iter()
            .find(|entry| entry.kind == kind)
            .map(|entry| &entry.value)
    }

    /// Single comparable number for a bonus kind: the first entry's value,
    /// or the value under its first sub-key. Missing or malformed reads as `0`.
    pub fn bonus_value(&self, kind: &str) -> f64 {
        self.bonus(kind).map(BonusValue::headline).unwrap_or(0.0)
    }

    /// Lowercased schools this item is barred from, from both the item field
    /// and any restriction recorded among its bonuses
    pub fn excluded_schools(&self) -> Vec<String> {
        let mut schools: Vec<String> = Vec::new();
        let from_bonuses = self
            .bonuses
            .iter()
            .filter(|entry| entry.kind == EXCLUDED_SCHOOLS_KIND)
            .flat_map(|entry| entry.value.texts());

        for list in self.excluded.as_deref().into_iter().chain(from_bonuses) {
            for school in list.split(',') {
                let school = school.trim().to_lowercase();
                if !school.is_empty() && !schools.contains(&school) {
                    schools.push(school);
                }
            }
        }
        schools
    }
}

impl AsRef<GearItem> for GearItem {
    fn as_ref(&self) -> &GearItem {
        self
    }
}

impl fmt::Display for GearItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "══ {} ══", self.label())?;
        if let Some(category) = self.category {
            writeln!(f, "{}", category)?;
        }
        if let Some(level) = &self.level {
            writeln!(f, "Level: {}", level)?;
        }
        if let SchoolType::Single(school) = &self.school_type {
            writeln!(f, "School: {}", school)?;
        }
        let excluded = self.excluded_schools();
        if !excluded.is_empty() {
            writeln!(f, "Cannot use: {}", excluded.join(", "))?;
        }
        if self.sockets > 0 {
            writeln!(f, "Sockets: {}", self.sockets)?;
        }
        if !self.bonuses.is_empty() {
            writeln!(f)?;
            writeln!(f, "Bonuses")?;
            for entry in &self.bonuses {
                writeln!(f, "  {}", entry)?;
            }
        }
        Ok(())
    }
}

/// Parsed level requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelRequirement {
    /// Usable at every level
    AnyLevel,
    /// "45" - the listed level
    Exactly(u32),
    /// "45+" - the listed level or above
    AtLeast(u32),
}

impl LevelRequirement {
    /// Parse level text; `None` when it carries no usable number
    pub fn parse(text: &str) -> Option<LevelRequirement> {
        let text = text.trim().to_lowercase();
        if text == "any level" {
            return Some(LevelRequirement::AnyLevel);
        }
        let at_least = text.contains('+');
        let stripped = text.replacen('+', "", 1);
        let level = parse_leading_integer(&stripped)?;
        let level = u32::try_from(level).ok()?;
        Some(if at_least {
            LevelRequirement::AtLeast(level)
        } else {
            LevelRequirement::Exactly(level)
        })
    }

    /// The listed level, if any
    pub fn level(self) -> Option<u32> {
        match self {
            LevelRequirement::AnyLevel => None,
            LevelRequirement::Exactly(level) | LevelRequirement::AtLeast(level) => Some(level),
        }
    }
}

/// School restriction as published: normally a single name, sometimes a list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchoolType {
    #[default]
    Missing,
    Single(String),
    Multiple(Vec<String>),
    /// Any other published shape; never matches a school
    Other(serde_json::Value),
}

impl SchoolType {
    pub fn is_missing(&self) -> bool {
        matches!(self, SchoolType::Missing)
    }

    /// Whether this is the "any" wildcard
    pub fn is_any(&self) -> bool {
        matches!(self, SchoolType::Single(s) if s.trim().eq_ignore_ascii_case("any"))
    }

    /// Whether this names exactly the given school. Lists never match.
    pub fn matches(&self, school: School) -> bool {
        matches!(self, SchoolType::Single(s) if s.trim().eq_ignore_ascii_case(school.as_str()))
    }
}

/// One bonus: a bonus-kind name and its value
#[derive(Debug, Clone, PartialEq)]
pub struct BonusEntry {
    /// Bonus-kind name, e.g. "Damage", "Health", "Power Pip"
    pub kind: String,
    pub value: BonusValue,
}

impl BonusEntry {
    pub fn new(kind: impl Into<String>, value: BonusValue) -> Self {
        BonusEntry {
            kind: kind.into(),
            value,
        }
    }
}

impl fmt::Display for BonusEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            BonusValue::Single(raw) => write!(f, "{}: {}", self.kind, raw),
            BonusValue::PerKey(pairs) => {
                let parts: Vec<String> = pairs
                    .iter()
                    .map(|(key, raw)| format!("{} {}", raw, key))
                    .collect();
                write!(f, "{}: {}", self.kind, parts.join(", "))
            }
        }
    }
}

/// A bonus value: one formatted number, or formatted numbers keyed by
/// school, "global", or another sub-key such as "incoming"
#[derive(Debug, Clone, PartialEq)]
pub enum BonusValue {
    Single(String),
    /// Sub-keys in catalog order
    PerKey(Vec<(String, String)>),
}

impl BonusValue {
    pub fn single(raw: impl Into<String>) -> Self {
        BonusValue::Single(raw.into())
    }

    pub fn per_key<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        BonusValue::PerKey(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Value used for ordering: the single value, or the first sub-key's value
    pub fn headline(&self) -> f64 {
        match self {
            BonusValue::Single(raw) => normalize(raw),
            BonusValue::PerKey(pairs) => {
                pairs.first().map(|(_, raw)| normalize(raw)).unwrap_or(0.0)
            }
        }
    }

    /// All raw texts carried by this value
    pub fn texts(&self) -> Vec<&str> {
        match self {
            BonusValue::Single(raw) => vec![raw.as_str()],
            BonusValue::PerKey(pairs) => pairs.iter().map(|(_, raw)| raw.as_str()).collect(),
        }
    }
}

// ============================================================================
// Lenient decoding
// ============================================================================

/// Any JSON scalar read back as text. Objects, arrays and null read as empty.
struct LenientText(String);

impl<'de> Deserialize<'de> for LenientText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(LenientText(scalar_text(&value).unwrap_or_default()))
    }
}

fn scalar_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(scalar_text(&value))
}

/// Socket counts are published as a number, a numeric string, or a list.
/// A list reads as its elements joined by commas, then the leading integer.
fn lenient_socket_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    let text = match &value {
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| scalar_text(item).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(","),
        other => scalar_text(other).unwrap_or_default(),
    };
    Ok(parse_leading_integer(&text)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0))
}

/// Each bonus object may hold several kinds; flatten them into entries in order
fn flatten_bonus_objects<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<BonusEntry>, D::Error> {
    struct BonusListVisitor;

    impl<'de> Visitor<'de> for BonusListVisitor {
        type Value = Vec<BonusEntry>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a list of bonus objects")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::new();
            while let Some(BonusObject(mut object)) = seq.next_element()? {
                entries.append(&mut object);
            }
            Ok(entries)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(BonusListVisitor)
}

/// One published bonus object; non-object elements read as empty
struct BonusObject(Vec<BonusEntry>);

impl<'de> Deserialize<'de> for BonusObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BonusObjectVisitor;

        impl<'de> Visitor<'de> for BonusObjectVisitor {
            type Value = BonusObject;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a bonus object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((kind, value)) = map.next_entry::<String, BonusValue>()? {
                    entries.push(BonusEntry { kind, value });
                }
                Ok(BonusObject(entries))
            }

            // Stray scalars and lists inside a bonus list carry no bonus
            fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
                Ok(BonusObject(Vec::new()))
            }

            fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
                Ok(BonusObject(Vec::new()))
            }

            fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
                Ok(BonusObject(Vec::new()))
            }

            fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
                Ok(BonusObject(Vec::new()))
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
                Ok(BonusObject(Vec::new()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(BonusObject(Vec::new()))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                while seq.next_element::<de::IgnoredAny>()?.is_some() {}
                Ok(BonusObject(Vec::new()))
            }
        }

        deserializer.deserialize_any(BonusObjectVisitor)
    }
}

impl<'de> Deserialize<'de> for BonusValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BonusValueVisitor;

        impl<'de> Visitor<'de> for BonusValueVisitor {
            type Value = BonusValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a formatted number or a map of formatted numbers")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(BonusValue::Single(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(BonusValue::Single(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(BonusValue::Single(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(BonusValue::Single(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(BonusValue::Single(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
                Ok(BonusValue::Single(String::new()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(BonusValue::Single(String::new()))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                // Not a published shape; consume it and contribute nothing
                while seq.next_element::<de::IgnoredAny>()?.is_some() {}
                Ok(BonusValue::Single(String::new()))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::new();
                while let Some((key, LenientText(raw))) = map.next_entry::<String, LenientText>()? {
                    pairs.push((key, raw));
                }
                Ok(BonusValue::PerKey(pairs))
            }
        }

        deserializer.deserialize_any(BonusValueVisitor)
    }
}

impl Serialize for BonusEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.kind, &self.value)?;
        map.end()
    }
}

impl Serialize for BonusValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BonusValue::Single(raw) => serializer.serialize_str(raw),
            BonusValue::PerKey(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (key, raw) in pairs {
                    map.serialize_entry(key, raw)?;
                }
                map.end()
            }
        }
    }
}
