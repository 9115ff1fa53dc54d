use crate::config::{GearChoice, LoadoutFileConfig, MagnitudeConfig, TalentConfig};
use crate::ResolveError;
use gear_core::{GearCategory, LevelBracket, School};
use stat_core::{PetTalentSlot, PetTalents, PET_TALENT_SLOTS};
use std::collections::BTreeMap;

/// A validated loadout: item names per category, jewel names, and talents
#[derive(Debug, Clone)]
pub struct Loadout {
    pub id: String,
    /// Character level, used to suggest a catalog bracket
    pub level: Option<u32>,
    pub school: Option<School>,
    pub gear: BTreeMap<GearCategory, String>,
    pub jewels: Vec<String>,
    pub talents: PetTalents,
}

impl Loadout {
    /// Create a loadout from its TOML configuration
    pub fn from_config(config: LoadoutFileConfig) -> Result<Self, ResolveError> {
        let school = match config.loadout.school.as_deref() {
            None => None,
            Some(name) => Some(School::parse(name).ok_or_else(|| {
                ResolveError::InvalidLoadout(format!("unknown school '{}'", name))
            })?),
        };

        let mut gear = BTreeMap::new();
        let mut jewels = Vec::new();
        for (key, choice) in config.gear {
            let category = GearCategory::parse(&key)
                .ok_or_else(|| ResolveError::InvalidCategory(key.clone()))?;
            match (category.is_jewel(), choice) {
                (true, GearChoice::One(name)) => jewels.push(name),
                (true, GearChoice::Many(names)) => jewels.extend(names),
                (false, GearChoice::One(name)) => {
                    gear.insert(category, name);
                }
                (false, GearChoice::Many(_)) => {
                    return Err(ResolveError::InvalidLoadout(format!(
                        "{} takes a single item",
                        category
                    )));
                }
            }
        }

        if config.talents.len() > PET_TALENT_SLOTS {
            return Err(ResolveError::InvalidLoadout(format!(
                "{} talents configured, at most {} allowed",
                config.talents.len(),
                PET_TALENT_SLOTS
            )));
        }
        let mut talents = PetTalents::default();
        for (slot, talent) in talents.iter_mut().zip(config.talents) {
            *slot = talent_slot(talent);
        }

        Ok(Loadout {
            id: config.loadout.id,
            level: config.loadout.level,
            school,
            gear,
            jewels,
            talents,
        })
    }

    /// Catalog bracket for the configured level, if any
    pub fn bracket(&self) -> Option<LevelBracket> {
        self.level.and_then(LevelBracket::for_level)
    }
}

fn talent_slot(config: TalentConfig) -> PetTalentSlot {
    let raw = match config.magnitude {
        MagnitudeConfig::Integer(v) => v.to_string(),
        MagnitudeConfig::Float(v) => v.to_string(),
        MagnitudeConfig::Text(raw) => raw,
    };
    PetTalentSlot::from_input(&config.talent_type, &raw, config.school.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_text: &str) -> Result<Loadout, ResolveError> {
        let config: LoadoutFileConfig = toml::from_str(toml_text).unwrap();
        Loadout::from_config(config)
    }

    #[test]
    fn test_full_loadout() {
        let loadout = parse(
            r#"
[loadout]
id = "storm_pvp"
level = 150
school = "Storm"

[gear]
hats = "Hat of the Tempest"
Robe = "Robe of the Tempest"
jewels = ["Storm Opal", "Health Pin"]

[[talents]]
type = "damage"
magnitude = 5
school = "storm"

[[talents]]
type = "health"
magnitude = "+120"
"#,
        )
        .unwrap();

        assert_eq!(loadout.id, "storm_pvp");
        assert_eq!(loadout.school, Some(School::Storm));
        assert_eq!(loadout.bracket(), LevelBracket::for_level(150));
        let chosen = |category: GearCategory| loadout.gear.get(&category).map(String::as_str);
        assert_eq!(chosen(GearCategory::Hats), Some("Hat of the Tempest"));
        assert_eq!(chosen(GearCategory::Robes), Some("Robe of the Tempest"));
        assert_eq!(loadout.jewels, vec!["Storm Opal", "Health Pin"]);
        assert_eq!(loadout.talents[0].magnitude, Some(5.0));
        assert_eq!(loadout.talents[0].school.as_deref(), Some("storm"));
        assert_eq!(loadout.talents[1].magnitude, Some(120.0));
        assert!(loadout.talents[2].is_empty());
    }

    #[test]
    fn test_unknown_category() {
        let result = parse(
            r#"
[loadout]
id = "x"

[gear]
belt = "Rope"
"#,
        );
        assert!(matches!(result, Err(ResolveError::InvalidCategory(_))));
    }

    #[test]
    fn test_list_for_single_slot() {
        let result = parse(
            r#"
[loadout]
id = "x"

[gear]
wands = ["A", "B"]
"#,
        );
        assert!(matches!(result, Err(ResolveError::InvalidLoadout(_))));
    }

    #[test]
    fn test_too_many_talents() {
        let mut text = String::from("[loadout]\nid = \"x\"\n");
        for _ in 0..6 {
            text.push_str("\n[[talents]]\ntype = \"health\"\nmagnitude = 1\n");
        }
        assert!(matches!(parse(&text), Err(ResolveError::InvalidLoadout(_))));
    }

    #[test]
    fn test_unknown_school() {
        let result = parse("[loadout]\nid = \"x\"\nschool = \"astral\"\n");
        assert!(matches!(result, Err(ResolveError::InvalidLoadout(_))));
    }

    #[test]
    fn test_non_numeric_magnitude_leaves_slot_empty() {
        let loadout = parse(
            r#"
[loadout]
id = "x"

[[talents]]
type = "mana"
magnitude = "a lot"
"#,
        )
        .unwrap();
        assert!(loadout.talents[0].is_empty());
    }
}
