use crate::loadout::Loadout;
use crate::ResolveError;
use gear_core::{CatalogSet, GearCategory, GearItem};
use stat_core::Selection;

fn lookup<'a>(
    catalogs: &'a CatalogSet,
    category: GearCategory,
    name: &str,
) -> Result<&'a GearItem, ResolveError> {
    let items = catalogs
        .get(category)
        .ok_or_else(|| ResolveError::MissingCatalog(category.to_string()))?;
    items
        .iter()
        .find(|item| item.name == name)
        .ok_or_else(|| ResolveError::UnknownItem {
            category: category.to_string(),
            name: name.to_string(),
        })
}

/// Build a selection for a loadout, borrowing items from the catalogs
///
/// Jewels are only accepted when the selected gear grants sockets, and
/// never more jewels than sockets.
pub fn resolve<'a>(
    loadout: &Loadout,
    catalogs: &'a CatalogSet,
) -> Result<Selection<'a>, ResolveError> {
    let mut selection = Selection::new();

    for (&category, name) in &loadout.gear {
        selection.equip(category, lookup(catalogs, category, name)?);
    }

    if !loadout.jewels.is_empty() {
        let sockets = selection.total_sockets();
        if sockets == 0 {
            return Err(ResolveError::NoSockets);
        }
        if loadout.jewels.len() > sockets as usize {
            return Err(ResolveError::TooManyJewels {
                selected: loadout.jewels.len(),
                sockets,
            });
        }
        for name in &loadout.jewels {
            selection.socket(lookup(catalogs, GearCategory::Jewels, name)?);
        }
    }

    for (index, slot) in loadout.talents.iter().enumerate() {
        selection.set_talent(index, slot.clone());
    }

    tracing::debug!(id = %loadout.id, sockets = selection.total_sockets(), "resolved loadout");
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stat_core::PetTalents;
    use std::collections::BTreeMap;

    fn catalogs() -> CatalogSet {
        let mut set = CatalogSet::new();
        set.insert(
            GearCategory::Hats,
            vec![
                GearItem::new("Socketed Hat").with_sockets(2),
                GearItem::new("Bare Hat"),
            ],
        );
        set.insert(
            GearCategory::Jewels,
            vec![GearItem::new("Opal"), GearItem::new("Pin")],
        );
        set
    }

    fn loadout(hat: &str, jewels: &[&str]) -> Loadout {
        let mut gear = BTreeMap::new();
        gear.insert(GearCategory::Hats, hat.to_string());
        Loadout {
            id: "test".to_string(),
            level: None,
            school: None,
            gear,
            jewels: jewels.iter().map(|j| j.to_string()).collect(),
            talents: PetTalents::default(),
        }
    }

    #[test]
    fn test_resolve_with_jewels() {
        let set = catalogs();
        let selection = resolve(&loadout("Socketed Hat", &["Opal", "Pin"]), &set).unwrap();
        assert_eq!(selection.jewels().len(), 2);
        assert_eq!(
            selection.gear(GearCategory::Hats).map(|i| i.name.as_str()),
            Some("Socketed Hat")
        );
    }

    #[test]
    fn test_jewels_refused_without_sockets() {
        let set = catalogs();
        let result = resolve(&loadout("Bare Hat", &["Opal"]), &set);
        assert!(matches!(result, Err(ResolveError::NoSockets)));
    }

    #[test]
    fn test_no_jewels_without_sockets_is_fine() {
        let set = catalogs();
        assert!(resolve(&loadout("Bare Hat", &[]), &set).is_ok());
    }

    #[test]
    fn test_too_many_jewels() {
        let set = catalogs();
        let result = resolve(&loadout("Socketed Hat", &["Opal", "Pin", "Opal"]), &set);
        assert!(matches!(
            result,
            Err(ResolveError::TooManyJewels { selected: 3, sockets: 2 })
        ));
    }

    #[test]
    fn test_unknown_item() {
        let set = catalogs();
        let result = resolve(&loadout("Crown", &[]), &set);
        assert!(matches!(result, Err(ResolveError::UnknownItem { .. })));
    }

    #[test]
    fn test_missing_catalog() {
        let set = CatalogSet::new();
        let result = resolve(&loadout("Socketed Hat", &[]), &set);
        assert!(matches!(result, Err(ResolveError::MissingCatalog(_))));
    }
}
