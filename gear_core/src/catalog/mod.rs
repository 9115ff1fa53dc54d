//! Per-category catalogs and the filter/sort pipeline over them

mod filter;
mod sort;

pub use filter::{filter_items, level_allows, school_allows, LevelBracket, LEVEL_BRACKETS};
pub use sort::{compare_items, sort_items, SortKey};

use crate::item::GearItem;
use crate::types::{GearCategory, School};
use crate::CatalogError;
use std::collections::BTreeMap;
use std::path::Path;

/// Decoded catalogs, cached per category for the session
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    catalogs: BTreeMap<GearCategory, Vec<GearItem>>,
}

impl CatalogSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every category file found in a directory
    ///
    /// A category is read from `<Category>.json` or `<Category>_Data.json`,
    /// under either its catalog name or its published file stem
    /// (`Amulets_Data.json`). Missing files leave the category absent.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let mut set = Self::new();
        for &category in GearCategory::all() {
            let candidates = [
                dir.join(format!("{}.json", category.as_str())),
                dir.join(format!("{}_Data.json", category.as_str())),
                dir.join(format!("{}.json", category.file_stem())),
                dir.join(format!("{}_Data.json", category.file_stem())),
            ];
            if let Some(path) = candidates.iter().find(|p| p.is_file()) {
                set.load_file(category, path)?;
            }
        }
        Ok(set)
    }

    /// Load one category document from disk
    pub fn load_file(&mut self, category: GearCategory, path: &Path) -> Result<(), CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;
        let items: Vec<GearItem> = serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
            error: e,
            path: Some(path.to_path_buf()),
        })?;
        tracing::info!(%category, count = items.len(), path = %path.display(), "loaded catalog");
        self.insert(category, items);
        Ok(())
    }

    /// Decode one category document from a JSON string
    pub fn load_str(&mut self, category: GearCategory, json: &str) -> Result<(), CatalogError> {
        let items: Vec<GearItem> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse { error: e, path: None })?;
        self.insert(category, items);
        Ok(())
    }

    /// Cache a decoded catalog, stamping each item with its category
    pub fn insert(&mut self, category: GearCategory, mut items: Vec<GearItem>) {
        for item in &mut items {
            item.category = Some(category);
        }
        self.catalogs.insert(category, items);
    }

    /// Items of a category, in catalog order
    pub fn get(&self, category: GearCategory) -> Option<&[GearItem]> {
        self.catalogs.get(&category).map(Vec::as_slice)
    }

    /// Check if a category has been loaded
    pub fn contains(&self, category: GearCategory) -> bool {
        self.catalogs.contains_key(&category)
    }

    /// Loaded categories
    pub fn categories(&self) -> impl Iterator<Item = GearCategory> + '_ {
        self.catalogs.keys().copied()
    }

    /// Look up an item by its exact name
    pub fn find(&self, category: GearCategory, name: &str) -> Option<&GearItem> {
        self.get(category)?.iter().find(|item| item.name == name)
    }

    /// Filter then sort one category; the cached catalog is left untouched
    pub fn view(
        &self,
        category: GearCategory,
        bracket: Option<LevelBracket>,
        school: Option<School>,
        key: SortKey,
    ) -> Result<Vec<&GearItem>, CatalogError> {
        let items = self
            .get(category)
            .ok_or_else(|| CatalogError::MissingCategory(category.to_string()))?;
        let mut view = filter_items(items, bracket, school);
        sort_items(&mut view, key);
        Ok(view)
    }
}
