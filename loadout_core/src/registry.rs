use crate::config::LoadoutFileConfig;
use crate::loadout::Loadout;
use crate::resolve::resolve;
use crate::{ConfigError, ResolveError};
use gear_core::CatalogSet;
use stat_core::Selection;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Saved loadouts keyed by ID, loaded from a directory tree of TOML files
#[derive(Debug, Default)]
pub struct LoadoutRegistry {
    loadouts: BTreeMap<String, Loadout>,
    sources: BTreeMap<String, PathBuf>,
}

impl LoadoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.toml` file under `dir`, in path order
    ///
    /// A missing directory yields an empty registry. Two files declaring the
    /// same loadout ID are rejected.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut files = Vec::new();
        collect_toml_files(dir, &mut files)?;
        files.sort();

        let mut registry = Self::new();
        for path in &files {
            registry.add(read_loadout(path)?, path)?;
        }
        tracing::info!(count = registry.loadouts.len(), dir = %dir.display(), "loaded loadouts");
        Ok(registry)
    }

    /// Register a loadout read from `path`
    fn add(&mut self, loadout: Loadout, path: &Path) -> Result<(), ConfigError> {
        match self.loadouts.entry(loadout.id.clone()) {
            Entry::Occupied(existing) => Err(ConfigError::Validation {
                message: format!(
                    "duplicate loadout id '{}' (already defined in {})",
                    existing.key(),
                    self.sources
                        .get(existing.key())
                        .map_or_else(|| "another file".to_string(), |p| p.display().to_string())
                ),
                path: path.to_path_buf(),
            }),
            Entry::Vacant(slot) => {
                tracing::debug!(id = %loadout.id, path = %path.display(), "loaded loadout");
                self.sources.insert(loadout.id.clone(), path.to_path_buf());
                slot.insert(loadout);
                Ok(())
            }
        }
    }

    /// Get a loadout by ID
    pub fn get(&self, id: &str) -> Option<&Loadout> {
        self.loadouts.get(id)
    }

    /// Check if a loadout exists
    pub fn contains(&self, id: &str) -> bool {
        self.loadouts.contains_key(id)
    }

    /// List all loadout IDs
    pub fn loadout_ids(&self) -> impl Iterator<Item = &str> {
        self.loadouts.keys().map(|s| s.as_str())
    }

    /// Resolve a loadout by ID against loaded catalogs
    pub fn resolve<'a>(
        &self,
        id: &str,
        catalogs: &'a CatalogSet,
    ) -> Result<Selection<'a>, ResolveError> {
        let loadout = self
            .get(id)
            .ok_or_else(|| ResolveError::UnknownLoadout(id.to_string()))?;

        resolve(loadout, catalogs)
    }

    /// File a loadout was read from
    pub fn source(&self, id: &str) -> Option<&Path> {
        self.sources.get(id).map(PathBuf::as_path)
    }
}

fn collect_toml_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ConfigError> {
    if !dir.exists() {
        return Ok(());
    }
    let io_error = |e| ConfigError::Io {
        error: e,
        path: Some(dir.to_path_buf()),
    };
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_dir() {
            collect_toml_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    Ok(())
}

fn read_loadout(path: &Path) -> Result<Loadout, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        error: e,
        path: Some(path.to_path_buf()),
    })?;
    let config: LoadoutFileConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        error: e,
        path: path.to_path_buf(),
    })?;
    Loadout::from_config(config).map_err(|e| ConfigError::Validation {
        message: e.to_string(),
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gear_core::GearCategory;
    use stat_core::{calculate_stats, ScalarStat};
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_loadout(dir: &Path, name: &str, content: &str) {
        let path = dir.join(format!("{}.toml", name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    fn catalogs() -> CatalogSet {
        let mut set = CatalogSet::new();
        set.load_str(
            GearCategory::Hats,
            r#"[{"Name": "Plain Hat", "sockets": [1], "bonuses": [{"Health": "+100"}]}]"#,
        )
        .unwrap();
        set.load_str(
            GearCategory::Jewels,
            r#"[{"Name": "Health Pin", "bonuses": [{"Health": "+50"}]}]"#,
        )
        .unwrap();
        set
    }

    #[test]
    fn test_load_simple_loadout() {
        let dir = TempDir::new().unwrap();
        create_test_loadout(
            dir.path(),
            "basic",
            r#"
[loadout]
id = "basic"

[gear]
hats = "Plain Hat"
"#,
        );

        let registry = LoadoutRegistry::load(dir.path()).unwrap();
        assert!(registry.contains("basic"));
        assert_eq!(registry.loadout_ids().collect::<Vec<_>>(), vec!["basic"]);
    }

    #[test]
    fn test_load_nested_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("pvp");
        std::fs::create_dir(&nested).unwrap();
        create_test_loadout(&nested, "deep", "[loadout]\nid = \"deep\"\n");
        std::fs::write(dir.path().join("notes.txt"), "not a loadout").unwrap();

        let registry = LoadoutRegistry::load(dir.path()).unwrap();
        assert!(registry.contains("deep"));
        assert!(registry.source("deep").unwrap().ends_with("pvp/deep.toml"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let dir = TempDir::new().unwrap();
        create_test_loadout(dir.path(), "a_first", "[loadout]\nid = \"shared\"\n");
        create_test_loadout(dir.path(), "b_second", "[loadout]\nid = \"shared\"\n");

        match LoadoutRegistry::load(dir.path()) {
            Err(ConfigError::Validation { message, path }) => {
                assert!(message.contains("shared"));
                assert!(message.contains("a_first.toml"));
                assert!(path.ends_with("b_second.toml"));
            }
            other => panic!("Expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let registry = LoadoutRegistry::load(&dir.path().join("absent")).unwrap();
        assert_eq!(registry.loadout_ids().count(), 0);
    }

    #[test]
    fn test_parse_error() {
        let dir = TempDir::new().unwrap();
        create_test_loadout(dir.path(), "broken", "[loadout\nid = 3");

        let result = LoadoutRegistry::load(dir.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_validation_error() {
        let dir = TempDir::new().unwrap();
        create_test_loadout(
            dir.path(),
            "bad_category",
            r#"
[loadout]
id = "bad"

[gear]
cloak = "Mystery"
"#,
        );

        let result = LoadoutRegistry::load(dir.path());
        match result {
            Err(ConfigError::Validation { message, path }) => {
                assert!(message.contains("cloak"));
                assert!(path.ends_with("bad_category.toml"));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_and_calculate() {
        let dir = TempDir::new().unwrap();
        create_test_loadout(
            dir.path(),
            "socketed",
            r#"
[loadout]
id = "socketed"

[gear]
hats = "Plain Hat"
jewels = ["Health Pin"]

[[talents]]
type = "health"
magnitude = 25
"#,
        );

        let registry = LoadoutRegistry::load(dir.path()).unwrap();
        let set = catalogs();
        let selection = registry.resolve("socketed", &set).unwrap();
        let sheet = calculate_stats(&selection);
        assert!((sheet.scalar(ScalarStat::Health) - 175.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_loadout_error() {
        let registry = LoadoutRegistry::new();
        let set = CatalogSet::new();
        let result = registry.resolve("nonexistent", &set);
        assert!(matches!(result, Err(ResolveError::UnknownLoadout(_))));
    }
}
