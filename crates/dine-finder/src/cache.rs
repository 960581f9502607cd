//! Process-wide memoization of loaded tables.
//!
//! A table is loaded once per source path and loader configuration, then
//! shared. Failed loads are not cached, so a fixed file is picked up on
//! the next request.

use crate::config::LoaderConfig;
use crate::error::LoadError;
use crate::loader::DataLoader;
use crate::table::RestaurantTable;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

static GLOBAL: Lazy<TableCache> = Lazy::new(TableCache::new);

type CacheKey = (PathBuf, LoaderConfig);

/// Cache of loaded tables keyed by source path and loader configuration.
#[derive(Debug, Default)]
pub struct TableCache {
    tables: RwLock<HashMap<CacheKey, Arc<RestaurantTable>>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache.
    pub fn global() -> &'static TableCache {
        &GLOBAL
    }

    /// Cached table for `path` cleaned with `config`, loading it on first
    /// use. The same file under another configuration is a separate entry.
    pub fn get_or_load(
        &self,
        path: impl AsRef<Path>,
        config: &LoaderConfig,
    ) -> Result<Arc<RestaurantTable>, LoadError> {
        let path = path.as_ref();
        let key = (path.to_path_buf(), config.clone());
        if let Some(table) = self.tables.read().get(&key) {
            debug!("Table cache hit for {}", path.display());
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(DataLoader::new(config.clone()).load_path(path)?);
        let mut tables = self.tables.write();
        // Another caller may have loaded it meanwhile; keep the first one
        let entry = tables.entry(key).or_insert_with(|| Arc::clone(&table));
        Ok(Arc::clone(entry))
    }

    /// Forget every table loaded from `path`, whatever its configuration.
    pub fn invalidate(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let mut tables = self.tables.write();
        let before = tables.len();
        tables.retain(|(cached, _), _| cached != path);
        tables.len() < before
    }

    pub fn clear(&self) {
        self.tables.write().clear();
    }

    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::has_column;
    use std::io::Write;

    const CSV: &str = "Restaurant Name,City,Cuisines,Aggregate rating,Average Cost for two,Address\n\
                       Wok,Pune,Chinese,4.0,600,FC Road\n";

    fn write_csv(dir: &Path) -> PathBuf {
        let path = dir.join("restaurants.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_second_load_reuses_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path());
        let cache = TableCache::new();
        let config = LoaderConfig::default();

        let first = cache.get_or_load(&path, &config).unwrap();
        // Source removed: a cache hit must not touch the file
        std::fs::remove_file(&path).unwrap();
        let second = cache.get_or_load(&path, &config).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_load_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        let cache = TableCache::new();
        let config = LoaderConfig::default();

        assert!(cache.get_or_load(&path, &config).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_config_is_part_of_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path());
        let cache = TableCache::new();
        let keep_address = LoaderConfig::builder()
            .drop_columns(Vec::<String>::new())
            .build()
            .unwrap();

        let default = cache.get_or_load(&path, &LoaderConfig::default()).unwrap();
        let kept = cache.get_or_load(&path, &keep_address).unwrap();

        assert!(!Arc::ptr_eq(&default, &kept));
        assert!(!has_column(default.frame(), "Address"));
        assert!(has_column(kept.frame(), "Address"));
        assert_eq!(cache.len(), 2);

        assert!(cache.invalidate(&path));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path());
        let cache = TableCache::new();

        cache.get_or_load(&path, &LoaderConfig::default()).unwrap();
        assert!(cache.invalidate(&path));
        assert!(!cache.invalidate(&path));
        assert!(cache.is_empty());
    }
}
