//! Asset universe snapshots and the handle used to swap them.

use std::collections::HashMap;
use std::fs;
use std::ops::Deref;
use std::path::Path;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::{AssetId, AssetRecord, CoreError, QueryError, ValidationError};

/// Immutable collection of asset records.
///
/// Enumeration order is the order records were supplied in and is the
/// canonical order of basket search results.
#[derive(Debug, Clone, Default)]
pub struct AssetUniverse {
    records: Vec<AssetRecord>,
    index: HashMap<AssetId, usize>,
}

/// On-disk snapshot layout: `{"assets": [ ...records ]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UniverseFile {
    pub assets: Vec<AssetRecord>,
}

impl AssetUniverse {
    /// Build a universe, validating every record and rejecting duplicate ids.
    pub fn new(records: Vec<AssetRecord>) -> Result<Self, ValidationError> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            record.validate()?;
            if index.insert(record.asset_id.clone(), position).is_some() {
                return Err(ValidationError::DuplicateAssetId {
                    value: record.asset_id.to_string(),
                });
            }
        }
        Ok(Self { records, index })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_json_str(input: &str) -> Result<Self, CoreError> {
        let file: UniverseFile = serde_json::from_str(input)?;
        Ok(Self::new(file.assets)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let universe = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.display(),
            assets = universe.len(),
            "loaded universe snapshot"
        );
        Ok(universe)
    }

    pub fn get(&self, asset_id: &AssetId) -> Option<&AssetRecord> {
        self.index.get(asset_id).map(|&position| &self.records[position])
    }

    pub fn contains(&self, asset_id: &AssetId) -> bool {
        self.index.contains_key(asset_id)
    }

    /// Records in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &AssetRecord> {
        self.records.iter()
    }

    pub fn asset_ids(&self) -> impl Iterator<Item = &AssetId> {
        self.records.iter().map(|record| &record.asset_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_file(&self) -> UniverseFile {
        UniverseFile {
            assets: self.records.clone(),
        }
    }
}

/// A point-in-time view of the universe pinned for one query.
#[derive(Debug, Clone)]
pub struct UniverseSnapshot {
    version: u64,
    universe: Arc<AssetUniverse>,
}

impl UniverseSnapshot {
    pub const fn version(&self) -> u64 {
        self.version
    }
}

impl Deref for UniverseSnapshot {
    type Target = AssetUniverse;

    fn deref(&self) -> &Self::Target {
        &self.universe
    }
}

#[derive(Debug)]
struct Current {
    version: u64,
    universe: Arc<AssetUniverse>,
}

/// Shared handle to the current universe snapshot.
///
/// Readers clone the inner `Arc` and release the lock immediately; a refresh
/// swaps in a whole new universe, so a reader keeps a consistent view even
/// while a replacement happens.
#[derive(Debug, Clone)]
pub struct UniverseHandle {
    current: Arc<RwLock<Current>>,
}

impl Default for UniverseHandle {
    fn default() -> Self {
        Self::new(AssetUniverse::empty())
    }
}

impl UniverseHandle {
    pub fn new(universe: AssetUniverse) -> Self {
        Self {
            current: Arc::new(RwLock::new(Current {
                version: 1,
                universe: Arc::new(universe),
            })),
        }
    }

    pub fn snapshot(&self) -> Result<UniverseSnapshot, QueryError> {
        let current = self
            .current
            .read()
            .map_err(|_| QueryError::internal("universe snapshot lock is poisoned"))?;
        Ok(UniverseSnapshot {
            version: current.version,
            universe: Arc::clone(&current.universe),
        })
    }

    /// Atomically replace the universe. Returns the new snapshot version.
    pub fn replace(&self, universe: AssetUniverse) -> Result<u64, QueryError> {
        let universe = Arc::new(universe);
        let mut current = self
            .current
            .write()
            .map_err(|_| QueryError::internal("universe snapshot lock is poisoned"))?;
        current.version += 1;
        current.universe = universe;
        tracing::info!(
            version = current.version,
            assets = current.universe.len(),
            "universe snapshot replaced"
        );
        Ok(current.version)
    }
}
