//! Favorites cache backed by host key/value storage.
//!
//! The in-memory set is authoritative for reads. Every toggle flips it
//! synchronously and then persists the whole set as a JSON array of ids under
//! a single key.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::character::Character;
use crate::error::{CharselError, Result};
use crate::platform::PlatformBridge;

/// Set of favorited character ids mirrored into host storage.
pub struct FavoritesStore {
    bridge: Arc<dyn PlatformBridge>,
    key: String,
    ids: RwLock<BTreeSet<String>>,
    /// Membership set by toggles while a load is in flight; `None` otherwise.
    /// Locked only while `ids` is write-locked.
    pending: Mutex<Option<HashMap<String, bool>>>,
    /// Serializes storage access so writes land in toggle order and never
    /// interleave with a load.
    write_lock: tokio::sync::Mutex<()>,
}

impl FavoritesStore {
    pub fn new(bridge: Arc<dyn PlatformBridge>, key: impl Into<String>) -> Self {
        Self {
            bridge,
            key: key.into(),
            ids: RwLock::new(BTreeSet::new()),
            pending: Mutex::new(None),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeSet<String>> {
        self.ids.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeSet<String>> {
        self.ids.write().unwrap_or_else(|e| e.into_inner())
    }

    fn pending(&self) -> MutexGuard<'_, Option<HashMap<String, bool>>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Parses a persisted favorites blob.
    pub fn parse(key: &str, raw: &str) -> Result<BTreeSet<String>> {
        let ids: Vec<String> = serde_json::from_str(raw)
            .map_err(|e| CharselError::malformed(key, e.to_string()))?;
        Ok(ids.into_iter().collect())
    }

    /// Loads the persisted set, replacing the in-memory one.
    ///
    /// Missing or malformed data yields an empty set and is only logged.
    /// Toggles made while the read is in flight are applied on top of the
    /// loaded set, and the merged set is written back.
    pub async fn load(&self) {
        let _guard = self.write_lock.lock().await;
        {
            let _ids = self.write();
            *self.pending() = Some(HashMap::new());
        }

        let loaded = match self.bridge.storage_get(&self.key).await {
            None => BTreeSet::new(),
            Some(raw) => Self::parse(&self.key, &raw).unwrap_or_else(|e| {
                tracing::warn!("[FavoritesStore] Resetting favorites: {}", e);
                BTreeSet::new()
            }),
        };

        let raced = {
            let mut ids = self.write();
            let overrides = self.pending().take().unwrap_or_default();
            let mut merged = loaded;
            for (id, favorite) in &overrides {
                if *favorite {
                    merged.insert(id.clone());
                } else {
                    merged.remove(id);
                }
            }
            tracing::debug!(
                "[FavoritesStore] Loaded {} favorites ({} changed during load)",
                merged.len(),
                overrides.len()
            );
            *ids = merged;
            !overrides.is_empty()
        };

        if raced {
            self.write_snapshot().await;
        }
    }

    /// Flips membership of `character_id` and persists the new set.
    ///
    /// The in-memory flip is visible before the first suspension point.
    /// Returns whether the id is a favorite afterwards.
    pub async fn toggle(&self, character_id: &str) -> bool {
        let now_favorite = {
            let mut ids = self.write();
            let now_favorite = if ids.remove(character_id) {
                false
            } else {
                ids.insert(character_id.to_string());
                true
            };
            if let Some(overrides) = self.pending().as_mut() {
                overrides.insert(character_id.to_string(), now_favorite);
            }
            now_favorite
        };
        self.persist().await;
        now_favorite
    }

    async fn persist(&self) {
        let _guard = self.write_lock.lock().await;
        self.write_snapshot().await;
    }

    /// Writes the current set. Callers hold `write_lock`, so the last write
    /// always carries every toggle that preceded it.
    async fn write_snapshot(&self) {
        let snapshot: Vec<String> = self.read().iter().cloned().collect();
        let serialized = match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("[FavoritesStore] Cannot serialize favorites: {}", e);
                return;
            }
        };
        if !self.bridge.storage_set(&self.key, &serialized).await {
            tracing::warn!("[FavoritesStore] Favorites not persisted");
        }
    }

    pub fn is_favorite(&self, character_id: &str) -> bool {
        self.read().contains(character_id)
    }

    /// Filters `characters` down to favorites, keeping their order.
    pub fn list(&self, characters: &[Character]) -> Vec<Character> {
        let ids = self.read();
        characters
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect()
    }

    /// Favorited ids in sorted order.
    pub fn ids(&self) -> Vec<String> {
        self.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
