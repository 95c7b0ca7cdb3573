use crate::error::PickStoreError;
use log::{info, warn};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const PICKS_STORAGE_KEY: &str = "adbowl_picks";
pub const MAX_PICKS: usize = 3;

/// Persistence for the pick list, stored as a JSON array of ids.
pub trait PickStore: Send + Sync {
    fn load(&self) -> Result<Vec<String>, PickStoreError>;
    fn save(&self, ids: &[String]) -> Result<(), PickStoreError>;
}

/// Keeps picks in `<dir>/adbowl_picks.json`.
pub struct JsonFilePickStore {
    path: PathBuf,
}

impl JsonFilePickStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{PICKS_STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PickStore for JsonFilePickStore {
    fn load(&self) -> Result<Vec<String>, PickStoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => Ok(ids),
            Err(e) => {
                warn!(
                    "Ignoring unreadable picks file {}: {e}",
                    self.path.display()
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, ids: &[String]) -> Result<(), PickStoreError> {
        let json = serde_json::to_string(ids)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryPickStore {
    ids: Arc<Mutex<Vec<String>>>,
}

impl MemoryPickStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(ids: &[&str]) -> Self {
        Self {
            ids: Arc::new(Mutex::new(ids.iter().map(|id| id.to_string()).collect())),
        }
    }

    pub fn saved(&self) -> Vec<String> {
        if let Ok(ids) = self.ids.lock() {
            ids.clone()
        } else {
            Vec::new()
        }
    }
}

impl PickStore for MemoryPickStore {
    fn load(&self) -> Result<Vec<String>, PickStoreError> {
        Ok(self.saved())
    }

    fn save(&self, ids: &[String]) -> Result<(), PickStoreError> {
        if let Ok(mut stored) = self.ids.lock() {
            *stored = ids.to_vec();
        }
        Ok(())
    }
}

pub type PickChangeCallback = Box<dyn Fn(&[String]) + Send + Sync>;

/// The visitor's Top 3. Ordered by insertion; adding to a full set evicts
/// the earliest-added id, regardless of how recently it was looked at.
pub struct PickSet {
    ids: VecDeque<String>,
    store: Box<dyn PickStore>,
    on_change: Option<PickChangeCallback>,
}

impl PickSet {
    /// Restores persisted picks. Unreadable storage starts an empty set.
    pub fn load(store: Box<dyn PickStore>) -> Self {
        let stored = store.load().unwrap_or_else(|e| {
            warn!("Failed to load picks: {e}");
            Vec::new()
        });

        let mut ids = VecDeque::with_capacity(MAX_PICKS);
        for id in stored {
            push_unique(&mut ids, id);
        }

        Self {
            ids,
            store,
            on_change: None,
        }
    }

    pub fn set_on_change(&mut self, callback: impl Fn(&[String]) + Send + Sync + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|pick| pick == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_PICKS
    }

    /// Adds `id`, returning the evicted id if the set was full. Adding an
    /// existing pick changes nothing.
    pub fn add(&mut self, id: &str) -> Result<Option<String>, PickStoreError> {
        if id.is_empty() || self.contains(id) {
            return Ok(None);
        }

        let evicted = if self.is_full() {
            self.ids.pop_front()
        } else {
            None
        };
        self.ids.push_back(id.to_string());

        if let Some(evicted) = &evicted {
            info!("Pick {evicted} replaced by {id}");
        }
        self.commit()?;
        Ok(evicted)
    }

    /// Returns whether `id` was picked.
    pub fn remove(&mut self, id: &str) -> Result<bool, PickStoreError> {
        let Some(position) = self.ids.iter().position(|pick| pick == id) else {
            return Ok(false);
        };
        self.ids.remove(position);
        self.commit()?;
        Ok(true)
    }

    /// Flips membership of `id`. Returns whether it is picked afterwards.
    pub fn toggle(&mut self, id: &str) -> Result<bool, PickStoreError> {
        if self.contains(id) {
            self.remove(id)?;
            Ok(false)
        } else {
            self.add(id)?;
            Ok(self.contains(id))
        }
    }

    /// Replaces the set with the first picks of a shared list. An empty list
    /// leaves the current picks alone.
    pub fn load_shared(&mut self, ids: &[String]) -> Result<(), PickStoreError> {
        let mut shared = VecDeque::with_capacity(MAX_PICKS);
        for id in ids {
            push_unique(&mut shared, id.trim().to_string());
        }
        if shared.is_empty() {
            return Ok(());
        }

        self.ids = shared;
        self.commit()
    }

    fn commit(&mut self) -> Result<(), PickStoreError> {
        let ids = self.ids();
        self.store.save(&ids)?;
        if let Some(callback) = &self.on_change {
            callback(&ids);
        }
        Ok(())
    }
}

fn push_unique(ids: &mut VecDeque<String>, id: String) {
    if ids.len() < MAX_PICKS && !id.is_empty() && !ids.contains(&id) {
        ids.push_back(id);
    }
}
