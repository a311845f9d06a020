//! State storage implementation
//!
//! In-memory dialogue storage keyed by user id. Each user owns a slot guarded
//! by its own async mutex, so events for one user are applied one at a time in
//! arrival order while other users proceed independently. Nothing survives a
//! process restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, info, error, warn};
use crate::models::{DialogueRecord, StageKind};

type Slot = Arc<AsyncMutex<Option<DialogueRecord>>>;

/// Process-wide dialogue storage
#[derive(Clone, Default)]
pub struct StateStorage {
    slots: Arc<Mutex<HashMap<i64, Slot>>>,
    writes: Arc<AtomicU64>,
    ttl: Option<chrono::Duration>,
}

/// Exclusive access to one user's dialogue
///
/// Held for the whole read-transition-write sequence of a single event.
pub struct UserSlot {
    user_id: i64,
    guard: OwnedMutexGuard<Option<DialogueRecord>>,
    slots: Arc<Mutex<HashMap<i64, Slot>>>,
    writes: Arc<AtomicU64>,
    ttl: Option<chrono::Duration>,
}

impl UserSlot {
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Current record; expired records read as absent
    pub fn get(&self) -> Option<&DialogueRecord> {
        self.get_at(Utc::now())
    }

    /// Current record as seen at `now`
    pub fn get_at(&self, now: DateTime<Utc>) -> Option<&DialogueRecord> {
        let record = self.guard.as_ref()?;
        match self.ttl {
            Some(ttl) if record.is_expired(ttl, now) => None,
            _ => Some(record),
        }
    }

    /// Replace the record, discarding whatever was there
    pub fn put(&mut self, record: DialogueRecord) {
        debug!(user_id = self.user_id, stage = %record.stage.kind(), "Saving dialogue");
        *self.guard = Some(record);
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn remove(&mut self) -> Option<DialogueRecord> {
        let removed = self.guard.take();
        if removed.is_some() {
            debug!(user_id = self.user_id, "Deleted dialogue");
            self.writes.fetch_add(1, Ordering::Relaxed);
        } else {
            debug!(user_id = self.user_id, "No dialogue to delete");
        }
        removed
    }
}

impl Drop for UserSlot {
    /// Release the registry entry once the user has nothing stored and nobody
    /// else is waiting on the slot
    fn drop(&mut self) {
        if self.guard.is_some() {
            return;
        }

        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let own = OwnedMutexGuard::mutex(&self.guard);
        // Registry entry plus this guard; clones are only taken under the registry lock
        let idle = slots
            .get(&self.user_id)
            .is_some_and(|slot| Arc::ptr_eq(slot, own) && Arc::strong_count(slot) == 2);
        if idle {
            slots.remove(&self.user_id);
        }
    }
}

impl StateStorage {
    /// Create a new state storage instance
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            slots: Arc::default(),
            writes: Arc::default(),
            ttl: ttl.and_then(|ttl| chrono::Duration::from_std(ttl).ok()),
        }
    }

    fn slot(&self, user_id: i64) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(user_id).or_default().clone()
    }

    /// Wait for exclusive access to a user's dialogue
    pub async fn lock(&self, user_id: i64) -> UserSlot {
        let guard = self.slot(user_id).lock_owned().await;
        UserSlot {
            user_id,
            guard,
            slots: self.slots.clone(),
            writes: self.writes.clone(),
            ttl: self.ttl,
        }
    }

    /// Load a copy of the user's dialogue
    pub async fn get(&self, user_id: i64) -> Option<DialogueRecord> {
        self.lock(user_id).await.get().cloned()
    }

    /// Store a dialogue for the user, overwriting any existing one
    pub async fn put(&self, user_id: i64, record: DialogueRecord) {
        if record.user_id != user_id {
            warn!(user_id = user_id, record_user_id = record.user_id, "Storing dialogue under a different user id");
        }
        self.lock(user_id).await.put(record);
    }

    /// Delete the user's dialogue
    pub async fn remove(&self, user_id: i64) -> Option<DialogueRecord> {
        self.lock(user_id).await.remove()
    }

    /// Whether a live dialogue exists for the user
    pub async fn contains(&self, user_id: i64) -> bool {
        self.lock(user_id).await.get().is_some()
    }

    /// Number of users with a registry entry, idle or not
    pub fn slot_count(&self) -> usize {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Number of puts and removes applied so far
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    fn snapshot(&self) -> Vec<(i64, Slot)> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.iter().map(|(id, slot)| (*id, slot.clone())).collect()
    }

    /// Users with a live dialogue
    pub async fn active_users(&self) -> Vec<i64> {
        let mut user_ids = Vec::new();
        for (user_id, _) in self.snapshot() {
            if self.contains(user_id).await {
                user_ids.push(user_id);
            }
        }

        user_ids.sort_unstable();
        debug!("Found {} active dialogues", user_ids.len());
        user_ids
    }

    /// Remove expired dialogues and drop idle empty slots
    pub async fn cleanup_expired(&self) -> u32 {
        self.cleanup_expired_at(Utc::now()).await
    }

    /// Remove dialogues expired as of `now`
    pub async fn cleanup_expired_at(&self, now: DateTime<Utc>) -> u32 {
        let mut cleaned_count = 0;

        if let Some(ttl) = self.ttl {
            for (user_id, slot) in self.snapshot() {
                // Skip users whose event is being processed right now
                let Ok(mut guard) = slot.try_lock() else { continue };
                if guard.as_ref().is_some_and(|record| record.is_expired(ttl, now)) {
                    *guard = None;
                    cleaned_count += 1;
                    debug!(user_id = user_id, "Expired dialogue removed");
                }
            }
        }

        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.retain(|_, slot| {
            Arc::strong_count(slot) > 1
                || slot.try_lock().map(|record| record.is_some()).unwrap_or(true)
        });
        drop(slots);

        if cleaned_count > 0 {
            info!("Cleaned up {} expired dialogues", cleaned_count);
        }

        cleaned_count
    }

    /// Get storage statistics
    pub async fn get_stats(&self) -> StorageStats {
        let mut by_stage = HashMap::new();
        for (user_id, _) in self.snapshot() {
            if let Some(record) = self.get(user_id).await {
                *by_stage.entry(record.stage.kind()).or_insert(0) += 1;
            }
        }

        StorageStats {
            active_dialogues: by_stage.values().sum(),
            by_stage,
            total_writes: self.write_count(),
        }
    }
}

impl std::fmt::Debug for StateStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStorage")
            .field("ttl", &self.ttl)
            .field("writes", &self.write_count())
            .finish_non_exhaustive()
    }
}

/// Storage statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct StorageStats {
    pub active_dialogues: usize,
    pub by_stage: HashMap<StageKind, usize>,
    pub total_writes: u64,
}

/// State storage manager with automatic cleanup
#[derive(Debug)]
pub struct StateStorageManager {
    storage: StateStorage,
    cleanup_interval: Duration,
    cleanup_handle: Option<tokio::task::JoinHandle<()>>,
}

impl StateStorageManager {
    /// Create a new state storage manager with automatic cleanup
    pub fn new(storage: StateStorage, cleanup_interval: Duration) -> Self {
        Self {
            storage,
            cleanup_interval,
            cleanup_handle: None,
        }
    }

    /// Start automatic cleanup task
    pub fn start_cleanup(&mut self) {
        if self.cleanup_handle.is_some() {
            warn!("Cleanup task is already running");
            return;
        }

        let storage = self.storage.clone();
        let interval = self.cleanup_interval;

        let handle = tokio::spawn(async move {
            let mut cleanup_interval = tokio::time::interval(interval);

            loop {
                cleanup_interval.tick().await;

                let count = storage.cleanup_expired().await;
                if count > 0 {
                    info!("Cleanup task removed {} expired dialogues", count);
                }
            }
        });

        self.cleanup_handle = Some(handle);
        info!("Started automatic cleanup task with interval {:?}", self.cleanup_interval);
    }

    /// Stop automatic cleanup task
    pub fn stop_cleanup(&mut self) {
        if let Some(handle) = self.cleanup_handle.take() {
            handle.abort();
            info!("Stopped automatic cleanup task");
        }
    }

    /// Whether the cleanup task is running
    pub fn is_running(&self) -> bool {
        match &self.cleanup_handle {
            Some(handle) if handle.is_finished() => {
                error!("Cleanup task exited unexpectedly");
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Get reference to the storage
    pub fn storage(&self) -> &StateStorage {
        &self.storage
    }
}

impl Drop for StateStorageManager {
    fn drop(&mut self) {
        self.stop_cleanup();
    }
}
