//! Preference store: persisted, streamed pin/name/usage/theme state.
//!
//! This module implements [`PreferenceStore`], the owner of all
//! user-controlled metadata the merge engine consumes. The store holds the
//! current [`PreferenceSnapshot`] in memory, persists every mutation to its
//! [`SettingsBackend`] before publishing, and exposes each of the three maps
//! as an independently observable `watch` stream.
//!
//! # Ordering Guarantees
//!
//! Every operation is one atomic read-modify-persist-publish step relative to
//! other operations: an internal mutex serializes them, and the backend write
//! happens strictly before the new value is sent to subscribers (durability
//! precedes visibility). The dark-theme flag is persisted independently of
//! the three maps and is read and written synchronously, without a stream.
//!
//! # Snapshot Access
//!
//! The merge path needs one coherent view of all three maps at once, which a
//! set of independent streams cannot give it. [`PreferenceStore::snapshot`]
//! exists for exactly that: it returns a clone of the current state under the
//! same lock the mutations take.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use tokio::sync::watch;

use crate::domain::error::{DrawerError, Result};
use crate::storage::backend::SettingsBackend;
use crate::storage::codec;
use crate::storage::models::{PreferenceSnapshot, UsageStat};

/// State behind the store's mutex: the backend plus the current snapshot.
struct Inner {
    backend: Box<dyn SettingsBackend>,
    snapshot: PreferenceSnapshot,
    dark_theme: bool,
}

/// Persisted, streamed preference state for pin/name/usage/theme.
///
/// Constructed over any [`SettingsBackend`]; all previously persisted records
/// are decoded during construction (malformed text decodes as empty, never as
/// an error). Streams replay nothing: subscribers get the value current at
/// subscription time and every published change after that, and the merge
/// path uses [`snapshot`](Self::snapshot) instead of stream state.
///
/// # Examples
///
/// ```
/// use appdrawer::storage::{MemoryBackend, PreferenceStore};
///
/// let store = PreferenceStore::new(Box::new(MemoryBackend::new()))?;
/// store.pin("org.example.files")?;
/// assert!(store.snapshot().pinned.contains("org.example.files"));
/// # Ok::<(), appdrawer::domain::DrawerError>(())
/// ```
pub struct PreferenceStore {
    inner: Mutex<Inner>,
    pinned_tx: watch::Sender<HashSet<String>>,
    names_tx: watch::Sender<HashMap<String, String>>,
    usage_tx: watch::Sender<HashMap<String, UsageStat>>,
}

impl PreferenceStore {
    /// Creates a preference store over the given backend.
    ///
    /// Loads and decodes all four persisted records. Each of the three watch
    /// streams starts out holding the loaded value.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backend itself fails to read; malformed
    /// record text is recovered as empty per the codec rules.
    pub fn new(backend: Box<dyn SettingsBackend>) -> Result<Self> {
        let snapshot = PreferenceSnapshot {
            pinned: codec::decode_pinned(&backend.get(codec::PINNED_KEY)?.unwrap_or_default()),
            custom_names: codec::decode_names(
                &backend.get(codec::CUSTOM_NAMES_KEY)?.unwrap_or_default(),
            ),
            usage: codec::decode_usage(&backend.get(codec::USAGE_KEY)?.unwrap_or_default()),
        };
        let dark_theme = backend
            .get(codec::DARK_THEME_KEY)?
            .is_some_and(|v| v.trim() == "true");

        tracing::debug!(
            pinned = snapshot.pinned.len(),
            custom_names = snapshot.custom_names.len(),
            usage = snapshot.usage.len(),
            dark_theme = dark_theme,
            "preference store initialized"
        );

        let (pinned_tx, _) = watch::channel(snapshot.pinned.clone());
        let (names_tx, _) = watch::channel(snapshot.custom_names.clone());
        let (usage_tx, _) = watch::channel(snapshot.usage.clone());

        Ok(Self {
            inner: Mutex::new(Inner {
                backend,
                snapshot,
                dark_theme,
            }),
            pinned_tx,
            names_tx,
            usage_tx,
        })
    }

    /// Returns a coherent copy of the current preference state.
    ///
    /// Taken under the same lock the mutations hold, so the three maps are
    /// always mutually consistent. Falls back to an empty snapshot if the
    /// lock is poisoned.
    #[must_use]
    pub fn snapshot(&self) -> PreferenceSnapshot {
        self.lock().map_or_else(|_| PreferenceSnapshot::default(), |inner| inner.snapshot.clone())
    }

    /// Subscribes to the pinned-set stream.
    #[must_use]
    pub fn subscribe_pinned(&self) -> watch::Receiver<HashSet<String>> {
        self.pinned_tx.subscribe()
    }

    /// Subscribes to the custom-name stream.
    #[must_use]
    pub fn subscribe_names(&self) -> watch::Receiver<HashMap<String, String>> {
        self.names_tx.subscribe()
    }

    /// Subscribes to the usage stream.
    #[must_use]
    pub fn subscribe_usage(&self) -> watch::Receiver<HashMap<String, UsageStat>> {
        self.usage_tx.subscribe()
    }

    /// Adds an identifier to the pinned set.
    ///
    /// Persists and publishes even when the identifier was already pinned,
    /// matching how previously persisted state behaved.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails; nothing is published in
    /// that case.
    pub fn pin(&self, id: &str) -> Result<()> {
        let _span = tracing::debug_span!("pin", id = %id).entered();

        let mut inner = self.lock()?;
        inner.snapshot.pinned.insert(id.to_string());
        let encoded = codec::encode_pinned(&inner.snapshot.pinned);
        inner.backend.put(codec::PINNED_KEY, &encoded)?;
        self.pinned_tx.send_replace(inner.snapshot.pinned.clone());
        Ok(())
    }

    /// Removes an identifier from the pinned set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails; nothing is published in
    /// that case.
    pub fn unpin(&self, id: &str) -> Result<()> {
        let _span = tracing::debug_span!("unpin", id = %id).entered();

        let mut inner = self.lock()?;
        inner.snapshot.pinned.remove(id);
        let encoded = codec::encode_pinned(&inner.snapshot.pinned);
        inner.backend.put(codec::PINNED_KEY, &encoded)?;
        self.pinned_tx.send_replace(inner.snapshot.pinned.clone());
        Ok(())
    }

    /// Sets or clears the custom display name for an identifier.
    ///
    /// A blank `new_name` (empty or whitespace-only) removes the override so
    /// the entry reverts to its canonical name on the next merge; anything
    /// else is stored verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails; nothing is published in
    /// that case.
    pub fn rename(&self, id: &str, new_name: &str) -> Result<()> {
        let _span = tracing::debug_span!("rename", id = %id, blank = new_name.trim().is_empty()).entered();

        let mut inner = self.lock()?;
        if new_name.trim().is_empty() {
            inner.snapshot.custom_names.remove(id);
        } else {
            inner
                .snapshot
                .custom_names
                .insert(id.to_string(), new_name.to_string());
        }
        let encoded = codec::encode_names(&inner.snapshot.custom_names);
        inner.backend.put(codec::CUSTOM_NAMES_KEY, &encoded)?;
        self.names_tx.send_replace(inner.snapshot.custom_names.clone());
        Ok(())
    }

    /// Records one launch of an identifier at the current wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails; nothing is published in
    /// that case.
    pub fn increment_usage(&self, id: &str) -> Result<()> {
        self.increment_usage_at(id, chrono::Utc::now().timestamp_millis())
    }

    /// Records one launch of an identifier at an explicit timestamp.
    ///
    /// The count starts from 0 for an unknown identifier; `last_used` always
    /// takes the supplied timestamp. Exists so tests can drive deterministic
    /// clocks; production callers go through [`increment_usage`](Self::increment_usage).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails; nothing is published in
    /// that case.
    pub fn increment_usage_at(&self, id: &str, timestamp: i64) -> Result<()> {
        let _span = tracing::debug_span!("increment_usage", id = %id, timestamp = timestamp).entered();

        let mut inner = self.lock()?;
        let stat = inner.snapshot.usage.entry(id.to_string()).or_default();
        stat.count = stat.count.saturating_add(1);
        stat.last_used = timestamp;
        let new_count = stat.count;

        let encoded = codec::encode_usage(&inner.snapshot.usage);
        inner.backend.put(codec::USAGE_KEY, &encoded)?;
        self.usage_tx.send_replace(inner.snapshot.usage.clone());

        tracing::debug!(count = new_count, "usage recorded");
        Ok(())
    }

    /// Returns the persisted dark-theme flag.
    #[must_use]
    pub fn dark_theme(&self) -> bool {
        self.lock().map_or(false, |inner| inner.dark_theme)
    }

    /// Persists the dark-theme flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn set_dark_theme(&self, is_dark: bool) -> Result<()> {
        let mut inner = self.lock()?;
        inner
            .backend
            .put(codec::DARK_THEME_KEY, if is_dark { "true" } else { "false" })?;
        inner.dark_theme = is_dark;
        Ok(())
    }

    /// Locks the inner state, mapping poisoning to a storage error.
    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| DrawerError::Storage("preference store lock poisoned".to_string()))
    }
}
