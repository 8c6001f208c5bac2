//! Orchestrator: the serialized state path and its command surface.
//!
//! This module implements [`StateStore`], the owner of the canonical
//! [`ViewState`]. One spawned actor task is the single place where merges,
//! projections, and publishes happen; everything else — catalog enumeration,
//! launches, detail views — runs on blocking tasks whose results are
//! delivered back into the actor as internal events.
//!
//! # Data Flow
//!
//! ```text
//! commands ──┐                          ┌── catalog enumeration (blocking task)
//!            ▼                          ▼
//!      ┌───────────────────────────────────┐
//!      │  actor loop (one task, owns state)│──► watch<ViewState> ──► subscribers
//!      └───────────────────────────────────┘
//!            ▲                          ▲
//!  debounce timer            preference streams (pin/name/usage)
//! ```
//!
//! # Debounce
//!
//! Query changes go through an explicit single-slot scheduler: one pending
//! value and one deadline, rearmed on every new value. Only the value present
//! when the timer fires is applied; superseded intermediates are discarded
//! without ever producing a published projection.
//!
//! # Overlapping Refreshes
//!
//! Every catalog request carries a monotonically increasing sequence number,
//! and a completion is applied only when its number is still the newest one
//! issued. A `refresh` issued while an enumeration is in flight therefore
//! supersedes it: the older result is dropped whenever it arrives.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use crate::app::command::Command;
use crate::app::state::ViewState;
use crate::catalog::CatalogSource;
use crate::domain::error::{DrawerError, Result};
use crate::domain::RawEntry;
use crate::storage::PreferenceStore;
use crate::{merge, search, Config};

/// Results of background work, delivered back onto the serialized path.
#[derive(Debug)]
enum InternalEvent {
    /// A catalog enumeration finished.
    CatalogLoaded {
        /// Sequence number of the request this result answers.
        seq: u64,
        /// The enumerated entries, or the enumeration error.
        result: Result<Vec<RawEntry>>,
    },
}

/// Handle to the orchestrator: commands in, state stream out.
///
/// Cheap to clone; all clones feed the same actor. Dropping every clone shuts
/// the actor down. All command methods are fire-and-forget — effects are
/// observed only via the next state emission.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use appdrawer::app::StateStore;
/// use appdrawer::storage::{MemoryBackend, PreferenceStore};
/// use appdrawer::Config;
/// # use appdrawer::catalog::CatalogSource;
/// # use appdrawer::domain::{RawEntry, Result};
/// # struct EmptyCatalog;
/// # impl CatalogSource for EmptyCatalog {
/// #     fn list_launchable(&self) -> Result<Vec<RawEntry>> { Ok(vec![]) }
/// #     fn launch(&self, _id: &str) -> bool { false }
/// #     fn open_details(&self, _id: &str) {}
/// # }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<()> {
/// let prefs = Arc::new(PreferenceStore::new(Box::new(MemoryBackend::new()))?);
/// let store = StateStore::spawn(Arc::new(EmptyCatalog), prefs, &Config::default());
///
/// let mut states = store.subscribe();
/// store.set_query("term");
/// states.changed().await.ok();
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct StateStore {
    cmd_tx: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<ViewState>,
}

impl StateStore {
    /// Spawns the orchestrator actor and kicks off the startup sequence.
    ///
    /// The initial published state is empty with the loading flag set;
    /// catalog enumeration starts immediately on a blocking task. Must be
    /// called from within a tokio runtime.
    #[must_use]
    pub fn spawn(
        catalog: Arc<dyn CatalogSource>,
        prefs: Arc<PreferenceStore>,
        config: &Config,
    ) -> Self {
        let dark_theme = prefs.dark_theme();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ViewState::initial(dark_theme));

        let orchestrator = Orchestrator {
            catalog,
            prefs,
            raw_entries: Vec::new(),
            state: ViewState::initial(dark_theme),
            state_tx,
            event_tx,
            debounce: config.debounce(),
            catalog_seq: 0,
            pending_query: None,
            deadline: None,
        };

        tokio::spawn(orchestrator.run(cmd_rx, event_rx));

        Self { cmd_tx, state_rx }
    }

    /// Subscribes to the read-only view state stream.
    ///
    /// The receiver starts out holding the current state and observes every
    /// published replacement after that.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state_rx.clone()
    }

    /// Returns a copy of the most recently published view state.
    #[must_use]
    pub fn current(&self) -> ViewState {
        self.state_rx.borrow().clone()
    }

    /// Sets the search query; applied after the debounce window.
    pub fn set_query(&self, query: impl Into<String>) {
        self.send(Command::SetQuery(query.into()));
    }

    /// Clears the search query through the same debounce path.
    pub fn clear_query(&self) {
        self.send(Command::ClearQuery);
    }

    /// Launches an entry; records usage only when the launch succeeds.
    pub fn launch(&self, id: impl Into<String>) {
        self.send(Command::Launch(id.into()));
    }

    /// Pins or unpins an entry based on its current pinned flag.
    pub fn toggle_pin(&self, id: impl Into<String>) {
        self.send(Command::TogglePin(id.into()));
    }

    /// Sets the entry's custom display name; blank reverts to canonical.
    pub fn rename(&self, id: impl Into<String>, name: impl Into<String>) {
        self.send(Command::Rename {
            id: id.into(),
            name: name.into(),
        });
    }

    /// Re-runs the startup sequence with a fresh catalog enumeration.
    pub fn refresh(&self) {
        self.send(Command::Refresh);
    }

    /// Flips and persists the dark-theme flag.
    pub fn toggle_theme(&self) {
        self.send(Command::ToggleTheme);
    }

    /// Opens the platform detail view for an entry.
    pub fn open_details(&self, id: impl Into<String>) {
        self.send(Command::OpenDetails(id.into()));
    }

    fn send(&self, command: Command) {
        let _ = self.cmd_tx.send(command);
    }
}

/// The actor behind [`StateStore`]: owns the view state and all recomputes.
struct Orchestrator {
    catalog: Arc<dyn CatalogSource>,
    prefs: Arc<PreferenceStore>,

    /// Raw entries from the newest applied enumeration, retained for
    /// preference-driven remerges.
    raw_entries: Vec<RawEntry>,

    state: ViewState,
    state_tx: watch::Sender<ViewState>,
    event_tx: mpsc::UnboundedSender<InternalEvent>,

    debounce: Duration,

    /// Sequence number of the newest catalog request issued.
    catalog_seq: u64,

    /// Single debounce slot: the newest unapplied query value.
    pending_query: Option<String>,

    /// When the debounce timer fires, `None` when disarmed.
    deadline: Option<Instant>,
}

impl Orchestrator {
    /// The serialized mutation path. Runs until every command handle drops.
    async fn run(
        mut self,
        mut cmd_rx: mpsc::UnboundedReceiver<Command>,
        mut event_rx: mpsc::UnboundedReceiver<InternalEvent>,
    ) {
        let mut pinned_rx = self.prefs.subscribe_pinned();
        let mut names_rx = self.prefs.subscribe_names();
        let mut usage_rx = self.prefs.subscribe_usage();

        self.start_catalog_load();

        loop {
            let debounce_at = self.deadline.unwrap_or_else(Instant::now);

            tokio::select! {
                cmd = cmd_rx.recv() => match cmd {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(event) = event_rx.recv() => self.handle_event(event),
                _ = tokio::time::sleep_until(debounce_at), if self.deadline.is_some() => {
                    self.deadline = None;
                    self.apply_pending_query();
                }
                changed = pinned_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.remerge();
                }
                changed = names_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.remerge();
                }
                changed = usage_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    self.remerge();
                }
            }
        }

        tracing::debug!("orchestrator shut down");
    }

    fn handle_command(&mut self, command: Command) {
        let _span = tracing::debug_span!("handle_command", command = ?command).entered();

        match command {
            Command::SetQuery(query) => self.schedule_query(query),
            Command::ClearQuery => self.schedule_query(String::new()),
            Command::Launch(id) => self.spawn_launch(id),
            Command::TogglePin(id) => {
                let pinned = self
                    .state
                    .all_entries
                    .iter()
                    .find(|entry| entry.id == id)
                    .is_some_and(|entry| entry.pinned);
                let result = if pinned {
                    self.prefs.unpin(&id)
                } else {
                    self.prefs.pin(&id)
                };
                if let Err(e) = result {
                    tracing::warn!(id = %id, error = %e, "pin toggle failed");
                }
            }
            Command::Rename { id, name } => {
                if let Err(e) = self.prefs.rename(&id, &name) {
                    tracing::warn!(id = %id, error = %e, "rename failed");
                }
            }
            Command::Refresh => self.start_catalog_load(),
            Command::ToggleTheme => {
                let dark = !self.prefs.dark_theme();
                match self.prefs.set_dark_theme(dark) {
                    Ok(()) => {
                        self.state.dark_theme = dark;
                        self.publish();
                    }
                    Err(e) => tracing::warn!(error = %e, "theme toggle failed"),
                }
            }
            Command::OpenDetails(id) => {
                let catalog = Arc::clone(&self.catalog);
                let _ = tokio::task::spawn_blocking(move || catalog.open_details(&id));
            }
        }
    }

    fn handle_event(&mut self, event: InternalEvent) {
        match event {
            InternalEvent::CatalogLoaded { seq, result } => {
                if seq != self.catalog_seq {
                    tracing::debug!(seq = seq, newest = self.catalog_seq, "dropping stale catalog result");
                    return;
                }
                match result {
                    Ok(raw_entries) => {
                        tracing::debug!(count = raw_entries.len(), "catalog enumeration complete");
                        self.raw_entries = raw_entries;
                        self.state.loading = false;
                        self.remerge();
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "catalog enumeration failed, retaining previous entries");
                        self.state.loading = false;
                        self.publish();
                    }
                }
            }
        }
    }

    /// Arms (or rearms) the single debounce slot with a new query value.
    fn schedule_query(&mut self, query: String) {
        tracing::trace!(query = %query, "query scheduled");
        self.pending_query = Some(query);
        self.deadline = Some(Instant::now() + self.debounce);
    }

    /// Applies the value left in the debounce slot when the timer fired.
    fn apply_pending_query(&mut self) {
        if let Some(query) = self.pending_query.take() {
            tracing::debug!(query = %query, "applying debounced query");
            self.state.query = query;
            self.state.filtered_entries = search::project(&self.state.all_entries, &self.state.query);
            self.publish();
        }
    }

    /// Issues a new catalog enumeration under the next sequence number.
    fn start_catalog_load(&mut self) {
        self.catalog_seq += 1;
        let seq = self.catalog_seq;
        tracing::debug!(seq = seq, "starting catalog enumeration");

        self.state.loading = true;
        self.publish();

        let catalog = Arc::clone(&self.catalog);
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = match tokio::task::spawn_blocking(move || catalog.list_launchable()).await {
                Ok(result) => result,
                Err(e) => Err(DrawerError::Catalog(format!("enumeration task failed: {e}"))),
            };
            let _ = event_tx.send(InternalEvent::CatalogLoaded { seq, result });
        });
    }

    /// Launches off-path; usage is recorded on success only, fire-and-forget.
    fn spawn_launch(&self, id: String) {
        let catalog = Arc::clone(&self.catalog);
        let prefs = Arc::clone(&self.prefs);
        let _ = tokio::task::spawn_blocking(move || {
            if catalog.launch(&id) {
                if let Err(e) = prefs.increment_usage(&id) {
                    tracing::warn!(id = %id, error = %e, "failed to record launch usage");
                }
            } else {
                tracing::debug!(id = %id, "launch failed, usage not recorded");
            }
        });
    }

    /// Rebuilds enriched, pinned, and filtered lists from the retained raw
    /// entries and a fresh preference snapshot, then publishes.
    fn remerge(&mut self) {
        let _span = tracing::debug_span!("remerge", raw_count = self.raw_entries.len()).entered();

        let snapshot = self.prefs.snapshot();
        self.state.all_entries = merge::merge(&self.raw_entries, &snapshot);
        self.state.pinned_entries = merge::pinned_of(&self.state.all_entries);
        self.state.filtered_entries = search::project(&self.state.all_entries, &self.state.query);
        self.publish();
    }

    /// Publishes a wholesale replacement of the view state.
    fn publish(&self) {
        tracing::trace!(
            all = self.state.all_entries.len(),
            filtered = self.state.filtered_entries.len(),
            pinned = self.state.pinned_entries.len(),
            loading = self.state.loading,
            "publishing view state"
        );
        self.state_tx.send_replace(self.state.clone());
    }
}
