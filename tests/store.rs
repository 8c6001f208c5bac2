//! Integration tests for the orchestrator: startup, debounce, preference
//! reactions, launch accounting, and refresh sequencing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use appdrawer::catalog::CatalogSource;
use appdrawer::domain::{DrawerError, RawEntry, Result};
use appdrawer::storage::{MemoryBackend, PreferenceStore};
use appdrawer::{Config, StateStore, ViewState};
use tokio::sync::watch;

/// Catalog fixture serving queued enumeration results.
///
/// Once the queue is exhausted, further enumerations return an empty list.
/// Launches succeed or fail according to `launch_ok` and are recorded.
struct FakeCatalog {
    responses: Mutex<VecDeque<Result<Vec<RawEntry>>>>,
    launch_ok: AtomicBool,
    launched: Mutex<Vec<String>>,
}

impl FakeCatalog {
    fn with_entries(entries: Vec<RawEntry>) -> Arc<Self> {
        let mut responses = VecDeque::new();
        responses.push_back(Ok(entries));
        Arc::new(Self {
            responses: Mutex::new(responses),
            launch_ok: AtomicBool::new(true),
            launched: Mutex::new(Vec::new()),
        })
    }

    fn push_response(&self, response: Result<Vec<RawEntry>>) {
        self.responses.lock().expect("responses lock").push_back(response);
    }

    fn set_launch_ok(&self, ok: bool) {
        self.launch_ok.store(ok, Ordering::SeqCst);
    }

    fn launched(&self) -> Vec<String> {
        self.launched.lock().expect("launched lock").clone()
    }
}

impl CatalogSource for FakeCatalog {
    fn list_launchable(&self) -> Result<Vec<RawEntry>> {
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Ok(vec![]))
    }

    fn launch(&self, id: &str) -> bool {
        self.launched.lock().expect("launched lock").push(id.to_string());
        self.launch_ok.load(Ordering::SeqCst)
    }

    fn open_details(&self, _id: &str) {}
}

/// Catalog fixture whose enumerations block until the test releases them.
///
/// Each call signals that it started, then waits for its entries. Used to
/// exercise overlapping refreshes with controlled completion order.
struct GatedCatalog {
    gates: Mutex<VecDeque<(mpsc::Sender<()>, mpsc::Receiver<Vec<RawEntry>>)>>,
}

impl GatedCatalog {
    /// Returns the catalog plus, per expected call: a "started" receiver and
    /// a sender that releases that call with its entries.
    fn with_gates(count: usize) -> (Arc<Self>, Vec<(mpsc::Receiver<()>, mpsc::Sender<Vec<RawEntry>>)>) {
        let mut gates = VecDeque::new();
        let mut controls = Vec::new();
        for _ in 0..count {
            let (started_tx, started_rx) = mpsc::channel();
            let (release_tx, release_rx) = mpsc::channel();
            gates.push_back((started_tx, release_rx));
            controls.push((started_rx, release_tx));
        }
        (Arc::new(Self { gates: Mutex::new(gates) }), controls)
    }
}

impl CatalogSource for GatedCatalog {
    fn list_launchable(&self) -> Result<Vec<RawEntry>> {
        let (started_tx, release_rx) = self
            .gates
            .lock()
            .expect("gates lock")
            .pop_front()
            .expect("unexpected extra enumeration");
        let _ = started_tx.send(());
        release_rx
            .recv()
            .map_err(|_| DrawerError::Catalog("gate dropped".to_string()))
    }

    fn launch(&self, _id: &str) -> bool {
        false
    }

    fn open_details(&self, _id: &str) {}
}

fn prefs() -> Arc<PreferenceStore> {
    Arc::new(PreferenceStore::new(Box::new(MemoryBackend::new())).expect("preference store"))
}

fn sample_entries() -> Vec<RawEntry> {
    vec![
        RawEntry::new("org.example.alpha", "Alpha"),
        RawEntry::new("org.example.beta", "Beta"),
    ]
}

/// Waits until the state stream publishes a value satisfying `pred`.
async fn wait_for(
    rx: &mut watch::Receiver<ViewState>,
    pred: impl Fn(&ViewState) -> bool,
) -> ViewState {
    loop {
        {
            let state = rx.borrow_and_update();
            if pred(&state) {
                return state.clone();
            }
        }
        rx.changed().await.expect("state stream closed");
    }
}

#[tokio::test(start_paused = true)]
async fn startup_publishes_loading_then_entries() {
    let catalog = FakeCatalog::with_entries(sample_entries());
    let store = StateStore::spawn(catalog, prefs(), &Config::default());
    let mut rx = store.subscribe();

    assert!(store.current().loading);
    assert!(store.current().all_entries.is_empty());

    let state = wait_for(&mut rx, |s| !s.loading).await;
    assert_eq!(state.all_entries.len(), 2);
    assert_eq!(state.filtered_entries.len(), 2);
    assert_eq!(state.query, "");
    assert!(state.pinned_entries.is_empty());
}

#[tokio::test(start_paused = true)]
async fn debounce_applies_only_the_newest_query() {
    let catalog = FakeCatalog::with_entries(sample_entries());
    let store = StateStore::spawn(catalog, prefs(), &Config::default());
    let mut rx = store.subscribe();

    // Record every published state to prove intermediates never appear.
    let seen: Arc<Mutex<Vec<ViewState>>> = Arc::new(Mutex::new(Vec::new()));
    let collector_seen = Arc::clone(&seen);
    let mut collector_rx = store.subscribe();
    tokio::spawn(async move {
        while collector_rx.changed().await.is_ok() {
            let state = collector_rx.borrow().clone();
            collector_seen.lock().expect("seen lock").push(state);
        }
    });

    wait_for(&mut rx, |s| !s.loading).await;

    store.set_query("a");
    store.set_query("al");
    store.set_query("alp");

    let state = wait_for(&mut rx, |s| s.query == "alp").await;
    assert_eq!(state.filtered_entries.len(), 1);
    assert_eq!(state.filtered_entries[0].id, "org.example.alpha");

    let seen = seen.lock().expect("seen lock");
    assert!(
        seen.iter().all(|s| s.query.is_empty() || s.query == "alp"),
        "intermediate query projections must never be published"
    );
}

#[tokio::test(start_paused = true)]
async fn clear_query_restores_full_projection() {
    let catalog = FakeCatalog::with_entries(sample_entries());
    let store = StateStore::spawn(catalog, prefs(), &Config::default());
    let mut rx = store.subscribe();

    wait_for(&mut rx, |s| !s.loading).await;

    store.set_query("alpha");
    wait_for(&mut rx, |s| s.query == "alpha").await;

    store.clear_query();
    let state = wait_for(&mut rx, |s| s.query.is_empty() && !s.loading).await;
    assert_eq!(state.filtered_entries.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn rename_overrides_and_blank_restores_canonical_name() {
    let catalog = FakeCatalog::with_entries(sample_entries());
    let store = StateStore::spawn(catalog, prefs(), &Config::default());
    let mut rx = store.subscribe();

    wait_for(&mut rx, |s| !s.loading).await;

    store.rename("org.example.alpha", "Primary");
    let state = wait_for(&mut rx, |s| {
        s.all_entries.iter().any(|e| e.display_name == "Primary")
    })
    .await;
    let entry = state
        .all_entries
        .iter()
        .find(|e| e.id == "org.example.alpha")
        .expect("entry present");
    assert_eq!(entry.name, "Alpha");

    store.rename("org.example.alpha", "");
    wait_for(&mut rx, |s| {
        s.all_entries
            .iter()
            .any(|e| e.id == "org.example.alpha" && e.display_name == "Alpha")
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn toggle_pin_round_trips_through_state() {
    let catalog = FakeCatalog::with_entries(sample_entries());
    let store = StateStore::spawn(catalog, prefs(), &Config::default());
    let mut rx = store.subscribe();

    wait_for(&mut rx, |s| !s.loading).await;

    store.toggle_pin("org.example.beta");
    let state = wait_for(&mut rx, |s| !s.pinned_entries.is_empty()).await;
    assert_eq!(state.pinned_entries[0].id, "org.example.beta");
    assert!(state
        .all_entries
        .iter()
        .find(|e| e.id == "org.example.beta")
        .is_some_and(|e| e.pinned));

    store.toggle_pin("org.example.beta");
    wait_for(&mut rx, |s| s.pinned_entries.is_empty()).await;
}

#[tokio::test(start_paused = true)]
async fn successful_launch_records_usage_in_next_state() {
    let catalog = FakeCatalog::with_entries(sample_entries());
    let store = StateStore::spawn(Arc::clone(&catalog) as Arc<dyn CatalogSource>, prefs(), &Config::default());
    let mut rx = store.subscribe();

    wait_for(&mut rx, |s| !s.loading).await;

    store.launch("org.example.alpha");
    let state = wait_for(&mut rx, |s| {
        s.all_entries
            .iter()
            .any(|e| e.id == "org.example.alpha" && e.launch_count == 1)
    })
    .await;
    assert_eq!(catalog.launched(), vec!["org.example.alpha".to_string()]);

    let entry = state
        .all_entries
        .iter()
        .find(|e| e.id == "org.example.alpha")
        .expect("entry present");
    assert!(entry.last_used > 0);
}

#[tokio::test]
async fn failed_launch_records_no_usage() {
    let catalog = FakeCatalog::with_entries(sample_entries());
    catalog.set_launch_ok(false);
    let prefs = prefs();
    let store = StateStore::spawn(
        Arc::clone(&catalog) as Arc<dyn CatalogSource>,
        Arc::clone(&prefs),
        &Config::default(),
    );
    let mut rx = store.subscribe();

    wait_for(&mut rx, |s| !s.loading).await;

    store.launch("org.example.alpha");

    // Wait until the launch call itself has happened, then give any (wrong)
    // usage emission time to propagate.
    while catalog.launched().is_empty() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(prefs.snapshot().usage.is_empty());
    assert!(store.current().all_entries.iter().all(|e| e.launch_count == 0));
}

#[tokio::test(start_paused = true)]
async fn enumeration_error_retains_entries_and_clears_loading() {
    let catalog = FakeCatalog::with_entries(sample_entries());
    catalog.push_response(Err(DrawerError::Catalog("enumeration failed".to_string())));
    let store = StateStore::spawn(Arc::clone(&catalog) as Arc<dyn CatalogSource>, prefs(), &Config::default());
    let mut rx = store.subscribe();

    wait_for(&mut rx, |s| !s.loading && s.all_entries.len() == 2).await;

    store.refresh();
    wait_for(&mut rx, |s| s.loading).await;
    let state = wait_for(&mut rx, |s| !s.loading).await;

    assert_eq!(state.all_entries.len(), 2, "previous entries must be retained");
    assert_eq!(state.filtered_entries.len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stale_enumeration_never_overwrites_newer_result() {
    let (catalog, mut controls) = GatedCatalog::with_gates(2);
    let store = StateStore::spawn(
        Arc::clone(&catalog) as Arc<dyn CatalogSource>,
        prefs(),
        &Config::default(),
    );
    let mut rx = store.subscribe();

    let (first_started, first_release) = controls.remove(0);
    let (second_started, second_release) = controls.remove(0);

    // First enumeration is in flight...
    first_started
        .recv_timeout(Duration::from_secs(5))
        .expect("first enumeration started");

    // ...when a refresh supersedes it.
    store.refresh();
    second_started
        .recv_timeout(Duration::from_secs(5))
        .expect("second enumeration started");

    // The newer request completes first.
    second_release
        .send(vec![RawEntry::new("org.example.new", "New")])
        .expect("release second");
    let state = wait_for(&mut rx, |s| !s.loading && !s.all_entries.is_empty()).await;
    assert_eq!(state.all_entries[0].id, "org.example.new");

    // The stale completion arrives afterwards and must be dropped.
    first_release
        .send(vec![RawEntry::new("org.example.old", "Old")])
        .expect("release first");
    tokio::time::sleep(Duration::from_millis(100)).await;

    let current = store.current();
    assert_eq!(current.all_entries.len(), 1);
    assert_eq!(current.all_entries[0].id, "org.example.new");
}

#[tokio::test(start_paused = true)]
async fn theme_toggle_is_observable_in_next_state() {
    let catalog = FakeCatalog::with_entries(sample_entries());
    let prefs = prefs();
    let store = StateStore::spawn(catalog, Arc::clone(&prefs), &Config::default());
    let mut rx = store.subscribe();

    wait_for(&mut rx, |s| !s.loading).await;
    assert!(!store.current().dark_theme);

    store.toggle_theme();
    wait_for(&mut rx, |s| s.dark_theme).await;
    assert!(prefs.dark_theme());

    store.toggle_theme();
    wait_for(&mut rx, |s| !s.dark_theme).await;
}

#[tokio::test(start_paused = true)]
async fn projection_orders_by_usage_then_name() {
    let catalog = FakeCatalog::with_entries(vec![
        RawEntry::new("org.example.b", "b"),
        RawEntry::new("org.example.a", "a"),
        RawEntry::new("org.example.z", "z"),
    ]);
    let prefs = prefs();
    prefs.increment_usage_at("org.example.b", 10).expect("usage");
    prefs.increment_usage_at("org.example.a", 20).expect("usage");

    let store = StateStore::spawn(catalog, prefs, &Config::default());
    let mut rx = store.subscribe();

    let state = wait_for(&mut rx, |s| !s.loading).await;
    let names: Vec<&str> = state.filtered_entries.iter().map(|e| e.display_name.as_str()).collect();
    // Equal counts tie-break alphabetically; unused entries sort last.
    assert_eq!(names, ["a", "b", "z"]);
}
