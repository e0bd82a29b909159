//! Navigation controller
//!
//! The controller exclusively owns the [`NavigationPath`] and broadcasts every
//! change. Rendering surfaces never hold a competing copy of the current
//! screen: they read [`NavigationController::current_top`] or observe the
//! path, and request transitions through [`push`](NavigationController::push),
//! [`pop`](NavigationController::pop) and
//! [`reset_to_root`](NavigationController::reset_to_root).
//!
//! Three observation channels are offered, all fed by the same dispatcher:
//! - synchronous listeners registered with
//!   [`observe`](NavigationController::observe),
//! - a `watch` channel carrying the latest path,
//! - a `broadcast` channel carrying [`NavigationEvent`]s.

use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

use crate::path::NavigationPath;
use crate::screen::Screen;

/// Default depth above which pushes are logged as suspicious
pub const DEFAULT_DEPTH_WARNING: usize = 32;

/// Default capacity of the event broadcast channel
pub const DEFAULT_EVENT_BUFFER: usize = 64;

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Screen the path starts at and resets to
    pub root: Screen,
    /// Log a warning when a push takes the depth past this value
    ///
    /// The path still grows; this only makes runaway revisits visible.
    pub depth_warning: Option<usize>,
    /// Capacity of the event broadcast channel
    pub event_buffer: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            root: Screen::Home,
            depth_warning: Some(DEFAULT_DEPTH_WARNING),
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

/// Events broadcast when the path changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    /// A screen was pushed; `depth` is the new depth
    Pushed {
        /// Pushed screen
        screen: Screen,
        /// Depth after the push
        depth: usize,
    },
    /// A screen was popped; `depth` is the new depth
    Popped {
        /// Removed screen
        screen: Screen,
        /// Depth after the pop
        depth: usize,
    },
    /// The path was reset to the root
    Reset {
        /// Root screen
        root: Screen,
        /// Depth before the reset (1 if nothing was removed)
        previous_depth: usize,
    },
}

/// Result of [`NavigationController::pop`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopOutcome {
    /// The top screen was removed
    Popped(Screen),
    /// The path only held the root; nothing changed
    AtRoot,
}

impl PopOutcome {
    /// Check if a screen was removed
    pub fn is_popped(&self) -> bool {
        matches!(self, PopOutcome::Popped(_))
    }
}

/// Identifier of a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&NavigationPath) + Send + Sync>;

#[derive(Default)]
struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

impl ListenerRegistry {
    fn insert(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn snapshot(&self) -> Vec<Listener> {
        self.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
    }
}

/// A committed change waiting to be announced
struct PathChange {
    path: NavigationPath,
    event: NavigationEvent,
}

struct ControllerState {
    path: NavigationPath,
    pending: VecDeque<PathChange>,
    dispatching: bool,
}

/// Capability to unregister a listener
///
/// Dropping the subscription unregisters the listener. The subscription does
/// not keep the controller alive.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<Mutex<ListenerRegistry>>,
}

impl Subscription {
    /// Identifier of the registered listener
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Unregister the listener
    pub fn unsubscribe(self) {
        // Drop does the work
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.lock().remove(self.id) {
                debug!(listener = self.id.0, "navigation listener removed");
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Clears the dispatching flag if a listener panics mid-dispatch
///
/// Queued changes are kept; the next mutation announces them first.
struct DispatchGuard<'a> {
    state: &'a Mutex<ControllerState>,
    armed: bool,
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.lock().dispatching = false;
        }
    }
}

/// Single source of truth for the visible screen
///
/// Created once at startup and shared by `Arc` with every screen-level
/// consumer.
///
/// # Example
///
/// ```
/// use app_state::{NavigationController, NavigationConfig, Screen};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let controller = NavigationController::new(NavigationConfig::default());
/// let seen = Arc::new(AtomicUsize::new(0));
///
/// let counter = Arc::clone(&seen);
/// let subscription = controller.observe(move |_path| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// controller.push(Screen::Gallery);
/// assert_eq!(controller.current_top(), Screen::Gallery);
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
///
/// subscription.unsubscribe();
/// controller.pop();
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
pub struct NavigationController {
    config: NavigationConfig,
    state: Mutex<ControllerState>,
    listeners: Arc<Mutex<ListenerRegistry>>,
    path_tx: watch::Sender<NavigationPath>,
    events_tx: broadcast::Sender<NavigationEvent>,
}

impl NavigationController {
    /// Create a controller whose path is `[config.root]`
    pub fn new(config: NavigationConfig) -> Self {
        let path = NavigationPath::new(config.root);
        let (path_tx, _) = watch::channel(path.clone());
        let (events_tx, _) = broadcast::channel(config.event_buffer.max(1));

        Self {
            config,
            state: Mutex::new(ControllerState {
                path,
                pending: VecDeque::new(),
                dispatching: false,
            }),
            listeners: Arc::new(Mutex::new(ListenerRegistry::default())),
            path_tx,
            events_tx,
        }
    }

    /// Create a controller rooted at `root` with default settings
    pub fn with_root(root: Screen) -> Self {
        Self::new(NavigationConfig {
            root,
            ..NavigationConfig::default()
        })
    }

    /// Get the configuration this controller was built with
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Push a screen onto the path
    ///
    /// Pushing the screen that is already on top is allowed and adds a second
    /// entry.
    pub fn push(&self, screen: Screen) {
        let mut state = self.state.lock();
        state.path.push(screen);
        let depth = state.path.depth();
        debug!(%screen, depth, "navigation push");

        if let Some(limit) = self.config.depth_warning {
            if depth > limit {
                warn!(%screen, depth, limit, "navigation path exceeds depth warning");
            }
        }

        let change = PathChange {
            path: state.path.clone(),
            event: NavigationEvent::Pushed { screen, depth },
        };
        state.pending.push_back(change);
        self.dispatch(state);
    }

    /// Pop the top screen
    ///
    /// At the root this does nothing and announces nothing.
    pub fn pop(&self) -> PopOutcome {
        let mut state = self.state.lock();
        let Some(screen) = state.path.pop() else {
            debug!("navigation pop ignored at root");
            return PopOutcome::AtRoot;
        };
        let depth = state.path.depth();
        debug!(%screen, depth, "navigation pop");

        let change = PathChange {
            path: state.path.clone(),
            event: NavigationEvent::Popped { screen, depth },
        };
        state.pending.push_back(change);
        self.dispatch(state);
        PopOutcome::Popped(screen)
    }

    /// Reset the path to `[root]`
    ///
    /// Always announces, even when the path already was `[root]`, so that
    /// consumers can drop transient UI state.
    pub fn reset_to_root(&self) {
        let mut state = self.state.lock();
        let previous_depth = state.path.depth();
        state.path.clear_to_root();
        let root = state.path.root();
        debug!(%root, previous_depth, "navigation reset");

        let change = PathChange {
            path: state.path.clone(),
            event: NavigationEvent::Reset {
                root,
                previous_depth,
            },
        };
        state.pending.push_back(change);
        self.dispatch(state);
    }

    /// Get the visible screen
    pub fn current_top(&self) -> Screen {
        self.state.lock().path.top()
    }

    /// Get a snapshot of the full path
    pub fn path(&self) -> NavigationPath {
        self.state.lock().path.clone()
    }

    /// Get the path depth
    pub fn depth(&self) -> usize {
        self.state.lock().path.depth()
    }

    /// Get the root screen
    pub fn root(&self) -> Screen {
        self.config.root
    }

    /// Check if a pop would remove anything
    pub fn can_go_back(&self) -> bool {
        self.state.lock().path.can_go_back()
    }

    /// Register a listener called with the full path after every change
    pub fn observe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&NavigationPath) + Send + Sync + 'static,
    {
        let id = self.listeners.lock().insert(Arc::new(listener));
        debug!(listener = id.0, "navigation listener added");
        Subscription {
            id,
            registry: Arc::downgrade(&self.listeners),
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().listeners.len()
    }

    /// Subscribe to the latest path
    ///
    /// The receiver is marked changed on every announcement, including
    /// resets that leave the path unchanged.
    pub fn subscribe(&self) -> watch::Receiver<NavigationPath> {
        self.path_tx.subscribe()
    }

    /// Subscribe to navigation events
    pub fn subscribe_events(&self) -> broadcast::Receiver<NavigationEvent> {
        self.events_tx.subscribe()
    }

    /// Announce queued changes in commit order
    ///
    /// A mutation made from inside a listener is committed immediately and
    /// announced once the current announcement has reached every channel.
    fn dispatch<'a>(&'a self, mut state: MutexGuard<'a, ControllerState>) {
        if state.dispatching {
            return;
        }
        state.dispatching = true;

        let mut guard = DispatchGuard {
            state: &self.state,
            armed: true,
        };

        loop {
            let Some(change) = state.pending.pop_front() else {
                state.dispatching = false;
                guard.armed = false;
                return;
            };
            drop(state);

            self.announce(change);

            state = self.state.lock();
        }
    }

    fn announce(&self, change: PathChange) {
        let listeners = self.listeners.lock().snapshot();
        for listener in &listeners {
            listener(&change.path);
        }

        self.path_tx.send_replace(change.path);
        // No receivers is fine
        let _ = self.events_tx.send(change.event);
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(NavigationConfig::default())
    }
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("config", &self.config)
            .field("path", &self.path())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
