//! Rendering surfaces
//!
//! A surface is a view hierarchy that mirrors the controller's path. The app
//! ships two of them, built on different toolkits, and both subscribe to the
//! same [`NavigationController`] so they cannot drift apart:
//!
//! - [`StackSurface`] models the native stack view: one keyed entry per path
//!   element, with push/pop animations.
//! - [`TabSurface`] models the cross-platform tab navigator: an active tab,
//!   the stack inside it, and transient overlays.
//!
//! Surfaces only ever change navigation by calling the controller.

use app_state::{NavigationController, NavigationPath, PopOutcome, Screen, Subscription};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::navigation::{NavigationAnimation, StackEntry, Tab};

/// A view hierarchy driven by the navigation path
#[cfg_attr(test, mockall::automock)]
pub trait RenderSurface: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Re-render to match `path`
    fn render(&self, path: &NavigationPath);
}

/// Render `surface` once and keep it in sync with `controller`
///
/// The controller only holds a weak reference to the surface; once the last
/// `Arc` is gone, notifications to it are skipped.
pub fn attach<S>(surface: &Arc<S>, controller: &NavigationController) -> Subscription
where
    S: RenderSurface + 'static,
{
    surface.render(&controller.path());

    let target = Arc::downgrade(surface);
    let name = surface.name();
    debug!(surface = name, "surface attached");

    controller.observe(move |path| match target.upgrade() {
        Some(surface) => surface.render(path),
        None => trace!(surface = name, "surface gone, skipping render"),
    })
}

// =============================================================================
// Native stack surface
// =============================================================================

#[derive(Debug, Default)]
struct StackState {
    entries: Vec<StackEntry>,
    animation: NavigationAnimation,
    renders: usize,
}

/// Native stack view mirror
#[derive(Debug, Default)]
pub struct StackSurface {
    state: Mutex<StackState>,
}

impl StackSurface {
    /// Create an empty surface; it fills on first render
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the rendered entries, bottom to top
    pub fn entries(&self) -> Vec<StackEntry> {
        self.state.lock().entries.clone()
    }

    /// Get the visible screen
    pub fn visible(&self) -> Option<Screen> {
        self.state.lock().entries.last().map(|entry| entry.screen)
    }

    /// Get the navigation bar title
    pub fn title(&self) -> &'static str {
        self.visible().map(|screen| screen.title()).unwrap_or_default()
    }

    /// Check if the back button is shown
    pub fn show_back_button(&self) -> bool {
        self.state.lock().entries.len() > 1
    }

    /// Animation used for the last transition
    pub fn last_animation(&self) -> NavigationAnimation {
        self.state.lock().animation
    }

    /// Number of renders so far
    pub fn render_count(&self) -> usize {
        self.state.lock().renders
    }
}

impl RenderSurface for StackSurface {
    fn name(&self) -> &'static str {
        "stack"
    }

    fn render(&self, path: &NavigationPath) {
        let mut state = self.state.lock();
        let old_depth = state.entries.len();

        // Entries matching the new path keep their keys
        let common = state
            .entries
            .iter()
            .zip(path.iter())
            .take_while(|(entry, screen)| entry.screen == *screen)
            .count();

        state.entries.truncate(common);
        state
            .entries
            .extend(path.iter().skip(common).map(StackEntry::new));

        state.animation = if state.renders == 0 {
            NavigationAnimation::None
        } else {
            NavigationAnimation::between(old_depth, path.depth())
        };
        state.renders += 1;

        trace!(depth = path.depth(), kept = common, "stack surface rendered");
    }
}

// =============================================================================
// Tab navigator surface
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TabState {
    active_tab: Tab,
    visible: Screen,
    inner_depth: usize,
    overlay_open: bool,
}

/// Cross-platform tab navigator mirror
#[derive(Debug)]
pub struct TabSurface {
    controller: Arc<NavigationController>,
    state: Mutex<TabState>,
}

impl TabSurface {
    /// Create a tab surface that requests transitions through `controller`
    pub fn new(controller: Arc<NavigationController>) -> Self {
        let state = Self::derive(&controller.path(), false);
        Self {
            controller,
            state: Mutex::new(state),
        }
    }

    /// Get the highlighted tab
    pub fn active_tab(&self) -> Tab {
        self.state.lock().active_tab
    }

    /// Get the visible screen
    pub fn visible(&self) -> Screen {
        self.state.lock().visible
    }

    /// Number of screens stacked above the active tab's root
    pub fn inner_depth(&self) -> usize {
        self.state.lock().inner_depth
    }

    /// Check if a transient overlay is shown
    pub fn overlay_open(&self) -> bool {
        self.state.lock().overlay_open
    }

    /// Show a transient overlay (share sheet, picker)
    pub fn open_overlay(&self) {
        self.state.lock().overlay_open = true;
    }

    /// Switch to `tab`
    ///
    /// Tab switches start from a fresh root: the path is reset and the tab's
    /// root screen pushed unless it already is the root.
    pub fn select_tab(&self, tab: Tab) {
        debug!(?tab, "tab selected");
        self.controller.reset_to_root();

        let screen = tab.root_screen();
        if screen != self.controller.root() {
            self.controller.push(screen);
        }
    }

    /// Handle the back gesture
    pub fn back(&self) -> PopOutcome {
        self.controller.pop()
    }

    fn derive(path: &NavigationPath, overlay_open: bool) -> TabState {
        let screens = path.screens();

        // The deepest tab root decides which tab is highlighted
        let (active_tab, tab_index) = screens
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, screen)| Tab::for_screen(*screen).map(|tab| (tab, index)))
            .unwrap_or((Tab::Home, 0));

        TabState {
            active_tab,
            visible: path.top(),
            inner_depth: screens.len() - 1 - tab_index,
            overlay_open: overlay_open && path.can_go_back(),
        }
    }
}

impl RenderSurface for TabSurface {
    fn name(&self) -> &'static str {
        "tabs"
    }

    fn render(&self, path: &NavigationPath) {
        let mut state = self.state.lock();
        let next = Self::derive(path, state.overlay_open);

        if state.overlay_open && !next.overlay_open {
            debug!("overlay collapsed at root");
        }
        *state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::function;

    #[test]
    fn test_attach_renders_immediately_and_on_change() {
        let controller = NavigationController::default();

        let mut mock = MockRenderSurface::new();
        mock.expect_name().return_const("mock");
        mock.expect_render()
            .with(function(|path: &NavigationPath| path.top() == Screen::Home))
            .times(1)
            .return_const(());
        mock.expect_render()
            .with(function(|path: &NavigationPath| path.top() == Screen::Gallery))
            .times(1)
            .return_const(());

        let surface = Arc::new(mock);
        let _sub = attach(&surface, &controller);
        controller.push(Screen::Gallery);
    }

    #[test]
    fn test_detached_surface_not_rendered() {
        let controller = NavigationController::default();

        let mut mock = MockRenderSurface::new();
        mock.expect_name().return_const("mock");
        mock.expect_render().times(1).return_const(());

        let surface = Arc::new(mock);
        let sub = attach(&surface, &controller);
        sub.unsubscribe();

        controller.push(Screen::Camera);
        controller.reset_to_root();
    }

    #[test]
    fn test_dropped_surface_is_skipped() {
        let controller = NavigationController::default();
        let surface = Arc::new(StackSurface::new());
        let _sub = attach(&surface, &controller);
        drop(surface);

        // Must not panic
        controller.push(Screen::Feed);
        assert_eq!(controller.listener_count(), 1);
    }

    #[test]
    fn test_stack_surface_mirrors_path() {
        let controller = NavigationController::default();
        let surface = Arc::new(StackSurface::new());
        let _sub = attach(&surface, &controller);

        assert_eq!(surface.visible(), Some(Screen::Home));
        assert_eq!(surface.title(), "Home");
        assert!(!surface.show_back_button());

        controller.push(Screen::Gallery);
        controller.push(Screen::StoryCreator);
        assert_eq!(surface.visible(), Some(Screen::StoryCreator));
        assert_eq!(surface.title(), "New Story");
        assert!(surface.show_back_button());
        assert_eq!(surface.entries().len(), 3);
    }

    #[test]
    fn test_stack_surface_keeps_prefix_keys() {
        let controller = NavigationController::default();
        let surface = Arc::new(StackSurface::new());
        let _sub = attach(&surface, &controller);

        controller.push(Screen::Gallery);
        let before = surface.entries();

        controller.push(Screen::Profile);
        controller.pop();
        let after = surface.entries();

        assert_eq!(before, after);
    }

    #[test]
    fn test_stack_surface_animations() {
        let controller = NavigationController::default();
        let surface = Arc::new(StackSurface::new());
        let _sub = attach(&surface, &controller);
        assert_eq!(surface.last_animation(), NavigationAnimation::None);

        controller.push(Screen::Gallery);
        assert_eq!(surface.last_animation(), NavigationAnimation::Push);

        controller.push(Screen::Profile);
        controller.pop();
        assert_eq!(surface.last_animation(), NavigationAnimation::Pop);

        controller.push(Screen::Profile);
        controller.reset_to_root();
        assert_eq!(surface.last_animation(), NavigationAnimation::None);
    }

    #[test]
    fn test_stack_surface_renders_on_noop_reset() {
        let controller = NavigationController::default();
        let surface = Arc::new(StackSurface::new());
        let _sub = attach(&surface, &controller);
        let root_key = surface.entries()[0].key.clone();

        controller.reset_to_root();
        controller.reset_to_root();

        assert_eq!(surface.render_count(), 3);
        assert_eq!(surface.entries()[0].key, root_key);
    }

    #[test]
    fn test_tab_surface_active_tab() {
        let controller = Arc::new(NavigationController::default());
        let surface = Arc::new(TabSurface::new(Arc::clone(&controller)));
        let _sub = attach(&surface, &controller);

        assert_eq!(surface.active_tab(), Tab::Home);
        assert_eq!(surface.inner_depth(), 0);

        controller.push(Screen::Gallery);
        controller.push(Screen::Settings);
        assert_eq!(surface.active_tab(), Tab::Gallery);
        assert_eq!(surface.visible(), Screen::Settings);
        assert_eq!(surface.inner_depth(), 1);
    }

    #[test]
    fn test_tab_surface_select_tab() {
        let controller = Arc::new(NavigationController::default());
        let surface = Arc::new(TabSurface::new(Arc::clone(&controller)));
        let _sub = attach(&surface, &controller);

        controller.push(Screen::Feed);
        controller.push(Screen::Messages);

        surface.select_tab(Tab::Camera);
        assert_eq!(controller.path(), [Screen::Home, Screen::Camera]);
        assert_eq!(surface.active_tab(), Tab::Camera);

        surface.select_tab(Tab::Home);
        assert_eq!(controller.path(), [Screen::Home]);
        assert_eq!(surface.active_tab(), Tab::Home);
    }

    #[test]
    fn test_tab_surface_select_root_tab_on_custom_root() {
        let controller = Arc::new(NavigationController::with_root(Screen::Camera));
        let surface = Arc::new(TabSurface::new(Arc::clone(&controller)));
        let _sub = attach(&surface, &controller);

        assert_eq!(surface.active_tab(), Tab::Camera);

        surface.select_tab(Tab::Camera);
        assert_eq!(controller.path(), [Screen::Camera]);
    }

    #[test]
    fn test_tab_surface_overlay_collapses_on_reset() {
        let controller = Arc::new(NavigationController::default());
        let surface = Arc::new(TabSurface::new(Arc::clone(&controller)));
        let _sub = attach(&surface, &controller);

        controller.push(Screen::Gallery);
        surface.open_overlay();
        controller.push(Screen::Profile);
        assert!(surface.overlay_open());

        controller.reset_to_root();
        assert!(!surface.overlay_open());
    }

    #[test]
    fn test_tab_surface_back() {
        let controller = Arc::new(NavigationController::default());
        let surface = Arc::new(TabSurface::new(Arc::clone(&controller)));
        let _sub = attach(&surface, &controller);

        assert_eq!(surface.back(), PopOutcome::AtRoot);

        controller.push(Screen::Search);
        assert_eq!(surface.back(), PopOutcome::Popped(Screen::Search));
        assert_eq!(surface.visible(), Screen::Home);
    }

    #[test]
    fn test_surfaces_agree() {
        let controller = Arc::new(NavigationController::default());
        let stack = Arc::new(StackSurface::new());
        let tabs = Arc::new(TabSurface::new(Arc::clone(&controller)));
        let _a = attach(&stack, &controller);
        let _b = attach(&tabs, &controller);

        let script = [
            Some(Screen::Gallery),
            Some(Screen::Profile),
            None,
            Some(Screen::Gallery),
            Some(Screen::Gallery),
            None,
        ];
        for step in script {
            match step {
                Some(screen) => controller.push(screen),
                None => {
                    controller.pop();
                }
            }
            assert_eq!(stack.visible(), Some(controller.current_top()));
            assert_eq!(tabs.visible(), controller.current_top());
        }

        tabs.select_tab(Tab::Notifications);
        assert_eq!(stack.visible(), Some(Screen::Notifications));
        assert_eq!(stack.entries().len(), 2);
    }
}
