//! Application startup wiring

use app_state::{NavigationController, Subscription};
use app_ui::surfaces::{attach, StackSurface, TabSurface};
use app_ui::Router;
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;

/// The running application
///
/// Owns the single navigation controller and both rendering surfaces. The
/// surfaces stop receiving updates when the app is dropped.
pub struct App {
    config: AppConfig,
    controller: Arc<NavigationController>,
    stack: Arc<StackSurface>,
    tabs: Arc<TabSurface>,
    router: Router,
    _subscriptions: Vec<Subscription>,
}

impl App {
    /// Create the controller and attach the surfaces
    pub fn launch(config: AppConfig) -> Self {
        let controller = Arc::new(NavigationController::new(config.navigation.clone()));
        let stack = Arc::new(StackSurface::new());
        let tabs = Arc::new(TabSurface::new(Arc::clone(&controller)));

        let subscriptions = vec![attach(&stack, &controller), attach(&tabs, &controller)];

        info!(root = %controller.root(), "app launched");

        Self {
            config,
            controller,
            stack,
            tabs,
            router: Router::new(),
            _subscriptions: subscriptions,
        }
    }

    /// Get the configuration the app was launched with
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the navigation controller
    pub fn controller(&self) -> &Arc<NavigationController> {
        &self.controller
    }

    /// Get the native stack surface
    pub fn stack_surface(&self) -> &Arc<StackSurface> {
        &self.stack
    }

    /// Get the tab navigator surface
    pub fn tab_surface(&self) -> &Arc<TabSurface> {
        &self.tabs
    }

    /// Get the deep-link router
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Open a deep link
    pub fn open(&self, path: &str) -> app_ui::navigation::Result<app_state::Screen> {
        self.router.open(&self.controller, path)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::launch(AppConfig::default())
    }
}
