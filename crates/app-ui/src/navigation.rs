//! Navigation primitives for the UI layer
//!
//! This module provides the pieces rendering surfaces build on:
//! - Tab bar definitions
//! - Keyed stack entries for stack views
//! - Transition animations
//! - Deep-link routing from URL paths to screens
//!
//! The navigation state itself lives in [`app_state::NavigationController`];
//! nothing here keeps its own copy of the current screen.

use app_state::{NavigationController, Screen};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

// =============================================================================
// Navigation Tabs
// =============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Home tab
    #[default]
    Home,
    /// Photo grid tab
    Gallery,
    /// Capture tab
    Camera,
    /// Activity tab
    Notifications,
    /// Profile tab
    Profile,
}

impl Tab {
    /// Get the root screen for this tab
    pub fn root_screen(&self) -> Screen {
        match self {
            Tab::Home => Screen::Home,
            Tab::Gallery => Screen::Gallery,
            Tab::Camera => Screen::Camera,
            Tab::Notifications => Screen::Notifications,
            Tab::Profile => Screen::Profile,
        }
    }

    /// Get the tab whose root is `screen`, if any
    pub fn for_screen(screen: Screen) -> Option<Tab> {
        Tab::all().into_iter().find(|tab| tab.root_screen() == screen)
    }

    /// Get icon name for this tab
    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Home => "house",
            Tab::Gallery => "photo.on.rectangle",
            Tab::Camera => "camera",
            Tab::Notifications => "bell",
            Tab::Profile => "person.circle",
        }
    }

    /// Get label for this tab
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Gallery => "Gallery",
            Tab::Camera => "Camera",
            Tab::Notifications => "Activity",
            Tab::Profile => "Profile",
        }
    }

    /// Get all tabs in order
    pub fn all() -> [Tab; 5] {
        [
            Tab::Home,
            Tab::Gallery,
            Tab::Camera,
            Tab::Notifications,
            Tab::Profile,
        ]
    }
}

// =============================================================================
// Stack Entries
// =============================================================================

/// A rendered stack entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The screen
    pub screen: Screen,
    /// Unique key for this entry, stable while the entry stays on the stack
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry with a fresh key
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Animation type for navigation transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavigationAnimation {
    /// Push animation (slide in from right)
    Push,
    /// Pop animation (slide out to right)
    Pop,
    /// None (instant)
    #[default]
    None,
}

impl NavigationAnimation {
    /// Pick the animation for a change from `old_depth` to `new_depth`
    ///
    /// Single-step changes slide; anything else (resets, replacements) jumps.
    pub fn between(old_depth: usize, new_depth: usize) -> Self {
        if new_depth == old_depth + 1 {
            NavigationAnimation::Push
        } else if new_depth + 1 == old_depth {
            NavigationAnimation::Pop
        } else {
            NavigationAnimation::None
        }
    }
}

// =============================================================================
// Router
// =============================================================================

/// Errors resolving a deep link
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// No screen matches the path
    #[error("No screen for path: {0}")]
    NotFound(String),

    /// Screens are flat; nested paths are not routable
    #[error("Nested path not supported: {0}")]
    Nested(String),
}

/// Result type for routing
pub type Result<T> = std::result::Result<T, RouteError>;

/// URL router for turning deep links into screen requests
#[derive(Debug, Clone)]
pub struct Router {
    /// Screens by path segment
    routes: HashMap<&'static str, Screen>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create a router with every screen registered
    pub fn new() -> Self {
        let routes = Screen::all()
            .into_iter()
            .map(|screen| (screen.slug(), screen))
            .collect();
        Self { routes }
    }

    /// Match a path to a screen
    ///
    /// Query strings and trailing slashes are ignored. `/` is the home screen.
    pub fn match_path(&self, path: &str) -> Result<Screen> {
        match Self::segments(path).as_slice() {
            [] => Ok(Screen::Home),
            [segment] => self
                .routes
                .get(segment)
                .copied()
                .ok_or_else(|| RouteError::NotFound(path.to_string())),
            _ => Err(RouteError::Nested(path.to_string())),
        }
    }

    /// Resolve `path` and ask the controller to show it
    ///
    /// `/` and the root screen's own path go home by resetting rather than
    /// stacking a second copy; the returned screen is then the controller's
    /// root. Unroutable paths leave the controller untouched.
    pub fn open(&self, controller: &NavigationController, path: &str) -> Result<Screen> {
        let screen = self.match_path(path)?;
        debug!(path, %screen, "opening deep link");

        let root = controller.root();
        if screen == root || Self::segments(path).is_empty() {
            controller.reset_to_root();
            Ok(root)
        } else {
            controller.push(screen);
            Ok(screen)
        }
    }

    /// Non-empty path segments, query string dropped
    fn segments(path: &str) -> Vec<&str> {
        let pathname = match path.split_once('?') {
            Some((pathname, _query)) => pathname,
            None => path,
        };
        pathname.split('/').filter(|s| !s.is_empty()).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
