//! User interface for Keepsake
//!
//! This crate provides the UI-side consumers of the navigation state: the
//! tab bar, deep-link routing, and the two rendering surfaces (native stack
//! view and cross-platform tab navigator).
//!
//! # Modules
//!
//! - [`navigation`] - Tabs, keyed stack entries, animations and routing
//! - [`surfaces`] - View hierarchies kept in sync with the controller
//!
//! # Example
//!
//! ```rust
//! use app_state::{NavigationController, Screen};
//! use app_ui::surfaces::{attach, StackSurface, TabSurface};
//! use app_ui::Tab;
//! use std::sync::Arc;
//!
//! let controller = Arc::new(NavigationController::default());
//! let stack = Arc::new(StackSurface::new());
//! let tabs = Arc::new(TabSurface::new(Arc::clone(&controller)));
//! let _stack_sub = attach(&stack, &controller);
//! let _tabs_sub = attach(&tabs, &controller);
//!
//! tabs.select_tab(Tab::Gallery);
//! assert_eq!(stack.visible(), Some(Screen::Gallery));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod navigation;
pub mod surfaces;

pub use navigation::{NavigationAnimation, RouteError, Router, StackEntry, Tab};
pub use surfaces::{attach, RenderSurface, StackSurface, TabSurface};
