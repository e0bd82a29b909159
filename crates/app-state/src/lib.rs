//! Application state for Keepsake
//!
//! This crate owns the navigation state shared by every rendering surface:
//! the closed set of screens, the navigation path (back-stack), and the
//! observable controller that is the single source of truth for "which
//! screen is visible".

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod controller;
pub mod path;
pub mod screen;

pub use controller::{
    ListenerId, NavigationConfig, NavigationController, NavigationEvent, PopOutcome, Subscription,
};
pub use path::{EmptyPathError, NavigationPath};
pub use screen::{ParseScreenError, Screen};
