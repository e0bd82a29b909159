//! Keepsake application shell
//!
//! Wires one [`NavigationController`](app_state::NavigationController) to the
//! rendering surfaces at startup. Everything else in the app consumes the
//! controller handed out here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod logging;

pub use app::App;
pub use config::{AppConfig, ConfigError};
pub use logging::init_logging;
