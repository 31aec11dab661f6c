//! Process bootstrap: settings, store selection, and startup seeding.

pub mod config;
pub mod startup;

pub use config::{ServerSettings, SettingsError};
pub use startup::{BoardBackend, StartupError, connect_backend, seed_board_on_startup};
