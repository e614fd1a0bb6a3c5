//! SheetKit Settings Crate
//!
//! Handles engine configuration and settings persistence.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{
    EngineSettings, HitTestSettings, LabelSettings, LayoutSettings, SnapSettings,
    ViewportSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use persistence::SettingsPersistence;
