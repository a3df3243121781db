// State persisted between runs

pub mod settings;

pub use settings::{LastUsedSettings, SettingsStore, DEFAULT_SEPARATOR};
