pub mod settings_model;
pub mod settings_store;
pub use settings_model::*;
pub use settings_store::{InMemorySettingsStore, SettingsStore};
