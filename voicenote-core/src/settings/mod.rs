pub mod config;
pub mod credentials;
pub mod manager;

pub use config::{ApiSettings, EncoderSettings, Settings};
pub use credentials::api_key_from_env;
pub use manager::SettingsManager;
