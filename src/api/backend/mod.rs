pub mod client;
pub mod models;

pub use client::{BackendClient, SettingsBackend};
pub use models::{ApiError, RemoteSettings, SetSettingsResponse};
