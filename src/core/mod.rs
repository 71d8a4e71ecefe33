// src/core/mod.rs
//! Configuration and the two outbound clients

pub mod config_manager;
pub mod google_auth;
pub mod inference_client;
pub mod sheets_client;

#[cfg(test)]
pub(crate) mod test_server;

pub use config_manager::ConfigManager;
pub use google_auth::{ServiceAccountAuth, ServiceAccountKey};
pub use inference_client::{ChatCompletion, HfInferenceClient};
pub use sheets_client::{GoogleSheetsClient, SheetStore};
