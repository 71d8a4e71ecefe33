pub mod assistant;
pub mod cli;
pub mod core;
pub mod prompts;
pub mod types;
pub mod utils;
pub mod web;

pub use assistant::{CampaignAssistant, FormError};
pub use web::{build_rocket, start_web_server};
