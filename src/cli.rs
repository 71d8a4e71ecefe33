// src/cli.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::IpAddr;
use tracing::info;

use crate::assistant::CampaignAssistant;
use crate::core::ConfigManager;
use crate::web::start_web_server;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ADDRESS: &str = "0.0.0.0";

#[derive(Parser)]
#[command(name = "campaign-assistant")]
#[command(about = "Job post and campaign analytics assistant")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the web form and its API (default)
    Serve {
        /// Overrides ROCKET_PORT
        #[arg(long)]
        port: Option<u16>,
        /// Overrides ROCKET_ADDRESS
        #[arg(long)]
        address: Option<IpAddr>,
    },
    /// Print which integrations are configured and exit
    Status,
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = ConfigManager::load()?;
    let assistant = CampaignAssistant::from_config(&config)?;

    match cli.command.unwrap_or(Command::Serve {
        port: None,
        address: None,
    }) {
        Command::Serve { port, address } => {
            let port = resolve_port(port, std::env::var("ROCKET_PORT").ok())?;
            let address = resolve_address(address, std::env::var("ROCKET_ADDRESS").ok())?;

            info!("Environment: {}", config.environment);
            start_web_server(assistant, address, port).await
        }
        Command::Status => {
            let status = assistant.status();
            info!("Environment: {}", config.environment);
            info!("Model: {}", status.model_id);
            info!(
                "HF_TOKEN: {}",
                if status.inference_configured { "configured ✅" } else { "missing ❌" }
            );
            match &status.service_account {
                Some(email) => info!("Google Sheets: enabled ✅ ({})", email),
                None => info!("Google Sheets: gcp_service_account missing, saving disabled"),
            }
            info!("Spreadsheet: {}", status.spreadsheet_name);
            Ok(())
        }
    }
}

fn resolve_port(flag: Option<u16>, env: Option<String>) -> Result<u16> {
    if let Some(port) = flag {
        return Ok(port);
    }
    match env {
        Some(value) => value
            .trim()
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number, got '{}'", value)),
        None => Ok(DEFAULT_PORT),
    }
}

fn resolve_address(flag: Option<IpAddr>, env: Option<String>) -> Result<IpAddr> {
    if let Some(address) = flag {
        return Ok(address);
    }
    let value = env.unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
    value
        .trim()
        .parse::<IpAddr>()
        .map_err(|_| anyhow::anyhow!("ROCKET_ADDRESS must be an IP address, got '{}'", value))
}
