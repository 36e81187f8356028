#![allow(non_snake_case)]

use std::env;

use scheduleBoard::config::{AppConfig, Settings};
use scheduleBoard::{cli, runtime};
use tracing::error;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_else(|e| {
            error!(%path, "Ignoring unreadable config file: {}", e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    };

    let settings = match Settings::from_config(&config) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    match settings.run_mode.as_str() {
        "watch" => runtime::run_watch(settings).await,
        "cli" => cli::cli(settings).await,
        other => println!("Invalid run mode {}", other),
    }
}
