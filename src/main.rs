use clap::Parser;
use pocketdash::core::config::{self, CliOverrides, ConfigSource};
use pocketdash::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "pocketdash", about = "Terminal dashboard for a PocketClaw agent")]
struct Args {
    /// WebSocket endpoint of the PocketClaw server (e.g. ws://127.0.0.1:8888/ws)
    #[arg(short, long)]
    url: Option<String>,

    /// Log level written to the log file (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The log file location comes from the config, so loading can't log yet
    let loaded = config::load_config();
    let fallback = config::PocketdashConfig::default();
    let file_config = match &loaded {
        Ok((file_config, _)) => file_config,
        Err(_) => &fallback,
    };
    let config = config::resolve(
        file_config,
        &CliOverrides {
            url: args.url,
            log_level: args.log_level,
        },
    );

    // Initialize file logger - stdout belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }

    log::info!("pocketdash starting up against {}", config.server_url);
    match &loaded {
        Ok((_, source @ (ConfigSource::Unwritable(..) | ConfigSource::Defaults))) => {
            log::warn!("{source}")
        }
        Ok((_, source)) => log::info!("{source}"),
        Err(e) => {
            eprintln!("pocketdash: {e}; using defaults");
            log::warn!("{e}; using defaults");
        }
    }
    if let Some(name) = &config.unknown_log_level {
        log::warn!("Unknown log level '{}', using {}", name, config.log_level);
    }

    tui::run(config)
}
