//! Courier - command line entry point.

use std::io::Read;

use anyhow::Result;
use clap::Parser;
use courier::commands;
use courier::{Cli, Command};
use courier_domain::{AppSettings, RedirectPolicy};
use courier_infrastructure::{SettingsRepository, apply_env_overrides};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings = load_settings(&cli).await?;
    let environment = cli.env.as_deref();

    match cli.command {
        Command::Render { file, item, format } => {
            let output = commands::render(&file, &item, environment, format, &settings).await?;
            println!("{output}");
        }
        Command::Send { file, item, save } => {
            let report = commands::send(&file, &item, environment, save, &settings).await?;
            for entry in &report.console {
                eprintln!("{}", commands::console_line(entry));
            }
            println!("{}", report.render());
        }
        Command::ImportCurl {
            file,
            command,
            folder,
        } => {
            let command = match command {
                Some(command) => command,
                None => {
                    let mut input = String::new();
                    std::io::stdin().read_to_string(&mut input)?;
                    input
                }
            };
            let id = commands::import_curl(&file, &command, folder.as_deref(), &settings).await?;
            println!("{id}");
        }
        Command::Mock { file, port } => {
            commands::mock(&file, port, &settings).await?;
        }
    }

    Ok(())
}

async fn load_settings(cli: &Cli) -> Result<AppSettings> {
    let repository = cli
        .settings
        .clone()
        .map_or_else(SettingsRepository::new, SettingsRepository::with_path);
    let settings = repository.load().await?;
    let mut settings = apply_env_overrides(settings, |key| std::env::var(key).ok())?;

    if let Some(timeout) = cli.timeout {
        settings.timeout_secs = timeout;
    }
    if cli.no_follow {
        settings.redirect_policy = RedirectPolicy::None;
    }
    tracing::debug!(?settings, "settings loaded");
    Ok(settings)
}
