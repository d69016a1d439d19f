//! Terminal front end for vocabulary dictations.

pub mod cli;
pub mod commands;
pub mod console;
pub mod narrator;
pub mod workbook;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::commands::Context;

fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dictation")
        .join("settings.json")
}

pub fn run() -> anyhow::Result<()> {
    // stderr keeps log lines out of the quiz prompt
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let settings_path = cli.settings.unwrap_or_else(default_settings_path);
    let mut ctx = Context::load(settings_path, cli.workbook)?;

    match cli.command {
        Command::Run(args) => commands::dictate::run(&ctx, args),
        Command::Check { scheme } => commands::check::run(&ctx, &scheme),
        Command::Schemes { action } => commands::schemes::run(&mut ctx, action),
    }
}
