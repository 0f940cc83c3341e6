mod app;
mod commands;
mod config;
mod transport;
mod ui;

use anyhow::Result;
use clap::Parser;
use log::info;
use std::io;
use tree_service::{JsonFileBackend, MemoryBackend, TreeBackend, TreeService};

use crate::app::TreeShell;
use crate::config::{Cli, ShellConfig};
use crate::transport::LocalTransport;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let config = ShellConfig::resolve(&cli)?;

    let backend: Box<dyn TreeBackend> = match &config.state_file {
        Some(path) => {
            info!("Keeping the tree in {}", path.display());
            Box::new(JsonFileBackend::new(path))
        }
        None => Box::new(MemoryBackend::new()),
    };
    let service = TreeService::open(backend, config.service_config())?;

    let mut shell = TreeShell::connect(LocalTransport::new(service), config)?;
    shell.run(io::stdin().lock(), io::stdout())
}
