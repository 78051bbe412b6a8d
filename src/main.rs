//! src/main.rs
//!
//! Entrypoint: install error reporting, parse options, start logging, then
//! delegate to `app::run()`.

mod app;
mod chart;
mod cli;
mod control;
mod net;
mod panels;
mod render;
mod timer;
mod ui;

use clap::Parser;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = cli::Cli::parse();
    cli::init_logging(&cli.log_file)?;
    tracing::info!("livechart v{} starting", env!("CARGO_PKG_VERSION"));
    app::run(cli)
}
