//! Brasa CLI Application
//!
//! Terminal front end for the pizzeria order lifecycle.

mod args;
mod cli;
mod renderer;

use std::time::Duration;

use anyhow::{Context, Result};
use args::{Args, Commands, ListOrdersArgs};
use brasa_core::OrderDeskBuilder;
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let mut builder = OrderDeskBuilder::new().with_database_path(database_file);
    if let Some(Watch(ref watch)) = command {
        builder = builder.with_change_poll_interval(Duration::from_millis(watch.poll_ms.max(1)));
    }
    let desk = builder.build().await.context("Failed to initialize order desk")?;

    let cli = Cli::new(desk, TerminalRenderer::new(!no_color));

    info!("Brasa started");

    match command {
        Some(Order { command }) => cli.handle_order_command(command).await,
        Some(Kitchen { command }) => cli.handle_kitchen_command(command).await,
        Some(Driver { command }) => cli.handle_driver_command(command).await,
        Some(Shift { command }) => cli.handle_shift_command(command).await,
        Some(Stats { command }) => cli.handle_stats_command(command).await,
        Some(Watch(args)) => cli.watch(args).await,
        None => {
            cli.list_orders(&ListOrdersArgs {
                role: None,
                statuses: Vec::new(),
                category: None,
            })
            .await
        }
    }
}
