//! tuxdex - browse, filter and compare Linux distributions.

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{badges_command, cache_command, compare_command, list_command, toggle_command};
use tuxdex::{
    cli::{Cli, Commands},
    config::SiteConfig,
    logger,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::List {
            query,
            category,
            sort,
        } => list_command(&config, query, category, sort.as_deref()),
        Commands::Toggle { id } => toggle_command(&config, id),
        Commands::Compare {
            ids,
            add,
            remove,
            clear,
        } => compare_command(&config, ids.as_deref(), add, remove, *clear),
        Commands::Badges { id } => badges_command(&config, id),
        Commands::Cache { action } => cache_command(&config, *action),
    }
}
