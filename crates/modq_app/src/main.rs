mod cli;
mod commands;
mod config;
mod navigator;
mod output;

use clap::Parser;
use modq_logging::modq_info;

use crate::cli::Cli;
use crate::config::AppConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?.with_base_url(cli.base_url.clone());
    modq_logging::initialize(
        config.log_destination,
        modq_logging::parse_level(&config.log_level),
        None,
    );
    // Logged only now: the logger depends on the config it describes.
    modq_info!(
        "Using {}, API root {}",
        config::source_description(cli.config.as_deref()),
        config.base_url
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(commands::run(cli.command, config))
}
