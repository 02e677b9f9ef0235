mod app;
mod cli;
mod config;
mod effects;
mod ui;

use std::path::Path;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    let config = config::AppConfig::load(&args.config)?.with_overrides(&args);
    docqa_logging::initialize(
        config.log_destination,
        config.log_level(),
        Path::new(docqa_logging::LOG_FILE),
    );
    app::run_app(config)
}
