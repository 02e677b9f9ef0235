use std::path::PathBuf;

use clap::Parser;

use docqa_logging::LogDestination;

/// Terminal client for a PDF question-answering service.
#[derive(Debug, Parser)]
#[command(name = "docqa", version, about)]
pub struct Args {
    /// Path to the RON config file. A missing file means defaults.
    #[arg(long, default_value = "docqa.ron")]
    pub config: PathBuf,

    /// Base URL of the question-answering service.
    #[arg(long, env = "DOCQA_BASE_URL")]
    pub base_url: Option<String>,

    /// Where log output goes.
    #[arg(long, value_name = "file|terminal|both")]
    pub log: Option<LogDestination>,
}
