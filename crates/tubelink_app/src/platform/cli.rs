use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tubelink_core::LinkTarget;

#[derive(Parser, Debug)]
#[command(name = "tubelink")]
#[command(about = "Send YouTube links to an automation webhook and keep a history", long_about = None)]
pub struct CliArgs {
    /// Configuration file (RON). Defaults to the user config directory.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Webhook endpoint, overrides the configuration
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// History file, overrides the configuration
    #[arg(long, value_name = "FILE")]
    pub history_file: Option<PathBuf>,

    /// Log file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level: off|error|warn|info|debug|trace
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit one link without the interactive form
    Submit {
        /// YouTube link to send
        url: String,
    },
    /// Print the submission history, most recent first
    History,
    /// Open one of the result links in the browser
    Open {
        #[arg(value_enum)]
        target: LinkArg,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkArg {
    Folder,
    Spreadsheet,
}

impl From<LinkArg> for LinkTarget {
    fn from(arg: LinkArg) -> Self {
        match arg {
            LinkArg::Folder => LinkTarget::Folder,
            LinkArg::Spreadsheet => LinkTarget::Spreadsheet,
        }
    }
}
