use crate::tag::ActionType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
#[clap(
    name = "xiti-tag",
    about = "Send Xiti page and action hits from the command line",
    version
)]
pub struct Cli {
    /// TOML configuration file; XITI_* environment variables override it
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Run names through the page name escaping before tagging
    #[clap(long, global = true)]
    pub escape: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Tag a page view
    Page {
        name: String,
        /// Subsite id for this hit instead of the configured one
        #[clap(long)]
        subsite: Option<String>,
    },

    /// Tag an action
    Action {
        name: String,
        #[clap(long, value_enum, default_value_t = ActionType::Action)]
        kind: ActionType,
        /// Subsite id for this hit instead of the configured one
        #[clap(long)]
        subsite: Option<String>,
    },

    /// Print a page name as it would be escaped
    Escape { name: String },

    /// Print the device metadata sent with every hit
    Metadata,
}
