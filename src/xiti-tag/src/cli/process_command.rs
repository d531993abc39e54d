use super::commands::{Cli, Command};
use crate::client::XitiTag;
use crate::config::{Config, ConfigLoader};
use crate::error::TagError;
use crate::logging::setup_logging;
use crate::metadata::{MetadataProvider, SystemMetadataProvider};
use crate::utils::escape::escape_page_name;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

/// Process the command line.
pub fn process_command() -> Result<()> {
    let cli = Cli::parse();

    if let Command::Escape { name } = &cli.command {
        println!("{}", escape_page_name(name));
        return Ok(());
    }

    let config = ConfigLoader::load(cli.config.as_deref())?;
    setup_logging(&config)?;

    let name_of = |name: &str| {
        if cli.escape {
            escape_page_name(name)
        } else {
            name.to_string()
        }
    };

    match &cli.command {
        Command::Page { name, subsite } => {
            let page = name_of(name);
            send_hit(config, |tag| tag.tag_page(&page, subsite.as_deref()))
        }
        Command::Action {
            name,
            kind,
            subsite,
        } => {
            let action = name_of(name);
            send_hit(config, |tag| tag.tag_action(&action, *kind, subsite.as_deref()))
        }
        Command::Metadata => {
            let snapshot = SystemMetadataProvider::from_config(&config).snapshot();
            let json = serde_json::to_string_pretty(&snapshot)
                .context("failed to serialize metadata")?;
            println!("{json}");
            Ok(())
        }
        Command::Escape { .. } => Ok(()),
    }
}

/// Starts a client, queues one hit and waits for the worker to finish.
fn send_hit<F>(config: Config, tag_fn: F) -> Result<()>
where
    F: FnOnce(&XitiTag) -> Result<(), TagError>,
{
    let tag = XitiTag::init(config).context("failed to start the tagging client")?;
    tag_fn(&tag)?;
    tag.terminate();

    match tag.join() {
        Some(report) => {
            info!(
                "Sent {} hit(s), {} failed",
                report.delivered, report.failed
            );
            println!("delivered: {}, failed: {}", report.delivered, report.failed);
        }
        None => println!("delivery worker stopped unexpectedly"),
    }

    Ok(())
}
