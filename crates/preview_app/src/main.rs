mod cli;
mod config;
mod logging;
mod server;
mod watch;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::Parser;
use preview_core::CoreConfig;
use preview_engine::{HttpPreviewClient, PageExtractor, PreviewSource};

use cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = preview_logging::parse_level(&cli.log_level)
        .ok_or_else(|| anyhow!("unknown log level {:?}", cli.log_level))?;
    logging::initialize(level, cli.log_file.as_deref());

    let settings = config::load_settings(cli.config.as_deref());

    match cli.command {
        Command::Serve { host, port } => {
            server::run(&host, port, settings.fetch).context("preview server stopped")
        }
        Command::Watch {
            endpoint,
            debounce_ms,
        } => {
            let source: Arc<dyn PreviewSource> = match endpoint {
                Some(endpoint) => Arc::new(HttpPreviewClient::new(&endpoint, &settings.fetch)?),
                None => Arc::new(PageExtractor::new(settings.fetch)),
            };
            let debounce = debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(settings.debounce);
            watch::run(source, CoreConfig { debounce })
        }
    }
}
