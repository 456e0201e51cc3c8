use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "link-preview", version, about = "URL preview service and interactive client")]
pub struct Cli {
    /// RON file overriding fetch settings.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
    /// Also write logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve `GET /api/preview-url?url=...`.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Read URLs from stdin, one per line, and show the preview for the latest one.
    Watch {
        /// Ask a running preview server instead of fetching pages locally.
        #[arg(long)]
        endpoint: Option<String>,
        #[arg(long)]
        debounce_ms: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_defaults() {
        let cli = Cli::parse_from(["link-preview", "serve"]);
        assert_eq!(cli.log_level, "info");
        match cli.command {
            Command::Serve { host, port } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 8080);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "link-preview",
            "watch",
            "--endpoint",
            "http://localhost:8080/api/preview-url",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.log_level, "debug");
        assert!(matches!(
            cli.command,
            Command::Watch {
                endpoint: Some(_),
                debounce_ms: None
            }
        ));
    }
}
