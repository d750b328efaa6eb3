use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `EmbedGate` - SSRF-safe embed resolution for rich-text content.
#[derive(Parser, Debug)]
#[command(name = "embedgate")]
#[command(version)]
#[command(about = "Resolve and validate embed links.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.embedgate/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log per-hop validation detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve embed tag input to a handler (validates the link)
    Resolve {
        /// Tag name passed through to the handler
        #[arg(long, default_value = "embed")]
        tag: String,

        /// Raw tag input, e.g. `minimal https://example.com/post`
        #[arg(required = true, num_args = 1..)]
        input: Vec<String>,
    },

    /// Probe a URL with bounded redirect following
    Validate {
        url: String,

        /// Override the configured redirect budget
        #[arg(long)]
        max_redirects: Option<u8>,
    },

    /// Report whether a host is internal (private, loopback, link-local)
    Classify { host: String },
}
