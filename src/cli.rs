//! CLI argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cert-audit")]
#[command(version)]
#[command(about = "Audit TLS certificate assets and connectivity for a multi-service deployment", long_about = None)]
pub struct Cli {
    /// Root certificate directory
    #[arg(value_name = "DIR", default_value = "ssl")]
    pub dir: PathBuf,

    /// Host the services are probed on (overrides configuration)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Probe timeout in seconds (overrides configuration)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Load settings from a TOML file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colorized report (default)
    Table,
    /// Machine-parseable JSON report
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
