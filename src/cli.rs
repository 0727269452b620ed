use clap::{Args, Parser, Subcommand};

use crate::source::{DEFAULT_TIMEOUT_MS, DataSource};

pub const DEFAULT_SOURCE: &str = "paivakoti_kielet.csv";

#[derive(Parser, Debug)]
#[command(
    name = "kotikunta",
    version,
    about = "Foreign-language share of early-childhood education by municipality"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Lookup(LookupArgs),
    Status(StatusArgs),
    Interactive(InteractiveArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Local path or http(s) URL of the `;`-delimited dataset.
    #[arg(long, default_value = DEFAULT_SOURCE)]
    pub source: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,
}

impl SourceArgs {
    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.source, self.timeout_ms)
    }
}

#[derive(Args, Debug, Clone)]
pub struct LookupArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long)]
    pub query: String,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}
