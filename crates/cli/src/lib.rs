use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "flowdoc",
    version,
    about = "Generates the configuration schema and lookup manifest of a flow catalog",
    long_about = "Flowdoc introspects the component types registered in a catalog snapshot \
                  (listeners, senders, pipes, validators, wrappers and infrastructure types) \
                  and composes the structural XSD plus the flat lookup manifest that editors \
                  use for code completion of flow configurations."
)]
pub struct Cli {
    /// Catalog snapshot file (JSON)
    #[arg(long, value_name = "FILE", global = true)]
    pub catalog: Option<PathBuf>,

    /// Method rules resource (JSON); built-in rules when omitted
    #[arg(long, value_name = "FILE", global = true)]
    pub rules: Option<PathBuf>,

    /// Mirror log output to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compose the structural XSD from the catalog
    Schema {
        /// Write to this file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Emit the flat lookup manifest
    Lookup {
        /// Write to this file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Resolve one boundary path and print the artifact body
    Get {
        /// Request path, e.g. /flowdoc/flowdoc.xsd
        path: String,
    },
    /// Print the diagnostics recorded while building the catalog context
    Diagnostics,
}
