use std::path::PathBuf;

use clap::{Parser, Subcommand};
use corkboard_local_system_store::split::DEFAULT_IMAGES_PER_CHUNK;

/// Local image organizer: serves the organizer page, stores uploads and
/// keeps the image assignments document.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Config file (defaults to ./corkboard.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Service root holding the organizer page and the persisted state
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub subcommand: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the organizer web server (the default)
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Rebuild the assignments document from the images directory
    RebuildAssignments,
    /// Split the assignments document into chunk files plus an index
    SplitAssignments {
        #[arg(long, default_value_t = DEFAULT_IMAGES_PER_CHUNK)]
        images_per_chunk: usize,
        /// Relative paths are resolved against the service root
        #[arg(long, default_value = "image-chunks")]
        output_dir: PathBuf,
    },
}
