use std::path::Path;

use corkboard_api_schema::chunk_index::ChunkIndex;
use corkboard_config_file::{ConfigFileError, CorkboardConfigToml};
use corkboard_local_system_store::{rebuild::RebuildReport, LocalSystemStore};
use corkboard_server::{
    api::{run_server, ServerConfig},
    error::ServerError,
};
use log::info;

use crate::args::{Args, Commands};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigFileError),
    #[error(transparent)]
    Server(#[from] ServerError),
    #[error(transparent)]
    Store(#[from] corkboard_local_system_store::Error),
}

/// Config file values overridden by whatever was given on the command line.
pub fn resolve_config(args: &Args) -> Result<CorkboardConfigToml, ConfigFileError> {
    let mut config = CorkboardConfigToml::load_or_default(args.config.as_deref())?;
    if let Some(root) = &args.root {
        config.root = root.clone();
    }
    if args.debug {
        config.debug = true;
    }
    if let Some(Commands::Serve { host, port }) = &args.subcommand {
        if let Some(host) = host {
            config.host = host.clone();
        }
        if let Some(port) = port {
            config.port = *port;
        }
    }
    Ok(config)
}

pub fn init_logger(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn store_for(config: &CorkboardConfigToml) -> LocalSystemStore {
    LocalSystemStore::new(config.upload_dir_path(), config.assignments_file_path())
}

pub fn rebuild_assignments(config: &CorkboardConfigToml) -> Result<RebuildReport, CommandError> {
    let report = store_for(config).rebuild_assignments()?;
    info!(
        "rebuilt {} image assignments ({} of {} files skipped)",
        report.written,
        report.skipped.len(),
        report.scanned
    );
    Ok(report)
}

pub fn split_assignments(
    config: &CorkboardConfigToml,
    output_dir: &Path,
    images_per_chunk: usize,
) -> Result<ChunkIndex, CommandError> {
    let output_dir = config.root.join(output_dir);
    let index = store_for(config).split_assignments(&output_dir, images_per_chunk)?;
    info!(
        "split {} images into {} chunks in {}",
        index.total_images,
        index.total_chunks,
        output_dir.display()
    );
    Ok(index)
}

pub async fn run(args: Args, config: CorkboardConfigToml) -> Result<(), CommandError> {
    match args.subcommand {
        None | Some(Commands::Serve { .. }) => {
            run_server(ServerConfig::from(&config)).await?;
        }
        Some(Commands::RebuildAssignments) => {
            rebuild_assignments(&config)?;
        }
        Some(Commands::SplitAssignments {
            images_per_chunk,
            output_dir,
        }) => {
            split_assignments(&config, &output_dir, images_per_chunk)?;
        }
    }
    Ok(())
}
