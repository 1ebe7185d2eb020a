use std::process::ExitCode;

use clap::Parser;
use corkboard::{
    args::Args,
    commands::{init_logger, resolve_config, run},
};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("corkboard: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logger(config.debug);

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
