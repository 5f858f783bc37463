use clap::Parser;
use log::{error, info};
use std::process::ExitCode;

use apple_dataset_prep::{prepare_dataset, Args, PrepareError};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match args.to_dataset_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };

    info!("Preparing dataset from {}", config.dataset_dir.display());

    match prepare_dataset(&config) {
        Ok(_) => {
            println!();
            println!("Dataset prepared: {}", config.output_dir.display());
            ExitCode::SUCCESS
        }
        Err(PrepareError::DatasetNotFound { path }) => {
            error!("Dataset not found at {}", path.display());
            error!(
                "Make sure the '{}' directory exists or pass --dataset_dir",
                path.display()
            );
            ExitCode::from(1)
        }
        Err(e) => {
            error!("Failed to prepare dataset: {}", e);
            ExitCode::from(2)
        }
    }
}
