mod command_line;
mod config;
mod credentials;
mod dynamodb;
mod error;
mod logging;
mod utils;


use anyhow::Result;
use std::io;
use std::process::ExitCode;
use tracing::{error, info};

use crate::command_line::Console;
use crate::config::Config;
use crate::credentials::Credentials;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    logging::init_logging()?;

    let loaded = Config::from_env().and_then(|config| {
        let credentials = Credentials::load(&config.credentials_path)?;
        Ok((config, credentials))
    });
    let (config, credentials) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("Configuration failed: {e:?}");
            println!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };
    info!("Loaded credentials for region {}", credentials.region);

    let ddb = dynamodb::DynamoDb::connect(&config, &credentials).await;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    command_line::run(&ddb, &mut console).await?;

    Ok(ExitCode::SUCCESS)
}
