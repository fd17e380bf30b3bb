mod cli;

use std::process::ExitCode;

use log::error;
use modhcp_core::config::FileConfigLoader;
use modhcp_core::kernel::bootstrap::Bootstrap;
use modhcp_core::kernel::error::{BootstrapPhase, Error};
use modhcp_core::kernel::lifecycle::{Lifecycle, ShutdownReport};
use modhcp_core::server::ChainServer;

use crate::cli::CliArgs;

async fn run(args: &CliArgs) -> Result<ShutdownReport, Error> {
    let loader = FileConfigLoader::new(args.conf.clone());
    let bootstrap = Bootstrap::new(args.bootstrap_options(), loader, modhcp_plugins::desired_plugins());
    let bootstrapped = bootstrap.run(ChainServer::new)?;

    let mut lifecycle = Lifecycle::new(bootstrapped.server);
    lifecycle.run().await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse_normalized();

    if args.list_plugins {
        for name in modhcp_plugins::NAMES {
            println!("{}", name);
        }
        return ExitCode::SUCCESS;
    }

    match run(&args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            // No logger exists yet when the level itself is invalid
            if e.phase() == BootstrapPhase::LogLevel {
                eprintln!("Fatal: {}", e);
            } else {
                error!("Fatal: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}
