use clap::Parser;
use savermc::config::CliArgs;
use savermc::logger::{self, log, LogSeverity::*};
use savermc::server;
use std::process;

#[tokio::main]
async fn main() {
    logger::init();
    log("SaverMC init".to_string(), Info);

    let config = match CliArgs::parse().into_config() {
        Ok(config) => config,
        Err(err) => {
            log(format!("Could not load configuration: {}", err), Fatal);
            process::exit(1);
        }
    };

    if let Err(err) = server::run(config).await {
        log(format!("Server stopped: {}", err), Fatal);
        process::exit(1);
    }
}
