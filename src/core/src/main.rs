use clap::Parser;
use log::{error, info};
use telnetpot::configuration::config::{CliArgs, Config};
use telnetpot::controller::controller_handler::Controller;

#[tokio::main]
async fn main() {
    // RUST_LOG overrides the default level
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_target(false)
        .init();

    println!(
        "
==============================================================================
                telnetpot: a low-interaction telnet honeypot v{}
==============================================================================
",
        env!("CARGO_PKG_VERSION")
    );

    let args = CliArgs::parse();

    info!("Importing configuration");
    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Unable to import configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!("Configuration imported successfully");

    let controller = match Controller::new(config) {
        Ok(controller) => controller,
        Err(e) => {
            error!("Unable to create a controller instance: {}, exiting...", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = controller.run().await {
        error!("Error occured in the controller process: {}, exiting...", e);
        std::process::exit(1);
    }
}
