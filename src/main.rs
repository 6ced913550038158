use std::process::ExitCode;
use subnet_overlap_monitor::output::format_status;
use subnet_overlap_monitor::{daemon, logging, publish, Config};

const USAGE: &str = "usage: subnet-overlap-monitor [status|listen]";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    match std::env::args().nth(1).as_deref() {
        None => {
            if let Err(e) = logging::init_logging(&config.log_config) {
                eprintln!("Error initializing log4rs: {e}");
                return ExitCode::FAILURE;
            }
            log::info!("#Start subnet overlap monitor");
            match daemon::run(&config).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    log::error!("{e}");
                    ExitCode::FAILURE
                }
            }
        }
        Some("status") => match publish::query_status(&config.control_socket).await {
            Ok(reply) => {
                println!("{}", format_status(&reply));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        },
        Some("listen") => {
            let result = publish::listen(&config.control_socket, |reply| {
                println!("{}", format_status(reply))
            })
            .await;
            match result {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("{e}");
                    ExitCode::FAILURE
                }
            }
        }
        Some(_) => {
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
    }
}
