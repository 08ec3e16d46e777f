mod cli;
mod config;
mod output;
mod run;

use std::process::ExitCode;

use clap::Parser;
use engine_logging::{engine_error, engine_info, engine_warn};
use harvester_engine::Harvester;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let (settings, config_error) = match config::load(&cli.config) {
        Ok(loaded) => (loaded.unwrap_or_default(), None),
        Err(err) => (config::AppConfig::default(), Some(err)),
    };
    engine_logging::initialize(&settings.log);
    if let Some(err) = config_error {
        engine_warn!("{err}; using defaults");
    }

    let proxy = config::proxy_from_env();
    if let Some(proxy) = &proxy {
        engine_info!("routing requests through proxy {}:{}", proxy.host, proxy.port);
    }

    let harvester = match Harvester::connect(settings.transport_settings(proxy)) {
        Ok(harvester) => harvester
            .with_context(settings.context())
            .with_settings(settings.harvest_settings()),
        Err(err) => {
            engine_error!("{err}");
            eprintln!("error: {err}");
            return ExitCode::from(run::exit_code(&err));
        }
    };

    let command = cli.command.name();
    match run::execute(&harvester, cli.command).await {
        Ok(envelope) => match envelope.render(cli.pretty) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: failed to render output: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            engine_error!("{command} failed: {err}");
            eprintln!("error: {err}");
            ExitCode::from(run::exit_code(&err))
        }
    }
}
