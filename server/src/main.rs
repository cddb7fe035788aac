use clap::Parser;
use leakcheck_server::cli::{Cli, Commands};
use leakcheck_server::{check, exit_status, init_tracing, load_config, serve};
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    info!("Starting LeakCheck v{}", env!("CARGO_PKG_VERSION"));
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind_addr = bind;
            }
            serve(&config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { kind, value } => {
            let state = check(&config, kind.into(), &value, &mut std::io::stdout()).await?;
            Ok(ExitCode::from(exit_status(&state)))
        }
    }
}
