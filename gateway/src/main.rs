use clap::Parser;
use thiserror::Error;

mod catalog;
mod cli;
mod config;
mod http;
mod tracing;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    #[error(transparent)]
    ServerError(#[from] http::ServerError),
    #[error(transparent)]
    ConfigError(#[from] config::ConfigError),
    #[error(transparent)]
    CatalogLoadError(#[from] catalog::CatalogLoadError),
    #[error(transparent)]
    SearchError(#[from] addonhub_core::SearchApiError),
}

#[actix_web::main]
async fn main() -> Result<(), CliError> {
    dotenv::dotenv().ok();

    let cli = cli::Cli::parse();

    // No command specified, use flattened serve args
    let command = cli
        .command
        .unwrap_or(cli::Commands::Serve(cli.serve_args));

    tracing::init_tracing(tracing::default_level(&command));

    let config = config::Config::load(&cli.config)?.apply_cli_overrides(&command);

    match command {
        cli::Commands::Serve(_) => cli::commands::serve::handle_serve(config).await,
        cli::Commands::Search(args) => cli::commands::search::handle_search(config, args),
    }
}
