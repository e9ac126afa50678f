use crate::catalog;
use crate::config::Config;
use crate::http::ApiServer;
use crate::CliError;

pub async fn handle_serve(config: Config) -> Result<(), CliError> {
    let index = catalog::load_catalog(&config)?;

    let api_server = ApiServer::new(config, index);
    let server = api_server.start()?;
    api_server.print_useful_info();

    server.await?;
    Ok(())
}
