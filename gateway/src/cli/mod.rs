use clap::{Parser, Subcommand};

pub mod commands;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub serve_args: ServeArgs,
}

#[derive(Debug, Clone, Parser, Default)]
pub struct ServeArgs {
    /// Host address to bind to (e.g., 127.0.0.1 for local or 0.0.0.0 for all interfaces)
    #[arg(long, value_name = "ADDRESS")]
    pub host: Option<String>,

    /// Port to listen on (e.g., 8080)
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Comma-separated list of allowed CORS origins (e.g., http://localhost:3000,https://example.com)
    #[arg(long, value_name = "ORIGINS")]
    pub cors_origins: Option<String>,

    /// Add-on catalog JSON file (defaults to the embedded catalog)
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<String>,
}

#[derive(Debug, Clone, Parser)]
pub struct SearchArgs {
    /// Search terms; every term has to match
    pub query: Option<String>,

    /// Page number to show
    #[arg(long, default_value = "1")]
    pub page: String,

    /// Results per page (capped by the configured max page size)
    #[arg(long)]
    pub page_size: Option<u64>,

    /// Only show add-ons of this type (extension, theme, dictionary, language)
    #[arg(long = "type", value_name = "TYPE")]
    pub addon_type: Option<String>,

    /// Sort order (users, downloads, name, created)
    #[arg(long)]
    pub sort: Option<String>,

    /// Output format: table or json
    #[arg(short, long, default_value = "table")]
    pub output: String,

    /// Add-on catalog JSON file (defaults to the embedded catalog)
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server (default if no command specified)
    Serve(ServeArgs),
    /// Search the catalog and print one page of results
    Search(SearchArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_command() {
        let cli = Cli::parse_from([
            "addonhub-gateway",
            "--config",
            "prod.yaml",
            "search",
            "tab manager",
            "--page",
            "3",
            "--page-size",
            "10",
            "--type",
            "extension",
            "--output",
            "json",
        ]);

        assert_eq!(cli.config, "prod.yaml");
        let Some(Commands::Search(args)) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.query.as_deref(), Some("tab manager"));
        assert_eq!(args.page, "3");
        assert_eq!(args.page_size, Some(10));
        assert_eq!(args.addon_type.as_deref(), Some("extension"));
        assert_eq!(args.output, "json");
    }

    #[test]
    fn test_no_command_falls_back_to_serve_args() {
        let cli = Cli::parse_from(["addonhub-gateway", "--port", "8081"]);

        assert!(cli.command.is_none());
        assert_eq!(cli.config, "config.yaml");
        assert_eq!(cli.serve_args.port, Some(8081));
    }
}
