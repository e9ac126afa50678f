use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer, Registry};

/// Log level used when `RUST_LOG` is not set. The search command keeps
/// quiet so its table or JSON output stays readable.
pub fn default_level(command: &crate::cli::Commands) -> &'static str {
    match command {
        crate::cli::Commands::Serve(_) => "info",
        crate::cli::Commands::Search(_) => "warn",
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());
    let filter = EnvFilter::new(level);
    match "actix_server=off".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Logs go to stderr; stdout is reserved for command output.
pub fn init_tracing(default_level: &str) {
    let color = std::env::var("ANSI_OUTPUT").map_or(true, |v| v == "true");

    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(color)
        .with_filter(env_filter(default_level));

    if let Err(e) = Registry::default().with(fmt_layer).try_init() {
        eprintln!("Failed to initialize tracing: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Commands, SearchArgs, ServeArgs};
    use clap::Parser;

    #[test]
    fn test_default_level_per_command() {
        let search = SearchArgs::parse_from(["search"]);

        assert_eq!(default_level(&Commands::Serve(ServeArgs::default())), "info");
        assert_eq!(default_level(&Commands::Search(search)), "warn");
    }
}
