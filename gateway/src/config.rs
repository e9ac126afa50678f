use crate::cli;
use addonhub_core::handler::pagination::PageNumberPagination;
use minijinja::Environment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config file. Error: {0}")]
    ParseError(#[from] serde_yaml::Error),
    #[error("Failed to read template in config. Error: {0}")]
    ReadError(#[from] minijinja::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9090,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SearchConfig {
    /// Engine-side `max_result_window`. Unset means the in-memory index
    /// serves any window.
    #[serde(default)]
    pub max_result_window: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// JSON file with the add-on catalog. The embedded catalog is used when
    /// unset.
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub pagination: PageNumberPagination,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

fn replace_env_vars(content: String) -> Result<String, ConfigError> {
    let env = Environment::new();
    let template = env.template_from_str(&content)?;
    let parameters = template.undeclared_variables(false);

    let mut variables = HashMap::new();
    parameters.iter().for_each(|k| {
        if let Ok(v) = std::env::var(k) {
            variables.insert(k, v);
        };
    });

    Ok(template.render(variables)?)
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(config_path) {
            Ok(content) => Self::parse(content),
            Err(_e) => Ok(Self::default()),
        }
    }

    pub fn parse(content: String) -> Result<Self, ConfigError> {
        let content = replace_env_vars(content)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn apply_cli_overrides(mut self, cli_opts: &cli::Commands) -> Self {
        match cli_opts {
            cli::Commands::Serve(args) => {
                if let Some(host) = &args.host {
                    self.http.host = host.clone();
                }
                if let Some(port) = args.port {
                    self.http.port = port;
                }
                if let Some(cors) = &args.cors_origins {
                    self.http.cors_allowed_origins =
                        cors.split(',').map(|s| s.trim().to_string()).collect();
                }
                if let Some(catalog) = &args.catalog {
                    self.catalog.path = Some(catalog.clone());
                }
            }
            cli::Commands::Search(args) => {
                if let Some(catalog) = &args.catalog {
                    self.catalog.path = Some(catalog.clone());
                }
            }
        }
        self
    }
}
