// Configuration module entry point
// Built-in defaults, optionally overridden by a config file and environment variables

mod types;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::StartupError;

pub use types::{BannerConfig, BrowserConfig, Config, CorsConfig, ServerConfig, TestPage};

/// Config file looked up in the working directory
const CONFIG_FILE: &str = "test-server";
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];
const ENV_PREFIX: &str = "TEST_SERVER";

impl Config {
    /// Load configuration from `test-server.{toml,yaml,yml,json}` and `TEST_SERVER_*` variables.
    ///
    /// Both sources are optional; without them the result equals `Config::default()`.
    /// Applied sources are listed in `overrides` and printed with the banner.
    pub fn load() -> Result<Self, StartupError> {
        let file = CONFIG_EXTENSIONS
            .iter()
            .map(|ext| PathBuf::from(format!("{CONFIG_FILE}.{ext}")))
            .find(|p| p.is_file());
        Self::build(file.as_deref())
    }

    /// Load configuration from an explicit file path
    pub fn load_from(path: &Path) -> Result<Self, StartupError> {
        Self::build(Some(path))
    }

    fn build(file: Option<&Path>) -> Result<Self, StartupError> {
        let mut builder = config::Config::builder();
        let mut overrides = Vec::new();

        if let Some(path) = file.filter(|p| p.is_file()) {
            builder = builder.add_source(config::File::from(path));
            overrides.push(format!("config file {}", path.display()));
        }
        overrides.extend(env_overrides());

        let settings = builder.add_source(env_source()).build()?;
        let mut cfg: Self = settings.try_deserialize()?;
        cfg.overrides = overrides;
        Ok(cfg)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, StartupError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e| StartupError::InvalidAddress(format!("{addr}: {e}")))
    }
}

/// `TEST_SERVER_SERVER__PORT=3001` overrides `server.port`
fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Names of the `TEST_SERVER_*` variables present, sorted
fn env_overrides() -> Vec<String> {
    let prefix = format!("{ENV_PREFIX}_");
    let mut names: Vec<String> = std::env::vars_os()
        .filter_map(|(key, _)| key.into_string().ok())
        .filter(|key| key.to_ascii_uppercase().starts_with(&prefix))
        .map(|key| format!("environment variable {key}"))
        .collect();
    names.sort();
    names
}

/// URL of the server as seen from the local machine
pub fn base_url(port: u16) -> String {
    format!("http://localhost:{port}")
}

/// URL of a page under the served root
pub fn page_url(port: u16, page: &str) -> String {
    format!("{}/{}", base_url(port), page.trim_start_matches('/'))
}
