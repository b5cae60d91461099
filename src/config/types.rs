// Configuration types module
// Defines the startup values of the test server

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the directory holding the test pages
const PAGES_DIR: &str = "public";

/// Pages directory of the source tree, fixed at build time
const MANIFEST_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/public");

/// `public/` next to the running executable when present, else the source tree's
fn default_root() -> PathBuf {
    let exe = std::env::current_exe().ok();
    resolve_root(exe.as_deref())
}

pub(super) fn resolve_root(exe: Option<&Path>) -> PathBuf {
    exe.and_then(Path::parent)
        .map(|dir| dir.join(PAGES_DIR))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| PathBuf::from(MANIFEST_ROOT))
}

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub browser: BrowserConfig,
    pub banner: BannerConfig,
    /// Sources that changed the defaults (config file, environment variables)
    #[serde(skip)]
    pub overrides: Vec<String>,
}

/// Listener and served directory
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Root of the served tree; nothing outside it is reachable
    pub root: PathBuf,
    /// Files tried, in order, when a directory is requested
    pub index_files: Vec<String>,
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            root: default_root(),
            index_files: vec!["index.html".to_string(), "index.htm".to_string()],
            workers: None,
        }
    }
}

/// Values of the CORS headers added to every response
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CorsConfig {
    pub allow_origin: String,
    pub allow_methods: String,
    pub allow_headers: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: "GET, POST, PUT, DELETE, OPTIONS".to_string(),
            allow_headers: "Content-Type, Authorization".to_string(),
        }
    }
}

/// Browser launched once the listener is bound
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BrowserConfig {
    pub open_on_start: bool,
    /// Page opened, relative to the served root
    pub page: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            open_on_start: true,
            page: "test-avatar-upload-server.html".to_string(),
        }
    }
}

/// Startup banner contents
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BannerConfig {
    /// Backend the test pages talk to; printed, never contacted
    pub backend_url: String,
    pub pages: Vec<TestPage>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8080".to_string(),
            pages: vec![
                TestPage::new("Avatar upload test", "test-avatar-upload-server.html"),
                TestPage::new("Review system test", "test-review-system.html"),
            ],
        }
    }
}

/// A named page listed in the banner
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TestPage {
    pub label: String,
    pub path: String,
}

impl TestPage {
    pub fn new(label: &str, path: &str) -> Self {
        Self {
            label: label.to_string(),
            path: path.to_string(),
        }
    }
}
