use serde::Deserialize;
use std::path::PathBuf;

/// Runtime configuration for the server.
///
/// Resolution order, later sources winning:
/// 1. built-in defaults
/// 2. YAML config file (path in `WIRESERVE_CONFIG`, if set)
/// 3. `LISTEN` / `FILES_DIR` environment variables
/// 4. a `--directory <dir>` process argument
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the TCP listener binds to.
    pub listen_addr: String,
    /// Base directory for the `/files/` routes. `None` disables them (500).
    pub files_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:4221".to_string(),
            files_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(std::env::args().skip(1))
    }

    /// Same as [`Config::load`] but with the argument list supplied by the
    /// caller, so tests do not depend on the real process arguments.
    pub fn load_from(args: impl IntoIterator<Item = String>) -> Self {
        let mut cfg = match std::env::var("WIRESERVE_CONFIG") {
            Ok(path) => Self::from_file(&path).unwrap_or_default(),
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.listen_addr = addr;
        }
        if let Ok(dir) = std::env::var("FILES_DIR") {
            cfg.files_dir = Some(PathBuf::from(dir));
        }

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--directory" {
                if let Some(dir) = args.next() {
                    cfg.files_dir = Some(PathBuf::from(dir));
                }
            }
        }

        cfg
    }

    fn from_file(path: &str) -> Option<Self> {
        let raw = std::fs::read_to_string(path).ok()?;
        match serde_yaml::from_str(&raw) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                tracing::warn!("Ignoring malformed config file {}: {}", path, e);
                None
            }
        }
    }
}
