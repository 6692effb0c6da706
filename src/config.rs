//! Configuration
//!
//! Fichier TOML optionnel + surcharges par variables d'environnement.
//! Chaque section a des valeurs par défaut : un fichier absent ou partiel
//! donne une configuration complète.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

/// Configuration principale
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub refresh: RefreshConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API de marché (compatible CoinGecko v3)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,

    #[serde(default = "default_per_page")]
    pub per_page: u32,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://api.coingecko.com/api/v3".to_string()
}

fn default_vs_currency() -> String {
    "usd".to_string()
}

fn default_per_page() -> u32 {
    50
}

fn default_request_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    concat!("coinboard/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            vs_currency: default_vs_currency(),
            per_page: default_per_page(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Rafraîchissement périodique du listing
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_refresh_interval")]
    pub interval_secs: u64,
}

fn default_refresh_interval() -> u64 {
    60
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_refresh_interval(),
        }
    }
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Emplacement des données locales (favoris)
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("coinboard"))
        .unwrap_or_else(|| PathBuf::from("./coinboard_data"))
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Logs fichier (le terminal appartient au TUI)
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,

    /// Filtre utilisé quand RUST_LOG n'est pas défini
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./logs")
}

fn default_log_filter() -> String {
    "coinboard=debug,info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Charge la configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse une configuration TOML déjà lue
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Cherche un fichier de configuration aux emplacements par défaut
    ///
    /// Ordre : $COINBOARD_CONFIG, ~/.config/coinboard/config.toml,
    /// ./coinboard.toml. Un fichier illisible est signalé puis ignoré.
    pub fn load_default() -> Self {
        Self::load_with(|key| std::env::var(key).ok(), dirs::config_dir())
    }

    /// Comme `load_default`, avec l'environnement et le répertoire de
    /// configuration fournis par l'appelant
    fn load_with<F>(env: F, config_dir: Option<PathBuf>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = None;
        for path in Self::candidate_paths(&env, config_dir) {
            if !path.exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(loaded) => {
                    info!(?path, "Loaded config file");
                    config = Some(loaded);
                    break;
                }
                Err(e) => warn!(?path, error = %e, "Ignoring unreadable config file"),
            }
        }

        let mut config = config.unwrap_or_default();
        config.apply_env_overrides(&env);
        config
    }

    /// Emplacements candidats, par priorité décroissante
    fn candidate_paths<F>(env: &F, config_dir: Option<PathBuf>) -> Vec<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        [
            env("COINBOARD_CONFIG").map(PathBuf::from),
            config_dir.map(|p| p.join("coinboard").join("config.toml")),
            Some(PathBuf::from("./coinboard.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Applique les surcharges par variables d'environnement
    fn apply_env_overrides<F>(&mut self, env: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = env("COINBOARD_API_BASE") {
            self.api.base_url = base_url;
        }
        if let Some(data_dir) = env("COINBOARD_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(data_dir);
        }
    }
}

/// Erreurs de configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}
