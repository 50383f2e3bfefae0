//! Server configuration management
//!
//! Loads and saves the server configuration from the user's home
//! directory (`~/.vitrine/config.json`). Every field carries a serde
//! default, so older config files keep deserializing after new fields
//! appear. The `VITRINE_CONTENT_PATH` and `VITRINE_PORT` environment
//! variables override the stored values.

use std::env;
use std::path::PathBuf;

use tokio::fs;

use vitrine_core::store::DEFAULT_QUOTA_BYTES;

const CONFIG_DIR: &str = ".vitrine";
const CONFIG_FILE: &str = "config.json";

/// Server-wide configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ServerConfig {
    /// HTTP port the server listens on (default: 4317)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Storage file for the content collection
    /// (default: `~/.vitrine/content/contentItems.json`)
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_path: Option<PathBuf>,

    /// Seconds a slide stays on screen before the viewer rotates (default: 10)
    #[serde(default = "default_rotation_seconds")]
    pub rotation_seconds: u64,

    /// Seconds between the viewer's fallback store re-reads (default: 60)
    #[serde(default = "default_refresh_seconds")]
    pub refresh_seconds: u64,

    /// Byte quota for the serialized collection (default: 10 MiB)
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: usize,

    /// Users allowed to open a display session
    #[serde(default = "default_display_users")]
    pub display_users: Vec<String>,
}

fn default_port() -> u16 {
    4317
}

fn default_rotation_seconds() -> u64 {
    10
}

fn default_refresh_seconds() -> u64 {
    60
}

fn default_quota_bytes() -> usize {
    DEFAULT_QUOTA_BYTES
}

fn default_display_users() -> Vec<String> {
    vec!["thomas".to_string(), "hans".to_string(), "najib".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            content_path: None,
            rotation_seconds: default_rotation_seconds(),
            refresh_seconds: default_refresh_seconds(),
            quota_bytes: default_quota_bytes(),
            display_users: default_display_users(),
        }
    }
}

/// Path of the config file (`~/.vitrine/config.json`)
pub fn config_file_path() -> anyhow::Result<PathBuf> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Failed to get home directory"))?;
    Ok(home_dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the configuration from disk
///
/// A missing file yields the defaults; a file that fails to parse is an
/// error rather than a silent fallback, so a typo cannot wipe a working
/// configuration.
pub async fn load_config() -> anyhow::Result<ServerConfig> {
    let config_file = config_file_path()?;

    if !config_file.exists() {
        return Ok(ServerConfig::default());
    }

    let contents = fs::read_to_string(&config_file).await?;
    let config = serde_json::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", config_file.display(), e))?;
    Ok(config)
}

/// Save the configuration to disk
///
/// Uses atomic write pattern (write-to-temp, then rename) to prevent
/// corruption on crash or power loss.
pub async fn save_config(config: &ServerConfig) -> anyhow::Result<()> {
    let config_file = config_file_path()?;
    if let Some(parent) = config_file.parent() {
        fs::create_dir_all(parent).await?;
    }

    let temp_file = config_file.with_extension("json.tmp");
    let serialized = serde_json::to_string_pretty(config)?;

    fs::write(&temp_file, serialized).await?;
    fs::rename(&temp_file, &config_file).await?;

    Ok(())
}

/// Resolve the content storage file
///
/// Checks the `VITRINE_CONTENT_PATH` environment variable first, then the
/// config file, then the default `~/.vitrine/content/contentItems.json`.
pub fn resolve_content_path(config: &ServerConfig) -> anyhow::Result<PathBuf> {
    if let Ok(env_path) = env::var("VITRINE_CONTENT_PATH") {
        tracing::info!("Using content path from VITRINE_CONTENT_PATH: {}", env_path);
        return Ok(PathBuf::from(env_path));
    }

    if let Some(path) = &config.content_path {
        return Ok(path.clone());
    }

    let home_dir =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Failed to get home directory"))?;
    Ok(home_dir
        .join(CONFIG_DIR)
        .join("content")
        .join("contentItems.json"))
}

/// Resolve the HTTP port, preferring `VITRINE_PORT` over the config file
pub fn resolve_port(config: &ServerConfig) -> u16 {
    env::var("VITRINE_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(config.port)
}
