//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.mcp-chat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub endpoint: Option<String>,
    pub default_server: Option<String>,
    pub pending_text: Option<String>,
}

/// A backend target the user can route messages to.
/// `name` doubles as the `server_id` sent on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerEntry {
    pub name: String,
    pub host: Option<String>,
    pub port: Option<u16>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl ServerEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: None,
            port: None,
            kind: None,
        }
    }

    /// `name (host:port)` when an address is known.
    pub fn label(&self) -> String {
        match (&self.host, self.port) {
            (Some(host), Some(port)) => format!("{} ({host}:{port})", self.name),
            (Some(host), None) => format!("{} ({host})", self.name),
            _ => self.name.clone(),
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";
pub const DEFAULT_PENDING_TEXT: &str = "Thinking...";

pub const ENV_ENDPOINT: &str = "MCP_CHAT_ENDPOINT";
pub const ENV_SERVER: &str = "MCP_CHAT_SERVER";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub endpoint: String,
    /// Initially selected target. Empty = none.
    pub server_id: String,
    pub servers: Vec<ServerEntry>,
    pub pending_text: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_from(&ChatConfig::default(), None, None, |_| None)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.mcp-chat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".mcp-chat").join("config.toml"))
}

/// Load config from `~/.mcp-chat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ChatConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ChatConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ChatConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ChatConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ChatConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: ChatConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# mcp-chat configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# endpoint = "http://127.0.0.1:5000"   # Or set MCP_CHAT_ENDPOINT / --endpoint
# default_server = "Hypixel"           # Or set MCP_CHAT_SERVER / --server
# pending_text = "Thinking..."

# [[servers]]
# name = "Hypixel"
# host = "mc.hypixel.net"
# port = 25565
# type = "Minecraft Java"

# [[servers]]
# name = "Local Test Bedrock"
# host = "127.0.0.1"
# port = 19132
# type = "Minecraft Bedrock"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(
    config: &ChatConfig,
    cli_endpoint: Option<&str>,
    cli_server: Option<&str>,
) -> ResolvedConfig {
    resolve_from(config, cli_endpoint, cli_server, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with the environment lookup injected.
pub fn resolve_from(
    config: &ChatConfig,
    cli_endpoint: Option<&str>,
    cli_server: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let endpoint = cli_endpoint
        .map(str::to_string)
        .or_else(|| env(ENV_ENDPOINT))
        .or_else(|| config.general.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let server_id = cli_server
        .map(str::to_string)
        .or_else(|| env(ENV_SERVER))
        .or_else(|| config.general.default_server.clone())
        .unwrap_or_default();

    let pending_text = config
        .general
        .pending_text
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PENDING_TEXT.to_string());

    ResolvedConfig {
        endpoint,
        server_id,
        servers: config.servers.clone(),
        pending_text,
    }
}
