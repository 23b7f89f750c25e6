//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.pocketdash/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::state::Settings;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PocketdashConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SettingsConfig {
    pub agent_backend: Option<String>,
    pub llm_provider: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:8888/ws";
pub const DEFAULT_LOG_FILE: &str = "pocketdash.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

pub const ENV_URL: &str = "POCKETDASH_URL";
pub const ENV_LOG_FILE: &str = "POCKETDASH_LOG_FILE";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub server_url: String,
    pub settings: Settings,
    pub log_file: String,
    pub log_level: LevelFilter,
    /// A level name that didn't parse and was replaced by the default.
    pub unknown_log_level: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.pocketdash/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".pocketdash").join("config.toml"))
}

/// Where the loaded config came from.
///
/// Loading runs before the file logger exists, so the outcome is handed back
/// to be logged once it does.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No file existed; a commented default was written there.
    Generated(PathBuf),
    /// No file existed and writing the default failed.
    Unwritable(PathBuf, String),
    /// Home directory unknown.
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "loaded config from {}", path.display()),
            ConfigSource::Generated(path) => {
                write!(f, "no config file found, generated default at {}", path.display())
            }
            ConfigSource::Unwritable(path, e) => {
                write!(f, "could not write default config to {}: {e}", path.display())
            }
            ConfigSource::Defaults => write!(f, "could not determine home directory, using defaults"),
        }
    }
}

/// Load config from `~/.pocketdash/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PocketdashConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<(PocketdashConfig, ConfigSource), ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Ok((PocketdashConfig::default(), ConfigSource::Defaults)),
    }
}

pub fn load_config_from(path: &Path) -> Result<(PocketdashConfig, ConfigSource), ConfigError> {
    if !path.exists() {
        let source = match generate_default_config(path) {
            Ok(()) => ConfigSource::Generated(path.to_path_buf()),
            Err(e) => ConfigSource::Unwritable(path.to_path_buf(), e.to_string()),
        };
        return Ok((PocketdashConfig::default(), source));
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PocketdashConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    Ok((config, ConfigSource::File(path.to_path_buf())))
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# PocketClaw Dashboard Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# url = "ws://127.0.0.1:8888/ws"     # Or set POCKETDASH_URL, or pass --url

# [settings]
# agent_backend = "open_interpreter" # Sent when settings are saved
# llm_provider = "auto"              # "auto", "ollama", "openai", "anthropic"

# [logging]
# file = "pocketdash.log"            # Or set POCKETDASH_LOG_FILE
# level = "debug"                    # "error", "warn", "info", "debug", "trace"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG_CONTENT)
}

// ============================================================================
// Resolution
// ============================================================================

/// Flags given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub url: Option<String>,
    pub log_level: Option<String>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PocketdashConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &PocketdashConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // URL: CLI → env → config → default
    let server_url = cli
        .url
        .clone()
        .or_else(|| env(ENV_URL))
        .or_else(|| config.server.url.clone())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

    let defaults = Settings::default();
    let settings = Settings {
        agent_backend: config
            .settings
            .agent_backend
            .clone()
            .unwrap_or(defaults.agent_backend),
        llm_provider: config
            .settings
            .llm_provider
            .clone()
            .unwrap_or(defaults.llm_provider),
    };

    // Log file: env → config → default
    let log_file = env(ENV_LOG_FILE)
        .or_else(|| config.logging.file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    // Log level: CLI → config → default
    // Unknown names fall back to the default rather than failing startup
    let requested = cli.log_level.as_deref().or(config.logging.level.as_deref());
    let parsed = requested.map(|name| (name, name.parse::<LevelFilter>()));
    let (log_level, unknown_log_level) = match parsed {
        None => (DEFAULT_LOG_LEVEL, None),
        Some((_, Ok(level))) => (level, None),
        Some((name, Err(_))) => (DEFAULT_LOG_LEVEL, Some(name.to_string())),
    };

    ResolvedConfig {
        server_url,
        settings,
        log_file,
        log_level,
        unknown_log_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_is_empty() {
        let config = PocketdashConfig::default();
        assert!(config.server.url.is_none());
        assert!(config.settings.agent_backend.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&PocketdashConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.server_url, DEFAULT_SERVER_URL);
        assert_eq!(resolved.settings.agent_backend, "open_interpreter");
        assert_eq!(resolved.settings.llm_provider, "auto");
        assert_eq!(resolved.log_file, DEFAULT_LOG_FILE);
        assert_eq!(resolved.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = PocketdashConfig {
            server: ServerConfig {
                url: Some("ws://10.0.0.5:8888/ws".to_string()),
            },
            settings: SettingsConfig {
                agent_backend: Some("claude_code".to_string()),
                llm_provider: None,
            },
            logging: LoggingConfig {
                file: Some("/tmp/dash.log".to_string()),
                level: Some("warn".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.server_url, "ws://10.0.0.5:8888/ws");
        assert_eq!(resolved.settings.agent_backend, "claude_code");
        assert_eq!(resolved.settings.llm_provider, "auto");
        assert_eq!(resolved.log_file, "/tmp/dash.log");
        assert_eq!(resolved.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = PocketdashConfig {
            server: ServerConfig {
                url: Some("ws://from-config/ws".to_string()),
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            ENV_URL => Some("ws://from-env/ws".to_string()),
            ENV_LOG_FILE => Some("env.log".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.server_url, "ws://from-env/ws");
        assert_eq!(resolved.log_file, "env.log");

        let cli = CliOverrides {
            url: Some("ws://from-cli/ws".to_string()),
            log_level: Some("trace".to_string()),
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.server_url, "ws://from-cli/ws");
        assert_eq!(resolved.log_level, LevelFilter::Trace);
    }

    #[test]
    fn test_bad_log_level_falls_back() {
        let cli = CliOverrides {
            url: None,
            log_level: Some("chatty".to_string()),
        };
        let resolved = resolve_with_env(&PocketdashConfig::default(), &cli, no_env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(resolved.unknown_log_level.as_deref(), Some("chatty"));

        let resolved = resolve_with_env(&PocketdashConfig::default(), &CliOverrides::default(), no_env);
        assert!(resolved.unknown_log_level.is_none());
    }

    #[test]
    fn test_toml_parses() {
        let toml_str = r#"
[server]
url = "ws://192.168.1.20:8888/ws"

[settings]
agent_backend = "open_interpreter"
llm_provider = "ollama"

[logging]
level = "info"
"#;
        let config: PocketdashConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.url.as_deref(), Some("ws://192.168.1.20:8888/ws"));
        assert_eq!(config.settings.llm_provider.as_deref(), Some("ollama"));
        assert_eq!(config.logging.level.as_deref(), Some("info"));
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[settings]
llm_provider = "anthropic"
"#;
        let config: PocketdashConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.settings.llm_provider.as_deref(), Some("anthropic"));
        assert!(config.server.url.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_generated_default_is_valid_toml() {
        let config: PocketdashConfig = toml::from_str(DEFAULT_CONFIG_CONTENT).unwrap();
        assert!(config.server.url.is_none());
    }

    #[test]
    fn test_missing_file_is_generated() {
        let dir = std::env::temp_dir().join(format!("pocketdash-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let (config, source) = load_config_from(&path).unwrap();
        assert!(config.server.url.is_none());
        assert!(path.exists());
        assert_eq!(source, ConfigSource::Generated(path.clone()));

        fs::write(&path, "[server]\nurl = \"ws://x/ws\"\n").unwrap();
        let (config, source) = load_config_from(&path).unwrap();
        assert_eq!(config.server.url.as_deref(), Some("ws://x/ws"));
        assert_eq!(source, ConfigSource::File(path.clone()));

        fs::write(&path, "[server\n").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unwritable_default_is_reported() {
        let dir = std::env::temp_dir().join(format!("pocketdash-blocked-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        // A plain file where the config directory should be
        let blocker = dir.join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("config.toml");

        let (config, source) = load_config_from(&path).unwrap();
        assert!(config.server.url.is_none());
        assert!(matches!(source, ConfigSource::Unwritable(p, _) if p == path));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_config_source_messages() {
        let path = PathBuf::from("/home/me/.pocketdash/config.toml");
        assert_eq!(
            ConfigSource::File(path.clone()).to_string(),
            "loaded config from /home/me/.pocketdash/config.toml"
        );
        assert!(ConfigSource::Generated(path).to_string().starts_with("no config file found"));
    }
}
