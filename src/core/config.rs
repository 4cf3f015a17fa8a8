//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.diagora/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DiagoraConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub render_markdown: Option<bool>,
    pub quick_questions: Option<Vec<String>>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_LOG_FILE: &str = "diagora.log";

/// Quick questions offered on the welcome screen (F1..F9).
pub const DEFAULT_QUICK_QUESTIONS: &[&str] = &[
    "Concurrent manager durumu nedir?",
    "kaç adet concurrent request var",
    "Invalid objeler hangileri?",
    "Tablespace doluluk oranlari nedir?",
    "Bekleyen workflow var mi?",
    "Aktif alertler neler?",
];

/// Function keys only go to F9.
pub const MAX_QUICK_QUESTIONS: usize = 9;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub render_markdown: bool,
    pub quick_questions: Vec<String>,
    pub log_file: String,
}

/// Values taken from CLI flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub plain: bool,
    pub log_file: Option<String>,
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

/// Returns the path to `~/.diagora/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".diagora").join("config.toml"))
}

/// Load config from `~/.diagora/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DiagoraConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DiagoraConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(DiagoraConfig::default());
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<DiagoraConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(DiagoraConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: DiagoraConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Diagora Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults -> this file -> env vars -> CLI flags.

# [general]
# render_markdown = true             # false shows answers as plain text (or use --plain)
# log_file = "diagora.log"           # Or set DIAGORA_LOG_FILE
# quick_questions = [                # Bound to F1..F9 on the welcome screen
#     "Concurrent manager durumu nedir?",
#     "Tablespace doluluk oranlari nedir?",
# ]

# [backend]
# base_url = "http://localhost:5000" # Or set DIAGORA_BASE_URL
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
pub fn resolve(config: &DiagoraConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &DiagoraConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("DIAGORA_BASE_URL"))
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Log file: CLI → env → config → default
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| env("DIAGORA_LOG_FILE"))
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    // --plain always wins; otherwise config → default (on)
    let render_markdown = !cli.plain && config.general.render_markdown.unwrap_or(true);

    let mut quick_questions: Vec<String> = match &config.general.quick_questions {
        Some(list) => list
            .iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect(),
        None => DEFAULT_QUICK_QUESTIONS.iter().map(|q| q.to_string()).collect(),
    };
    if quick_questions.len() > MAX_QUICK_QUESTIONS {
        warn!(
            "Only the first {} quick questions are reachable, ignoring {}",
            MAX_QUICK_QUESTIONS,
            quick_questions.len() - MAX_QUICK_QUESTIONS
        );
        quick_questions.truncate(MAX_QUICK_QUESTIONS);
    }

    ResolvedConfig {
        base_url,
        render_markdown,
        quick_questions,
        log_file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = DiagoraConfig::default();
        assert!(config.backend.base_url.is_none());
        assert!(config.general.quick_questions.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&DiagoraConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.log_file, DEFAULT_LOG_FILE);
        assert!(resolved.render_markdown);
        assert_eq!(resolved.quick_questions.len(), DEFAULT_QUICK_QUESTIONS.len());
    }

    #[test]
    fn test_resolve_precedence_cli_env_config() {
        let config = DiagoraConfig {
            backend: BackendConfig {
                base_url: Some("http://from-config:5000".into()),
            },
            ..Default::default()
        };
        let env = |key: &str| (key == "DIAGORA_BASE_URL").then(|| "http://from-env:5000".to_string());

        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, "http://from-config:5000");

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.base_url, "http://from-env:5000");

        let cli = CliOverrides {
            base_url: Some("http://from-cli:5000".into()),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.base_url, "http://from-cli:5000");
    }

    #[test]
    fn test_plain_flag_disables_markdown() {
        let config = DiagoraConfig {
            general: GeneralConfig {
                render_markdown: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            plain: true,
            ..Default::default()
        };
        assert!(!resolve_with_env(&config, &cli, no_env).render_markdown);
    }

    #[test]
    fn test_quick_questions_are_trimmed_and_capped() {
        let mut list: Vec<String> = (1..=12).map(|i| format!(" soru {i} ")).collect();
        list.push("   ".into());
        let config = DiagoraConfig {
            general: GeneralConfig {
                quick_questions: Some(list),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.quick_questions.len(), MAX_QUICK_QUESTIONS);
        assert_eq!(resolved.quick_questions[0], "soru 1");
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[backend]
base_url = "http://ebs-assistant:8080"
"#;
        let config: DiagoraConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.backend.base_url.as_deref(),
            Some("http://ebs-assistant:8080")
        );
        assert!(config.general.render_markdown.is_none());
    }

    #[test]
    fn test_full_toml_parses() {
        let toml_str = r#"
[general]
render_markdown = false
log_file = "/tmp/diagora.log"
quick_questions = ["Aktif alertler neler?"]

[backend]
base_url = "http://localhost:5000"
"#;
        let config: DiagoraConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.render_markdown, Some(false));
        assert_eq!(config.general.log_file.as_deref(), Some("/tmp/diagora.log"));
        assert_eq!(config.general.quick_questions.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = std::env::temp_dir().join(format!("diagora-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.backend.base_url.is_none());
        assert!(path.exists());

        // The generated file is entirely commented out and parses to defaults.
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.general.quick_questions.is_none());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("diagora-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[backend\nbase_url = ").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(dir);
    }
}
