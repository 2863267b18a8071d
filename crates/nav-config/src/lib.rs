//! Configuration management for content navigation.
//!
//! Parses `nav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `store.source_dir`
//! - `navigation.root`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// Only `Some` values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override the storage id URL `/` maps to.
    pub root: Option<String>,
    /// Override the default menu depth.
    pub depth: Option<i64>,
    /// Override parallel menu expansion.
    pub parallel: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "nav.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Store configuration (source directory as a relative string from TOML).
    store: StoreConfigRaw,
    /// Navigation configuration.
    pub navigation: NavigationConfig,

    /// Resolved store configuration (set after loading).
    #[serde(skip)]
    pub store_resolved: StoreConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
        }
    }
}

/// Raw store configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct StoreConfigRaw {
    source_dir: Option<String>,
    meta_filename: Option<String>,
}

/// Resolved store configuration with absolute paths.
#[derive(Debug, Default)]
pub struct StoreConfig {
    /// Directory backing the repository root.
    pub source_dir: PathBuf,
    /// Name of the per-node property file.
    pub meta_filename: String,
}

/// Navigation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Storage id that URL `/` maps to.
    pub root: String,
    /// Node property holding the display title.
    pub title_property: String,
    /// Default menu depth budget (`-1` = unlimited).
    pub depth: i64,
    /// Whether menus include the root entry by default.
    pub include_root: bool,
    /// Expand sibling subtrees in parallel.
    pub parallel: bool,
    /// Deadline for a single traversal served over HTTP, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            root: "/".to_owned(),
            title_property: "label".to_owned(),
            depth: 0,
            include_root: false,
            parallel: false,
            timeout_ms: 5000,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`navigation.root`").
        field: String,
        /// Error message (e.g., "${`NAV_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `nav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, and the
    /// result is validated again.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(source_dir) = &settings.source_dir {
            self.store_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(root) = &settings.root {
            self.navigation.root.clone_from(root);
        }
        if let Some(depth) = settings.depth {
            self.navigation.depth = depth;
        }
        if let Some(parallel) = settings.parallel {
            self.navigation.parallel = parallel;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let start = std::env::current_dir().ok()?;
        Self::discover_from(&start)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            store: StoreConfigRaw::default(),
            navigation: NavigationConfig::default(),
            store_resolved: StoreConfig {
                source_dir: base.join("content"),
                meta_filename: "meta.yaml".to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Paths may come from variables, so expand first
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_store()?;
        self.validate_navigation()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 would bind to a random port
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_store(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.store_resolved.meta_filename, "store.meta_filename")
    }

    fn validate_navigation(&self) -> Result<(), ConfigError> {
        let nav = &self.navigation;

        if !nav.root.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "navigation.root must be an absolute storage path, got {:?}",
                nav.root
            )));
        }
        require_non_empty(&nav.title_property, "navigation.title_property")?;
        if nav.depth < -1 {
            return Err(ConfigError::Validation(format!(
                "navigation.depth must be -1 (unlimited) or non-negative, got {}",
                nav.depth
            )));
        }
        if nav.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "navigation.timeout_ms must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref source_dir) = self.store.source_dir {
            self.store.source_dir = Some(expand::expand_env(source_dir, "store.source_dir")?);
        }

        self.navigation.root = expand::expand_env(&self.navigation.root, "navigation.root")?;

        Ok(())
    }

    /// Resolve the source directory relative to the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.store_resolved = StoreConfig {
            source_dir: config_dir.join(self.store.source_dir.as_deref().unwrap_or("content")),
            meta_filename: self
                .store
                .meta_filename
                .clone()
                .unwrap_or_else(|| "meta.yaml".to_owned()),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7878);
        assert_eq!(
            config.store_resolved.source_dir,
            PathBuf::from("/test/content")
        );
        assert_eq!(config.store_resolved.meta_filename, "meta.yaml");
        assert_eq!(config.navigation.root, "/");
        assert_eq!(config.navigation.title_property, "label");
        assert_eq!(config.navigation.depth, 0);
        assert!(!config.navigation.include_root);
        assert!(!config.navigation.parallel);
        assert_eq!(config.navigation.timeout_ms, 5000);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 7878);
        assert_eq!(config.navigation.title_property, "label");
    }

    #[test]
    fn test_parse_navigation_config() {
        let toml = r#"
[navigation]
root = "/cms/navigation/main"
title_property = "title"
depth = -1
include_root = true
parallel = true
timeout_ms = 250
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.navigation.root, "/cms/navigation/main");
        assert_eq!(config.navigation.title_property, "title");
        assert_eq!(config.navigation.depth, -1);
        assert!(config.navigation.include_root);
        assert!(config.navigation.parallel);
        assert_eq!(config.navigation.timeout_ms, 250);
    }

    #[test]
    fn test_parse_unknown_field_type_fails() {
        let toml = r#"
[server]
port = "eighty"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[store]
source_dir = "site/nav"
meta_filename = "node.yml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.store_resolved.source_dir,
            PathBuf::from("/project/site/nav")
        );
        assert_eq!(config.store_resolved.meta_filename, "node.yml");
    }

    #[test]
    fn test_resolve_paths_keeps_absolute_source_dir() {
        let toml = r#"
[store]
source_dir = "/srv/content"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.store_resolved.source_dir,
            PathBuf::from("/srv/content")
        );
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nav.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9000\n\n[navigation]\nroot = \"/main\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.navigation.root, "/main");
        assert_eq!(config.store_resolved.source_dir, temp.path().join("content"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/nav.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_file_fails_validation() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nav.toml");
        std::fs::write(&path, "[navigation]\ndepth = -4\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("navigation.depth"));
    }

    #[test]
    fn test_load_validates_cli_overrides() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nav.toml");
        std::fs::write(&path, "").unwrap();
        let settings = CliSettings {
            root: Some("relative".to_owned()),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();

        assert!(err.to_string().contains("navigation.root"));
    }

    #[test]
    fn test_discover_from_parent_directory() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join("nav.toml"), "").unwrap();

        let found = Config::discover_from(&nested).unwrap();

        assert_eq!(found, temp.path().join("nav.toml"));
    }

    #[test]
    fn test_discover_ignores_directory_named_like_config() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("nav.toml");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join("nav.toml/inner"), "").unwrap();

        assert_ne!(
            Config::discover_from(&nested),
            Some(temp.path().join("nav.toml"))
        );
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(9000),
            source_dir: Some(PathBuf::from("/custom/content")),
            root: Some("/cms/main".to_owned()),
            depth: Some(-1),
            parallel: Some(true),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.store_resolved.source_dir,
            PathBuf::from("/custom/content")
        );
        assert_eq!(config.navigation.root, "/cms/main");
        assert_eq!(config.navigation.depth, -1);
        assert!(config.navigation.parallel);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7878);
        assert_eq!(config.navigation.root, "/");
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::set_var("NAV_CONFIG_TEST_HOST", "0.0.0.0");
            std::env::set_var("NAV_CONFIG_TEST_SITE", "intranet");
        }

        let toml = r#"
[server]
host = "${NAV_CONFIG_TEST_HOST}"

[store]
source_dir = "${NAV_CONFIG_TEST_DIR:-sites}"

[navigation]
root = "/${NAV_CONFIG_TEST_SITE}/navigation"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.store.source_dir.as_deref(), Some("sites"));
        assert_eq!(config.navigation.root, "/intranet/navigation");

        unsafe {
            std::env::remove_var("NAV_CONFIG_TEST_HOST");
            std::env::remove_var("NAV_CONFIG_TEST_SITE");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("NAV_CONFIG_TEST_MISSING");
        }

        let toml = r#"
[navigation]
root = "${NAV_CONFIG_TEST_MISSING}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("navigation.root"));
    }

    /// Assert that validation fails with `expected` in the error message.
    fn assert_validation_error(config: &Config, expected: &str) {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        assert!(msg.contains(expected), "Expected '{expected}' in: {msg}");
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = String::new();
        assert_validation_error(&config, "server.host");
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;
        assert_validation_error(&config, "server.port");
    }

    #[test]
    fn test_validate_meta_filename_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.store_resolved.meta_filename = String::new();
        assert_validation_error(&config, "store.meta_filename");
    }

    #[test]
    fn test_validate_root_not_absolute() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.navigation.root = "cms/main".to_owned();
        assert_validation_error(&config, "navigation.root");
    }

    #[test]
    fn test_validate_title_property_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.navigation.title_property = String::new();
        assert_validation_error(&config, "navigation.title_property");
    }

    #[test]
    fn test_validate_depth() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.navigation.depth = -1;
        assert!(config.validate().is_ok());

        config.navigation.depth = -2;
        assert_validation_error(&config, "navigation.depth");
    }

    #[test]
    fn test_validate_timeout_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.navigation.timeout_ms = 0;
        assert_validation_error(&config, "navigation.timeout_ms");
    }
}
