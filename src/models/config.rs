use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_REPO_URL: &str = "https://github.com/skillkit-dev/skillkit.git";
pub const DEFAULT_REPO_REF: &str = "main";

/// User configuration (`~/.config/skillkit/config.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitConfig {
    /// Toolkit checkout containing the installer; auto-detected when unset
    #[serde(default)]
    pub toolkit_home: Option<PathBuf>,

    /// Repository cloned by `self-update`
    #[serde(default = "default_repo_url")]
    pub repo_url: String,

    /// Branch or tag cloned by `self-update`
    #[serde(default = "default_repo_ref")]
    pub repo_ref: String,

    /// Installer entry point, relative to a toolkit source
    #[serde(default = "default_installer")]
    pub installer: String,

    /// CLI entry point, relative to a toolkit source
    #[serde(default = "default_cli_entry")]
    pub cli_entry: String,
}

fn default_repo_url() -> String {
    DEFAULT_REPO_URL.to_string()
}

fn default_repo_ref() -> String {
    DEFAULT_REPO_REF.to_string()
}

fn default_installer() -> String {
    "install.sh".to_string()
}

fn default_cli_entry() -> String {
    "bin/skillkit".to_string()
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            toolkit_home: None,
            repo_url: default_repo_url(),
            repo_ref: default_repo_ref(),
            installer: default_installer(),
            cli_entry: default_cli_entry(),
        }
    }
}

impl KitConfig {
    /// Default config location, overridable with `SKILLKIT_CONFIG`
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os("SKILLKIT_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("skillkit").join("config.toml"))
    }

    /// Load config from the default location, then apply env overrides
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load config from a file; a missing file yields defaults
    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: KitConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply `SKILLKIT_HOME`, `SKILLKIT_REPO` and `SKILLKIT_REF`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(home) = lookup("SKILLKIT_HOME").filter(|v| !v.is_empty()) {
            self.toolkit_home = Some(PathBuf::from(home));
        }
        if let Some(repo) = lookup("SKILLKIT_REPO").filter(|v| !v.is_empty()) {
            self.repo_url = repo;
        }
        if let Some(reference) = lookup("SKILLKIT_REF").filter(|v| !v.is_empty()) {
            self.repo_ref = reference;
        }
    }
}
