use crate::discovery::{self, DiscoveredSet, SearchRoots};
use crate::models::KitConfig;
use crate::orchestrator::Installer;
use crate::ui::Ui;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Per-invocation settings shared by every command
pub struct AppContext {
    pub ui: Ui,
    pub config: KitConfig,
    pub roots: SearchRoots,
    /// `--home` override for the toolkit checkout
    pub home_override: Option<PathBuf>,
    /// `--no-color` was given explicitly (forwarded by self-update)
    pub no_color_flag: bool,
}

impl AppContext {
    pub fn new(ui: Ui, no_color_flag: bool, home_override: Option<PathBuf>) -> Result<Self> {
        let config = KitConfig::load().context("Failed to load skillkit config")?;
        let roots = SearchRoots::from_env()?;
        Ok(Self {
            ui,
            config,
            roots,
            home_override,
            no_color_flag,
        })
    }

    pub fn installer(&self) -> Result<Installer> {
        Installer::locate(self.home_override.as_deref(), &self.config)
    }

    pub fn discover(&self, explicit: Option<&Path>) -> DiscoveredSet {
        discovery::discover(explicit, &self.roots)
    }

    /// Discover and select exactly one manifest
    pub fn select_one(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        let set = self.discover(explicit);
        discovery::select(&set, &self.ui, explicit)
    }

    /// User home used to resolve global install roots
    pub fn user_home(&self) -> Option<&Path> {
        self.roots.home.as_deref()
    }
}
