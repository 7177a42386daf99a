// skillkit - Install manager for AI coding assistant toolkits
// Tracks, verifies, updates and removes skills, agents and hooks installed
// into Claude Code, OpenCode and Codex configuration directories

pub mod app;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod ui;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use error::KitError;
pub use models::{Manifest, ManifestFile, Target};
