//! Terminal output settings threaded through every command.
//!
//! Color and interactivity are decided once in `main` and passed down as a
//! `Ui` value, so commands never consult process-wide state.

use colored::Colorize;
use std::io::IsTerminal;

/// Why color output was enabled or disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDecision {
    /// `--no-color` was passed
    FlagDisabled,
    /// `NO_COLOR` is set
    EnvNoColor,
    /// stdout is piped or redirected
    NotTerminal,
    /// Human output on a terminal
    Enabled,
}

impl ColorDecision {
    pub fn decide(no_color_flag: bool, no_color_env: bool, stdout_is_terminal: bool) -> Self {
        if no_color_flag {
            ColorDecision::FlagDisabled
        } else if no_color_env {
            ColorDecision::EnvNoColor
        } else if !stdout_is_terminal {
            ColorDecision::NotTerminal
        } else {
            ColorDecision::Enabled
        }
    }

    pub fn use_color(&self) -> bool {
        matches!(self, ColorDecision::Enabled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ui {
    pub color: bool,
    /// stdin is a terminal, so prompts can be shown
    pub interactive: bool,
}

impl Ui {
    pub const fn new(color: bool, interactive: bool) -> Self {
        Self { color, interactive }
    }

    /// Capture color and interactivity from the environment
    pub fn from_env(no_color_flag: bool) -> Self {
        let decision = ColorDecision::decide(
            no_color_flag,
            std::env::var_os("NO_COLOR").is_some(),
            std::io::stdout().is_terminal(),
        );
        tracing::debug!(?decision, "color decision");
        Self {
            color: decision.use_color(),
            interactive: std::io::stdin().is_terminal(),
        }
    }

    /// Uncolored, non-interactive output
    pub const fn plain() -> Self {
        Self::new(false, false)
    }

    pub fn cyan(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn green(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn yellow(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn red(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.cyan(message));
    }

    pub fn success(&self, message: &str) {
        println!("{}", self.green(&format!("✓ {}", message)));
    }

    pub fn warn(&self, message: &str) {
        eprintln!("{}", self.yellow(&format!("⚠ {}", message)));
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.red(&format!("✗ {}", message)));
    }
}
