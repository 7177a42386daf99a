use super::Ui;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Steady spinner for blocking operations; `None` when not interactive
pub fn spinner(ui: &Ui, message: impl Into<String>) -> Option<ProgressBar> {
    if !ui.interactive {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

pub fn finish(pb: Option<ProgressBar>) {
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}
