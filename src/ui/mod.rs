pub mod output;
pub mod progress;
pub mod prompt;

pub use output::{ColorDecision, Ui};
