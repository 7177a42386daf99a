pub mod fetch;
pub mod installer;
pub mod script_runner;
pub mod update;

pub use fetch::{FetchedSource, SourceRequest};
pub use installer::{Installer, InstallerArg};
pub use script_runner::ScriptRunner;
pub use update::{UpdateOptions, UpdatePlan};
