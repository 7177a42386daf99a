pub mod config;
pub mod manifest;
pub mod target;

pub use config::KitConfig;
pub use manifest::{
    Component, ComponentKind, Manifest, ManifestFile, RejectedId, MANIFEST_FILENAME,
};
pub use target::{HookKind, HostTool, Scope, Target, UnknownTargetTag};
