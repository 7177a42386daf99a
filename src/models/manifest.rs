use super::target::{HookKind, Target, UnknownTargetTag};
use crate::error::KitError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Filename the installer writes into each install root
pub const MANIFEST_FILENAME: &str = ".skillkit-manifest.json";

/// Persisted record of one installation.
///
/// Written (and fully rewritten on every update) by the installer; every
/// other command only reads it. Array fields default to empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Raw target tag. Kept as a string so an unknown tag is reported per
    /// manifest instead of failing the parse.
    pub target: String,

    /// Directory the files were installed into (absolute or project-relative)
    #[serde(default)]
    pub target_path: String,

    /// Toolkit version that performed the install
    #[serde(default)]
    pub version: String,

    /// RFC 3339 timestamp of install or last update
    #[serde(default)]
    pub installed_at: String,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub agents: Vec<String>,

    #[serde(default)]
    pub hooks: bool,

    #[serde(default)]
    pub hook_scripts: Vec<String>,

    #[serde(default)]
    pub plugin_files: Vec<String>,
}

impl Manifest {
    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).map_err(|e| {
            KitError::ManifestParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Map the recorded tag to a known target
    pub fn target(&self) -> std::result::Result<Target, UnknownTargetTag> {
        self.target.parse()
    }

    /// Hook files recorded for the given target's hook kind
    pub fn hook_files(&self, kind: HookKind) -> &[String] {
        match kind {
            HookKind::Scripts => &self.hook_scripts,
            HookKind::Plugins => &self.plugin_files,
        }
    }

    /// `target_path` as a path, resolved against `project_root` when relative
    pub fn target_path_from(&self, project_root: &Path) -> PathBuf {
        let recorded = Path::new(&self.target_path);
        if recorded.is_absolute() {
            recorded.to_path_buf()
        } else {
            project_root.join(recorded)
        }
    }

    /// Every recorded identifier with its kind, in manifest order.
    ///
    /// Hook identifiers are only included when `hooks` is true and the
    /// target supports hooks.
    fn recorded(&self, target: Target) -> Vec<(ComponentKind, &str)> {
        let mut recorded: Vec<(ComponentKind, &str)> = Vec::new();
        recorded.extend(self.skills.iter().map(|id| (ComponentKind::Skill, id.as_str())));
        recorded.extend(self.agents.iter().map(|id| (ComponentKind::Agent, id.as_str())));

        if self.hooks {
            if let Some(kind) = target.hook_kind() {
                let component_kind = match kind {
                    HookKind::Scripts => ComponentKind::HookScript,
                    HookKind::Plugins => ComponentKind::PluginFile,
                };
                recorded.extend(
                    self.hook_files(kind)
                        .iter()
                        .map(|name| (component_kind, name.as_str())),
                );
            }
        }

        recorded
    }

    /// Expected on-disk entries for every recorded component.
    ///
    /// Paths are resolved from `base`, the directory holding the manifest.
    /// Identifiers that are not a single plain path segment are left out;
    /// see [`Manifest::rejected_ids`].
    pub fn components(&self, target: Target, base: &Path) -> Vec<Component> {
        self.recorded(target)
            .into_iter()
            .filter(|(_, id)| is_plain_segment(id))
            .map(|(kind, id)| {
                let (entry_path, check_path) = match kind {
                    ComponentKind::Skill => {
                        let entry = base.join("skills").join(id);
                        let check = entry.join("SKILL.md");
                        (entry, check)
                    }
                    ComponentKind::Agent => {
                        let entry = base.join("agents").join(format!("{}.md", id));
                        (entry.clone(), entry)
                    }
                    ComponentKind::HookScript => {
                        let entry = base.join(HookKind::Scripts.dir_name()).join(id);
                        (entry.clone(), entry)
                    }
                    ComponentKind::PluginFile => {
                        let entry = base.join(HookKind::Plugins.dir_name()).join(id);
                        (entry.clone(), entry)
                    }
                };
                Component {
                    kind,
                    id: id.to_string(),
                    check_path,
                    entry_path,
                }
            })
            .collect()
    }

    /// Recorded identifiers that cannot be mapped to a path under the base
    /// (empty, `.`, `..`, absolute or containing a separator)
    pub fn rejected_ids(&self, target: Target) -> Vec<RejectedId> {
        self.recorded(target)
            .into_iter()
            .filter(|(_, id)| !is_plain_segment(id))
            .map(|(kind, id)| RejectedId {
                kind,
                id: id.to_string(),
            })
            .collect()
    }
}

/// True when `id` is exactly one normal path component
fn is_plain_segment(id: &str) -> bool {
    if id.contains('/') || id.contains('\\') {
        return false;
    }
    let mut parts = Path::new(id).components();
    matches!(
        (parts.next(), parts.next()),
        (Some(std::path::Component::Normal(_)), None)
    )
}

/// A recorded identifier refused as a path segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedId {
    pub kind: ComponentKind,
    pub id: String,
}

impl fmt::Display for RejectedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} identifier {:?}", self.kind, self.id)
    }
}

/// Kind of installed component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Skill,
    Agent,
    HookScript,
    PluginFile,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::Skill => "skill",
            ComponentKind::Agent => "agent",
            ComponentKind::HookScript => "hook",
            ComponentKind::PluginFile => "plugin",
        };
        f.write_str(name)
    }
}

/// One recorded component and where it lives on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub kind: ComponentKind,
    pub id: String,
    /// File whose existence proves the component is installed
    pub check_path: PathBuf,
    /// File or directory removed on uninstall
    pub entry_path: PathBuf,
}

/// A manifest together with the file it was read from
#[derive(Debug, Clone)]
pub struct ManifestFile {
    pub path: PathBuf,
    pub manifest: Manifest,
}

impl ManifestFile {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let manifest = Manifest::load(&path)?;
        Ok(Self { path, manifest })
    }

    /// Directory holding the manifest; base for all component paths
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Map the recorded tag, reporting the manifest path on failure
    pub fn target(&self) -> Result<Target> {
        self.manifest.target().map_err(|e| {
            KitError::UnknownTarget {
                tag: e.0,
                manifest: self.path.clone(),
            }
            .into()
        })
    }

    /// Absolute install directory recorded by the manifest.
    ///
    /// Relative paths are project-relative, so they resolve against the
    /// parent of the manifest directory.
    pub fn target_path(&self) -> PathBuf {
        let base = self.base_dir();
        let project_root = base.parent().unwrap_or(base);
        self.manifest.target_path_from(project_root)
    }
}
