use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Host tool a target installs into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostTool {
    Claude,
    Opencode,
    Codex,
}

/// Installation scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Rooted in a project directory
    Project,
    /// Rooted in the user's home directory
    Global,
}

/// Where a target keeps its hook integration files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    /// Shell hook scripts under `hooks/`, listed in `hook_scripts`
    Scripts,
    /// Plugin modules under `plugins/`, listed in `plugin_files`
    Plugins,
}

impl HookKind {
    /// Generated subdirectories of the hook dir, removed on uninstall
    /// whether recorded or not
    pub const GENERATED_DIRS: &'static [&'static str] = &["logs", "backups"];

    /// Subdirectory (relative to the manifest directory) holding the files
    pub fn dir_name(&self) -> &'static str {
        match self {
            HookKind::Scripts => "hooks",
            HookKind::Plugins => "plugins",
        }
    }
}

/// A (host tool, scope) pair skillkit can install into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Target {
    ClaudeProject,
    ClaudeGlobal,
    OpencodeProject,
    OpencodeGlobal,
    CodexProject,
    CodexGlobal,
}

impl Target {
    /// Every target, project scopes first. Discovery probes in this order.
    pub const ALL: [Target; 6] = [
        Target::ClaudeProject,
        Target::OpencodeProject,
        Target::CodexProject,
        Target::ClaudeGlobal,
        Target::OpencodeGlobal,
        Target::CodexGlobal,
    ];

    /// Tag stored in the manifest's `target` field
    pub fn tag(&self) -> &'static str {
        match self {
            Target::ClaudeProject => "claude-project",
            Target::ClaudeGlobal => "claude-global",
            Target::OpencodeProject => "opencode-project",
            Target::OpencodeGlobal => "opencode-global",
            Target::CodexProject => "codex-project",
            Target::CodexGlobal => "codex-global",
        }
    }

    /// Installer flag selecting this target
    pub fn flag(&self) -> &'static str {
        match self {
            Target::ClaudeProject => "--claude",
            Target::ClaudeGlobal => "--claude-global",
            Target::OpencodeProject => "--opencode",
            Target::OpencodeGlobal => "--opencode-global",
            Target::CodexProject => "--codex",
            Target::CodexGlobal => "--codex-global",
        }
    }

    pub fn host(&self) -> HostTool {
        match self {
            Target::ClaudeProject | Target::ClaudeGlobal => HostTool::Claude,
            Target::OpencodeProject | Target::OpencodeGlobal => HostTool::Opencode,
            Target::CodexProject | Target::CodexGlobal => HostTool::Codex,
        }
    }

    pub fn scope(&self) -> Scope {
        match self {
            Target::ClaudeProject | Target::OpencodeProject | Target::CodexProject => {
                Scope::Project
            }
            Target::ClaudeGlobal | Target::OpencodeGlobal | Target::CodexGlobal => Scope::Global,
        }
    }

    /// Hook integration kind, if the host tool supports hooks at all
    pub fn hook_kind(&self) -> Option<HookKind> {
        match self.host() {
            HostTool::Claude => Some(HookKind::Scripts),
            HostTool::Opencode => Some(HookKind::Plugins),
            HostTool::Codex => None,
        }
    }

    /// Shared configuration files the hook integration edits but does not own
    pub fn shared_config_files(&self) -> &'static [&'static str] {
        match self.host() {
            HostTool::Claude => &["settings.json"],
            HostTool::Opencode => &["opencode.json"],
            HostTool::Codex => &[],
        }
    }

    /// Hidden directory name inside a project root
    fn project_dir_name(&self) -> &'static str {
        match self.host() {
            HostTool::Claude => ".claude",
            HostTool::Opencode => ".opencode",
            HostTool::Codex => ".codex",
        }
    }

    /// Conventional install directory for this target.
    ///
    /// `anchor` is the project root for project scopes and the user home
    /// for global ones.
    pub fn conventional_dir(&self, anchor: &Path) -> PathBuf {
        match self {
            Target::ClaudeProject | Target::OpencodeProject | Target::CodexProject => {
                anchor.join(self.project_dir_name())
            }
            Target::ClaudeGlobal => anchor.join(".claude"),
            Target::OpencodeGlobal => anchor.join(".config").join("opencode"),
            Target::CodexGlobal => anchor.join(".codex"),
        }
    }

    /// Working directory a fresh install must run from to reproduce an
    /// installation recorded at `target_path`.
    ///
    /// Project scopes strip the hidden directory suffix when present; a path
    /// without the suffix already names the project root (manifest beside
    /// the content). Global scopes always run from `home`.
    pub fn resolve_root(&self, target_path: &Path, home: &Path) -> PathBuf {
        match self.scope() {
            Scope::Global => home.to_path_buf(),
            Scope::Project => {
                let suffix = self.project_dir_name();
                if target_path.file_name().is_some_and(|name| name == suffix) {
                    match target_path.parent() {
                        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                        _ => PathBuf::from("."),
                    }
                } else {
                    target_path.to_path_buf()
                }
            }
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned for an unrecognised target tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown target '{0}'")]
pub struct UnknownTargetTag(pub String);

impl FromStr for Target {
    type Err = UnknownTargetTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "claude-project" | "claude" => Ok(Target::ClaudeProject),
            "claude-global" => Ok(Target::ClaudeGlobal),
            "opencode-project" | "opencode" => Ok(Target::OpencodeProject),
            "opencode-global" => Ok(Target::OpencodeGlobal),
            "codex-project" | "codex" => Ok(Target::CodexProject),
            "codex-global" => Ok(Target::CodexGlobal),
            other => Err(UnknownTargetTag(other.to_string())),
        }
    }
}

impl TryFrom<String> for Target {
    type Error = UnknownTargetTag;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Target> for String {
    fn from(target: Target) -> Self {
        target.tag().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_flags_are_unique() {
        let flags: HashSet<_> = Target::ALL.iter().map(|t| t.flag()).collect();
        assert_eq!(flags.len(), Target::ALL.len());
    }

    #[test]
    fn test_tag_round_trips_through_from_str() {
        for target in Target::ALL {
            assert_eq!(target.tag().parse::<Target>(), Ok(target));
        }
    }

    #[test]
    fn test_legacy_aliases() {
        assert_eq!("claude".parse::<Target>(), Ok(Target::ClaudeProject));
        assert_eq!("opencode".parse::<Target>(), Ok(Target::OpencodeProject));
        assert_eq!("codex".parse::<Target>(), Ok(Target::CodexProject));
    }

    #[test]
    fn test_unknown_tag() {
        let err = "cursor-project".parse::<Target>().unwrap_err();
        assert_eq!(err, UnknownTargetTag("cursor-project".to_string()));
    }

    #[test]
    fn test_resolve_root_strips_hidden_dir() {
        let home = Path::new("/home/dev");
        assert_eq!(
            Target::ClaudeProject.resolve_root(Path::new("/work/app/.claude"), home),
            PathBuf::from("/work/app")
        );
        assert_eq!(
            Target::OpencodeProject.resolve_root(Path::new("/work/app/.opencode"), home),
            PathBuf::from("/work/app")
        );
    }

    #[test]
    fn test_resolve_root_without_suffix_is_project_root() {
        let home = Path::new("/home/dev");
        assert_eq!(
            Target::CodexProject.resolve_root(Path::new("/work/app"), home),
            PathBuf::from("/work/app")
        );
    }

    #[test]
    fn test_resolve_root_relative_hidden_dir() {
        let home = Path::new("/home/dev");
        assert_eq!(
            Target::ClaudeProject.resolve_root(Path::new(".claude"), home),
            PathBuf::from(".")
        );
    }

    #[test]
    fn test_resolve_root_global_is_home() {
        let home = Path::new("/home/dev");
        assert_eq!(
            Target::OpencodeGlobal.resolve_root(Path::new("/home/dev/.config/opencode"), home),
            PathBuf::from("/home/dev")
        );
    }

    #[test]
    fn test_hook_kinds() {
        assert_eq!(Target::ClaudeGlobal.hook_kind(), Some(HookKind::Scripts));
        assert_eq!(Target::OpencodeProject.hook_kind(), Some(HookKind::Plugins));
        assert_eq!(Target::CodexProject.hook_kind(), None);
        assert!(Target::CodexGlobal.shared_config_files().is_empty());
    }

    #[test]
    fn test_serde_uses_tag() {
        let json = serde_json::to_string(&Target::OpencodeGlobal).unwrap();
        assert_eq!(json, "\"opencode-global\"");
        let parsed: Target = serde_json::from_str("\"codex-project\"").unwrap();
        assert_eq!(parsed, Target::CodexProject);
    }
}
