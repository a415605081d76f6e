//! Locating project sources inside an Angular CLI workspace.

use std::collections::BTreeMap;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use graft_manifest::ManifestDocument;
use serde::Deserialize;
use tracing::debug;

use crate::provider::SourceProvider;
use crate::session::SessionError;

/// Workspace description file expected at the root.
pub(crate) const WORKSPACE_FILE: &str = "angular.json";
/// Package manifest expected at the root.
pub(crate) const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkspaceFile {
    #[serde(default)]
    default_project: Option<String>,
    #[serde(default)]
    projects: BTreeMap<String, ProjectEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectEntry {
    #[serde(default)]
    root: String,
    #[serde(default)]
    source_root: Option<String>,
    #[serde(default)]
    project_type: Option<String>,
}

impl ProjectEntry {
    /// `<sourceRoot>` or `<root>/src`, then `app` for applications and
    /// `lib` for everything else.
    fn source_dir(&self) -> Utf8PathBuf {
        let base = match self.source_root.as_deref() {
            Some(source_root) if !source_root.is_empty() => Utf8PathBuf::from(source_root),
            _ => Utf8Path::new(&self.root).join("src"),
        };
        let leaf = if self.project_type.as_deref() == Some("application") {
            "app"
        } else {
            "lib"
        };
        base.join(leaf)
    }
}

/// The project selected for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Workspace {
    root: Utf8PathBuf,
    project: String,
    source_dir: Utf8PathBuf,
}

impl Workspace {
    /// Reads `angular.json` under `root` and selects a project.
    ///
    /// The project is `requested` when given, else the workspace default,
    /// else the `name` declared in `package.json`.
    pub(crate) fn resolve(
        provider: &impl SourceProvider,
        root: &Utf8Path,
        requested: Option<&str>,
    ) -> Result<Self, SessionError> {
        let workspace_path = root.join(WORKSPACE_FILE);
        let text = provider.read(&workspace_path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                SessionError::configuration(format!(
                    "not an Angular CLI workspace: {workspace_path} does not exist"
                ))
            } else {
                SessionError::io("read", workspace_path.clone(), source)
            }
        })?;
        let workspace: WorkspaceFile = serde_json::from_str(&text).map_err(|error| {
            SessionError::configuration(format!("{workspace_path} is not valid: {error}"))
        })?;

        let project = match requested.map(str::to_owned).or(workspace.default_project) {
            Some(name) => name,
            None => manifest_name(provider, root)?,
        };
        let entry = workspace.projects.get(&project).ok_or_else(|| {
            SessionError::configuration(format!(
                "project `{project}` is not defined in {workspace_path}"
            ))
        })?;
        let source_dir = entry.source_dir();
        debug!(%project, %source_dir, "resolved workspace project");

        Ok(Self {
            root: root.to_owned(),
            project,
            source_dir,
        })
    }

    /// Name of the selected project.
    pub(crate) fn project(&self) -> &str {
        &self.project
    }

    /// Project source directory, relative to the root.
    pub(crate) fn source_dir(&self) -> &Utf8Path {
        &self.source_dir
    }

    /// Relative path of `file` inside the project source directory.
    pub(crate) fn source_file(&self, file: &str) -> Utf8PathBuf {
        self.source_dir.join(file)
    }

    /// Absolute location of a root-relative path.
    pub(crate) fn locate(&self, relative: &Utf8Path) -> Utf8PathBuf {
        self.root.join(relative)
    }
}

fn manifest_name(provider: &impl SourceProvider, root: &Utf8Path) -> Result<String, SessionError> {
    let manifest_path = root.join(MANIFEST_FILE);
    let undetermined = || {
        SessionError::configuration(format!(
            "no project given, no default project, and no name in {manifest_path}"
        ))
    };
    let text = provider.read(&manifest_path).map_err(|_| undetermined())?;
    let manifest = ManifestDocument::parse(&text).map_err(|_| undetermined())?;
    manifest.name().map(str::to_owned).ok_or_else(undetermined)
}
