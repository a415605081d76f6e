//! Patch sessions over one workspace project.
//!
//! A session resolves the project once, then runs a scenario document by
//! document: each document is read, parsed, patched with all of its steps
//! in one edit list, and written back before the next is touched. There is
//! no rollback; a failure leaves earlier documents written.

mod document;
mod error;
mod recipe;
mod report;

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use graft_manifest::{ManifestDocument, ManifestEntry};
use graft_syntax::Target;
use tracing::{info, warn};

use crate::provider::SourceProvider;
use crate::workspace::{MANIFEST_FILE, Workspace};
use document::{DocumentPatch, SourceDocument};

pub(crate) use error::SessionError;
pub(crate) use recipe::{
    AddRecipe, DEFAULT_FIELD, DEFAULT_ICON, DEFAULT_ICON_PACKAGE, DEFAULT_MODULE,
    DEFAULT_MODULE_PACKAGE, DEFAULT_VALUE, UpdateRecipe, parse_dependency,
};
pub(crate) use report::{PatchOutcome, Step, StepReport};

const MODULE_FILE: &str = "app.module.ts";
const COMPONENT_FILE: &str = "app.component.ts";
const TEMPLATE_FILE: &str = "app.component.html";
const IMPORTS_PROPERTY: &str = "imports";

pub(crate) struct Session<'p, P> {
    provider: &'p P,
    workspace: Workspace,
}

impl<'p, P: SourceProvider> Session<'p, P> {
    /// Resolves the workspace project under `root`.
    pub(crate) fn open(
        provider: &'p P,
        root: &Utf8Path,
        project: Option<&str>,
    ) -> Result<Self, SessionError> {
        let workspace = Workspace::resolve(provider, root, project)?;
        Ok(Self {
            provider,
            workspace,
        })
    }

    pub(crate) const fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Registers the module, wires the icon into the root component and
    /// its template, and records the dependencies.
    pub(crate) fn add(&self, recipe: &AddRecipe) -> Result<Vec<StepReport>, SessionError> {
        let mut reports = Vec::new();

        let module = self.load(MODULE_FILE)?;
        let mut patch = DocumentPatch::new(&module);
        let module_import = recipe.module_import();
        patch.request(
            Step::ModuleImport,
            &Target::LastImport,
            &module_import,
            module.has_import(&module_import),
        );
        patch.request(
            Step::ModuleRegistration,
            &Target::list_entry(IMPORTS_PROPERTY),
            recipe.module(),
            module.lists_entry(IMPORTS_PROPERTY, recipe.module()),
        );
        reports.extend(patch.commit(self.provider, &self.workspace)?);

        let component = self.load(COMPONENT_FILE)?;
        let mut patch = DocumentPatch::new(&component);
        let icon_import = recipe.icon_import();
        patch.request(
            Step::ComponentImport,
            &Target::LastImport,
            &icon_import,
            component.has_import(&icon_import),
        );
        patch.request(
            Step::ComponentField,
            &Target::LastField,
            &recipe.icon_field(),
            component.has_field(recipe.icon()),
        );
        reports.extend(patch.commit(self.provider, &self.workspace)?);

        let template = self.load(TEMPLATE_FILE)?;
        let mut patch = DocumentPatch::new(&template);
        patch.request(
            Step::TemplateUsage,
            &Target::EndOfFile,
            recipe.snippet(),
            template.text().contains(recipe.snippet()),
        );
        reports.extend(patch.commit(self.provider, &self.workspace)?);

        reports.push(self.merge_manifest(recipe.dependencies())?);
        Ok(reports)
    }

    /// Rewrites the initializer of the recipe's component field.
    pub(crate) fn update(&self, recipe: &UpdateRecipe) -> Result<Vec<StepReport>, SessionError> {
        let component = self.load(COMPONENT_FILE)?;
        let literal = recipe.literal();
        let present = component.field_initializer(recipe.field()) == Some(literal.as_str());

        let mut patch = DocumentPatch::new(&component);
        patch.request(
            Step::FieldUpdate,
            &Target::field_initializer(recipe.field()),
            &literal,
            present,
        );
        patch.commit(self.provider, &self.workspace)
    }

    fn load(&self, file: &str) -> Result<SourceDocument, SessionError> {
        let relative = self.workspace.source_file(file);
        let text = self
            .provider
            .read(&self.workspace.locate(&relative))
            .map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    SessionError::configuration(format!("file {relative} does not exist"))
                } else {
                    SessionError::io("read", relative.clone(), source)
                }
            })?;
        SourceDocument::parse(relative, text)
    }

    fn merge_manifest(&self, entries: &[ManifestEntry]) -> Result<StepReport, SessionError> {
        let relative = Utf8PathBuf::from(MANIFEST_FILE);
        let step = Step::ManifestDependencies;
        let path = self.workspace.locate(&relative);

        let text = match self.provider.read(&path) {
            Ok(text) => text,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                warn!(%step, path = %relative, "manifest missing; dependencies not recorded");
                return Ok(StepReport::new(step, &relative, PatchOutcome::SkippedNotFound));
            }
            Err(source) => return Err(SessionError::io("read", relative, source)),
        };

        let mut manifest = ManifestDocument::parse(&text)
            .map_err(|source| SessionError::manifest(relative.clone(), source))?;
        let added = manifest
            .merge_dependencies(entries)
            .map_err(|source| SessionError::manifest(relative.clone(), source))?;
        let rendered = manifest
            .render()
            .map_err(|source| SessionError::manifest(relative.clone(), source))?;
        if rendered == text {
            return Ok(StepReport::new(step, &relative, PatchOutcome::SkippedPresent));
        }

        self.provider
            .write(&path, &rendered)
            .map_err(|source| SessionError::io("write", relative.clone(), source))?;
        info!(%step, path = %relative, ?added, "step applied");
        Ok(StepReport::new(step, &relative, PatchOutcome::Applied))
    }
}
