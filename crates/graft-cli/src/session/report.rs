//! Per-step results.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};

/// A unit of work within a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Step {
    /// Import of the module into the root module file.
    ModuleImport,
    /// Registration of the module in the root module's `imports` list.
    ModuleRegistration,
    /// Import of the icon into the component.
    ComponentImport,
    /// Icon field on the component class.
    ComponentField,
    /// Icon usage appended to the component template.
    TemplateUsage,
    /// Dependency entries merged into the package manifest.
    ManifestDependencies,
    /// Rewrite of a component field's initializer.
    FieldUpdate,
}

impl Step {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::ModuleImport => "module-import",
            Self::ModuleRegistration => "module-registration",
            Self::ComponentImport => "component-import",
            Self::ComponentField => "component-field",
            Self::TemplateUsage => "template-usage",
            Self::ManifestDependencies => "manifest-dependencies",
            Self::FieldUpdate => "field-update",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum PatchOutcome {
    /// The document was changed.
    Applied,
    /// The step's target does not exist; the document is untouched.
    SkippedNotFound,
    /// The document already contains the step's content.
    SkippedPresent,
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Applied => "applied",
            Self::SkippedNotFound => "skipped (target not found)",
            Self::SkippedPresent => "skipped (already present)",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StepReport {
    step: Step,
    path: Utf8PathBuf,
    outcome: PatchOutcome,
}

impl StepReport {
    pub(crate) fn new(step: Step, path: &Utf8Path, outcome: PatchOutcome) -> Self {
        Self {
            step,
            path: path.to_owned(),
            outcome,
        }
    }

    pub(crate) const fn step(&self) -> Step {
        self.step
    }

    pub(crate) const fn outcome(&self) -> PatchOutcome {
        self.outcome
    }
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.step, self.path, self.outcome)
    }
}
