//! Parameters of the `add` and `update` scenarios.
//!
//! The defaults install the Font Awesome coffee icon into a fresh Angular
//! application and retitle its root component.

use graft_manifest::ManifestEntry;

pub(crate) const DEFAULT_MODULE: &str = "FontAwesomeModule";
pub(crate) const DEFAULT_MODULE_PACKAGE: &str = "@fortawesome/angular-fontawesome";
pub(crate) const DEFAULT_ICON: &str = "faCoffee";
pub(crate) const DEFAULT_ICON_PACKAGE: &str = "@fortawesome/free-solid-svg-icons";
pub(crate) const DEFAULT_FIELD: &str = "title";
pub(crate) const DEFAULT_VALUE: &str = "Angular demo 0.0.2";

const DEFAULT_DEPENDENCIES: &[(&str, &str)] = &[
    ("@fortawesome/fontawesome-svg-core", "~6.2.1"),
    ("@fortawesome/free-solid-svg-icons", "~6.2.1"),
    ("@fortawesome/angular-fontawesome", "~0.11.0"),
];

/// What `add` injects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AddRecipe {
    module: String,
    module_package: String,
    icon: String,
    icon_package: String,
    snippet: String,
    dependencies: Vec<ManifestEntry>,
}

impl AddRecipe {
    pub(crate) fn new(
        module: impl Into<String>,
        module_package: impl Into<String>,
        icon: impl Into<String>,
        icon_package: impl Into<String>,
    ) -> Self {
        let icon = icon.into();
        Self {
            module: module.into(),
            module_package: module_package.into(),
            snippet: format!("<fa-icon [icon]=\"{icon}\"></fa-icon>"),
            icon,
            icon_package: icon_package.into(),
            dependencies: DEFAULT_DEPENDENCIES
                .iter()
                .map(|(name, version)| ManifestEntry::new(*name, *version))
                .collect(),
        }
    }

    /// Replaces the template markup.
    pub(crate) fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    /// Replaces the dependency set.
    pub(crate) fn with_dependencies(mut self, dependencies: Vec<ManifestEntry>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub(crate) fn module(&self) -> &str {
        &self.module
    }

    pub(crate) fn icon(&self) -> &str {
        &self.icon
    }

    pub(crate) fn snippet(&self) -> &str {
        &self.snippet
    }

    pub(crate) fn dependencies(&self) -> &[ManifestEntry] {
        &self.dependencies
    }

    pub(crate) fn module_import(&self) -> String {
        import_statement(&self.module, &self.module_package)
    }

    pub(crate) fn icon_import(&self) -> String {
        import_statement(&self.icon, &self.icon_package)
    }

    pub(crate) fn icon_field(&self) -> String {
        format!("{icon} = {icon};", icon = self.icon)
    }
}

impl Default for AddRecipe {
    fn default() -> Self {
        Self::new(
            DEFAULT_MODULE,
            DEFAULT_MODULE_PACKAGE,
            DEFAULT_ICON,
            DEFAULT_ICON_PACKAGE,
        )
    }
}

/// What `update` rewrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UpdateRecipe {
    field: String,
    value: String,
}

impl UpdateRecipe {
    pub(crate) fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub(crate) fn field(&self) -> &str {
        &self.field
    }

    /// The new value as a single-quoted string literal.
    pub(crate) fn literal(&self) -> String {
        let mut literal = String::with_capacity(self.value.len() + 2);
        literal.push('\'');
        for ch in self.value.chars() {
            match ch {
                '\\' => literal.push_str("\\\\"),
                '\'' => literal.push_str("\\'"),
                '\n' => literal.push_str("\\n"),
                '\r' => literal.push_str("\\r"),
                other => literal.push(other),
            }
        }
        literal.push('\'');
        literal
    }
}

impl Default for UpdateRecipe {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD, DEFAULT_VALUE)
    }
}

/// Parses a `name@version` dependency argument.
///
/// The separator is the last `@`, so scoped names such as
/// `@scope/pkg@1.0.0` keep their leading `@`.
pub(crate) fn parse_dependency(argument: &str) -> Result<ManifestEntry, String> {
    match argument.rsplit_once('@') {
        Some((name, version)) if !name.is_empty() && !version.is_empty() => {
            Ok(ManifestEntry::new(name, version))
        }
        _ => Err(format!("expected NAME@VERSION, got `{argument}`")),
    }
}

fn import_statement(symbol: &str, package: &str) -> String {
    format!("import {{ {symbol} }} from '{package}';")
}
