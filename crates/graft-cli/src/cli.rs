//! Command-line argument definitions.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use graft_manifest::ManifestEntry;

use crate::session::{
    AddRecipe, DEFAULT_FIELD, DEFAULT_ICON, DEFAULT_ICON_PACKAGE, DEFAULT_MODULE,
    DEFAULT_MODULE_PACKAGE, DEFAULT_VALUE, UpdateRecipe, parse_dependency,
};

/// Structured source patches for Angular CLI workspaces.
#[derive(Parser, Debug)]
#[command(name = "graft", version, disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Workspace root holding `angular.json`.
    #[arg(long, global = true, default_value = ".")]
    pub(crate) root: Utf8PathBuf,
    /// Project to patch instead of the workspace default.
    #[arg(long, global = true)]
    pub(crate) project: Option<String>,
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Registers an icon module and shows an icon in the root component.
    Add(AddArgs),
    /// Rewrites a string field of the root component.
    Update(UpdateArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct AddArgs {
    /// Module class registered in the root module.
    #[arg(long, default_value = DEFAULT_MODULE)]
    module: String,
    /// Package the module is imported from.
    #[arg(long, default_value = DEFAULT_MODULE_PACKAGE)]
    module_package: String,
    /// Icon symbol imported into the root component.
    #[arg(long, default_value = DEFAULT_ICON)]
    icon: String,
    /// Package the icon is imported from.
    #[arg(long, default_value = DEFAULT_ICON_PACKAGE)]
    icon_package: String,
    /// Template markup appended to the component template.
    ///
    /// Defaults to an `fa-icon` element bound to the icon field.
    #[arg(long)]
    snippet: Option<String>,
    /// Dependency to record as NAME@VERSION; repeat to add several.
    ///
    /// Replaces the default Font Awesome package set when given.
    #[arg(long = "dependency", value_name = "NAME@VERSION", value_parser = parse_dependency)]
    dependencies: Vec<ManifestEntry>,
}

impl AddArgs {
    pub(crate) fn into_recipe(self) -> AddRecipe {
        let Self {
            module,
            module_package,
            icon,
            icon_package,
            snippet,
            dependencies,
        } = self;
        let mut recipe = AddRecipe::new(module, module_package, icon, icon_package);
        if let Some(snippet) = snippet {
            recipe = recipe.with_snippet(snippet);
        }
        if !dependencies.is_empty() {
            recipe = recipe.with_dependencies(dependencies);
        }
        recipe
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct UpdateArgs {
    /// Component field whose initializer is replaced.
    #[arg(long, default_value = DEFAULT_FIELD)]
    field: String,
    /// New string value, written as a quoted literal.
    #[arg(long, default_value = DEFAULT_VALUE)]
    value: String,
}

impl UpdateArgs {
    pub(crate) fn into_recipe(self) -> UpdateRecipe {
        UpdateRecipe::new(self.field, self.value)
    }
}
