//! Loaded documents and the edits queued against them.

use camino::{Utf8Path, Utf8PathBuf};
use graft_syntax::{
    AnchorResolver, EditRequest, NodeKind, Parser, Resolution, SupportedLanguage, SyntaxTree,
    Target, apply_edits, plan_edits,
};
use tracing::{debug, info, warn};

use super::error::SessionError;
use super::report::{PatchOutcome, Step, StepReport};
use crate::provider::SourceProvider;
use crate::workspace::Workspace;

/// One document read for a session.
#[derive(Debug)]
pub(crate) struct SourceDocument {
    path: Utf8PathBuf,
    tree: SyntaxTree,
}

impl SourceDocument {
    /// Parses `text` with the grammar implied by the extension of `path`.
    ///
    /// Documents without a grammar become opaque trees.
    pub(crate) fn parse(path: Utf8PathBuf, text: String) -> Result<Self, SessionError> {
        let Some(language) = SupportedLanguage::from_path(path.as_std_path()) else {
            return Ok(Self {
                path,
                tree: SyntaxTree::opaque(text),
            });
        };
        let tree = Parser::new(language)
            .and_then(|mut parser| parser.parse(&text))
            .map_err(|source| SessionError::syntax(path.clone(), "parse", source))?;
        if tree.has_errors() {
            warn!(path = %path, "document has syntax errors; anchors may be imprecise");
        }
        Ok(Self { path, tree })
    }

    /// Root-relative path.
    pub(crate) fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub(crate) const fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub(crate) fn text(&self) -> &str {
        self.tree.source()
    }

    /// Returns whether a top-level import matches `statement`, ignoring
    /// whitespace and anything from the terminating semicolon on.
    pub(crate) fn has_import(&self, statement: &str) -> bool {
        let wanted = squash(statement);
        self.tree
            .roots()
            .filter(|node| node.kind() == NodeKind::Import)
            .any(|node| squash(self.tree.text(node)) == wanted)
    }

    /// Returns whether the first class declares a field called `name`.
    pub(crate) fn has_field(&self, name: &str) -> bool {
        self.tree
            .first_class()
            .and_then(|class| self.tree.field(class, name))
            .is_some()
    }

    /// Returns the initializer text of field `name` of the first class.
    pub(crate) fn field_initializer(&self, name: &str) -> Option<&str> {
        let class = self.tree.first_class()?;
        let field = self.tree.field(class, name)?;
        self.tree
            .children(field)
            .next()
            .map(|initializer| self.tree.text(initializer))
    }

    /// Returns whether the decorator list `property` already names `entry`.
    pub(crate) fn lists_entry(&self, property: &str, entry: &str) -> bool {
        self.tree
            .first_class()
            .and_then(|class| self.tree.metadata_list(class, property))
            .is_some_and(|list| {
                self.tree
                    .children(list)
                    .any(|element| self.tree.text(element) == entry)
            })
    }
}

/// Statement text up to its terminating `;`, without whitespace. A trailing
/// comment kept on the statement's line is dropped with the terminator.
fn squash(statement: &str) -> String {
    let code = statement
        .split_once(';')
        .map_or(statement, |(code, _)| code);
    code.split_whitespace().collect()
}

/// Steps queued against one document, committed together.
#[derive(Debug)]
pub(crate) struct DocumentPatch<'d> {
    document: &'d SourceDocument,
    requests: Vec<EditRequest>,
    reports: Vec<StepReport>,
}

impl<'d> DocumentPatch<'d> {
    pub(crate) const fn new(document: &'d SourceDocument) -> Self {
        Self {
            document,
            requests: Vec::new(),
            reports: Vec::new(),
        }
    }

    /// Queues `content` at `target` unless it is `present` already or the
    /// target cannot be found.
    pub(crate) fn request(&mut self, step: Step, target: &Target, content: &str, present: bool) {
        let path = self.document.path();
        if present {
            debug!(%step, %path, "content already present");
            self.reports
                .push(StepReport::new(step, path, PatchOutcome::SkippedPresent));
            return;
        }

        match AnchorResolver::new(self.document.tree()).resolve(target) {
            Resolution::Found(anchor) => {
                debug!(
                    %step,
                    %path,
                    position = anchor.position(),
                    kind = ?anchor.kind(),
                    "resolved anchor"
                );
                self.requests.push(EditRequest::new(anchor, content));
                self.reports
                    .push(StepReport::new(step, path, PatchOutcome::Applied));
            }
            Resolution::NotFound => {
                warn!(%step, %path, %target, "target not found; document left unchanged");
                self.reports
                    .push(StepReport::new(step, path, PatchOutcome::SkippedNotFound));
            }
        }
    }

    /// Plans, applies, and writes the queued edits.
    ///
    /// Nothing is written when no step applies.
    pub(crate) fn commit(
        self,
        provider: &impl SourceProvider,
        workspace: &Workspace,
    ) -> Result<Vec<StepReport>, SessionError> {
        let Self {
            document,
            requests,
            reports,
        } = self;
        if requests.is_empty() {
            return Ok(reports);
        }

        let applied: Vec<Step> = reports
            .iter()
            .filter(|report| report.outcome() == PatchOutcome::Applied)
            .map(StepReport::step)
            .collect();
        let label = applied
            .iter()
            .map(|step| step.as_str())
            .collect::<Vec<_>>()
            .join("+");
        let path = document.path();

        let edits = plan_edits(requests)
            .map_err(|source| SessionError::syntax(path.to_owned(), label.clone(), source))?;
        let text = apply_edits(document.text(), &edits)
            .map_err(|source| SessionError::syntax(path.to_owned(), label, source))?;
        provider
            .write(&workspace.locate(path), &text)
            .map_err(|source| SessionError::io("write", path.to_owned(), source))?;

        for step in applied {
            info!(%step, %path, "step applied");
        }
        Ok(reports)
    }
}
