//! Anchor-based, offset-safe text mutation on parsed sources.
//!
//! This crate provides the core of the graft patch engine:
//!
//! - **Parsing** via [`Parser`], which lowers a Tree-sitter parse into a
//!   language-neutral [`SyntaxTree`] of [`Node`]s
//! - **Anchor resolution** via [`AnchorResolver`], which maps a semantic
//!   [`Target`] (last import, last class field, end of file, a field's
//!   initializer) to a position in the source
//! - **Edit planning** via [`plan_edits`], which binds content to anchors and
//!   rejects overlapping edits
//! - **Patch application** via [`apply_edits`], which splices an
//!   [`EditList`] into the original text back to front so earlier edits
//!   never shift later ones
//!
//! # Supported Languages
//!
//! - TypeScript (`.ts`, `.tsx`, `.mts`, `.cts`)
//! - Python (`.py`, `.pyi`)
//!
//! Other documents can be wrapped with [`SyntaxTree::opaque`]; only
//! [`Target::EndOfFile`] resolves against them.
//!
//! # Example
//!
//! ```
//! use graft_syntax::{
//!     AnchorResolver, EditRequest, Parser, SupportedLanguage, Target, apply_edits, plan_edits,
//! };
//!
//! let source = "import { A } from 'a';\n\nexport class C {}\n";
//! let tree = Parser::new(SupportedLanguage::TypeScript)?.parse(source)?;
//! let resolver = AnchorResolver::new(&tree);
//!
//! let import = resolver.resolve(&Target::LastImport).required(&Target::LastImport)?;
//! let edits = plan_edits([EditRequest::new(import, "import { B } from 'b';")])?;
//! let output = apply_edits(tree.source(), &edits)?;
//!
//! assert!(output.contains("import { B } from 'b';"));
//! # Ok::<(), graft_syntax::SyntaxError>(())
//! ```

mod anchor;
mod error;
mod language;
mod lower;
mod parser;
mod patch;
mod plan;
mod tree;

pub use anchor::{Anchor, AnchorKind, AnchorResolver, Layout, Resolution, Target};
pub use error::SyntaxError;
pub use language::{LanguageParseError, SupportedLanguage};
pub use parser::Parser;
pub use patch::apply_edits;
pub use plan::{Edit, EditList, EditRequest, plan_edits};
pub use tree::{Node, NodeId, NodeKind, Span, SyntaxTree};

#[cfg(test)]
mod tests;
