//! `mdmacro` is the macro-expansion engine for markdown document pipelines.
//! Authors embed HTML-comment directives that declare a pattern (a regular
//! expression) and a template; the engine extracts the directives, strips them
//! from the document, and rewrites every later occurrence of each pattern with
//! the rendered template output.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Raw document
//!   → Directive scanner (finds `<!-- Macro: … -->` blocks, builds macros, strips the blocks)
//!   → Macro application, one macro at a time in discovery order:
//!       per match: fresh config tree → placeholder substitution
//!                  → attachment dimension injection → template render → splice
//! ```
//!
//! Later macros run over the full output of earlier ones, so a macro can match
//! text that an earlier macro's template produced. Every match gets an
//! independently decoded config tree; no state crosses match or macro
//! boundaries.
//!
//! ## Key Types
//!
//! - [`Macro`] — a compiled directive: pattern + template + raw config.
//! - [`Template`] / [`TemplateLoader`] — a renderable template and the
//!   collaborator that resolves external template references.
//! - [`ConfigNode`] — the canonical config tree decoded from a directive's
//!   YAML block.
//! - [`Attachment`] — attachment metadata used for dimension auto-injection.
//! - [`Extraction`] — the result of scanning a document for directives.
//!
//! ## Quick Start
//!
//! ```rust
//! use mdmacro::MacroError;
//! use mdmacro::MacroResult;
//! use mdmacro::Template;
//! use mdmacro::TemplateLoader;
//! use mdmacro::apply_macros;
//! use mdmacro::extract_macros;
//!
//! struct NoTemplates;
//!
//! impl TemplateLoader for NoTemplates {
//! 	fn load(
//! 		&self,
//! 		_base: &str,
//! 		_include_path: &str,
//! 		reference: &str,
//! 		_open_delim: &str,
//! 		_close_delim: &str,
//! 	) -> MacroResult<Template> {
//! 		Err(MacroError::TemplateLoad {
//! 			reference: reference.to_string(),
//! 			reason: "no template sources configured".to_string(),
//! 		})
//! 	}
//! }
//!
//! let document = r#"<!-- Macro: TICKET-(\d+)
//!      Template: #tpl
//!      tpl: "[{{ ticket }}]({{ url }})"
//!      ticket: TICKET-${1}
//!      url: https://tracker.example.com/TICKET-${1}
//! -->
//! See TICKET-42.
//! "#;
//!
//! let extraction = extract_macros("", "", document, &NoTemplates);
//! assert!(extraction.is_ok());
//!
//! let rewritten = apply_macros(&extraction.macros, &extraction.document, &[])?;
//! assert_eq!(
//! 	rewritten.trim(),
//! 	"See [TICKET-42](https://tracker.example.com/TICKET-42).",
//! );
//! # Ok::<(), mdmacro::MacroError>(())
//! ```

pub use attachment::*;
pub use directive::*;
pub use error::*;
pub use expand::*;
pub use node::*;
pub use template::*;

mod attachment;
mod directive;
mod error;
mod expand;
mod node;
mod template;

#[cfg(test)]
mod __fixtures;
