use regex::Regex;

use crate::Attachment;
use crate::MacroError;
use crate::MacroResult;
use crate::Template;
use crate::node::decode_config;
use crate::node::substitute;

/// A compiled macro: a pattern, a template, and the directive's raw config
/// block. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Macro {
	pattern: Regex,
	template: Template,
	raw_config: String,
}

impl Macro {
	/// Compile `expr` and build the macro. Compilation failure returns
	/// [`MacroError::InvalidExpr`] annotated with the expression and the
	/// template reference; no partially built macro escapes.
	pub fn new(expr: &str, template: Template, raw_config: impl Into<String>) -> MacroResult<Self> {
		let pattern = Regex::new(expr).map_err(|error| {
			MacroError::InvalidExpr {
				expr: expr.to_string(),
				template: template.name().to_string(),
				reason: error.to_string(),
			}
		})?;

		Ok(Self {
			pattern,
			template,
			raw_config: raw_config.into(),
		})
	}

	/// The compiled pattern.
	pub fn pattern(&self) -> &Regex {
		&self.pattern
	}

	/// The template rendered for every match.
	pub fn template(&self) -> &Template {
		&self.template
	}

	/// The unparsed config block from the directive.
	pub fn raw_config(&self) -> &str {
		&self.raw_config
	}

	/// Rewrite every non-overlapping match of the pattern in `document` with
	/// rendered template output, left to right.
	///
	/// The config block is decoded into a fresh tree for every match, so two
	/// matches never observe each other's substitutions. The first failing
	/// match aborts the rewrite — no partially rewritten document is returned.
	pub fn apply(&self, document: &str, attachments: &[Attachment]) -> MacroResult<String> {
		let mut output = String::with_capacity(document.len());
		let mut cursor = 0;

		for captures in self.pattern.captures_iter(document) {
			let Some(matched) = captures.get(0) else {
				continue;
			};

			let tree = decode_config(&self.raw_config).map_err(|error| {
				MacroError::ConfigParse {
					expr: self.pattern.as_str().to_string(),
					reason: error.to_string(),
				}
			})?;

			let groups = match_groups(&captures);
			let tree = substitute(tree, &groups, attachments);

			let rendered = self.template.render(&tree).map_err(|error| {
				MacroError::TemplateRender {
					expr: self.pattern.as_str().to_string(),
					template: self.template.name().to_string(),
					reason: error.to_string(),
				}
			})?;

			output.push_str(&document[cursor..matched.start()]);
			output.push_str(&rendered);
			cursor = matched.end();
		}

		output.push_str(&document[cursor..]);
		Ok(output)
	}
}

/// Capture group texts for one match: index 0 is the whole match, indices ≥ 1
/// are parenthesized subgroups. Groups that didn't participate in the match
/// become empty strings.
fn match_groups(captures: &regex::Captures<'_>) -> Vec<String> {
	captures
		.iter()
		.map(|group| group.map_or_else(String::new, |matched| matched.as_str().to_string()))
		.collect()
}

/// Apply macros strictly in discovery order. Each macro runs over the full
/// output of the previous one, so later macros can match text produced by
/// earlier macros' templates. This ordering is load-bearing.
pub fn apply_macros(
	macros: &[Macro],
	document: &str,
	attachments: &[Attachment],
) -> MacroResult<String> {
	let mut document = document.to_string();

	for r#macro in macros {
		document = r#macro.apply(&document, attachments)?;
	}

	Ok(document)
}
