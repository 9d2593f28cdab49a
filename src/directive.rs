use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::ConfigNode;
use crate::Macro;
use crate::MacroError;
use crate::MacroResult;
use crate::Template;
use crate::TemplateLoader;
use crate::node::decode_config;

/// Matches one directive block:
///
/// ```markdown
/// <!-- Macro: <regexp>
///      Template: <template reference>
///      <optional yaml block> -->
/// ```
///
/// Field labels are case-sensitive. `(?s)` lets the optional config group
/// span multiple lines up to the comment close.
static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"(?s)<!--\s*Macro:\s*(?P<expr>[^\n]+)\n\s*Template:\s*(?P<template>.+?)\s*(?P<config>\n.*?)?-->",
	)
	.expect("directive pattern compiles")
});

/// Outcome of scanning a document for macro directives.
///
/// Scanning halts on the first failing directive, but directives consumed
/// before the failure stay stripped from [`document`](Extraction::document) —
/// the partial mutation is deliberately visible so callers can report the
/// error against the document they will actually publish.
#[derive(Debug)]
pub struct Extraction {
	/// Macros in discovery order. Application order must match.
	pub macros: Vec<Macro>,
	/// The document with successfully consumed directives stripped.
	pub document: String,
	/// The first error encountered, if any. Directives after it are left
	/// unprocessed and unstripped.
	pub error: Option<MacroError>,
}

impl Extraction {
	/// Returns true if every directive was consumed successfully.
	pub fn is_ok(&self) -> bool {
		self.error.is_none()
	}
}

/// Scan `document` for macro directives, left to right and non-overlapping.
///
/// For each directive: resolve the template (inline `#field` references read
/// their body from the directive's own config block; everything else goes
/// through `loader`), compile the expression, and delete the directive's byte
/// span from the output. `base` and `include_path` are passed through to the
/// loader untouched.
pub fn extract_macros(
	base: &str,
	include_path: &str,
	document: &str,
	loader: &dyn TemplateLoader,
) -> Extraction {
	let mut macros = Vec::new();
	let mut output = String::with_capacity(document.len());
	let mut cursor = 0;

	for captures in DIRECTIVE.captures_iter(document) {
		let Some(span) = captures.get(0) else {
			continue;
		};
		let (Some(expr), Some(reference)) = (captures.name("expr"), captures.name("template"))
		else {
			continue;
		};

		let expr = expr.as_str();
		let reference = reference.as_str();
		let config = captures.name("config").map_or("", |group| group.as_str());

		match build_macro(base, include_path, expr, reference, config, loader) {
			Ok(r#macro) => {
				trace!(expr, template = reference, config, "loaded macro");
				macros.push(r#macro);
				output.push_str(&document[cursor..span.start()]);
				cursor = span.end();
			}
			Err(error) => {
				output.push_str(&document[cursor..]);
				return Extraction {
					macros,
					document: output,
					error: Some(error),
				};
			}
		}
	}

	output.push_str(&document[cursor..]);

	Extraction {
		macros,
		document: output,
		error: None,
	}
}

fn build_macro(
	base: &str,
	include_path: &str,
	expr: &str,
	reference: &str,
	config: &str,
	loader: &dyn TemplateLoader,
) -> MacroResult<Macro> {
	let template = match reference.strip_prefix('#') {
		Some(field) => inline_template(reference, field, expr, config)?,
		None => loader.load(base, include_path, reference, "{{", "}}")?,
	};

	Macro::new(expr, template, config)
}

/// Build a template whose body lives in the directive's own config block,
/// under the field named by the `#` sentinel's remainder.
fn inline_template(
	reference: &str,
	field: &str,
	expr: &str,
	config: &str,
) -> MacroResult<Template> {
	let tree = decode_config(config).map_err(|error| {
		MacroError::ConfigParse {
			expr: expr.to_string(),
			reason: error.to_string(),
		}
	})?;

	let Some(body) = tree.field(field).and_then(ConfigNode::as_str) else {
		return Err(MacroError::ConfigFieldMissing {
			field: field.to_string(),
		});
	};

	Template::new(reference, body, "{{", "}}")
}
