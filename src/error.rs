use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum MacroError {
	#[error("macro config doesn't have a `{field}` field holding a string")]
	#[diagnostic(
		code(mdmacro::config_field_missing),
		help("inline templates (`Template: #name`) read their body from the named config field")
	)]
	ConfigFieldMissing { field: String },

	#[error("unable to load template `{reference}`: {reason}")]
	#[diagnostic(code(mdmacro::template_load))]
	TemplateLoad { reference: String, reason: String },

	#[error("unable to compile macro regexp `{expr}` (template `{template}`): {reason}")]
	#[diagnostic(
		code(mdmacro::invalid_expr),
		help("the expression after `Macro:` must be a valid regular expression")
	)]
	InvalidExpr {
		expr: String,
		template: String,
		reason: String,
	},

	#[error("unable to parse config for macro `{expr}`: {reason}")]
	#[diagnostic(
		code(mdmacro::config_parse),
		help("the directive's trailing block must be valid yaml")
	)]
	ConfigParse { expr: String, reason: String },

	#[error("unable to render template `{template}` for macro `{expr}`: {reason}")]
	#[diagnostic(code(mdmacro::template_render))]
	TemplateRender {
		expr: String,
		template: String,
		reason: String,
	},
}

pub type MacroResult<T> = Result<T, MacroError>;
