use serde::Serialize;

use crate::MacroError;
use crate::MacroResult;

/// A renderable template: a named source plus its variable delimiters.
///
/// The source is validated at construction, so a `Template` always holds a
/// parseable body. Rendering builds a fresh environment every time; templates
/// carry no state between renders.
#[derive(Debug, Clone)]
pub struct Template {
	name: String,
	source: String,
	open_delim: String,
	close_delim: String,
}

impl Template {
	/// Validate `source` and wrap it. Returns [`MacroError::TemplateLoad`]
	/// when the source fails to parse.
	pub fn new(
		name: impl Into<String>,
		source: impl Into<String>,
		open_delim: impl Into<String>,
		close_delim: impl Into<String>,
	) -> MacroResult<Self> {
		let template = Self {
			name: name.into(),
			source: source.into(),
			open_delim: open_delim.into(),
			close_delim: close_delim.into(),
		};

		if let Err(error) = template.environment() {
			return Err(MacroError::TemplateLoad {
				reference: template.name,
				reason: error.to_string(),
			});
		}

		Ok(template)
	}

	/// The reference this template was loaded under.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The raw template source.
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Render the template against `ctx`.
	pub fn render(&self, ctx: impl Serialize) -> Result<String, minijinja::Error> {
		let env = self.environment()?;
		let template = env.get_template(&self.name)?;
		template.render(minijinja::Value::from_serialize(ctx))
	}

	fn environment(&self) -> Result<minijinja::Environment<'_>, minijinja::Error> {
		let mut env = minijinja::Environment::new();
		env.set_keep_trailing_newline(true);
		env.set_undefined_behavior(minijinja::UndefinedBehavior::Chainable);

		let syntax = minijinja::syntax::SyntaxConfig::builder()
			.variable_delimiters(self.open_delim.clone(), self.close_delim.clone())
			.build()?;
		env.set_syntax(syntax);

		env.add_template(&self.name, &self.source)?;
		Ok(env)
	}
}

/// Collaborator that resolves an external template reference to a [`Template`].
///
/// Template bodies can live outside the document (include files, shared
/// template directories); loading them is the caller's concern. The delimiter
/// arguments tell the loader which variable delimiters the resolved template
/// should use.
pub trait TemplateLoader {
	fn load(
		&self,
		base: &str,
		include_path: &str,
		reference: &str,
		open_delim: &str,
		close_delim: &str,
	) -> MacroResult<Template>;
}
