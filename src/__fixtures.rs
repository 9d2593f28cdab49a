use std::collections::HashMap;

use crate::Attachment;
use crate::MacroError;
use crate::MacroResult;
use crate::Template;
use crate::TemplateLoader;

/// In-memory template sources keyed by reference, standing in for the
/// document pipeline's include loader.
pub struct StaticTemplates(HashMap<String, String>);

impl StaticTemplates {
	pub fn new(entries: &[(&str, &str)]) -> Self {
		Self(
			entries
				.iter()
				.map(|(reference, source)| ((*reference).to_string(), (*source).to_string()))
				.collect(),
		)
	}

	pub fn empty() -> Self {
		Self(HashMap::new())
	}
}

impl TemplateLoader for StaticTemplates {
	fn load(
		&self,
		_base: &str,
		_include_path: &str,
		reference: &str,
		open_delim: &str,
		close_delim: &str,
	) -> MacroResult<Template> {
		let Some(source) = self.0.get(reference) else {
			return Err(MacroError::TemplateLoad {
				reference: reference.to_string(),
				reason: "template not found".to_string(),
			});
		};

		Template::new(reference, source, open_delim, close_delim)
	}
}

/// A template with the default delimiters, for tests that build macros
/// directly.
pub fn template(body: &str) -> Template {
	Template::new("inline", body, "{{", "}}").expect("fixture template parses")
}

pub fn diagram_attachments() -> Vec<Attachment> {
	vec![
		Attachment {
			name: "diagram.png".to_string(),
			filename: "docs/diagram.png".to_string(),
			width: "640".to_string(),
			height: "480".to_string(),
		},
		Attachment {
			name: "logo.svg".to_string(),
			filename: "assets/logo.svg".to_string(),
			width: String::new(),
			height: String::new(),
		},
	]
}
