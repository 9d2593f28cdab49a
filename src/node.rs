use std::collections::HashMap;

use serde::Serialize;
use serde::ser::SerializeMap;
use serde::ser::SerializeSeq;

use crate::Attachment;

/// The canonical config tree decoded from a directive's YAML block.
///
/// YAML decoding can produce several runtime shapes for the same logical
/// structure (string-keyed vs scalar-keyed mappings, tagged values); everything
/// is normalized into this single tagged variant immediately after decode so
/// the recursive transform only ever branches on four cases.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigNode {
	/// An ordered string-keyed mapping. Scalar keys (numbers, booleans) are
	/// stringified during normalization.
	Mapping(Vec<(String, ConfigNode)>),
	/// An ordered list of nodes.
	Sequence(Vec<ConfigNode>),
	/// A string scalar — the only node kind placeholder substitution touches.
	String(String),
	/// Any non-string scalar (number, boolean, null), carried as a JSON value.
	Scalar(serde_json::Value),
}

impl ConfigNode {
	/// Returns the string value when this node is a string scalar.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value.as_str()),
			_ => None,
		}
	}

	/// Looks up a field by name when this node is a mapping.
	pub fn field(&self, name: &str) -> Option<&ConfigNode> {
		match self {
			Self::Mapping(fields) => {
				fields
					.iter()
					.find(|(key, _)| key == name)
					.map(|(_, value)| value)
			}
			_ => None,
		}
	}
}

impl Serialize for ConfigNode {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		match self {
			Self::Mapping(fields) => {
				let mut map = serializer.serialize_map(Some(fields.len()))?;
				for (key, value) in fields {
					map.serialize_entry(key, value)?;
				}
				map.end()
			}
			Self::Sequence(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::String(value) => serializer.serialize_str(value),
			Self::Scalar(value) => value.serialize(serializer),
		}
	}
}

/// Decode a raw config block into a [`ConfigNode`] tree.
///
/// An empty or comment-only block decodes to an empty mapping, so a directive
/// without a config block still renders against a valid (empty) context.
pub fn decode_config(raw: &str) -> Result<ConfigNode, serde_yaml_ng::Error> {
	let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(raw)?;

	Ok(match value {
		serde_yaml_ng::Value::Null => ConfigNode::Mapping(Vec::new()),
		other => normalize(other),
	})
}

fn normalize(value: serde_yaml_ng::Value) -> ConfigNode {
	match value {
		serde_yaml_ng::Value::Mapping(mapping) => {
			let mut fields = Vec::with_capacity(mapping.len());
			for (key, value) in mapping {
				// Composite keys are unreachable from templates; drop them.
				let Some(key) = scalar_key(&key) else {
					continue;
				};
				fields.push((key, normalize(value)));
			}
			ConfigNode::Mapping(fields)
		}
		serde_yaml_ng::Value::Sequence(items) => {
			ConfigNode::Sequence(items.into_iter().map(normalize).collect())
		}
		serde_yaml_ng::Value::String(value) => ConfigNode::String(value),
		serde_yaml_ng::Value::Bool(value) => ConfigNode::Scalar(serde_json::Value::Bool(value)),
		serde_yaml_ng::Value::Number(number) => ConfigNode::Scalar(number_to_json(&number)),
		serde_yaml_ng::Value::Null => ConfigNode::Scalar(serde_json::Value::Null),
		serde_yaml_ng::Value::Tagged(tagged) => normalize(tagged.value),
	}
}

fn scalar_key(key: &serde_yaml_ng::Value) -> Option<String> {
	match key {
		serde_yaml_ng::Value::String(value) => Some(value.clone()),
		serde_yaml_ng::Value::Bool(value) => Some(value.to_string()),
		serde_yaml_ng::Value::Number(number) => Some(number.to_string()),
		_ => None,
	}
}

fn number_to_json(number: &serde_yaml_ng::Number) -> serde_json::Value {
	if let Some(value) = number.as_i64() {
		serde_json::Value::from(value)
	} else if let Some(value) = number.as_u64() {
		serde_json::Value::from(value)
	} else {
		number
			.as_f64()
			.and_then(serde_json::Number::from_f64)
			.map_or(serde_json::Value::Null, serde_json::Value::Number)
	}
}

/// Recursively substitute placeholder tokens and inject attachment dimensions.
///
/// - Mappings have every value substituted first, then attachment dimensions
///   resolved on the result.
/// - Sequences have every element substituted.
/// - String scalars have `${N}` tokens replaced with the matching capture
///   group's text in a single left-to-right scan.
/// - Other scalars pass through unchanged.
pub fn substitute(node: ConfigNode, groups: &[String], attachments: &[Attachment]) -> ConfigNode {
	match node {
		ConfigNode::Mapping(fields) => {
			let mut fields: Vec<(String, ConfigNode)> = fields
				.into_iter()
				.map(|(key, value)| (key, substitute(value, groups, attachments)))
				.collect();
			resolve_dimensions(&mut fields, attachments);
			ConfigNode::Mapping(fields)
		}
		ConfigNode::Sequence(items) => {
			ConfigNode::Sequence(
				items
					.into_iter()
					.map(|item| substitute(item, groups, attachments))
					.collect(),
			)
		}
		ConfigNode::String(value) => ConfigNode::String(expand_placeholders(&value, groups)),
		scalar @ ConfigNode::Scalar(_) => scalar,
	}
}

/// Replace `${N}` tokens with `groups[N]` in one pass. Inserted text is never
/// re-scanned, so substitution cannot cascade. Tokens referencing an
/// out-of-range index, and malformed tokens, are left verbatim.
fn expand_placeholders(input: &str, groups: &[String]) -> String {
	let mut output = String::with_capacity(input.len());
	let mut rest = input;

	while let Some(start) = rest.find("${") {
		output.push_str(&rest[..start]);
		let tail = &rest[start + 2..];

		match tail.find('}').map(|end| &tail[..end]) {
			Some(digits)
				if !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit()) =>
			{
				let token_end = digits.len() + 1;
				match digits.parse::<usize>().ok().and_then(|index| groups.get(index)) {
					Some(group) => output.push_str(group),
					None => output.push_str(&rest[start..start + 2 + token_end]),
				}
				rest = &tail[token_end..];
			}
			_ => {
				output.push_str("${");
				rest = tail;
			}
		}
	}

	output.push_str(rest);
	output
}

/// Inject `Width`/`Height` into a mapping that references an attachment.
///
/// Acts only when the mapping has a non-empty string `Attachment` field and no
/// `Width` field at all — an explicit `Width` of any value wins. The lookup is
/// keyed by both attachment name and filename; a collision between two
/// different attachments is the caller's responsibility. No match, or an
/// attachment without a width, leaves the mapping untouched.
fn resolve_dimensions(fields: &mut Vec<(String, ConfigNode)>, attachments: &[Attachment]) {
	let Some(path) = fields
		.iter()
		.find(|(key, _)| key == "Attachment")
		.and_then(|(_, value)| value.as_str())
		.map(str::to_owned)
	else {
		return;
	};

	if path.is_empty() || fields.iter().any(|(key, _)| key == "Width") {
		return;
	}

	let mut lookup: HashMap<&str, &Attachment> = HashMap::new();
	for attachment in attachments {
		lookup.insert(attachment.name.as_str(), attachment);
		lookup.insert(attachment.filename.as_str(), attachment);
	}

	let Some(attachment) = lookup.get(path.as_str()) else {
		return;
	};

	if attachment.width.is_empty() {
		return;
	}

	fields.push(("Width".to_string(), ConfigNode::String(attachment.width.clone())));
	if !attachment.height.is_empty() {
		fields.push(("Height".to_string(), ConfigNode::String(attachment.height.clone())));
	}
}
