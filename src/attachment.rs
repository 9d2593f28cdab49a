use serde::Deserialize;
use serde::Serialize;

/// Attachment metadata handed over by the surrounding upload pipeline.
///
/// All fields are opaque strings; an empty string means the value is unset.
/// Config mappings reference an attachment through their `Attachment` field,
/// matched against either [`name`](Attachment::name) or
/// [`filename`](Attachment::filename).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
	/// The logical name the attachment was uploaded under.
	pub name: String,
	/// The source filename, relative to the document.
	pub filename: String,
	/// Pixel width reported by the pipeline; empty when unknown.
	#[serde(default)]
	pub width: String,
	/// Pixel height reported by the pipeline; empty when unknown.
	#[serde(default)]
	pub height: String,
}
