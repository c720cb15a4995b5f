//! Record type descriptions.
//!
//! A [`RecordDescription`] is the ordered field metadata of one record shape.
//! It is produced by `#[derive(Record)]` (once per type), assembled by hand
//! with [`RecordDescriptionBuilder`], or declared in TOML:
//!
//! ```toml
//! name = "latency"
//!
//! [[fields]]
//! name = "release"
//! type = "String"
//! index = 1
//!
//! [[fields]]
//! name = "tp90"
//! type = "f32"
//! read_handler = "ms_to_s"
//! ```

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TabrecResult;

/// Metadata of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
	/// Field name, used in error messages.
	pub name: String,

	/// Declared type name (e.g. `"i32"`, `"String"`).
	#[serde(rename = "type")]
	pub type_name: String,

	/// Declaration position, the default column index.
	#[serde(skip)]
	pub position: usize,

	/// Column index override. Only honored when it parses as a
	/// non-negative integer.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		deserialize_with = "deserialize_index"
	)]
	pub index: Option<String>,

	/// Handler applied to the raw cell text before parsing.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub read_handler: Option<String>,

	/// Handler applied to the formatted text before it is written.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub write_handler: Option<String>,
}

impl FieldDescriptor {
	/// Creates a descriptor with no overrides and no handlers.
	///
	/// The position is assigned when the descriptor is added to a
	/// [`RecordDescriptionBuilder`].
	pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			type_name: type_name.into(),
			position: 0,
			index: None,
			read_handler: None,
			write_handler: None,
		}
	}

	/// Sets the column index override.
	pub fn with_index(mut self, index: impl Into<String>) -> Self {
		self.index = Some(index.into());
		self
	}

	/// Sets the read handler name.
	pub fn with_read_handler(mut self, name: impl Into<String>) -> Self {
		self.read_handler = Some(name.into());
		self
	}

	/// Sets the write handler name.
	pub fn with_write_handler(mut self, name: impl Into<String>) -> Self {
		self.write_handler = Some(name.into());
		self
	}

	/// Returns the override if it parses as a non-negative integer.
	pub fn explicit_index(&self) -> Option<usize> {
		self.index.as_deref().and_then(|s| s.parse::<usize>().ok())
	}

	/// Returns the column this field maps to.
	///
	/// # Examples
	///
	/// ```
	/// use tabrec::schema::FieldDescriptor;
	///
	/// let mut field = FieldDescriptor::new("name", "String");
	/// field.position = 2;
	/// assert_eq!(field.effective_index(), 2);
	/// assert_eq!(field.clone().with_index("0").effective_index(), 0);
	/// assert_eq!(field.with_index("first").effective_index(), 2);
	/// ```
	pub fn effective_index(&self) -> usize {
		self.explicit_index().unwrap_or(self.position)
	}
}

/// Ordered field metadata of one record shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDescription {
	/// Record name, used in error messages.
	pub name: String,
	/// Fields in declaration order.
	#[serde(default)]
	fields: Vec<FieldDescriptor>,
}

impl RecordDescription {
	/// Starts building a description.
	///
	/// # Examples
	///
	/// ```
	/// use tabrec::schema::{FieldDescriptor, RecordDescription};
	///
	/// let description = RecordDescription::builder("latency")
	///     .field("release", "String")
	///     .field_with(FieldDescriptor::new("tp90", "f32").with_read_handler("ms_to_s"))
	///     .build();
	///
	/// assert_eq!(description.len(), 2);
	/// assert_eq!(description.fields()[1].position, 1);
	/// ```
	pub fn builder(name: impl Into<String>) -> RecordDescriptionBuilder {
		RecordDescriptionBuilder {
			name: name.into(),
			fields: Vec::new(),
		}
	}

	/// Parses a description declared in TOML.
	pub fn from_toml_str(content: &str) -> TabrecResult<Self> {
		let mut description: Self = toml::from_str(content)?;
		description.assign_positions();
		Ok(description)
	}

	/// Loads a description declared in a TOML file.
	pub fn from_toml_path(path: impl AsRef<Path>) -> TabrecResult<Self> {
		let content = std::fs::read_to_string(path)?;
		Self::from_toml_str(&content)
	}

	/// Fields in declaration order.
	pub fn fields(&self) -> &[FieldDescriptor] {
		&self.fields
	}

	/// Field names in declaration order.
	pub fn field_names(&self) -> Vec<&str> {
		self.fields.iter().map(|f| f.name.as_str()).collect()
	}

	/// Number of fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Returns true if the description has no fields.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	fn assign_positions(&mut self) {
		for (position, field) in self.fields.iter_mut().enumerate() {
			field.position = position;
		}
	}
}

/// Builder for [`RecordDescription`].
#[derive(Debug, Clone)]
pub struct RecordDescriptionBuilder {
	name: String,
	fields: Vec<FieldDescriptor>,
}

impl RecordDescriptionBuilder {
	/// Appends a plain field.
	pub fn field(self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
		self.field_with(FieldDescriptor::new(name, type_name))
	}

	/// Appends a configured field; its position is set to the next slot.
	pub fn field_with(mut self, mut field: FieldDescriptor) -> Self {
		field.position = self.fields.len();
		self.fields.push(field);
		self
	}

	/// Finishes the description.
	pub fn build(self) -> RecordDescription {
		RecordDescription {
			name: self.name,
			fields: self.fields,
		}
	}
}

fn deserialize_index<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	// Anything that is not a non-negative integer ends up positional.
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum IndexRepr {
		Int(i64),
		Float(f64),
		Bool(bool),
		Text(String),
		Other(serde::de::IgnoredAny),
	}

	Ok(
		Option::<IndexRepr>::deserialize(deserializer)?.and_then(|repr| match repr {
			IndexRepr::Int(v) => Some(v.to_string()),
			IndexRepr::Float(v) => Some(format!("{:?}", v)),
			IndexRepr::Bool(v) => Some(v.to_string()),
			IndexRepr::Text(s) => Some(s),
			IndexRepr::Other(_) => None,
		}),
	)
}
