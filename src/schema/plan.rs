//! Schema derivation: per-field conversion plans.

use std::collections::HashMap;
use std::fmt;

use csv::StringRecord;

use super::description::RecordDescription;
use super::kind::FieldKind;
use crate::error::{TabrecError, TabrecResult};
use crate::registry::{Handler, HandlerRegistry};
use crate::value::Value;

/// Direction a schema is derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
	/// Rows to records; read handlers apply.
	Read,
	/// Records to rows; write handlers apply.
	Write,
}

/// Pre-resolved conversion of one field.
///
/// Immutable once derived and reused for every row of one operation.
pub struct FieldPlan {
	name: String,
	kind: FieldKind,
	index: usize,
	handler_name: Option<String>,
	handler: Option<Handler>,
}

impl FieldPlan {
	/// Field name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Field kind.
	pub fn kind(&self) -> FieldKind {
		self.kind
	}

	/// Effective column index.
	pub fn index(&self) -> usize {
		self.index
	}

	/// Name of the handler bound for this plan's direction, if any.
	pub fn handler_name(&self) -> Option<&str> {
		self.handler_name.as_deref()
	}

	/// Returns true if a registered handler was found for this field.
	pub fn has_handler(&self) -> bool {
		self.handler.is_some()
	}

	/// Reads this field's cell from `row`, rewrites it with the read handler
	/// and parses it.
	pub fn decode(&self, row: &StringRecord, line: u64) -> TabrecResult<Value> {
		let cell = row.get(self.index).ok_or_else(|| TabrecError::MissingColumn {
			field: self.name.clone(),
			index: self.index,
			width: row.len(),
			line,
		})?;

		let mut text = cell.to_string();
		if let Some(handler) = &self.handler {
			handler(&mut text);
		}

		self.kind.parse(&text).ok_or_else(|| TabrecError::TypeMismatch {
			field: self.name.clone(),
			expected: self.kind.to_string(),
			value: text,
			line,
		})
	}

	/// Formats `value` and rewrites the text with the write handler.
	pub fn encode(&self, value: &Value) -> TabrecResult<String> {
		let mut text = self.kind.format(value).ok_or_else(|| TabrecError::TypeMismatch {
			field: self.name.clone(),
			expected: self.kind.to_string(),
			value: format!("{} {}", value.variant_name(), value),
			line: 0,
		})?;

		if let Some(handler) = &self.handler {
			handler(&mut text);
		}
		Ok(text)
	}
}

impl fmt::Debug for FieldPlan {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FieldPlan")
			.field("name", &self.name)
			.field("kind", &self.kind)
			.field("index", &self.index)
			.field("handler_name", &self.handler_name)
			.field("resolved", &self.handler.is_some())
			.finish()
	}
}

/// Conversion plans for every field of a record, in declaration order.
#[derive(Debug)]
pub struct Schema {
	record: String,
	mode: Mode,
	plans: Vec<FieldPlan>,
}

impl Schema {
	/// Derives the plans for `description` in `mode`, resolving handlers in
	/// `registry`.
	///
	/// Every field's type is checked before any index is, so a description
	/// with an unsupported field always fails with
	/// [`TabrecError::UnsupportedType`] naming the first such field.
	///
	/// # Errors
	///
	/// - [`TabrecError::UnsupportedType`] for a type name with no kind.
	/// - [`TabrecError::ColumnConflict`] when two fields share a column.
	/// - [`TabrecError::ColumnOutOfRange`] in write mode, when a column does
	///   not fit in a row as wide as the field count.
	pub fn derive(
		description: &RecordDescription,
		mode: Mode,
		registry: &HandlerRegistry,
	) -> TabrecResult<Self> {
		let kinds = description
			.fields()
			.iter()
			.map(|field| {
				FieldKind::from_type_name(&field.type_name).ok_or_else(|| {
					TabrecError::UnsupportedType {
						record: description.name.clone(),
						field: field.name.clone(),
						type_name: field.type_name.clone(),
					}
				})
			})
			.collect::<TabrecResult<Vec<_>>>()?;

		let width = description.len();
		let mut claimed: HashMap<usize, &str> = HashMap::with_capacity(width);
		let mut plans = Vec::with_capacity(width);

		for (field, kind) in description.fields().iter().zip(kinds) {
			let index = field.effective_index();

			if let Some(other) = claimed.insert(index, &field.name) {
				return Err(TabrecError::ColumnConflict {
					field: field.name.clone(),
					other: other.to_string(),
					index,
				});
			}
			if mode == Mode::Write && index >= width {
				return Err(TabrecError::ColumnOutOfRange {
					field: field.name.clone(),
					index,
					width,
				});
			}

			let handler_name = match mode {
				Mode::Read => field.read_handler.clone(),
				Mode::Write => field.write_handler.clone(),
			};
			let handler = handler_name.as_deref().and_then(|name| {
				let handler = registry.lookup(name);
				if handler.is_none() {
					tracing::debug!(
						field = %field.name,
						handler = name,
						"handler not registered, cell text passes through"
					);
				}
				handler
			});

			plans.push(FieldPlan {
				name: field.name.clone(),
				kind,
				index,
				handler_name,
				handler,
			});
		}

		tracing::debug!(
			record = %description.name,
			?mode,
			fields = plans.len(),
			"derived schema"
		);

		Ok(Self {
			record: description.name.clone(),
			mode,
			plans,
		})
	}

	/// Record name.
	pub fn record(&self) -> &str {
		&self.record
	}

	/// Direction this schema was derived for.
	pub fn mode(&self) -> Mode {
		self.mode
	}

	/// Plans in declaration order.
	pub fn plans(&self) -> &[FieldPlan] {
		&self.plans
	}

	/// Number of cells in a written row.
	pub fn width(&self) -> usize {
		self.plans.len()
	}

	/// Minimum number of cells a row needs to be read.
	pub fn min_row_width(&self) -> usize {
		self.plans.iter().map(|p| p.index + 1).max().unwrap_or(0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::FieldDescriptor;
	use rstest::rstest;

	fn latency() -> RecordDescription {
		RecordDescription::builder("latency")
			.field_with(FieldDescriptor::new("release", "String").with_index("1"))
			.field_with(FieldDescriptor::new("team", "String").with_index("0"))
			.field_with(
				FieldDescriptor::new("tp90", "f32")
					.with_read_handler("ms_to_s")
					.with_write_handler("s_to_ms"),
			)
			.field("count", "i64")
			.build()
	}

	#[rstest]
	fn test_derive_resolves_indexes() {
		let schema = Schema::derive(&latency(), Mode::Read, &HandlerRegistry::new()).unwrap();

		let indexes: Vec<usize> = schema.plans().iter().map(|p| p.index()).collect();
		assert_eq!(indexes, vec![1, 0, 2, 3]);
		assert_eq!(schema.width(), 4);
		assert_eq!(schema.min_row_width(), 4);
		assert_eq!(schema.record(), "latency");
	}

	#[rstest]
	#[case(Mode::Read, Some("ms_to_s"))]
	#[case(Mode::Write, Some("s_to_ms"))]
	fn test_derive_picks_handler_by_mode(#[case] mode: Mode, #[case] expected: Option<&str>) {
		let registry = HandlerRegistry::new();
		registry.register("ms_to_s", |_: &mut String| {}).unwrap();

		let schema = Schema::derive(&latency(), mode, &registry).unwrap();
		let plan = &schema.plans()[2];

		assert_eq!(plan.handler_name(), expected);
		assert_eq!(plan.has_handler(), mode == Mode::Read);
	}

	#[rstest]
	fn test_derive_unsupported_type_wins_over_conflict() {
		let description = RecordDescription::builder("bad")
			.field("a", "i32")
			.field_with(FieldDescriptor::new("b", "i32").with_index("0"))
			.field("c", "Vec<u8>")
			.build();

		let err = Schema::derive(&description, Mode::Read, &HandlerRegistry::new()).unwrap_err();
		match err {
			TabrecError::UnsupportedType {
				record,
				field,
				type_name,
			} => {
				assert_eq!(record, "bad");
				assert_eq!(field, "c");
				assert_eq!(type_name, "Vec<u8>");
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[rstest]
	#[case(Mode::Read)]
	#[case(Mode::Write)]
	fn test_derive_rejects_column_conflict(#[case] mode: Mode) {
		let description = RecordDescription::builder("dup")
			.field("a", "i32")
			.field_with(FieldDescriptor::new("b", "i32").with_index("0"))
			.build();

		let err = Schema::derive(&description, mode, &HandlerRegistry::new()).unwrap_err();
		assert!(matches!(
			err,
			TabrecError::ColumnConflict { ref field, ref other, index: 0 } if field == "b" && other == "a"
		));
	}

	#[rstest]
	fn test_derive_out_of_range_only_rejected_on_write() {
		let description = RecordDescription::builder("sparse")
			.field("a", "i32")
			.field_with(FieldDescriptor::new("b", "i32").with_index("5"))
			.build();
		let registry = HandlerRegistry::new();

		let schema = Schema::derive(&description, Mode::Read, &registry).unwrap();
		assert_eq!(schema.min_row_width(), 6);

		let err = Schema::derive(&description, Mode::Write, &registry).unwrap_err();
		assert!(matches!(
			err,
			TabrecError::ColumnOutOfRange { index: 5, width: 2, .. }
		));
	}

	#[rstest]
	fn test_decode_applies_read_handler_before_parse() {
		let registry = HandlerRegistry::new();
		registry
			.register("strip_ms", |s: &mut String| {
				if let Some(stripped) = s.strip_suffix("ms") {
					*s = stripped.to_string();
				}
			})
			.unwrap();
		let description = RecordDescription::builder("r")
			.field_with(FieldDescriptor::new("latency", "u32").with_read_handler("strip_ms"))
			.build();
		let schema = Schema::derive(&description, Mode::Read, &registry).unwrap();

		let row = StringRecord::from(vec!["250ms"]);
		assert_eq!(schema.plans()[0].decode(&row, 1).unwrap(), Value::Uint(250));
	}

	#[rstest]
	fn test_decode_missing_column() {
		let description = RecordDescription::builder("r")
			.field("a", "i32")
			.field("b", "i32")
			.build();
		let schema = Schema::derive(&description, Mode::Read, &HandlerRegistry::new()).unwrap();

		let row = StringRecord::from(vec!["1"]);
		let err = schema.plans()[1].decode(&row, 4).unwrap_err();
		assert!(matches!(
			err,
			TabrecError::MissingColumn { index: 1, width: 1, line: 4, .. }
		));
	}

	#[rstest]
	fn test_encode_applies_write_handler_after_format() {
		let registry = HandlerRegistry::new();
		registry
			.register("quote_flag", |s: &mut String| *s = format!("[{}]", s))
			.unwrap();
		let description = RecordDescription::builder("r")
			.field_with(FieldDescriptor::new("flag", "bool").with_write_handler("quote_flag"))
			.build();
		let schema = Schema::derive(&description, Mode::Write, &registry).unwrap();

		assert_eq!(
			schema.plans()[0].encode(&Value::Bool(true)).unwrap(),
			"[true]"
		);
	}

	#[rstest]
	fn test_encode_kind_mismatch() {
		let description = RecordDescription::builder("r").field("n", "u8").build();
		let schema = Schema::derive(&description, Mode::Write, &HandlerRegistry::new()).unwrap();

		let err = schema.plans()[0].encode(&Value::Uint(300)).unwrap_err();
		assert!(matches!(err, TabrecError::TypeMismatch { ref field, .. } if field == "n"));
	}
}
