//! Writing records as rows.

use std::borrow::Cow;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::codec;
use crate::error::{TabrecError, TabrecResult};
use crate::open::OpenFlags;
use crate::record::{DynamicRecord, Record};
use crate::registry::HandlerRegistry;
use crate::schema::{Mode, RecordDescription, Schema};
use crate::settings::CodecSettings;
use crate::value::Value;

/// Writes records as rows, preceded by an optional header.
///
/// The schema is derived once per call, before the destination is opened.
/// Buffered output is flushed before returning, on the error path too.
/// Rows already handed to the destination when an error occurs stay there.
///
/// # Examples
///
/// ```
/// use tabrec::{Record, RecordWriter};
///
/// #[derive(Debug, Record)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let out = RecordWriter::new()
///     .header(["x", "y"])
///     .write_to(Vec::new(), &[Point { x: 1, y: 2 }])
///     .unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(), "x,y\n1,2\n");
/// ```
#[derive(Debug, Clone)]
pub struct RecordWriter {
	settings: CodecSettings,
	registry: Arc<HandlerRegistry>,
	header: Vec<String>,
}

impl Default for RecordWriter {
	fn default() -> Self {
		Self::new()
	}
}

impl RecordWriter {
	/// Creates a writer with default settings, the global registry and no
	/// header.
	pub fn new() -> Self {
		Self {
			settings: CodecSettings::default(),
			registry: HandlerRegistry::global(),
			header: Vec::new(),
		}
	}

	/// Uses `settings` for the underlying row writer.
	pub fn with_settings(mut self, settings: CodecSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Resolves write handlers in `registry` instead of the global one.
	pub fn with_registry(mut self, registry: Arc<HandlerRegistry>) -> Self {
		self.registry = registry;
		self
	}

	/// Writes `header` verbatim as the first row. An empty header writes
	/// nothing.
	pub fn header<I, S>(mut self, header: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.header = header.into_iter().map(Into::into).collect();
		self
	}

	/// Writes `records` to the file at `path` and returns the still-open file.
	pub fn write_path<R: Record>(
		&self,
		path: impl AsRef<Path>,
		flags: &OpenFlags,
		mode: u32,
		records: &[R],
	) -> TabrecResult<File> {
		let schema = self.derive(R::description())?;
		let file = flags.open(path, mode)?;
		self.write_with(&schema, file, records, |r| Cow::Owned(r.to_values()))
	}

	/// Writes `records` to `destination` and returns it.
	pub fn write_to<R: Record, W: io::Write>(
		&self,
		destination: W,
		records: &[R],
	) -> TabrecResult<W> {
		let schema = self.derive(R::description())?;
		self.write_with(&schema, destination, records, |r| Cow::Owned(r.to_values()))
	}

	/// Writes records shaped by `description` to the file at `path`.
	pub fn write_dynamic_path(
		&self,
		path: impl AsRef<Path>,
		flags: &OpenFlags,
		mode: u32,
		description: &RecordDescription,
		records: &[DynamicRecord],
	) -> TabrecResult<File> {
		let schema = self.derive(description)?;
		let file = flags.open(path, mode)?;
		self.write_with(&schema, file, records, |r| Cow::Borrowed(r.values()))
	}

	/// Writes records shaped by `description` to `destination`.
	pub fn write_dynamic<W: io::Write>(
		&self,
		destination: W,
		description: &RecordDescription,
		records: &[DynamicRecord],
	) -> TabrecResult<W> {
		let schema = self.derive(description)?;
		self.write_with(&schema, destination, records, |r| Cow::Borrowed(r.values()))
	}

	fn derive(&self, description: &RecordDescription) -> TabrecResult<Schema> {
		Schema::derive(description, Mode::Write, &self.registry)
	}

	fn write_with<W, T, F>(
		&self,
		schema: &Schema,
		destination: W,
		records: &[T],
		values: F,
	) -> TabrecResult<W>
	where
		W: io::Write,
		F: Fn(&T) -> Cow<'_, [Value]>,
	{
		let mut writer = self.settings.writer_builder()?.from_writer(destination);

		let written = (|| -> TabrecResult<()> {
			if !self.header.is_empty() {
				writer.write_record(&self.header)?;
			}
			for record in records {
				let row = codec::encode_row(schema, &values(record))?;
				writer.write_record(&row)?;
			}
			Ok(())
		})();

		match written {
			Ok(()) => {
				tracing::debug!(record = schema.record(), rows = records.len(), "write complete");
				writer
					.into_inner()
					.map_err(|e| TabrecError::Io(io::Error::new(e.error().kind(), e.error().to_string())))
			}
			Err(err) => {
				if let Err(flush_err) = writer.flush() {
					tracing::warn!(error = %flush_err, "flush after failed write also failed");
				}
				Err(err)
			}
		}
	}
}

/// Writes `records` to the file at `path` using default settings and the
/// global handler registry, returning the still-open file.
///
/// `header` is written first when non-empty. `mode` holds the permission
/// bits used if `flags` create the file.
pub fn write_all<R: Record>(
	path: impl AsRef<Path>,
	flags: OpenFlags,
	mode: u32,
	records: &[R],
	header: &[&str],
) -> TabrecResult<File> {
	RecordWriter::new()
		.header(header.iter().copied())
		.write_path(path, &flags, mode, records)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::FieldDescriptor;
	use crate::settings::LineTerminator;
	use rstest::{fixture, rstest};

	#[fixture]
	fn description() -> RecordDescription {
		RecordDescription::builder("sample")
			.field("name", "String")
			.field("score", "u8")
			.field("active", "bool")
			.build()
	}

	fn writer() -> RecordWriter {
		RecordWriter::new().with_registry(Arc::new(HandlerRegistry::new()))
	}

	fn sample(name: &str, score: u64, active: bool) -> DynamicRecord {
		DynamicRecord::new(vec![
			Value::Str(name.to_string()),
			Value::Uint(score),
			Value::Bool(active),
		])
	}

	#[rstest]
	fn test_write_dynamic_with_header(description: RecordDescription) {
		let out = writer()
			.header(["name", "score", "active"])
			.write_dynamic(Vec::new(), &description, &[sample("alice", 90, true)])
			.unwrap();

		assert_eq!(
			String::from_utf8(out).unwrap(),
			"name,score,active\nalice,90,true\n"
		);
	}

	#[rstest]
	fn test_header_width_is_not_checked(description: RecordDescription) {
		let out = writer()
			.header(["only"])
			.write_dynamic(Vec::new(), &description, &[sample("bob", 1, false)])
			.unwrap();

		assert_eq!(String::from_utf8(out).unwrap(), "only\nbob,1,false\n");
	}

	#[rstest]
	fn test_quotes_cells_with_delimiters(description: RecordDescription) {
		let out = writer()
			.write_dynamic(Vec::new(), &description, &[sample("doe, jane", 3, true)])
			.unwrap();

		assert_eq!(String::from_utf8(out).unwrap(), "\"doe, jane\",3,true\n");
	}

	#[rstest]
	fn test_crlf_and_delimiter_settings(description: RecordDescription) {
		let out = writer()
			.with_settings(
				CodecSettings::new()
					.with_delimiter(';')
					.with_terminator(LineTerminator::Crlf),
			)
			.write_dynamic(Vec::new(), &description, &[sample("a", 1, true)])
			.unwrap();

		assert_eq!(String::from_utf8(out).unwrap(), "a;1;true\r\n");
	}

	#[rstest]
	fn test_out_of_range_value_aborts(description: RecordDescription) {
		let records = [sample("a", 1, true), sample("b", 999, true)];

		let err = writer()
			.write_dynamic(Vec::new(), &description, &records)
			.unwrap_err();

		assert!(matches!(err, TabrecError::TypeMismatch { ref field, .. } if field == "score"));
	}

	#[rstest]
	fn test_index_beyond_width_rejected() {
		let description = RecordDescription::builder("sparse")
			.field("a", "i32")
			.field_with(FieldDescriptor::new("b", "i32").with_index("2"))
			.build();

		let err = writer()
			.write_dynamic(Vec::new(), &description, &[])
			.unwrap_err();

		assert!(matches!(err, TabrecError::ColumnOutOfRange { index: 2, width: 2, .. }));
	}

	#[rstest]
	fn test_write_handler_applied() {
		let registry = Arc::new(HandlerRegistry::new());
		registry
			.register("percent", |s: &mut String| s.push('%'))
			.unwrap();
		let description = RecordDescription::builder("r")
			.field_with(FieldDescriptor::new("ratio", "u8").with_write_handler("percent"))
			.build();

		let out = RecordWriter::new()
			.with_registry(registry)
			.write_dynamic(Vec::new(), &description, &[DynamicRecord::new(vec![Value::Uint(42)])])
			.unwrap();

		assert_eq!(String::from_utf8(out).unwrap(), "42%\n");
	}
}
