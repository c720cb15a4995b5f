//! Reading rows into records.

use std::io;
use std::path::Path;
use std::sync::Arc;

use csv::{ByteRecord, StringRecord};

use crate::codec;
use crate::error::{TabrecError, TabrecResult};
use crate::open::OpenFlags;
use crate::record::{DynamicRecord, Record};
use crate::registry::HandlerRegistry;
use crate::schema::{Mode, RecordDescription, Schema};
use crate::settings::CodecSettings;
use crate::value::Value;

/// Reads every row of a source into records.
///
/// The schema is derived once per call, before the source is opened. Any
/// row or field error aborts the call and discards the records read so far.
///
/// # Examples
///
/// ```
/// use tabrec::{Record, RecordReader};
///
/// #[derive(Debug, PartialEq, Record)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let data = "x,y\n1,2\n3,4\n";
/// let points: Vec<Point> = RecordReader::new()
///     .skip_header(true)
///     .read_from(data.as_bytes())
///     .unwrap();
///
/// assert_eq!(points, vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }]);
/// ```
#[derive(Debug, Clone)]
pub struct RecordReader {
	settings: CodecSettings,
	registry: Arc<HandlerRegistry>,
	skip_header: bool,
}

impl Default for RecordReader {
	fn default() -> Self {
		Self::new()
	}
}

impl RecordReader {
	/// Creates a reader with default settings and the global registry.
	pub fn new() -> Self {
		Self {
			settings: CodecSettings::default(),
			registry: HandlerRegistry::global(),
			skip_header: false,
		}
	}

	/// Uses `settings` for the underlying row reader.
	pub fn with_settings(mut self, settings: CodecSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Resolves read handlers in `registry` instead of the global one.
	pub fn with_registry(mut self, registry: Arc<HandlerRegistry>) -> Self {
		self.registry = registry;
		self
	}

	/// Discards the first row without looking at its content.
	pub fn skip_header(mut self, skip: bool) -> Self {
		self.skip_header = skip;
		self
	}

	/// Reads all records of type `R` from the file at `path`.
	///
	/// The file is closed on every exit path.
	pub fn read_path<R: Record>(
		&self,
		path: impl AsRef<Path>,
		flags: &OpenFlags,
		mode: u32,
	) -> TabrecResult<Vec<R>> {
		let schema = self.derive(R::description())?;
		let file = flags.open(path, mode)?;
		self.read_with(&schema, file, R::from_values)
	}

	/// Reads all records of type `R` from `source`.
	pub fn read_from<R: Record>(&self, source: impl io::Read) -> TabrecResult<Vec<R>> {
		let schema = self.derive(R::description())?;
		self.read_with(&schema, source, R::from_values)
	}

	/// Reads records shaped by `description` from the file at `path`.
	pub fn read_dynamic_path(
		&self,
		path: impl AsRef<Path>,
		flags: &OpenFlags,
		mode: u32,
		description: &RecordDescription,
	) -> TabrecResult<Vec<DynamicRecord>> {
		let schema = self.derive(description)?;
		let file = flags.open(path, mode)?;
		self.read_with(&schema, file, |values| Ok(DynamicRecord::new(values)))
	}

	/// Reads records shaped by `description` from `source`.
	pub fn read_dynamic(
		&self,
		source: impl io::Read,
		description: &RecordDescription,
	) -> TabrecResult<Vec<DynamicRecord>> {
		let schema = self.derive(description)?;
		self.read_with(&schema, source, |values| Ok(DynamicRecord::new(values)))
	}

	fn derive(&self, description: &RecordDescription) -> TabrecResult<Schema> {
		Schema::derive(description, Mode::Read, &self.registry)
	}

	fn read_with<T, F>(&self, schema: &Schema, source: impl io::Read, build: F) -> TabrecResult<Vec<T>>
	where
		F: Fn(Vec<Value>) -> TabrecResult<T>,
	{
		let mut builder = self.settings.reader_builder()?;
		// The header's width is never checked; data rows are checked below.
		let check_width = self.skip_header && !self.settings.flexible;
		if self.skip_header {
			builder.flexible(true);
		}
		let mut reader = builder.from_reader(source);

		if self.skip_header {
			let skipped = reader.read_byte_record(&mut ByteRecord::new())?;
			tracing::trace!(skipped, "header row");
		}

		let mut records = Vec::new();
		let mut row = StringRecord::new();
		let mut count: u64 = 0;
		let mut width = None;
		while reader.read_record(&mut row)? {
			count += 1;
			let line = row.position().map_or(count, |p| p.line());
			if check_width {
				let expected = *width.get_or_insert(row.len());
				if row.len() != expected {
					return Err(TabrecError::RowWidth {
						line,
						expected,
						actual: row.len(),
					});
				}
			}
			let values = codec::decode_row(schema, &row, line)?;
			records.push(build(values)?);
			tracing::trace!(line, "decoded row");
		}

		tracing::debug!(record = schema.record(), rows = records.len(), "read complete");
		Ok(records)
	}
}

/// Reads every record of type `R` from the file at `path`, using default
/// settings and the global handler registry.
///
/// `mode` holds the permission bits used if `flags` create the file.
pub fn read_all<R: Record>(
	path: impl AsRef<Path>,
	flags: OpenFlags,
	mode: u32,
	skip_header: bool,
) -> TabrecResult<Vec<R>> {
	RecordReader::new()
		.skip_header(skip_header)
		.read_path(path, &flags, mode)
}
