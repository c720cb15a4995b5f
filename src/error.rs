//! Error types for record serialization.
//!
//! Every failure aborts the whole read or write operation; nothing here is
//! recoverable mid-file.

use thiserror::Error;

/// Errors that can occur while registering handlers, deriving a schema, or
/// reading and writing records.
#[derive(Debug, Error)]
pub enum TabrecError {
	/// Malformed input to a registration call.
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	/// A handler with this name is already registered.
	#[error("Handler already exists: {0}")]
	AlreadyExists(String),

	/// A field's declared type has no conversion rule.
	#[error("Unsupported type `{type_name}` for field `{field}` of record `{record}`")]
	UnsupportedType {
		/// Record the field belongs to.
		record: String,
		/// Offending field.
		field: String,
		/// Declared type name.
		type_name: String,
	},

	/// A cell's text could not be converted to (or from) the field's kind.
	#[error("Type mismatch on line {line} for field `{field}`: expected {expected}, got {value:?}")]
	TypeMismatch {
		/// Offending field.
		field: String,
		/// Kind the field is declared with.
		expected: String,
		/// Text (or value) that failed to convert.
		value: String,
		/// 1-based row number in the source, 0 for write-side failures.
		line: u64,
	},

	/// Two fields resolve to the same effective column index.
	#[error("Fields `{field}` and `{other}` both map to column {index}")]
	ColumnConflict {
		/// Field declared later.
		field: String,
		/// Field that claimed the column first.
		other: String,
		/// Shared column index.
		index: usize,
	},

	/// An effective column index does not fit in the written row.
	#[error("Column {index} of field `{field}` exceeds row width {width}")]
	ColumnOutOfRange {
		/// Offending field.
		field: String,
		/// Effective column index.
		index: usize,
		/// Width of the written row.
		width: usize,
	},

	/// A row is too short for a field's effective column index.
	#[error("Row on line {line} has {width} cells, field `{field}` needs column {index}")]
	MissingColumn {
		/// Offending field.
		field: String,
		/// Effective column index.
		index: usize,
		/// Number of cells in the row.
		width: usize,
		/// 1-based row number in the source.
		line: u64,
	},

	/// A data row's cell count differs from the first data row's.
	#[error("Row on line {line} has {actual} cells, expected {expected}")]
	RowWidth {
		/// 1-based row number in the source.
		line: u64,
		/// Cell count of the first data row.
		expected: usize,
		/// Cell count of this row.
		actual: usize,
	},

	/// A record produced a different number of values than its description.
	#[error("Record `{record}` has {actual} values, expected {expected}")]
	FieldCount {
		/// Record name.
		record: String,
		/// Number of fields in the description.
		expected: usize,
		/// Number of values supplied.
		actual: usize,
	},

	/// I/O operation failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// The underlying delimited-row codec failed.
	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	/// Settings or record description could not be parsed.
	#[error("Config error: {0}")]
	Config(#[from] toml::de::Error),
}

impl TabrecError {
	/// Returns true for failures of the underlying file or row codec.
	pub fn is_io_failure(&self) -> bool {
		matches!(self, Self::Io(_) | Self::Csv(_) | Self::RowWidth { .. })
	}

	/// Returns true for failures detected while deriving a schema, before any
	/// row is touched.
	pub fn is_schema_error(&self) -> bool {
		matches!(
			self,
			Self::UnsupportedType { .. } | Self::ColumnConflict { .. } | Self::ColumnOutOfRange { .. }
		)
	}
}

/// Result type alias for record serialization.
pub type TabrecResult<T> = Result<T, TabrecError>;
