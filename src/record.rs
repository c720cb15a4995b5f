//! The [`Record`] trait and the runtime-shaped [`DynamicRecord`].

use crate::error::{TabrecError, TabrecResult};
use crate::schema::RecordDescription;
use crate::value::{FieldValue, Value};

/// A struct that can be read from and written to delimited rows.
///
/// Usually implemented with `#[derive(Record)]`:
///
/// ```
/// use tabrec::Record;
///
/// #[derive(Debug, Record)]
/// struct Latency {
///     #[record(index = 1)]
///     release: String,
///     #[record(index = 0)]
///     team: String,
///     #[record(read_handler = "ms_to_s")]
///     tp90: f32,
///     count: i64,
/// }
///
/// let description = Latency::description();
/// assert_eq!(description.name, "Latency");
/// assert_eq!(description.fields()[0].effective_index(), 1);
/// ```
pub trait Record: Sized {
	/// The record's field metadata, built once per type.
	fn description() -> &'static RecordDescription;

	/// Builds a record from values in declaration order.
	fn from_values(values: Vec<Value>) -> TabrecResult<Self>;

	/// Returns the record's values in declaration order.
	fn to_values(&self) -> Vec<Value>;
}

/// A record whose shape is only known at runtime, through a
/// [`RecordDescription`].
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
	values: Vec<Value>,
}

impl DynamicRecord {
	/// Creates a record from values in declaration order.
	pub fn new(values: Vec<Value>) -> Self {
		Self { values }
	}

	/// Values in declaration order.
	pub fn values(&self) -> &[Value] {
		&self.values
	}

	/// Value at a declaration position.
	pub fn get(&self, position: usize) -> Option<&Value> {
		self.values.get(position)
	}

	/// Value of the field called `name` in `description`.
	pub fn get_named(&self, description: &RecordDescription, name: &str) -> Option<&Value> {
		description
			.fields()
			.iter()
			.position(|f| f.name == name)
			.and_then(|position| self.get(position))
	}

	/// Consumes the record, returning its values.
	pub fn into_values(self) -> Vec<Value> {
		self.values
	}
}

impl From<Vec<Value>> for DynamicRecord {
	fn from(values: Vec<Value>) -> Self {
		Self::new(values)
	}
}

/// Support code for `#[derive(Record)]`. Not public API.
#[doc(hidden)]
pub mod __private {
	use super::*;

	pub use std::sync::OnceLock;

	/// Checks that `values` has one entry per field.
	pub fn expect_len(record: &str, expected: usize, values: &[Value]) -> TabrecResult<()> {
		if values.len() != expected {
			return Err(TabrecError::FieldCount {
				record: record.to_string(),
				expected,
				actual: values.len(),
			});
		}
		Ok(())
	}

	/// Converts the next value into the field's type.
	///
	/// A missing value is reported with `<missing>` as the offending text.
	pub fn take_field<T, I>(values: &mut I, record: &str, field: &str) -> TabrecResult<T>
	where
		T: FieldValue,
		I: Iterator<Item = Value>,
	{
		let value = values.next().ok_or_else(|| {
			tracing::debug!(record, field, "record ran out of values");
			TabrecError::TypeMismatch {
				field: field.to_string(),
				expected: T::TYPE_NAME.to_string(),
				value: "<missing>".to_string(),
				line: 0,
			}
		})?;
		let shown = value.to_string();
		T::from_value(value).ok_or_else(|| TabrecError::TypeMismatch {
			field: field.to_string(),
			expected: T::TYPE_NAME.to_string(),
			value: shown,
			line: 0,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::__private::{expect_len, take_field};
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_get_named() {
		let description = RecordDescription::builder("r")
			.field("a", "i32")
			.field("b", "String")
			.build();
		let record = DynamicRecord::new(vec![Value::Int(1), Value::Str("x".to_string())]);

		assert_eq!(
			record.get_named(&description, "b"),
			Some(&Value::Str("x".to_string()))
		);
		assert_eq!(record.get_named(&description, "c"), None);
	}

	#[rstest]
	fn test_expect_len_mismatch() {
		let err = expect_len("r", 2, &[Value::Int(1)]).unwrap_err();
		assert!(matches!(
			err,
			TabrecError::FieldCount { expected: 2, actual: 1, .. }
		));
	}

	#[rstest]
	fn test_take_field_narrows() {
		let mut values = vec![Value::Int(7), Value::Int(1_000)].into_iter();

		let first: i8 = take_field(&mut values, "r", "a").unwrap();
		assert_eq!(first, 7);

		let err = take_field::<i8, _>(&mut values, "r", "b").unwrap_err();
		assert!(matches!(err, TabrecError::TypeMismatch { ref field, .. } if field == "b"));
	}

	#[rstest]
	fn test_take_field_missing_uses_plain_field_name() {
		let mut values = Vec::<Value>::new().into_iter();

		let err = take_field::<i32, _>(&mut values, "r", "a").unwrap_err();

		assert!(matches!(
			err,
			TabrecError::TypeMismatch { ref field, ref expected, ref value, line: 0 }
				if field == "a" && expected == "i32" && value == "<missing>"
		));
	}
}
