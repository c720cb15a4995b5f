//! Row codec: applies a derived [`Schema`] to one row or one record.

use csv::StringRecord;

use crate::error::{TabrecError, TabrecResult};
use crate::schema::{Mode, Schema};
use crate::value::Value;

/// Decodes one row into values in declaration order.
///
/// The first failing field aborts the row; no partial values are returned.
pub fn decode_row(schema: &Schema, row: &StringRecord, line: u64) -> TabrecResult<Vec<Value>> {
	debug_assert_eq!(schema.mode(), Mode::Read);
	schema
		.plans()
		.iter()
		.map(|plan| plan.decode(row, line))
		.collect()
}

/// Encodes values in declaration order into one row.
///
/// The row is as wide as the record's field count; every field's cell is
/// placed at its effective index.
pub fn encode_row(schema: &Schema, values: &[Value]) -> TabrecResult<Vec<String>> {
	debug_assert_eq!(schema.mode(), Mode::Write);
	if values.len() != schema.width() {
		return Err(TabrecError::FieldCount {
			record: schema.record().to_string(),
			expected: schema.width(),
			actual: values.len(),
		});
	}

	let mut cells = vec![String::new(); schema.width()];
	for (plan, value) in schema.plans().iter().zip(values) {
		// Derivation guarantees index < width in write mode.
		cells[plan.index()] = plan.encode(value)?;
	}
	Ok(cells)
}
