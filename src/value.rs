//! Typed cell values.
//!
//! A [`Value`] is the in-memory form of a single field between the row codec
//! and a record. Integers travel widened to 64 bits; the field's declared
//! width is enforced by [`FieldKind`](crate::schema::FieldKind) when parsing
//! and formatting, and by [`FieldValue`] when narrowing into a struct field.

use std::fmt;

/// A single typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Text, passed through unchanged.
	Str(String),
	/// Signed integer of any supported width.
	Int(i64),
	/// Unsigned integer of any supported width.
	Uint(u64),
	/// 32-bit float.
	Float32(f32),
	/// 64-bit float.
	Float64(f64),
	/// Boolean.
	Bool(bool),
}

impl Value {
	/// Returns a short name for the variant, used in error messages.
	pub fn variant_name(&self) -> &'static str {
		match self {
			Self::Str(_) => "string",
			Self::Int(_) => "int",
			Self::Uint(_) => "uint",
			Self::Float32(_) => "f32",
			Self::Float64(_) => "f64",
			Self::Bool(_) => "bool",
		}
	}

	/// Returns the text if this is a string value.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the integer if this is a signed value.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer if this is an unsigned value.
	pub fn as_u64(&self) -> Option<u64> {
		match self {
			Self::Uint(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the float, widening 32-bit floats.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Float32(v) => Some(f64::from(*v)),
			Self::Float64(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the boolean if this is a boolean value.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(v) => Some(*v),
			_ => None,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Str(s) => f.write_str(s),
			Self::Int(v) => write!(f, "{}", v),
			Self::Uint(v) => write!(f, "{}", v),
			Self::Float32(v) => write!(f, "{}", v),
			Self::Float64(v) => write!(f, "{}", v),
			Self::Bool(v) => write!(f, "{}", v),
		}
	}
}

/// Conversion between a struct field's Rust type and [`Value`].
///
/// Implemented for every primitive the codec supports. `#[derive(Record)]`
/// relies on this trait, so a field of any other type fails to compile:
///
/// ```compile_fail,E0277
/// use tabrec::Record;
///
/// #[derive(Record)]
/// struct Blob {
///     data: Vec<u8>,
/// }
/// ```
#[diagnostic::on_unimplemented(
	message = "`{Self}` is not a supported record field type",
	note = "record fields must be String, bool, an integer or a float"
)]
pub trait FieldValue: Sized {
	/// Type name recorded in the field's descriptor.
	const TYPE_NAME: &'static str;

	/// Converts the field into a value.
	fn to_value(&self) -> Value;

	/// Converts a value back into the field type, `None` on a kind or range
	/// mismatch.
	fn from_value(value: Value) -> Option<Self>;
}

impl FieldValue for String {
	const TYPE_NAME: &'static str = "String";

	fn to_value(&self) -> Value {
		Value::Str(self.clone())
	}

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Str(s) => Some(s),
			_ => None,
		}
	}
}

impl FieldValue for bool {
	const TYPE_NAME: &'static str = "bool";

	fn to_value(&self) -> Value {
		Value::Bool(*self)
	}

	fn from_value(value: Value) -> Option<Self> {
		value.as_bool()
	}
}

impl FieldValue for f32 {
	const TYPE_NAME: &'static str = "f32";

	fn to_value(&self) -> Value {
		Value::Float32(*self)
	}

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Float32(v) => Some(v),
			_ => None,
		}
	}
}

impl FieldValue for f64 {
	const TYPE_NAME: &'static str = "f64";

	fn to_value(&self) -> Value {
		Value::Float64(*self)
	}

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Float64(v) => Some(v),
			_ => None,
		}
	}
}

macro_rules! signed_field_value {
	($($ty:ty),*) => {
		$(
			impl FieldValue for $ty {
				const TYPE_NAME: &'static str = stringify!($ty);

				fn to_value(&self) -> Value {
					Value::Int(*self as i64)
				}

				fn from_value(value: Value) -> Option<Self> {
					value.as_i64().and_then(|v| <$ty>::try_from(v).ok())
				}
			}
		)*
	};
}

macro_rules! unsigned_field_value {
	($($ty:ty),*) => {
		$(
			impl FieldValue for $ty {
				const TYPE_NAME: &'static str = stringify!($ty);

				fn to_value(&self) -> Value {
					Value::Uint(*self as u64)
				}

				fn from_value(value: Value) -> Option<Self> {
					value.as_u64().and_then(|v| <$ty>::try_from(v).ok())
				}
			}
		)*
	};
}

signed_field_value!(i8, i16, i32, i64, isize);
unsigned_field_value!(u8, u16, u32, u64, usize);
