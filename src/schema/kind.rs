//! Field kinds and their parse/format strategies.

use std::fmt;

use crate::value::Value;

/// Bit width of a signed integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
	/// `i8`
	W8,
	/// `i16`
	W16,
	/// `i32`
	W32,
	/// `i64`
	W64,
	/// `isize`
	Size,
}

/// Bit width of an unsigned integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UintWidth {
	/// `u8`
	W8,
	/// `u16`
	W16,
	/// `u32`
	W32,
	/// `u64`
	W64,
	/// `usize`
	Size,
}

impl IntWidth {
	fn parse(self, text: &str) -> Option<i64> {
		match self {
			Self::W8 => text.parse::<i8>().ok().map(i64::from),
			Self::W16 => text.parse::<i16>().ok().map(i64::from),
			Self::W32 => text.parse::<i32>().ok().map(i64::from),
			Self::W64 => text.parse::<i64>().ok(),
			Self::Size => text.parse::<isize>().ok().and_then(|v| i64::try_from(v).ok()),
		}
	}

	fn fits(self, value: i64) -> bool {
		match self {
			Self::W8 => i8::try_from(value).is_ok(),
			Self::W16 => i16::try_from(value).is_ok(),
			Self::W32 => i32::try_from(value).is_ok(),
			Self::W64 => true,
			Self::Size => isize::try_from(value).is_ok(),
		}
	}
}

impl UintWidth {
	fn fits(self, value: u64) -> bool {
		match self {
			Self::W8 => u8::try_from(value).is_ok(),
			Self::W16 => u16::try_from(value).is_ok(),
			Self::W32 => u32::try_from(value).is_ok(),
			Self::W64 => true,
			Self::Size => usize::try_from(value).is_ok(),
		}
	}
}

/// The closed set of primitive kinds a field may have.
///
/// Each variant carries its own parse and format rule; there is no fallback
/// for other kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
	/// Text, no conversion.
	Str,
	/// Base-10 signed integer.
	Int(IntWidth),
	/// Base-10 unsigned integer, parsed through a 64-bit intermediate.
	Uint(UintWidth),
	/// 32-bit float.
	Float32,
	/// 64-bit float.
	Float64,
	/// `true` / `false`.
	Bool,
}

impl FieldKind {
	/// Resolves a declared type name to a kind.
	///
	/// # Examples
	///
	/// ```
	/// use tabrec::schema::{FieldKind, IntWidth};
	///
	/// assert_eq!(FieldKind::from_type_name("i32"), Some(FieldKind::Int(IntWidth::W32)));
	/// assert_eq!(FieldKind::from_type_name("String"), Some(FieldKind::Str));
	/// assert_eq!(FieldKind::from_type_name("Vec<u8>"), None);
	/// ```
	pub fn from_type_name(name: &str) -> Option<Self> {
		let kind = match name.trim() {
			"String" | "string" | "str" => Self::Str,
			"i8" => Self::Int(IntWidth::W8),
			"i16" => Self::Int(IntWidth::W16),
			"i32" => Self::Int(IntWidth::W32),
			"i64" => Self::Int(IntWidth::W64),
			"isize" => Self::Int(IntWidth::Size),
			"u8" => Self::Uint(UintWidth::W8),
			"u16" => Self::Uint(UintWidth::W16),
			"u32" => Self::Uint(UintWidth::W32),
			"u64" => Self::Uint(UintWidth::W64),
			"usize" => Self::Uint(UintWidth::Size),
			"f32" => Self::Float32,
			"f64" => Self::Float64,
			"bool" => Self::Bool,
			_ => return None,
		};
		Some(kind)
	}

	/// Canonical type name of this kind.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Str => "String",
			Self::Int(IntWidth::W8) => "i8",
			Self::Int(IntWidth::W16) => "i16",
			Self::Int(IntWidth::W32) => "i32",
			Self::Int(IntWidth::W64) => "i64",
			Self::Int(IntWidth::Size) => "isize",
			Self::Uint(UintWidth::W8) => "u8",
			Self::Uint(UintWidth::W16) => "u16",
			Self::Uint(UintWidth::W32) => "u32",
			Self::Uint(UintWidth::W64) => "u64",
			Self::Uint(UintWidth::Size) => "usize",
			Self::Float32 => "f32",
			Self::Float64 => "f64",
			Self::Bool => "bool",
		}
	}

	/// Parses cell text into a value of this kind.
	///
	/// Returns `None` when the text is not a valid value of the kind,
	/// including integers outside the declared width.
	pub fn parse(&self, text: &str) -> Option<Value> {
		match self {
			Self::Str => Some(Value::Str(text.to_string())),
			Self::Int(width) => width.parse(text).map(Value::Int),
			Self::Uint(width) => text
				.parse::<u64>()
				.ok()
				.filter(|v| width.fits(*v))
				.map(Value::Uint),
			Self::Float32 => text.parse::<f32>().ok().map(Value::Float32),
			Self::Float64 => text.parse::<f64>().ok().map(Value::Float64),
			Self::Bool => parse_bool(text).map(Value::Bool),
		}
	}

	/// Formats a value of this kind as cell text.
	///
	/// Returns `None` when the value's variant does not belong to this kind
	/// or an integer does not fit the declared width.
	pub fn format(&self, value: &Value) -> Option<String> {
		match (self, value) {
			(Self::Str, Value::Str(s)) => Some(s.clone()),
			(Self::Int(width), Value::Int(v)) if width.fits(*v) => Some(v.to_string()),
			(Self::Uint(width), Value::Uint(v)) if width.fits(*v) => Some(v.to_string()),
			(Self::Float32, Value::Float32(v)) => Some(v.to_string()),
			(Self::Float64, Value::Float64(v)) => Some(v.to_string()),
			(Self::Bool, Value::Bool(v)) => Some(v.to_string()),
			_ => None,
		}
	}
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.type_name())
	}
}

fn parse_bool(text: &str) -> Option<bool> {
	if text.eq_ignore_ascii_case("true") {
		Some(true)
	} else if text.eq_ignore_ascii_case("false") {
		Some(false)
	} else {
		None
	}
}
