//! # tabrec macros
//!
//! Procedural macros for `tabrec`.
//!
//! This crate provides:
//! - `#[derive(Record)]` for structs read from and written to delimited rows
//!
//! Use it through the `tabrec` crate, which re-exports the derive with its
//! default `macros` feature.

use proc_macro::TokenStream;

mod attr_parser;
mod record_derive;

/// Derives `tabrec::Record` for a struct with named fields.
///
/// Fields are declared in column order unless an index overrides it. Every
/// field type must implement `tabrec::FieldValue` (strings, booleans,
/// integers and floats).
///
/// ## Struct Attributes
///
/// - `name` - Record name used in error messages (defaults to the struct name)
///
/// ## Field Attributes
///
/// Fields can be annotated with `#[record(...)]`:
/// - `index` - Column index; an integer or a string holding one. Text that is
///   not a non-negative integer falls back to the declaration position.
/// - `read_handler` - Registered handler applied to cell text before parsing
/// - `write_handler` - Registered handler applied to cell text after
///   formatting
///
/// ## Example
///
/// ```rust,ignore
/// use tabrec::Record;
///
/// #[derive(Record)]
/// #[record(name = "latency")]
/// struct Latency {
///     #[record(index = 1)]
///     release: String,
///     #[record(index = 0)]
///     team: String,
///     #[record(read_handler = "ms_to_s")]
///     tp90: f64,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
	record_derive::record_derive_impl(input)
}
