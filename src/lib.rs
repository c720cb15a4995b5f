//! # tabrec
//!
//! Tag-driven serialization between delimited text rows and typed records.
//!
//! A record type is described once as an ordered list of fields. Each field
//! has a primitive kind, a column (its declaration position unless
//! overridden), and optionally the names of a read handler and a write
//! handler: text-rewrite functions looked up in a [`HandlerRegistry`] and
//! applied to the raw cell text before parsing or after formatting.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use tabrec::{HandlerRegistry, Record, RecordReader};
//!
//! #[derive(Debug, PartialEq, Record)]
//! struct Latency {
//!     #[record(index = 1)]
//!     release: String,
//!     #[record(index = 0)]
//!     team: String,
//!     #[record(read_handler = "ms_to_s")]
//!     tp90: f64,
//! }
//!
//! let registry = Arc::new(HandlerRegistry::new());
//! registry
//!     .register("ms_to_s", |s: &mut String| {
//!         if let Ok(ms) = s.parse::<f64>() {
//!             *s = (ms / 1000.0).to_string();
//!         }
//!     })
//!     .unwrap();
//!
//! let data = "team,release,tp90\ninfra,v2,1500\n";
//! let rows: Vec<Latency> = RecordReader::new()
//!     .with_registry(registry)
//!     .skip_header(true)
//!     .read_from(data.as_bytes())
//!     .unwrap();
//!
//! assert_eq!(
//!     rows,
//!     vec![Latency { release: "v2".into(), team: "infra".into(), tp90: 1.5 }]
//! );
//! ```
//!
//! ## Architecture
//!
//! - [`HandlerRegistry`] - add-only, thread-safe name to handler mapping,
//!   with a process-wide default ([`register_handler`])
//! - [`schema`] - record descriptions, field kinds and per-call conversion
//!   plans
//! - [`codec`] - applies the plans to one row or one record
//! - [`RecordReader`] / [`RecordWriter`] - file and stream orchestration
//! - [`Record`] - implemented by `#[derive(Record)]`; [`DynamicRecord`] for
//!   shapes only known at runtime (e.g. declared in TOML)
//!
//! ## Features
//!
//! - `macros` (default) - the `#[derive(Record)]` macro

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod codec;
pub mod error;
pub mod open;
pub mod prelude;
pub mod reader;
pub mod record;
pub mod registry;
pub mod schema;
pub mod settings;
pub mod value;
pub mod writer;

// Re-export commonly used types at crate root
pub use error::{TabrecError, TabrecResult};
pub use open::{DEFAULT_MODE, OpenFlags};
pub use reader::{RecordReader, read_all};
pub use record::{DynamicRecord, Record};
pub use registry::{Handler, HandlerRegistry, register_handler};
pub use schema::{FieldDescriptor, FieldKind, RecordDescription};
pub use settings::{CodecSettings, LineTerminator};
pub use value::{FieldValue, Value};
pub use writer::{RecordWriter, write_all};

// Re-export derive macro when available
#[cfg(feature = "macros")]
pub use tabrec_macros::Record;
