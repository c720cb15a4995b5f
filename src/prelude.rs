//! Convenience re-exports for common usage.
//!
//! ```ignore
//! use tabrec::prelude::*;
//! ```

// Error types
pub use crate::error::{TabrecError, TabrecResult};

// Record types
pub use crate::record::{DynamicRecord, Record};
pub use crate::schema::{FieldDescriptor, FieldKind, RecordDescription};
pub use crate::value::{FieldValue, Value};

// Handlers
pub use crate::registry::{HandlerRegistry, register_handler};

// Reading and writing
pub use crate::open::{DEFAULT_MODE, OpenFlags};
pub use crate::reader::{RecordReader, read_all};
pub use crate::settings::CodecSettings;
pub use crate::writer::{RecordWriter, write_all};

// Re-export the Record derive macro when available
#[cfg(feature = "macros")]
pub use tabrec_macros::Record;
