//! Record type descriptions and schema derivation.
//!
//! - [`RecordDescription`] / [`FieldDescriptor`] - the declared field metadata
//! - [`FieldKind`] - the supported primitive kinds and their text rules
//! - [`Schema`] / [`FieldPlan`] - per-call, pre-resolved conversion plans

pub mod description;
pub mod kind;
pub mod plan;

pub use description::{FieldDescriptor, RecordDescription, RecordDescriptionBuilder};
pub use kind::{FieldKind, IntWidth, UintWidth};
pub use plan::{FieldPlan, Mode, Schema};
