//! Shared data model for quest authoring: protocol schema and step records.

pub mod defs;
pub mod protocol;
pub mod validate;

pub use defs::*;
pub use protocol::{ProtocolError, SchemaProvider, merge_properties};
pub use validate::{ValidationError, missing_required, validate_protocol, validate_steps};
