//! Column rule subsystem
//!
//! Every template column carries one immutable rule: emptiness policy, value
//! kind with its bounds, and an optional allow-list reference.
//!
//! # Design Principles
//!
//! - Rules are defined once per schema and looked up by column index
//! - Bounds belong to the value kind they constrain
//! - Allow-list references are resolved when the table is built
//! - No I/O after startup

mod allowlist;
mod errors;
mod loader;
mod resolver;
mod types;

pub use allowlist::AllowLists;
pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use loader::SchemaLoader;
pub use resolver::RuleTable;
pub use types::{ColumnRule, Emptiness, SheetSchema, ValueKind};
