//! Field-level access control for the event dashboard.
//!
//! Every dashboard session gets one [`Evaluator`]. It decides which
//! records the caller may see, which fields of them it may read or write,
//! and hands out redacted copies for rendering. The rules themselves live
//! in `permissions.rs` at the crate root.

// Serialization libraries.
#[macro_use] extern crate serde_derive;
extern crate serde;
extern crate serde_json;

// Logging libraries.
#[macro_use] extern crate log;

pub mod caller;
pub mod conditions;
pub mod config;
pub mod evaluator;
pub mod path;
pub mod record;
mod redact;

pub use caller::{Caller, RoleClaim};
pub use conditions::{Operation, Role};
pub use config::Config;
pub use evaluator::{Capabilities, Denied, Evaluator, RecordKind, Target};
pub use path::FieldPath;
