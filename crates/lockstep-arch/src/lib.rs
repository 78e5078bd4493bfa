//! RH850 target description for trace verification.
//!
//! Everything the trace engine needs to know about the target's observable
//! state lives here as data: PSW flag assignments, register-file counts, and
//! the ordered schema of one rendered snapshot block. The extraction and
//! comparison machinery in `lockstep-trace` is generic over these values.

pub mod psw;

mod schema;
mod target;

pub use schema::{BlockSchema, FieldRule, FieldSpec};
pub use target::TargetSpec;
