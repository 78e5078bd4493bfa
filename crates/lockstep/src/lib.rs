//! Lockstep - differential testing harness for an RH850 simulator.
//!
//! Drives the full verification loop over a set of assembly test programs:
//! build, run the simulator, capture the hardware trace, extract the
//! simulator trace, compare the two, record one verdict per program. The
//! trace engine itself lives in `lockstep-trace`; this crate wraps the
//! external collaborators (build script, simulator process, hardware probe)
//! and accumulates the run report.
//!
//! # Example
//!
//! ```ignore
//! use lockstep::harness::{HardwareSource, PrecapturedDir};
//! use lockstep::report::{FileResult, RunReport};
//!
//! let source = PrecapturedDir::new("test", &target);
//! let capture = source.capture("mov1")?;
//! let mut report = RunReport::default();
//! report.record(FileResult::passed("mov1.s"));
//! ```

pub mod harness;
pub mod report;

mod error;

pub use error::{Error, Result};
