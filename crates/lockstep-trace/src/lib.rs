//! Trace comparison engine.
//!
//! Verifies an instruction-set simulator against live silicon by comparing
//! per-instruction register traces. The extractor turns the simulator's raw
//! debug log into an ordered sequence of register snapshots plus a
//! normalized line rendering; the comparator walks that rendering against
//! the hardware capture in lockstep, applying schema-driven field rules and
//! producing block and file verdicts.
//!
//! ```ignore
//! use lockstep_arch::TargetSpec;
//! use lockstep_trace::{extract_log, CompareConfig, SequencePair};
//!
//! let target = TargetSpec::rh850();
//! let snapshots = extract_log(
//!     "sim.log".as_ref(),
//!     "log_sim_mov1.log".as_ref(),
//!     retired,
//!     &target,
//! )?;
//! let pair = SequencePair::new("mov1", "log_sim_mov1.log", "log_hw_mov1.log");
//! let comparison = pair.compare(&CompareConfig::for_target(&target))?;
//! println!("{}", comparison.verdict());
//! ```

mod compare;
mod error;
mod extract;
mod snapshot;

pub use compare::{
    compare_renderings, BlockOutcome, CompareConfig, FieldMismatch, FileComparison, LengthFault,
    MismatchKind, SequencePair, Verdict,
};
pub use error::{Error, Result};
pub use extract::{extract_log, LogParser, INSTRUCTION_MARKER, REGISTER_MARKER};
pub use snapshot::{parse_hex, RegisterField, RegisterSnapshot};
