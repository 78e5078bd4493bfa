//! Compare command.

use std::path::Path;

use tracing::error;

use lockstep_trace::{CompareConfig, SequencePair};

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS, LayoutArgs};
use crate::commands::print_comparison;

/// Handle the `compare` command.
pub fn cmd_compare(sim: &Path, hw: &Path, priming: Option<usize>, layout: &LayoutArgs) -> i32 {
    let target = layout.target();
    let mut config = CompareConfig::for_target(&target);
    if let Some(blocks) = priming {
        config = config.with_priming_blocks(blocks);
    }

    let stem = sim
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("trace");
    let pair = SequencePair::new(stem, sim, hw);
    match pair.compare(&config) {
        Ok(comparison) => {
            print_comparison(&comparison);
            println!("{}", comparison.verdict());
            if comparison.verdict().is_passed() {
                EXIT_SUCCESS
            } else {
                EXIT_FAILURE
            }
        }
        Err(e) => {
            error!(error = %e, "comparison failed");
            EXIT_FAILURE
        }
    }
}
