//! Extract command.

use std::path::{Path, PathBuf};

use tracing::error;

use lockstep::harness::simulator_rendering_name;
use lockstep_trace::extract_log;

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS, LayoutArgs};
use crate::terminal;

/// Handle the `extract` command.
pub fn cmd_extract(log: &Path, count: usize, output: Option<&Path>, layout: &LayoutArgs) -> i32 {
    let target = layout.target();
    let rendering = output.map_or_else(|| default_rendering(log), Path::to_path_buf);

    match extract_log(log, &rendering, count, &target) {
        Ok(snapshots) => {
            terminal::success(&format!(
                "extracted {} snapshots to {}",
                snapshots.len(),
                rendering.display()
            ));
            EXIT_SUCCESS
        }
        Err(e) => {
            error!(error = %e, log = %log.display(), "extraction failed");
            EXIT_FAILURE
        }
    }
}

/// `log_sim_<stem>.log` beside the raw log.
fn default_rendering(log: &Path) -> PathBuf {
    let stem = log
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("trace");
    log.with_file_name(simulator_rendering_name(stem))
}
