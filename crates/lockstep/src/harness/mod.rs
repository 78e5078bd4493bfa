//! External collaborator wrappers.
//!
//! The engine never interprets test programs itself; these wrappers drive
//! the tools that do (build script, simulator, hardware probe) and hand
//! their artifacts to the extractor and comparator. Each wrapper works in
//! the test directory and names its outputs after the program stem.

mod build;
mod probe;
mod simulator;

pub use build::Builder;
pub use probe::{HardwareCapture, HardwareSource, PrecapturedDir, ProbeCommand};
pub use simulator::Simulator;

/// `build_<stem>.log`, the captured build output.
pub fn build_log_name(stem: &str) -> String {
    format!("build_{stem}.log")
}

/// `log_sim_<stem>.log`, the normalized simulator rendering.
pub fn simulator_rendering_name(stem: &str) -> String {
    format!("log_sim_{stem}.log")
}

/// `log_hw_<stem>.log`, the hardware rendering.
pub fn hardware_rendering_name(stem: &str) -> String {
    format!("log_hw_{stem}.log")
}

/// Split a command template into program and arguments. Templates are plain
/// whitespace-separated words, no shell quoting.
fn split_command(template: &str) -> Option<(String, Vec<String>)> {
    let mut words = template.split_whitespace().map(str::to_string);
    let program = words.next()?;
    Some((program, words.collect()))
}
