//! Hardware snapshot sources.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use lockstep_arch::TargetSpec;

use super::{hardware_rendering_name, split_command};
use crate::error::{Error, Result};

/// One captured hardware trace: where the rendering landed and how many
/// instructions the hardware retired while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareCapture {
    pub rendering: PathBuf,
    pub instructions: usize,
}

/// Source of hardware-side renderings.
///
/// The engine only consumes the textual rendering plus a retire count; how
/// the register values left the silicon stays behind this seam.
pub trait HardwareSource {
    fn capture(&self, stem: &str) -> Result<HardwareCapture>;
}

/// Spawns a capture command per stem.
///
/// The command receives the stem as its argument, writes
/// `log_hw_<stem>.log` into the working directory, and prints the retire
/// count as the last non-empty line of its stdout.
pub struct ProbeCommand {
    command: String,
    directory: PathBuf,
}

impl ProbeCommand {
    pub fn new(command: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            directory: directory.into(),
        }
    }
}

impl HardwareSource for ProbeCommand {
    fn capture(&self, stem: &str) -> Result<HardwareCapture> {
        let Some((program, args)) = split_command(&self.command) else {
            return Err(Error::BadCommand(self.command.clone()));
        };

        let output = Command::new(program)
            .args(args)
            .arg(stem)
            .current_dir(&self.directory)
            .output()?;
        if !output.status.success() {
            return Err(Error::CaptureFailed {
                stem: stem.to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let instructions = retire_count(&stdout).ok_or_else(|| Error::NoRetireCount {
            stem: stem.to_string(),
        })?;

        let rendering = self.directory.join(hardware_rendering_name(stem));
        if !rendering.exists() {
            return Err(Error::MissingInput(rendering));
        }
        debug!(stem, instructions, "hardware capture complete");
        Ok(HardwareCapture {
            rendering,
            instructions,
        })
    }
}

/// Reads renderings captured by an earlier run.
///
/// The retire count is recovered from the rendering itself: total lines
/// divided by the block size.
pub struct PrecapturedDir {
    directory: PathBuf,
    block_lines: usize,
}

impl PrecapturedDir {
    pub fn new(directory: impl Into<PathBuf>, target: &TargetSpec) -> Self {
        Self {
            directory: directory.into(),
            block_lines: target.schema().len(),
        }
    }
}

impl HardwareSource for PrecapturedDir {
    fn capture(&self, stem: &str) -> Result<HardwareCapture> {
        let rendering = self.directory.join(hardware_rendering_name(stem));
        if !rendering.exists() {
            return Err(Error::MissingInput(rendering));
        }
        let text = fs::read_to_string(&rendering)?;
        let instructions = text.lines().count() / self.block_lines;
        debug!(stem, instructions, "using precaptured rendering");
        Ok(HardwareCapture {
            rendering,
            instructions,
        })
    }
}

/// The retire count is the last non-empty stdout line of the capture
/// command; everything before it is free-form probe chatter.
fn retire_count(stdout: &str) -> Option<usize> {
    stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .and_then(|line| line.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retire_count_takes_the_last_nonempty_line() {
        assert_eq!(retire_count("connecting...\nreset ok\n37\n"), Some(37));
        assert_eq!(retire_count("37\n\n  \n"), Some(37));
        assert_eq!(retire_count("37"), Some(37));
    }

    #[test]
    fn retire_count_rejects_junk() {
        assert_eq!(retire_count(""), None);
        assert_eq!(retire_count("done\n"), None);
        assert_eq!(retire_count("count 37\n"), None);
    }

    #[test]
    fn precaptured_count_comes_from_line_count() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = TargetSpec::rh850();
        let lines = vec!["x"; 2 * target.schema().len()];
        fs::write(dir.path().join("log_hw_mov1.log"), lines.join("\n")).expect("write");

        let source = PrecapturedDir::new(dir.path(), &target);
        let capture = source.capture("mov1").expect("capture");
        assert_eq!(capture.instructions, 2);
        assert_eq!(capture.rendering, dir.path().join("log_hw_mov1.log"));
    }

    #[test]
    fn missing_precaptured_rendering_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = PrecapturedDir::new(dir.path(), &TargetSpec::rh850());
        let err = source.capture("mov1").expect_err("missing");
        assert!(matches!(err, Error::MissingInput(_)));
    }
}
