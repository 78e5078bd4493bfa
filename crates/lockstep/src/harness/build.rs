//! Build step wrapper.

use std::fs::File;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use super::{build_log_name, split_command};
use crate::error::{Error, Result};

/// Runs the configurable build command for one test program.
///
/// The command receives the file stem as its only extra argument; stdout
/// and stderr land in `build_<stem>.log` next to the sources.
pub struct Builder {
    command: String,
    directory: PathBuf,
}

impl Builder {
    pub fn new(command: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            directory: directory.into(),
        }
    }

    /// Build one program. Returns the build log path.
    pub fn build(&self, stem: &str) -> Result<PathBuf> {
        let Some((program, args)) = split_command(&self.command) else {
            return Err(Error::BadCommand(self.command.clone()));
        };

        let log_path = self.directory.join(build_log_name(stem));
        let log = File::create(&log_path)?;
        let log_errors = log.try_clone()?;

        let status = Command::new(program)
            .args(args)
            .arg(stem)
            .current_dir(&self.directory)
            .stdout(log)
            .stderr(log_errors)
            .status()?;
        debug!(stem, ok = status.success(), "build finished");

        if status.success() {
            Ok(log_path)
        } else {
            Err(Error::BuildFailed {
                stem: stem.to_string(),
                log: log_path,
            })
        }
    }
}
