//! Simulator process control.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;
use std::time::Duration;

use tracing::debug;

use super::split_command;
use crate::error::{Error, Result};

/// Launches the simulator for one program and stops it once the trace has
/// settled.
///
/// The command template substitutes `{elf}` and `{log}` per invocation,
/// both resolved relative to the working directory. The simulator under
/// test free-runs and never exits on its own, so the runner waits out the
/// settle window, then kills and reaps the process.
pub struct Simulator {
    command: String,
    settle: Duration,
    directory: PathBuf,
}

impl Simulator {
    pub fn new(
        command: impl Into<String>,
        settle: Duration,
        directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            command: command.into(),
            settle,
            directory: directory.into(),
        }
    }

    /// Run the simulator over `elf`, leaving the raw log at `log`.
    // TODO drive the simulator over its debug stub and stop at a breakpoint
    // instead of killing it after the settle window.
    pub fn run(&self, elf: &Path, log: &Path) -> Result<()> {
        let Some((program, args)) = split_command(&self.command) else {
            return Err(Error::BadCommand(self.command.clone()));
        };
        let args: Vec<String> = args.iter().map(|word| substitute(word, elf, log)).collect();

        let mut child = Command::new(&program)
            .args(&args)
            .current_dir(&self.directory)
            .spawn()
            .map_err(|source| Error::SimulatorSpawn(format!("{program}: {source}")))?;
        debug!(program = %program, pid = child.id(), "simulator started");

        thread::sleep(self.settle);
        if child.try_wait()?.is_none() {
            child.kill()?;
        }
        let status = child.wait()?;
        debug!(status = %status, "simulator stopped");
        Ok(())
    }
}

/// Replace the `{elf}` and `{log}` placeholders in one template word.
fn substitute(word: &str, elf: &Path, log: &Path) -> String {
    word.replace("{elf}", &elf.to_string_lossy())
        .replace("{log}", &log.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_substituted_per_word() {
        let elf = Path::new("bin/mov1.elf");
        let log = Path::new("sim.log");
        assert_eq!(substitute("-kernel", elf, log), "-kernel");
        assert_eq!(substitute("{elf}", elf, log), "bin/mov1.elf");
        assert_eq!(substitute("-D{log}", elf, log), "-Dsim.log");
    }
}
