use std::path::PathBuf;

use thiserror::Error;

/// Harness errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("trace error: {0}")]
    Trace(#[from] lockstep_trace::Error),
    #[error("unusable command template: {0:?}")]
    BadCommand(String),
    #[error("build failed for {stem}, see {}", .log.display())]
    BuildFailed { stem: String, log: PathBuf },
    #[error("cannot launch simulator: {0}")]
    SimulatorSpawn(String),
    #[error("capture command failed for {stem}: {reason}")]
    CaptureFailed { stem: String, reason: String },
    #[error("capture output for {stem} carries no retire count")]
    NoRetireCount { stem: String },
    #[error("missing input: {}", .0.display())]
    MissingInput(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
