//! Run reporting.
//!
//! Accumulates one verdict per tested file, in execution order, and prints
//! the per-file result lines. Nothing is persisted between invocations.

use std::fmt;

/// Files providing common functionality to the test programs. They are
/// support code, never tested themselves.
pub const SUPPORT_FILES: &[&str] = &["gpr_init.s", "RH850G3M_insts.s"];

/// Whether `name` is support code rather than a test program. `extra`
/// carries additional exclusions from the command line.
pub fn is_support_file(name: &str, extra: &[String]) -> bool {
    SUPPORT_FILES.contains(&name) || extra.iter().any(|skip| skip == name)
}

/// Outcome recorded for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// Every compared block matched and the lengths agreed.
    Passed,
    /// At least one block or the length check failed.
    Failed,
    /// The file could not be processed at all.
    Error,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "PASSED"),
            Self::Failed => write!(f, "FAILED"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of processing a single file.
#[derive(Debug, Clone)]
pub struct FileResult {
    /// File name (basename, e.g. "mov1.s").
    pub name: String,
    /// File status.
    pub status: FileStatus,
    /// Failure context if the file did not pass.
    pub detail: Option<String>,
}

impl FileResult {
    /// Create a passing result.
    pub fn passed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: FileStatus::Passed,
            detail: None,
        }
    }

    /// Create a failing result.
    pub fn failed(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: FileStatus::Failed,
            detail: Some(detail.into()),
        }
    }

    /// Create an error result for a file that could not be processed.
    pub fn error(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: FileStatus::Error,
            detail: Some(detail.into()),
        }
    }
}

/// Ordered results of one harness invocation.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    results: Vec<FileResult>,
}

impl RunReport {
    /// Append a result; insertion order is execution order.
    pub fn record(&mut self, result: FileResult) {
        self.results.push(result);
    }

    /// All recorded results, in order.
    pub fn results(&self) -> &[FileResult] {
        &self.results
    }

    /// Number of recorded results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Whether every file passed outright. Errors count as not passed.
    pub fn all_passed(&self) -> bool {
        self.results
            .iter()
            .all(|result| result.status == FileStatus::Passed)
    }

    fn count(&self, status: FileStatus) -> usize {
        self.results
            .iter()
            .filter(|result| result.status == status)
            .count()
    }

    pub fn passed(&self) -> usize {
        self.count(FileStatus::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(FileStatus::Failed)
    }

    pub fn errors(&self) -> usize {
        self.count(FileStatus::Error)
    }
}

/// ANSI color codes.
pub mod colors {
    pub const RED: &str = "\x1b[0;31m";
    pub const GREEN: &str = "\x1b[0;32m";
    pub const YELLOW: &str = "\x1b[0;33m";
    pub const RESET: &str = "\x1b[0m";
}

/// Print a file result line.
pub fn print_result(result: &FileResult, index: usize, total: usize) {
    let color = match result.status {
        FileStatus::Passed => colors::GREEN,
        FileStatus::Failed => colors::RED,
        FileStatus::Error => colors::YELLOW,
    };
    match result.detail.as_deref() {
        Some(detail) => println!(
            "[{}/{}] {}{}{} {} ({})",
            index,
            total,
            color,
            result.status,
            colors::RESET,
            result.name,
            detail
        ),
        None => println!(
            "[{}/{}] {}{}{} {}",
            index,
            total,
            color,
            result.status,
            colors::RESET,
            result.name
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_files_are_excluded() {
        assert!(is_support_file("gpr_init.s", &[]));
        assert!(is_support_file("RH850G3M_insts.s", &[]));
        assert!(!is_support_file("mov1.s", &[]));
    }

    #[test]
    fn extra_exclusions_extend_the_list() {
        let extra = vec!["wip_sat.s".to_string()];
        assert!(is_support_file("wip_sat.s", &extra));
        assert!(!is_support_file("mov1.s", &extra));
    }

    #[test]
    fn report_preserves_execution_order() {
        let mut report = RunReport::default();
        report.record(FileResult::passed("mov1.s"));
        report.record(FileResult::failed("add2.s", "1 failed block"));
        report.record(FileResult::passed("or3.s"));

        let names: Vec<&str> = report
            .results()
            .iter()
            .map(|result| result.name.as_str())
            .collect();
        assert_eq!(names, ["mov1.s", "add2.s", "or3.s"]);
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn errors_fail_the_run() {
        let mut report = RunReport::default();
        report.record(FileResult::passed("mov1.s"));
        assert!(report.all_passed());

        report.record(FileResult::error("add2.s", "missing input"));
        assert!(!report.all_passed());
        assert_eq!(report.passed(), 1);
        assert_eq!(report.errors(), 1);
        assert_eq!(report.failed(), 0);
    }

    #[test]
    fn status_renders_upper_case() {
        assert_eq!(FileStatus::Passed.to_string(), "PASSED");
        assert_eq!(FileStatus::Failed.to_string(), "FAILED");
        assert_eq!(FileStatus::Error.to_string(), "ERROR");
    }
}
