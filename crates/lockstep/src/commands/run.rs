//! Run command: the full per-file verification loop.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::error;

use lockstep::harness::{
    simulator_rendering_name, Builder, HardwareSource, PrecapturedDir, ProbeCommand, Simulator,
};
use lockstep::report::{is_support_file, print_result, FileResult, RunReport};
use lockstep::{Error, Result};
use lockstep_arch::TargetSpec;
use lockstep_trace::{extract_log, CompareConfig, FileComparison, SequencePair};

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS, LayoutArgs};
use crate::commands::print_comparison;
use crate::terminal::{self, Spinner, Table};

/// Arguments of one `run` invocation.
pub struct RunArgs<'a> {
    pub files: &'a [PathBuf],
    pub test_dir: &'a Path,
    pub build_cmd: &'a str,
    pub no_build: bool,
    pub sim_cmd: &'a str,
    pub sim_log: &'a Path,
    pub settle: u64,
    pub hw_dir: Option<&'a Path>,
    pub probe_cmd: Option<&'a str>,
    pub exclude: &'a [String],
    pub layout: &'a LayoutArgs,
}

/// Tools and parameters shared by every file of one run.
struct Pipeline {
    builder: Builder,
    simulator: Simulator,
    hardware: Box<dyn HardwareSource>,
    target: TargetSpec,
    config: CompareConfig,
}

/// Handle the `run` command.
pub fn cmd_run(args: &RunArgs<'_>) -> i32 {
    let files = match discover_files(args.files, args.test_dir) {
        Ok(files) => files,
        Err(e) => {
            error!(error = %e, "cannot discover test programs");
            return EXIT_FAILURE;
        }
    };
    let tests: Vec<String> = files
        .into_iter()
        .filter(|name| !is_support_file(name, args.exclude))
        .collect();
    if tests.is_empty() {
        terminal::warning("nothing to test");
        return EXIT_SUCCESS;
    }

    terminal::info(&format!(
        "testing {} files in {}",
        tests.len(),
        args.test_dir.display()
    ));

    let target = args.layout.target();
    let hardware: Box<dyn HardwareSource> = match (args.hw_dir, args.probe_cmd) {
        (Some(dir), _) => Box::new(PrecapturedDir::new(dir, &target)),
        (None, Some(command)) => Box::new(ProbeCommand::new(command, args.test_dir)),
        (None, None) => Box::new(PrecapturedDir::new(args.test_dir, &target)),
    };
    let pipeline = Pipeline {
        builder: Builder::new(args.build_cmd, args.test_dir),
        simulator: Simulator::new(args.sim_cmd, Duration::from_secs(args.settle), args.test_dir),
        hardware,
        config: CompareConfig::for_target(&target),
        target,
    };

    let mut report = RunReport::default();
    let total = tests.len();
    for (i, name) in tests.iter().enumerate() {
        let spinner = Spinner::new(format!("[{}/{}] {name}", i + 1, total));
        let result = match test_one(name, args, &pipeline, &spinner) {
            Ok(comparison) => {
                spinner.finish_and_clear();
                print_comparison(&comparison);
                file_result(name, &comparison)
            }
            Err(e) => {
                spinner.finish_and_clear();
                FileResult::error(name, e.to_string())
            }
        };
        print_result(&result, i + 1, total);
        report.record(result);
    }

    println!();
    println!("---------------------FINAL RESULTS-------------------------");
    let mut table = Table::new(vec!["File", "Result"]);
    for result in report.results() {
        table.add_row(vec![result.name.clone(), result.status.to_string()]);
    }
    table.print();

    if report.all_passed() {
        terminal::success(&format!("{} files passed", report.passed()));
        EXIT_SUCCESS
    } else {
        terminal::error(&format!(
            "{} passed, {} failed, {} errors",
            report.passed(),
            report.failed(),
            report.errors()
        ));
        EXIT_FAILURE
    }
}

/// Full verification of one test program: build, simulate, capture,
/// extract, compare.
fn test_one(
    name: &str,
    args: &RunArgs<'_>,
    pipeline: &Pipeline,
    spinner: &Spinner,
) -> Result<FileComparison> {
    let stem = name.strip_suffix(".s").unwrap_or(name);

    if !args.no_build {
        spinner.set_message(format!("building {stem}"));
        pipeline.builder.build(stem)?;
    }

    spinner.set_message(format!("simulating {stem}"));
    let elf = Path::new("bin").join(format!("{stem}.elf"));
    pipeline.simulator.run(&elf, args.sim_log)?;
    let raw_log = args.test_dir.join(args.sim_log);
    if !raw_log.exists() {
        return Err(Error::MissingInput(raw_log));
    }

    spinner.set_message(format!("capturing {stem}"));
    let capture = pipeline.hardware.capture(stem)?;

    spinner.set_message(format!("extracting {stem}"));
    let rendering = args.test_dir.join(simulator_rendering_name(stem));
    extract_log(&raw_log, &rendering, capture.instructions, &pipeline.target)?;

    spinner.set_message(format!("comparing {stem}"));
    let pair = SequencePair::new(stem, rendering, capture.rendering);
    Ok(pair.compare(&pipeline.config)?)
}

/// Fold a comparison into the report row for one file.
fn file_result(name: &str, comparison: &FileComparison) -> FileResult {
    if comparison.verdict().is_passed() {
        return FileResult::passed(name);
    }
    let mut detail = format!("failed blocks: {}", comparison.failed_blocks());
    if let Some(fault) = &comparison.length_fault {
        detail = format!("{detail}, {fault}");
    }
    FileResult::failed(name, detail)
}

/// Test programs to run: explicit arguments reduced to their basename,
/// otherwise every `.s` file in the test directory, sorted for a stable
/// order.
fn discover_files(files: &[PathBuf], test_dir: &Path) -> Result<Vec<String>> {
    if !files.is_empty() {
        return Ok(files
            .iter()
            .filter_map(|path| path.file_name().and_then(|name| name.to_str()))
            .map(str::to_string)
            .collect());
    }

    if !test_dir.is_dir() {
        return Err(Error::MissingInput(test_dir.to_path_buf()));
    }
    let mut names = Vec::new();
    for entry in std::fs::read_dir(test_dir)? {
        let name = entry?.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.ends_with(".s") {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockstep_trace::{BlockOutcome, FieldMismatch, LengthFault, MismatchKind};

    #[test]
    fn explicit_files_are_reduced_to_basenames() {
        let files = vec![
            PathBuf::from("test/mov1.s"),
            PathBuf::from("../elsewhere/add2.s"),
        ];
        let names = discover_files(&files, Path::new("unused")).expect("discover");
        assert_eq!(names, ["mov1.s", "add2.s"]);
    }

    #[test]
    fn discovery_finds_sorted_assembly_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in ["zz.s", "aa.s", "notes.txt", "mid.s"] {
            std::fs::write(dir.path().join(name), "").expect("write");
        }

        let names = discover_files(&[], dir.path()).expect("discover");
        assert_eq!(names, ["aa.s", "mid.s", "zz.s"]);
    }

    #[test]
    fn missing_test_directory_is_an_error() {
        let err = discover_files(&[], Path::new("no_such_dir_here")).expect_err("missing");
        assert!(matches!(err, Error::MissingInput(_)));
    }

    #[test]
    fn file_result_carries_failure_detail() {
        let clean = FileComparison {
            blocks: Vec::new(),
            length_fault: None,
        };
        assert_eq!(file_result("mov1.s", &clean).detail, None);

        let failed = FileComparison {
            blocks: vec![BlockOutcome {
                index: 0,
                label: "->->- 0x1000: 1234 mov r1,r2".to_string(),
                mismatches: vec![FieldMismatch {
                    field: "r1".to_string(),
                    kind: MismatchKind::Value,
                    simulator: ">>>-   r1: 0x1".to_string(),
                    hardware: "   r1 x0x2".to_string(),
                }],
            }],
            length_fault: Some(LengthFault::PartialBlock { lines: 3 }),
        };
        let result = file_result("mov1.s", &failed);
        let detail = result.detail.expect("detail");
        assert!(detail.contains("failed blocks: 1"));
        assert!(detail.contains("partial block"));
    }
}
