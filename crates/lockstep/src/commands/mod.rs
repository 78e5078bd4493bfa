//! Command implementations.
//!
//! Each submodule handles a specific CLI command.

mod compare;
mod extract;
mod run;

use lockstep_trace::FileComparison;

use crate::cli::{Cli, Commands};

/// Dispatch CLI command to the appropriate handler.
pub fn run_command(cli: &Cli) -> i32 {
    match &cli.command {
        Commands::Run { .. } => handle_run(cli),
        Commands::Extract { .. } => handle_extract(cli),
        Commands::Compare { .. } => handle_compare(cli),
    }
}

fn handle_run(cli: &Cli) -> i32 {
    let Commands::Run {
        files,
        test_dir,
        build_cmd,
        no_build,
        sim_cmd,
        sim_log,
        settle,
        hw_dir,
        probe_cmd,
        exclude,
        layout,
    } = &cli.command
    else {
        unreachable!("run command variant mismatch");
    };

    run::cmd_run(&run::RunArgs {
        files,
        test_dir,
        build_cmd,
        no_build: *no_build,
        sim_cmd,
        sim_log,
        settle: *settle,
        hw_dir: hw_dir.as_deref(),
        probe_cmd: probe_cmd.as_deref(),
        exclude,
        layout,
    })
}

fn handle_extract(cli: &Cli) -> i32 {
    let Commands::Extract {
        log,
        count,
        output,
        layout,
    } = &cli.command
    else {
        unreachable!("extract command variant mismatch");
    };

    extract::cmd_extract(log, *count, output.as_deref(), layout)
}

fn handle_compare(cli: &Cli) -> i32 {
    let Commands::Compare {
        sim,
        hw,
        priming,
        layout,
    } = &cli.command
    else {
        unreachable!("compare command variant mismatch");
    };

    compare::cmd_compare(sim, hw, *priming, layout)
}

// ============================================================================
// Output formatting helpers
// ============================================================================

/// Print the per-block console trace of one comparison to stdout: a
/// separator, the echoed instruction label, one ERROR line per field
/// mismatch carrying both raw lines, and the block outcome.
pub fn print_comparison(comparison: &FileComparison) {
    for block in &comparison.blocks {
        println!("-----------------");
        println!("@@@> {}", block.label);
        for mismatch in &block.mismatches {
            println!(
                "ERROR [{}] {}: '{}' vs '{}'",
                mismatch.field, mismatch.kind, mismatch.simulator, mismatch.hardware
            );
        }
        if block.passed() {
            println!("OK");
        } else {
            println!("FAILED");
        }
    }
    if let Some(fault) = &comparison.length_fault {
        println!("LENGTH FAULT: {fault}");
    }
}
