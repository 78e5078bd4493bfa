//! CLI definitions and argument types.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lockstep_arch::TargetSpec;

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;

/// Default simulator command line, mirroring the QEMU invocation the test
/// programs were written against.
pub const DEFAULT_SIM_CMD: &str = "qemu-system-rh850 -M rh850mini -s -singlestep \
     -d nochain,exec,in_asm,cpu -D {log} -kernel {elf}";

#[derive(Parser)]
#[command(name = "lockstep")]
#[command(about = "Trace comparison harness - verifies an RH850 simulator against silicon")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (sets RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub silent: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build, simulate, capture and compare test programs
    Run {
        /// Assembly files to test (default: every .s file in the test directory)
        #[arg(value_name = "FILES")]
        files: Vec<PathBuf>,

        /// Directory holding the test programs
        #[arg(long, default_value = "test")]
        test_dir: PathBuf,

        /// Build command, invoked with the file stem as its argument
        #[arg(long, default_value = "./build.sh")]
        build_cmd: String,

        /// Skip the build step (ELFs already built)
        #[arg(long)]
        no_build: bool,

        /// Simulator command; {elf} and {log} are substituted per file
        #[arg(long, default_value = DEFAULT_SIM_CMD)]
        sim_cmd: String,

        /// Raw simulator log path, relative to the test directory
        #[arg(long, default_value = "sim.log")]
        sim_log: PathBuf,

        /// Seconds the simulator runs before it is stopped
        #[arg(long, default_value = "3")]
        settle: u64,

        /// Directory with precaptured hardware renderings (log_hw_<stem>.log)
        #[arg(long, value_name = "DIR", conflicts_with = "probe_cmd")]
        hw_dir: Option<PathBuf>,

        /// Hardware capture command, invoked with the file stem; must write
        /// log_hw_<stem>.log and print the retire count as its last stdout line
        #[arg(long, value_name = "CMD")]
        probe_cmd: Option<String>,

        /// Additional support files to skip
        #[arg(long, value_name = "NAME", action = clap::ArgAction::Append)]
        exclude: Vec<String>,

        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Extract normalized snapshots from a raw simulator log
    Extract {
        /// Raw simulator log
        #[arg(value_name = "LOG")]
        log: PathBuf,

        /// Maximum number of instructions to extract
        #[arg(short = 'n', long)]
        count: usize,

        /// Rendering output path (default: log_sim_<stem>.log beside the log)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Compare a simulator rendering against a hardware rendering
    Compare {
        /// Normalized simulator rendering
        #[arg(value_name = "SIM")]
        sim: PathBuf,

        /// Hardware rendering
        #[arg(value_name = "HW")]
        hw: PathBuf,

        /// Blocks to skip before comparing (default: writable register count)
        #[arg(long)]
        priming: Option<usize>,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

/// Target layout overrides. The defaults describe the RH850 reference
/// target; the derived block size and priming skip follow them.
#[derive(clap::Args, Clone, Copy, Debug)]
pub struct LayoutArgs {
    /// Writable general-purpose registers (drives the priming skip)
    #[arg(long, default_value = "31")]
    pub writable_regs: usize,

    /// General-purpose registers in each dump
    #[arg(long, default_value = "32")]
    pub dumped_regs: usize,

    /// Register-dump lines belonging to one instruction
    #[arg(long, default_value = "12")]
    pub dump_lines: usize,
}

impl LayoutArgs {
    /// Target description with these overrides applied.
    pub fn target(&self) -> TargetSpec {
        TargetSpec::rh850()
            .with_writable_registers(self.writable_regs)
            .with_dumped_registers(self.dumped_regs)
            .with_dump_lines_per_instruction(self.dump_lines)
    }
}
