//! End-to-end pipeline tests: raw simulator log to file verdict.
//!
//! Each case synthesizes the two collaborator artifacts (the raw simulator
//! log and the hardware rendering) in a scratch directory, then runs the
//! real flow: recover the retire count from the hardware side, extract the
//! simulator trace, compare the pair.

use std::fs;

use lockstep::harness::{HardwareSource, PrecapturedDir};
use lockstep_arch::TargetSpec;
use lockstep_trace::{extract_log, CompareConfig, LengthFault, MismatchKind, SequencePair, Verdict};

/// One raw-log entry: the disassembly line plus the twelve dump lines the
/// simulator prints after it (pc and psw first, then r0..r31 three to a
/// line).
fn raw_block(pc: u32, psw: u32, gprs: &[u32]) -> Vec<String> {
    assert_eq!(gprs.len(), 32);
    let mut lines = vec![format!("0x{pc:08x}: e02e6100 mov r1,r2")];
    lines.push(format!("    pc 0x{pc:08x} psw 0x{psw:08x}"));
    for (chunk_index, chunk) in gprs.chunks(3).enumerate() {
        let mut line = String::from("   ");
        for (offset, value) in chunk.iter().enumerate() {
            let reg = chunk_index * 3 + offset;
            line.push_str(&format!(" r{reg} 0x{value:08x}"));
        }
        lines.push(line);
    }
    lines
}

/// One hardware-rendering block in the capture tool's format.
fn hw_block(pc: u32, psw: u32, gprs: &[u32]) -> Vec<String> {
    let mut lines = vec!["--------".to_string()];
    lines.push(format!("   pc x0x{pc:08x}"));
    lines.push(format!("  psw x0x{psw:08x}"));
    for (reg, value) in gprs.iter().enumerate() {
        lines.push(format!("{:>5} x0x{value:08x}", format!("r{reg}")));
    }
    lines
}

/// Register values after `seed` instructions, r0 hardwired to zero.
fn gprs(seed: u32) -> Vec<u32> {
    (0..32u32)
        .map(|reg| if reg == 0 { 0 } else { reg * 0x11 ^ seed })
        .collect()
}

/// States rendered on both sides: block 0 is the priming block, carrying
/// junk on the hardware side.
fn write_case(
    dir: &std::path::Path,
    states: &[(u32, u32)],
    extra_sim_instructions: u32,
) -> std::path::PathBuf {
    let mut raw = Vec::new();
    let mut hw = Vec::new();
    for (i, &(pc, psw)) in states.iter().enumerate() {
        let regs = gprs(i as u32);
        raw.extend(raw_block(pc, psw, &regs));
        if i == 0 {
            hw.extend(hw_block(0xdead_0000, 0xff, &gprs(99)));
        } else {
            hw.extend(hw_block(pc, psw, &regs));
        }
    }
    // The simulator free-runs past the capture point.
    for extra in 0..extra_sim_instructions {
        raw.extend(raw_block(0x2000 + extra * 2, 0, &gprs(77)));
    }
    let raw_log = dir.join("sim.log");
    fs::write(&raw_log, raw.join("\n")).expect("write raw log");
    fs::write(dir.join("log_hw_case.log"), hw.join("\n")).expect("write hw rendering");
    raw_log
}

#[test]
fn matching_traces_pass() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = TargetSpec::rh850();
    let states = [(0x1000, 0x0), (0x1002, 0x1), (0x1004, 0x13), (0x1006, 0x0)];
    let raw_log = write_case(dir.path(), &states, 3);

    let source = PrecapturedDir::new(dir.path(), &target);
    let capture = source.capture("case").expect("capture");
    assert_eq!(capture.instructions, 4);

    let rendering = dir.path().join("log_sim_case.log");
    let snapshots =
        extract_log(&raw_log, &rendering, capture.instructions, &target).expect("extract");
    assert_eq!(snapshots.len(), 4);
    assert_eq!(snapshots[1].pc(), Some(0x1002));
    assert_eq!(snapshots[2].status(), Some(0x13));
    assert_eq!(snapshots[3].gpr(5), Some(5 * 0x11 ^ 3));

    // The cap keeps the free-running tail out of the rendering.
    let rendered = fs::read_to_string(&rendering).expect("read rendering");
    assert_eq!(rendered.lines().count(), 4 * target.schema().len());

    let config = CompareConfig::for_target(&target).with_priming_blocks(1);
    let pair = SequencePair::new("case", &rendering, &capture.rendering);
    let comparison = pair.compare(&config).expect("compare");
    assert_eq!(comparison.verdict(), Verdict::Passed);
    assert_eq!(comparison.blocks.len(), 3);
    assert_eq!(comparison.length_fault, None);
}

#[test]
fn diverging_gpr_fails_exactly_its_block() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = TargetSpec::rh850();
    let states = [(0x1000, 0x0), (0x1002, 0x1), (0x1004, 0x13), (0x1006, 0x0)];
    let raw_log = write_case(dir.path(), &states, 0);

    // Hardware disagrees on r10 of the second compared block (hardware
    // block 2, rendering line 2 * 35 + 3 + 10).
    let hw_path = dir.path().join("log_hw_case.log");
    let mut hw: Vec<String> = fs::read_to_string(&hw_path)
        .expect("read hw rendering")
        .lines()
        .map(str::to_string)
        .collect();
    let wrong = gprs(2)[10] + 1;
    hw[2 * target.schema().len() + 3 + 10] = format!("{:>5} x0x{wrong:08x}", "r10");
    fs::write(&hw_path, hw.join("\n")).expect("rewrite hw rendering");

    let source = PrecapturedDir::new(dir.path(), &target);
    let capture = source.capture("case").expect("capture");
    let rendering = dir.path().join("log_sim_case.log");
    extract_log(&raw_log, &rendering, capture.instructions, &target).expect("extract");

    let config = CompareConfig::for_target(&target).with_priming_blocks(1);
    let pair = SequencePair::new("case", &rendering, &capture.rendering);
    let comparison = pair.compare(&config).expect("compare");

    assert_eq!(comparison.verdict(), Verdict::Failed);
    assert_eq!(comparison.failed_blocks(), 1);
    assert!(comparison.blocks[0].passed());
    assert!(comparison.blocks[2].passed());

    let failed = &comparison.blocks[1];
    assert_eq!(failed.index, 1);
    assert!(failed.label.starts_with("->->- 0x00001004:"));
    assert_eq!(failed.mismatches.len(), 1);
    let mismatch = &failed.mismatches[0];
    assert_eq!(mismatch.field, "r10");
    assert_eq!(mismatch.kind, MismatchKind::Value);
    assert!(mismatch.simulator.contains("r10:"));
    assert!(mismatch.hardware.contains(&format!("0x{wrong:08x}")));
}

#[test]
fn short_simulator_log_is_an_explicit_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = TargetSpec::rh850();
    let states = [(0x1000, 0x0), (0x1002, 0x1), (0x1004, 0x13), (0x1006, 0x0)];
    write_case(dir.path(), &states, 0);

    // The simulator died after three instructions; the hardware retired
    // four.
    let mut raw = Vec::new();
    for (i, &(pc, psw)) in states.iter().take(3).enumerate() {
        raw.extend(raw_block(pc, psw, &gprs(i as u32)));
    }
    let raw_log = dir.path().join("sim.log");
    fs::write(&raw_log, raw.join("\n")).expect("rewrite raw log");

    let source = PrecapturedDir::new(dir.path(), &target);
    let capture = source.capture("case").expect("capture");
    assert_eq!(capture.instructions, 4);

    let rendering = dir.path().join("log_sim_case.log");
    let snapshots =
        extract_log(&raw_log, &rendering, capture.instructions, &target).expect("extract");
    assert_eq!(snapshots.len(), 3);

    let config = CompareConfig::for_target(&target).with_priming_blocks(1);
    let pair = SequencePair::new("case", &rendering, &capture.rendering);
    let comparison = pair.compare(&config).expect("compare");

    assert_eq!(comparison.verdict(), Verdict::Failed);
    assert_eq!(
        comparison.length_fault,
        Some(LengthFault::CountMismatch {
            simulator_lines: 3 * target.schema().len(),
            hardware_lines: 4 * target.schema().len(),
        })
    );
    // The common prefix is still compared and clean.
    assert_eq!(comparison.blocks.len(), 2);
    assert!(comparison.blocks.iter().all(|block| block.passed()));
}
