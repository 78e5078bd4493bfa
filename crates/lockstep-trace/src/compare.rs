//! Lockstep comparison of two snapshot renderings.
//!
//! Both inputs are line-oriented renderings of the same program's execution,
//! one written by the extractor, one by the hardware capture tool. The walk
//! pairs the files line by line, skips the priming region (the leading
//! register-initialization blocks whose values legitimately differ), then
//! groups lines into schema-sized blocks and applies each field's comparison
//! rule. Unequal line counts are an explicit failure, never a silent
//! truncation.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use tracing::debug;

use lockstep_arch::{BlockSchema, FieldRule, TargetSpec};

use crate::error::{Error, Result};
use crate::snapshot::parse_hex;

/// Outcome at block or file granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
}

impl Verdict {
    pub fn is_passed(self) -> bool {
        self == Self::Passed
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "PASSED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// What kind of disagreement a field showed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchKind {
    /// Values after the source separators differ textually.
    Value,
    /// Masked condition flags of the status register differ.
    StatusNibble,
    /// The saturation bit of the status register differs.
    StatusSaturation,
    /// A line is missing its separator or its value does not parse where a
    /// parsed value is required.
    Malformed,
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value => write!(f, "value mismatch"),
            Self::StatusNibble => write!(f, "condition flags differ"),
            Self::StatusSaturation => write!(f, "saturation flag differs"),
            Self::Malformed => write!(f, "malformed value"),
        }
    }
}

/// One field-level disagreement, carrying both raw lines for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMismatch {
    pub field: String,
    pub kind: MismatchKind,
    pub simulator: String,
    pub hardware: String,
}

/// One compared block: the echoed instruction label and any mismatches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutcome {
    /// 0-based index among compared blocks (the priming region does not
    /// count).
    pub index: usize,
    /// Simulator-side label line, echoed for context, never compared.
    pub label: String,
    pub mismatches: Vec<FieldMismatch>,
}

impl BlockOutcome {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn verdict(&self) -> Verdict {
        if self.passed() {
            Verdict::Passed
        } else {
            Verdict::Failed
        }
    }
}

/// Why the lockstep walk could not cover both renderings completely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthFault {
    /// The renderings have different line counts.
    CountMismatch {
        simulator_lines: usize,
        hardware_lines: usize,
    },
    /// Both renderings end inside a block.
    PartialBlock { lines: usize },
}

impl fmt::Display for LengthFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountMismatch {
                simulator_lines,
                hardware_lines,
            } => write!(
                f,
                "line counts differ: simulator {simulator_lines}, hardware {hardware_lines}"
            ),
            Self::PartialBlock { lines } => {
                write!(f, "trailing partial block of {lines} lines")
            }
        }
    }
}

/// Full result of comparing one rendering pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileComparison {
    pub blocks: Vec<BlockOutcome>,
    pub length_fault: Option<LengthFault>,
}

impl FileComparison {
    /// File verdict: failed if any block failed or the walk hit a length
    /// fault.
    pub fn verdict(&self) -> Verdict {
        if self.length_fault.is_none() && self.blocks.iter().all(BlockOutcome::passed) {
            Verdict::Passed
        } else {
            Verdict::Failed
        }
    }

    pub fn failed_blocks(&self) -> usize {
        self.blocks.iter().filter(|block| !block.passed()).count()
    }
}

/// Comparison parameters, derived from a target description.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Field layout of one rendered block.
    pub schema: BlockSchema,
    /// Leading blocks excluded from comparison. One per writable register
    /// on the reference target, matching the register-initialization
    /// preamble every test program executes first.
    pub priming_blocks: usize,
    /// Separator introducing the value in simulator rendering lines.
    pub simulator_separator: String,
    /// Separator introducing the value in hardware rendering lines.
    pub hardware_separator: String,
}

impl CompareConfig {
    pub fn for_target(target: &TargetSpec) -> Self {
        Self {
            schema: target.schema(),
            priming_blocks: target.writable_registers,
            simulator_separator: ": ".to_string(),
            hardware_separator: "x".to_string(),
        }
    }

    pub fn with_priming_blocks(mut self, blocks: usize) -> Self {
        self.priming_blocks = blocks;
        self
    }

    pub fn with_schema(mut self, schema: BlockSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Leading lines consumed without comparison.
    pub fn priming_lines(&self) -> usize {
        self.priming_blocks * self.schema.len()
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self::for_target(&TargetSpec::rh850())
    }
}

/// One simulator rendering and one hardware rendering for the same program.
///
/// Comparison is only meaningful within a pair; renderings of different
/// programs are never cross-compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePair {
    pub stem: String,
    pub simulator: PathBuf,
    pub hardware: PathBuf,
}

impl SequencePair {
    pub fn new(
        stem: impl Into<String>,
        simulator: impl Into<PathBuf>,
        hardware: impl Into<PathBuf>,
    ) -> Self {
        Self {
            stem: stem.into(),
            simulator: simulator.into(),
            hardware: hardware.into(),
        }
    }

    /// Read both renderings and compare them.
    pub fn compare(&self, config: &CompareConfig) -> Result<FileComparison> {
        let simulator = read_lines(&self.simulator)?;
        let hardware = read_lines(&self.hardware)?;
        let comparison = compare_renderings(
            &simulator.iter().map(String::as_str).collect::<Vec<_>>(),
            &hardware.iter().map(String::as_str).collect::<Vec<_>>(),
            config,
        );
        debug!(
            stem = %self.stem,
            blocks = comparison.blocks.len(),
            failed = comparison.failed_blocks(),
            "compared renderings"
        );
        Ok(comparison)
    }
}

fn read_lines(path: &PathBuf) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.clone(),
        source,
    })?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Walk two renderings in lockstep and classify every compared block.
pub fn compare_renderings(
    simulator: &[&str],
    hardware: &[&str],
    config: &CompareConfig,
) -> FileComparison {
    let block_len = config.schema.len();
    if block_len == 0 {
        return FileComparison {
            blocks: Vec::new(),
            length_fault: None,
        };
    }

    let mut length_fault = if simulator.len() == hardware.len() {
        None
    } else {
        Some(LengthFault::CountMismatch {
            simulator_lines: simulator.len(),
            hardware_lines: hardware.len(),
        })
    };

    let skip = config.priming_lines();
    let compared = simulator.len().min(hardware.len());
    let mut blocks = Vec::new();

    let mut start = skip;
    while start < compared {
        let end = (start + block_len).min(compared);
        let mut outcome = BlockOutcome {
            index: (start - skip) / block_len,
            label: String::new(),
            mismatches: Vec::new(),
        };
        for position in start..end {
            let spec = config.schema.field(position - start);
            let sim_line = simulator[position];
            let hw_line = hardware[position];
            let mismatch = match spec.rule {
                FieldRule::Label => {
                    outcome.label = sim_line.to_string();
                    None
                }
                FieldRule::Exact => compare_exact(sim_line, hw_line, config),
                FieldRule::Status {
                    condition_mask,
                    saturation_bit,
                } => compare_status(sim_line, hw_line, config, condition_mask, saturation_bit),
            };
            if let Some(kind) = mismatch {
                outcome.mismatches.push(FieldMismatch {
                    field: spec.name.clone(),
                    kind,
                    simulator: sim_line.to_string(),
                    hardware: hw_line.to_string(),
                });
            }
        }
        if end - start < block_len && length_fault.is_none() {
            length_fault = Some(LengthFault::PartialBlock { lines: end - start });
        }
        blocks.push(outcome);
        start = end;
    }

    FileComparison {
        blocks,
        length_fault,
    }
}

/// Textual equality of the value portions after each source's separator.
fn compare_exact(sim_line: &str, hw_line: &str, config: &CompareConfig) -> Option<MismatchKind> {
    match (
        value_after(sim_line, &config.simulator_separator),
        value_after(hw_line, &config.hardware_separator),
    ) {
        (Some(sim), Some(hw)) if sim == hw => None,
        (Some(_), Some(_)) => Some(MismatchKind::Value),
        _ => Some(MismatchKind::Malformed),
    }
}

/// Status-register rule: equal condition flags under the mask, then an
/// equal saturation bit. The nibble check runs first; the saturation check
/// only applies once the nibble agrees.
fn compare_status(
    sim_line: &str,
    hw_line: &str,
    config: &CompareConfig,
    condition_mask: u32,
    saturation_bit: u32,
) -> Option<MismatchKind> {
    let sim = value_after(sim_line, &config.simulator_separator).and_then(parse_hex);
    let hw = value_after(hw_line, &config.hardware_separator).and_then(parse_hex);
    let (Some(sim), Some(hw)) = (sim, hw) else {
        return Some(MismatchKind::Malformed);
    };
    if sim & condition_mask != hw & condition_mask {
        return Some(MismatchKind::StatusNibble);
    }
    if (sim >> saturation_bit) & 1 != (hw >> saturation_bit) & 1 {
        return Some(MismatchKind::StatusSaturation);
    }
    None
}

/// Everything after the first occurrence of `separator`, or `None` when the
/// line does not carry one.
fn value_after<'a>(line: &'a str, separator: &str) -> Option<&'a str> {
    line.find(separator)
        .map(|at| &line[at + separator.len()..])
}
