//! Simulator log extraction.
//!
//! The raw debug log interleaves disassembly with register dumps:
//!
//! ```text
//! 0x00001000: 1234abcd mov r5,r10
//!  pc 0x00001000 psw 0x00000000 r0 0x00000000
//!  r1 0x00000001 r2 0x00000002 r3 0x00000003
//!  ...
//! ```
//!
//! An instruction line starts with `0x` and carries four tokens: address,
//! raw bytes, mnemonic, operands. The dump lines that follow start with
//! whitespace and carry alternating name/value tokens; a fixed number of
//! lines after each instruction belong to its dump, anything further is
//! ignored until the next instruction line. Extraction rewrites this into
//! the normalized rendering consumed by the comparator and returns the
//! parsed snapshots.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use lockstep_arch::TargetSpec;

use crate::error::{Error, Result};
use crate::snapshot::{RegisterField, RegisterSnapshot};

/// Prefix of an instruction-boundary line in the normalized rendering.
pub const INSTRUCTION_MARKER: &str = "->->-";
/// Prefix of a register line in the normalized rendering.
pub const REGISTER_MARKER: &str = ">>>-";

/// Streaming parser over raw simulator log lines.
///
/// All parsing state is owned here, per invocation; extracting several files
/// concurrently is just a matter of using several parsers. Feeding stops
/// having any effect once the requested instruction count is reached, so the
/// simulator trace never runs past the hardware-observed retire count.
#[derive(Debug)]
pub struct LogParser {
    max_instructions: usize,
    dump_lines_per_instruction: usize,
    in_dump: bool,
    dump_lines_seen: usize,
    done: bool,
    snapshots: Vec<RegisterSnapshot>,
}

impl LogParser {
    pub fn new(target: &TargetSpec, max_instructions: usize) -> Self {
        Self {
            max_instructions,
            dump_lines_per_instruction: target.dump_lines_per_instruction,
            in_dump: false,
            dump_lines_seen: 0,
            done: false,
            snapshots: Vec::new(),
        }
    }

    /// Whether the requested instruction count has been reached; further
    /// input is ignored.
    pub fn is_complete(&self) -> bool {
        self.done
    }

    /// Consume one raw log line, appending normalized output to `rendering`.
    pub fn feed<W: Write>(&mut self, line: &str, rendering: &mut W) -> Result<()> {
        if self.done {
            return Ok(());
        }

        if line.starts_with("0x") {
            // Any instruction line, well-formed or not, ends the previous
            // dump window.
            self.in_dump = false;

            let pattern = INSTRUCTION_LINE
                .get_or_init(|| Regex::new(r"^(0x\S*)\s+(\S+)\s+(\S+)\s+(\S+)\s*$").unwrap());
            if let Some(caps) = pattern.captures(line) {
                if self.snapshots.len() == self.max_instructions {
                    self.done = true;
                    return Ok(());
                }
                let label = format!("{} {} {} {}", &caps[1], &caps[2], &caps[3], &caps[4]);
                writeln!(rendering, "{INSTRUCTION_MARKER} {label}")?;
                self.snapshots
                    .push(RegisterSnapshot::new(self.snapshots.len(), label));
                self.in_dump = true;
                self.dump_lines_seen = 0;
            }
            return Ok(());
        }

        if self.in_dump {
            if self.dump_lines_seen == self.dump_lines_per_instruction {
                self.in_dump = false;
                return Ok(());
            }
            self.dump_lines_seen += 1;
            if line.starts_with(char::is_whitespace) {
                self.emit_pairs(line, rendering)?;
            }
        }
        Ok(())
    }

    /// Write each complete (name, value) token pair of one dump line.
    /// Pairing restarts on every line; a dangling odd token is dropped.
    fn emit_pairs<W: Write>(&mut self, line: &str, rendering: &mut W) -> Result<()> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        for pair in tokens.chunks_exact(2) {
            let (name, value) = (pair[0], pair[1]);
            writeln!(rendering, "{REGISTER_MARKER} {:>5} {value}", format!("{name}:"))?;
            if let Some(current) = self.snapshots.last_mut() {
                current.fields.push(RegisterField {
                    name: name.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Finish parsing and take the extracted snapshots.
    pub fn finish(self) -> Vec<RegisterSnapshot> {
        self.snapshots
    }
}

/// Extract at most `max_instructions` snapshots from the raw log at `log`,
/// writing the normalized rendering to `rendering`.
pub fn extract_log(
    log: &Path,
    rendering: &Path,
    max_instructions: usize,
    target: &TargetSpec,
) -> Result<Vec<RegisterSnapshot>> {
    let file = File::open(log).map_err(|source| Error::Read {
        path: log.to_path_buf(),
        source,
    })?;
    let out = File::create(rendering).map_err(|source| Error::Write {
        path: rendering.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(out);
    let mut parser = LogParser::new(target, max_instructions);

    for line in BufReader::new(file).lines() {
        parser.feed(&line?, &mut writer)?;
        if parser.is_complete() {
            break;
        }
    }
    writer.flush()?;

    let snapshots = parser.finish();
    debug!(
        log = %log.display(),
        snapshots = snapshots.len(),
        requested = max_instructions,
        "extracted simulator trace"
    );
    Ok(snapshots)
}

static INSTRUCTION_LINE: OnceLock<Regex> = OnceLock::new();
