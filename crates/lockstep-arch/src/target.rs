//! Target description driving extraction and comparison geometry.

use crate::psw;
use crate::schema::{BlockSchema, FieldRule, FieldSpec};

/// Register-file and log-format constants for one target.
///
/// The defaults describe the RH850 reference target. Every count is
/// overridable so the engine generalizes to other register layouts; the
/// priming skip and block size are derived, never stated twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    /// Short target name, used in diagnostics only.
    pub name: &'static str,
    /// Architecturally writable general-purpose registers. The priming
    /// region contains one register-initialization instruction per writable
    /// register.
    pub writable_registers: usize,
    /// General-purpose registers present in the simulator's dump, including
    /// any hardwired-zero register.
    pub dumped_registers: usize,
    /// Register-dump lines belonging to one instruction in the raw log.
    pub dump_lines_per_instruction: usize,
}

impl TargetSpec {
    /// The RH850 reference target: r0 hardwired to zero, r1..r31 writable,
    /// twelve dump lines per instruction.
    pub fn rh850() -> Self {
        Self {
            name: "rh850",
            writable_registers: 31,
            dumped_registers: 32,
            dump_lines_per_instruction: 12,
        }
    }

    pub fn with_writable_registers(mut self, count: usize) -> Self {
        self.writable_registers = count;
        self
    }

    pub fn with_dumped_registers(mut self, count: usize) -> Self {
        self.dumped_registers = count;
        self
    }

    pub fn with_dump_lines_per_instruction(mut self, count: usize) -> Self {
        self.dump_lines_per_instruction = count;
        self
    }

    /// Block layout of the normalized rendering: instruction label, program
    /// counter, status register, then every dumped general-purpose register.
    pub fn schema(&self) -> BlockSchema {
        let mut fields = Vec::with_capacity(3 + self.dumped_registers);
        fields.push(FieldSpec::new("instruction", FieldRule::Label));
        fields.push(FieldSpec::new("pc", FieldRule::Exact));
        fields.push(FieldSpec::new(
            "psw",
            FieldRule::Status {
                condition_mask: psw::CONDITION_MASK,
                saturation_bit: psw::SAT_BIT,
            },
        ));
        for reg in 0..self.dumped_registers {
            fields.push(FieldSpec::new(format!("r{reg}"), FieldRule::Exact));
        }
        BlockSchema::new(fields)
    }
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self::rh850()
    }
}
