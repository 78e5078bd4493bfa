//! Program status word layout.
//!
//! Flag assignments follow the RH850 PSW: condition flags in the low nibble,
//! control flags above. Only the condition nibble and the saturation bit take
//! part in trace comparison; the rest of the register is masked out because
//! the two trace sources run with different interrupt/exception context.

/// Zero flag.
pub const Z: u32 = 1 << 0;
/// Sign flag.
pub const S: u32 = 1 << 1;
/// Overflow flag.
pub const OV: u32 = 1 << 2;
/// Carry flag.
pub const CY: u32 = 1 << 3;
/// Saturation flag.
pub const SAT: u32 = 1 << 4;
/// Interrupt disable flag.
pub const ID: u32 = 1 << 5;
/// Exception pending flag.
pub const EP: u32 = 1 << 6;
/// NMI pending flag.
pub const NP: u32 = 1 << 7;

/// Mask covering the arithmetic condition flags (Z, S, OV, CY).
pub const CONDITION_MASK: u32 = Z | S | OV | CY;

/// Bit position of the saturation flag, for shift-and-mask extraction.
pub const SAT_BIT: u32 = 4;
