//! Per-instruction architectural state as recovered from the simulator log.

/// One named register field, kept exactly as logged.
///
/// Extraction performs no numeric validation; garbage values flow through to
/// the comparator, where they surface as mismatches instead of aborting the
/// run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterField {
    pub name: String,
    pub value: String,
}

/// The full observable state at one retired instruction boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterSnapshot {
    /// Ordinal position in the trace, contiguous from 0.
    pub index: usize,
    /// Instruction line as logged: address, raw bytes, mnemonic, operands.
    /// Reporting context only, never compared numerically.
    pub label: String,
    /// Dumped register fields in log order (`pc`, `psw`, `r0`.. on the
    /// reference target).
    pub fields: Vec<RegisterField>,
}

impl RegisterSnapshot {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
            fields: Vec::new(),
        }
    }

    /// Raw value of a named field, if the dump carried it.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    /// Program counter, where the logged value parses as hex.
    pub fn pc(&self) -> Option<u32> {
        self.value_of("pc").and_then(parse_hex)
    }

    /// Status register, where the logged value parses as hex.
    pub fn status(&self) -> Option<u32> {
        self.value_of("psw").and_then(parse_hex)
    }

    /// Numbered general-purpose register, where the logged value parses as
    /// hex.
    pub fn gpr(&self, number: usize) -> Option<u32> {
        self.value_of(&format!("r{number}")).and_then(parse_hex)
    }
}

/// Parse a `0x`-prefixed or bare hex token.
pub fn parse_hex(token: &str) -> Option<u32> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u32::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> RegisterSnapshot {
        let mut snap = RegisterSnapshot::new(3, "0x100: 12345678 mov r5,r10");
        for (name, value) in [
            ("pc", "0x00000100"),
            ("psw", "0x00000011"),
            ("r0", "0x00000000"),
            ("r10", "0xdeadbeef"),
            ("r11", "bogus"),
        ] {
            snap.fields.push(RegisterField {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        snap
    }

    #[test]
    fn typed_accessors_parse_well_formed_values() {
        let snap = snapshot();
        assert_eq!(snap.pc(), Some(0x100));
        assert_eq!(snap.status(), Some(0x11));
        assert_eq!(snap.gpr(10), Some(0xdead_beef));
    }

    #[test]
    fn garbage_and_missing_fields_read_as_none() {
        let snap = snapshot();
        assert_eq!(snap.gpr(11), None);
        assert_eq!(snap.gpr(31), None);
        assert_eq!(snap.value_of("r11"), Some("bogus"));
    }

    #[test]
    fn parse_hex_accepts_prefixed_and_bare_tokens() {
        assert_eq!(parse_hex("0x1f"), Some(0x1f));
        assert_eq!(parse_hex("1F"), Some(0x1f));
        assert_eq!(parse_hex("0x"), None);
        assert_eq!(parse_hex("xyz"), None);
    }
}
