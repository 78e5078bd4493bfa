//! Named layout of one rendered snapshot block.
//!
//! A block is the fixed-size group of consecutive lines that renders one
//! instruction's architectural state. Instead of hard-coding "position 2 is
//! the status register", the layout is data: an ordered list of fields, each
//! carrying the rule used to compare it between the simulator and hardware
//! renderings. Adapting to a different register file is a schema change, not
//! a comparator change.

/// How one field of a snapshot block is compared between sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Echoed for diagnostic context, never compared.
    Label,
    /// The value portion after each source's separator must be textually
    /// equal.
    Exact,
    /// Status-register rule: both values are parsed as hex integers, the
    /// masked condition flags must be equal, and the single saturation bit
    /// must be equal. Mask and bit position are data, not code.
    Status {
        condition_mask: u32,
        saturation_bit: u32,
    },
}

/// One field of a snapshot block: its name and its comparison rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub rule: FieldRule,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, rule: FieldRule) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }
}

/// Ordered field layout of one rendered block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSchema {
    fields: Vec<FieldSpec>,
}

impl BlockSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Number of lines in one rendered block.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at a line position within the block.
    pub fn field(&self, position: usize) -> &FieldSpec {
        &self.fields[position]
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_index_in_declaration_order() {
        let schema = BlockSchema::new(vec![
            FieldSpec::new("instruction", FieldRule::Label),
            FieldSpec::new("pc", FieldRule::Exact),
        ]);
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.field(0).name, "instruction");
        assert_eq!(schema.field(1).rule, FieldRule::Exact);
    }
}
