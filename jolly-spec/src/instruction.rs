//! Jolly instruction
//!
//! The VM has exactly one instruction: copy the byte at `from` to `to`, then
//! continue at `jump`.
//!
//! ```text
//! Offset  Size  Field
//! ─────────────────────
//! 0x00    3     from
//! 0x03    3     to
//! 0x06    3     jump
//! ```

use crate::{Address, ADDRESS_SIZE};

/// Offset of the `from` field inside an instruction
pub const FROM_OFFSET: usize = 0;

/// Offset of the `to` field inside an instruction
pub const TO_OFFSET: usize = ADDRESS_SIZE;

/// Offset of the `jump` field inside an instruction
pub const JUMP_OFFSET: usize = 2 * ADDRESS_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Instruction {
    /// Address of the byte to copy
    pub from: Address,
    /// Address the byte is copied to
    pub to: Address,
    /// Address of the next instruction
    pub jump: Address,
}

impl Instruction {
    pub const fn new(from: Address, to: Address, jump: Address) -> Self {
        Self { from, to, jump }
    }

    /// Fields in storage order
    pub const fn fields(&self) -> [(usize, Address); 3] {
        [
            (FROM_OFFSET, self.from),
            (TO_OFFSET, self.to),
            (JUMP_OFFSET, self.jump),
        ]
    }

    /// True when executing this instruction stores into `address`
    pub const fn writes_to(&self, address: Address) -> bool {
        self.to == address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_offsets() {
        assert_eq!(FROM_OFFSET, 0);
        assert_eq!(TO_OFFSET, 3);
        assert_eq!(JUMP_OFFSET, 6);
    }

    #[test]
    fn test_fields_order() {
        let instr = Instruction::new(1, 2, 3);
        assert_eq!(instr.fields(), [(0, 1), (3, 2), (6, 3)]);
    }

    #[test]
    fn test_writes_to() {
        let instr = Instruction::new(0x10, 0x20, 0x30);
        assert!(instr.writes_to(0x20));
        assert!(!instr.writes_to(0x10));
    }
}
