//! # Address and Instruction Encoding
//!
//! Addresses are stored as 3 bytes, most significant byte first. An
//! instruction is three consecutive addresses.
//!
//! ```text
//! address:     [b0][b1][b2]          value = b0 << 16 | b1 << 8 | b2
//! instruction: [from:3][to:3][jump:3]
//! ```
//!
//! All functions check bounds (and, for encoding, the value range) before
//! touching memory, so a failed call never leaves a partial write behind.

use crate::error::{JollyError, Result};
use crate::instruction::{Instruction, FROM_OFFSET, JUMP_OFFSET, TO_OFFSET};
use crate::{Address, ADDRESS_SIZE, INSTRUCTION_SIZE, MAX_ADDRESS};

/// Byte shift of the most significant address byte
pub const HIGH_SHIFT: u32 = 16;

/// Byte shift of the middle address byte
pub const MIDDLE_SHIFT: u32 = 8;

/// Mask for a single byte
pub const BYTE_MASK: u32 = 0xFF;

/// Check that `len` bytes starting at `addr` lie inside `memory`
#[inline]
pub fn check_span(memory: &[u8], addr: Address, len: usize) -> Result<usize> {
    let start = addr as usize;
    match start.checked_add(len) {
        Some(end) if end <= memory.len() => Ok(start),
        _ => Err(JollyError::OutOfRange {
            address: start as u64 + len.saturating_sub(1) as u64,
        }),
    }
}

/// Check that `value` is representable as an address
#[inline]
pub fn check_address_value(value: u64) -> Result<Address> {
    if value > MAX_ADDRESS as u64 {
        return Err(JollyError::ValueOutOfRange {
            value,
            max: MAX_ADDRESS as u64,
        });
    }
    Ok(value as Address)
}

/// Split an address into its 3 stored bytes
#[inline]
pub const fn address_to_bytes(value: Address) -> [u8; ADDRESS_SIZE] {
    [
        ((value >> HIGH_SHIFT) & BYTE_MASK) as u8,
        ((value >> MIDDLE_SHIFT) & BYTE_MASK) as u8,
        (value & BYTE_MASK) as u8,
    ]
}

/// Join 3 stored bytes into an address
#[inline]
pub const fn address_from_bytes(bytes: [u8; ADDRESS_SIZE]) -> Address {
    (bytes[0] as Address) << HIGH_SHIFT | (bytes[1] as Address) << MIDDLE_SHIFT | bytes[2] as Address
}

/// Read the address stored at `addr`
pub fn decode_address(memory: &[u8], addr: Address) -> Result<Address> {
    let start = check_span(memory, addr, ADDRESS_SIZE)?;
    Ok(address_from_bytes([
        memory[start],
        memory[start + 1],
        memory[start + 2],
    ]))
}

/// Store `value` as an address at `addr`
///
/// Values wider than 24 bits are rejected with [`JollyError::ValueOutOfRange`].
pub fn encode_address(memory: &mut [u8], addr: Address, value: u32) -> Result<()> {
    let value = check_address_value(value as u64)?;
    let start = check_span(memory, addr, ADDRESS_SIZE)?;
    memory[start..start + ADDRESS_SIZE].copy_from_slice(&address_to_bytes(value));
    Ok(())
}

/// Read the instruction based at `addr`
pub fn decode_instruction(memory: &[u8], addr: Address) -> Result<Instruction> {
    check_span(memory, addr, INSTRUCTION_SIZE)?;
    Ok(Instruction {
        from: decode_address(memory, addr + FROM_OFFSET as Address)?,
        to: decode_address(memory, addr + TO_OFFSET as Address)?,
        jump: decode_address(memory, addr + JUMP_OFFSET as Address)?,
    })
}

/// Store `instr` at `addr`, field by field
pub fn encode_instruction(memory: &mut [u8], addr: Address, instr: &Instruction) -> Result<()> {
    for (_, value) in instr.fields() {
        check_address_value(value as u64)?;
    }
    check_span(memory, addr, INSTRUCTION_SIZE)?;
    for (offset, value) in instr.fields() {
        encode_address(memory, addr + offset as Address, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_address_big_endian() {
        let memory = [0x12, 0x34, 0x56, 0x78];
        assert_eq!(decode_address(&memory, 0).unwrap(), 0x123456);
        assert_eq!(decode_address(&memory, 1).unwrap(), 0x345678);
    }

    #[test]
    fn test_encode_address() {
        let mut memory = [0u8; 4];
        encode_address(&mut memory, 1, 0xABCDEF).unwrap();
        assert_eq!(memory, [0x00, 0xAB, 0xCD, 0xEF]);
    }

    #[test]
    fn test_encode_address_rejects_wide_value() {
        let mut memory = [0u8; 3];
        let err = encode_address(&mut memory, 0, 0x1000000).unwrap_err();
        assert_eq!(
            err,
            JollyError::ValueOutOfRange {
                value: 0x1000000,
                max: 0xFFFFFF
            }
        );
        assert_eq!(memory, [0, 0, 0]);
    }

    #[test]
    fn test_decode_address_out_of_range() {
        let memory = [0u8; 4];
        assert_eq!(
            decode_address(&memory, 2).unwrap_err(),
            JollyError::OutOfRange { address: 4 }
        );
    }

    #[test]
    fn test_decode_instruction() {
        let memory = [
            0x00, 0x00, 0x10, // from
            0x00, 0x00, 0x20, // to
            0x00, 0x00, 0x30, // jump
        ];
        assert_eq!(
            decode_instruction(&memory, 0).unwrap(),
            Instruction::new(0x10, 0x20, 0x30)
        );
    }

    #[test]
    fn test_encode_instruction_is_all_or_nothing() {
        let mut memory = [0u8; 9];
        let instr = Instruction::new(1, 2, 0x1000000);
        assert!(encode_instruction(&mut memory, 0, &instr).is_err());
        assert_eq!(memory, [0u8; 9]);

        let mut short = [0u8; 8];
        let instr = Instruction::new(1, 2, 3);
        assert!(encode_instruction(&mut short, 0, &instr).is_err());
        assert_eq!(short, [0u8; 8]);
    }

    #[test]
    fn test_span_overflow_is_out_of_range() {
        let memory = [0u8; 4];
        assert!(check_span(&memory, u32::MAX, ADDRESS_SIZE).is_err());
    }
}
