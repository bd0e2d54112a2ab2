//! # Jolly VM Specification
//!
//! Data model shared by the Jolly runtime and the ijolly monitor.
//!
//! ## Key Features
//! - 24-bit address space, addresses stored as 3 big-endian bytes
//! - Single instruction kind: copy one byte, then jump
//! - 9-byte instructions `[from:3][to:3][jump:3]`
//! - Memory-mapped control region at address 0 (pc, primitive call registers)

pub mod error;
pub mod instruction;
pub mod memory;
pub mod encoding;

pub use error::{JollyError, Result};
pub use instruction::Instruction;
pub use encoding::{decode_address, decode_instruction, encode_address, encode_instruction};

/// Address type (24-bit, stored in the low bits of a u32)
pub type Address = u32;

/// A single memory cell
pub type Byte = u8;

/// Number of significant bits in an address
pub const ADDRESS_BITS: u32 = 24;

/// Largest representable address: 0xFFFFFF
pub const MAX_ADDRESS: Address = (1 << ADDRESS_BITS) - 1;

/// Bytes used to store one address
pub const ADDRESS_SIZE: usize = 3;

/// Bytes used to store one instruction
pub const INSTRUCTION_SIZE: usize = 3 * ADDRESS_SIZE;
