//! Memory layout for the Jolly VM
//!
//! The first nine bytes of memory are a control region shared between the
//! program and the machine.
//!
//! ```text
//! 0x000000  3  serialized program counter
//! 0x000003  1  primitive is ready flag
//! 0x000004  1  primitive call id
//! 0x000005  1  primitive result code
//! 0x000006  3  primitive result pointer
//! ```

use crate::{Address, MAX_ADDRESS};

/// Memory size: the full address space plus room for an instruction based at
/// the last address.
pub const MAX_MEMORY_SIZE: usize = MAX_ADDRESS as usize + 1 + 8;

pub const PC_ADDRESS: Address = 0x000000;
pub const PRIMITIVE_IS_READY_ADDRESS: Address = 0x000003;
pub const PRIMITIVE_CALL_ID_ADDRESS: Address = 0x000004;
pub const PRIMITIVE_RESULT_CODE_ADDRESS: Address = 0x000005;
pub const PRIMITIVE_RESULT_POINTER_ADDRESS: Address = 0x000006;

pub const PRIMITIVE_NOT_READY: u8 = 0;
pub const PRIMITIVE_READY: u8 = 1;

pub const PRIMITIVE_OK_RESULT_CODE: u8 = 0;
pub const PRIMITIVE_FAILED_RESULT_CODE: u8 = 1;

/// Primitive ids understood by the machine
pub mod primitive {
    pub const NOP: u8 = 0;
    pub const FAIL: u8 = 1;
    pub const PUT_CHAR: u8 = 2;
    pub const GET_CHAR: u8 = 3;
    pub const STOP: u8 = 4;
    pub const OPEN_FILE: u8 = 5;
    pub const CLOSE_FILE: u8 = 6;
    pub const IS_FILE_OPEN: u8 = 7;
    pub const EXTENDED: u8 = 255;
}
