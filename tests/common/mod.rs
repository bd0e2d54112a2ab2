//! Images shared by the end-to-end tests

#![allow(dead_code)]

use jolly_spec::memory::*;
use jolly_spec::{encode_address, encode_instruction, Address, Instruction, INSTRUCTION_SIZE};

pub const ENTRY: Address = 0x100;
pub const IMAGE_SIZE: usize = 0x400;

/// Address of the `index`th instruction of a program placed at `ENTRY`
pub fn slot(index: usize) -> Address {
    ENTRY + (index * INSTRUCTION_SIZE) as Address
}

fn assemble(image: &mut [u8], program: &[Instruction]) {
    for (i, instr) in program.iter().enumerate() {
        encode_instruction(image, slot(i), instr).unwrap();
    }
    encode_address(image, PC_ADDRESS, ENTRY).unwrap();
}

/// Prints "hi" through PUT_CHAR, then STOP
///
/// Each character takes three instructions: point the result pointer at the
/// character, select PUT_CHAR, raise the ready flag.
pub fn hello_image() -> Vec<u8> {
    let mut image = vec![0u8; IMAGE_SIZE];
    let one = 0x300;
    let put_char = 0x301;
    let stop = 0x302;
    image[one as usize] = PRIMITIVE_READY;
    image[put_char as usize] = primitive::PUT_CHAR;
    image[stop as usize] = primitive::STOP;
    image[0x310] = b'h';
    image[0x311] = b'i';
    // low bytes of the pointers to 'h' and 'i'
    image[0x320] = 0x10;
    image[0x321] = 0x11;
    encode_address(&mut image, PRIMITIVE_RESULT_POINTER_ADDRESS, 0x300).unwrap();

    let low = PRIMITIVE_RESULT_POINTER_ADDRESS + 2;
    assemble(
        &mut image,
        &[
            Instruction::new(0x320, low, slot(1)),
            Instruction::new(put_char, PRIMITIVE_CALL_ID_ADDRESS, slot(2)),
            Instruction::new(one, PRIMITIVE_IS_READY_ADDRESS, slot(3)),
            Instruction::new(0x321, low, slot(4)),
            Instruction::new(put_char, PRIMITIVE_CALL_ID_ADDRESS, slot(5)),
            Instruction::new(one, PRIMITIVE_IS_READY_ADDRESS, slot(6)),
            Instruction::new(stop, PRIMITIVE_CALL_ID_ADDRESS, slot(7)),
            Instruction::new(one, PRIMITIVE_IS_READY_ADDRESS, slot(8)),
            Instruction::new(0, 0x3FF, slot(8)),
        ],
    );
    image
}

/// A single instruction jumping to itself forever
pub fn spin_image() -> Vec<u8> {
    let mut image = vec![0u8; IMAGE_SIZE];
    assemble(&mut image, &[Instruction::new(0x300, 0x301, ENTRY)]);
    image
}

pub const HELLO_LABELS: &str = "\
# hello program
main, 0x000100
select_h, 0x000100
raise_h, 0x000112
raise_i, 0x00012D
halt, 0x000148
";
