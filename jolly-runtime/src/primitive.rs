//! Primitive calls
//!
//! A program requests a primitive by writing its id at
//! `PRIMITIVE_CALL_ID_ADDRESS` and `PRIMITIVE_READY` at
//! `PRIMITIVE_IS_READY_ADDRESS`. The machine runs the primitive before the
//! next instruction, stores the result code, then resets both registers.
//!
//! Implemented ids:
//! - NOP (0): succeed
//! - FAIL (1): fail
//! - PUT_CHAR (2): write the byte at the result pointer to the output tape
//! - GET_CHAR (3): store the next input byte at the result pointer
//! - STOP (4): stop the machine
//!
//! Any other id fails.

use std::collections::VecDeque;

use crate::error::Result;
use jolly_spec::memory::{
    primitive, PRIMITIVE_CALL_ID_ADDRESS, PRIMITIVE_FAILED_RESULT_CODE, PRIMITIVE_IS_READY_ADDRESS,
    PRIMITIVE_NOT_READY, PRIMITIVE_OK_RESULT_CODE, PRIMITIVE_RESULT_CODE_ADDRESS,
    PRIMITIVE_RESULT_POINTER_ADDRESS,
};
use jolly_spec::{decode_address, encoding::check_span, ADDRESS_SIZE};

/// Result of running one primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveOutcome {
    Ok,
    Failed,
    Stop,
}

impl PrimitiveOutcome {
    pub fn result_code(self) -> u8 {
        match self {
            PrimitiveOutcome::Ok | PrimitiveOutcome::Stop => PRIMITIVE_OK_RESULT_CODE,
            PrimitiveOutcome::Failed => PRIMITIVE_FAILED_RESULT_CODE,
        }
    }
}

/// Byte tapes backing the character primitives
#[derive(Debug, Clone, Default)]
pub struct IOHandler {
    inputs: VecDeque<u8>,
    outputs: Vec<u8>,
}

impl IOHandler {
    pub fn new(inputs: Vec<u8>) -> Self {
        IOHandler {
            inputs: inputs.into(),
            outputs: Vec::new(),
        }
    }

    pub fn read(&mut self) -> Option<u8> {
        self.inputs.pop_front()
    }

    pub fn write(&mut self, value: u8) {
        self.outputs.push(value);
    }

    pub fn push_input(&mut self, bytes: &[u8]) {
        self.inputs.extend(bytes.iter().copied());
    }

    pub fn outputs(&self) -> &[u8] {
        &self.outputs
    }

    pub fn take_outputs(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.outputs)
    }
}

/// Run the primitive currently requested in `memory`
///
/// Writes the result code and resets the call registers. The caller decides
/// what to do with [`PrimitiveOutcome::Stop`].
pub fn execute_primitive(memory: &mut [u8], io: &mut IOHandler) -> Result<PrimitiveOutcome> {
    check_span(memory, PRIMITIVE_RESULT_POINTER_ADDRESS, ADDRESS_SIZE)?;
    let id = memory[PRIMITIVE_CALL_ID_ADDRESS as usize];

    let outcome = match id {
        primitive::NOP => PrimitiveOutcome::Ok,
        primitive::PUT_CHAR => {
            let pointer = result_pointer(memory)?;
            io.write(memory[pointer]);
            PrimitiveOutcome::Ok
        }
        primitive::GET_CHAR => {
            let pointer = result_pointer(memory)?;
            match io.read() {
                Some(byte) => {
                    memory[pointer] = byte;
                    PrimitiveOutcome::Ok
                }
                None => PrimitiveOutcome::Failed,
            }
        }
        primitive::STOP => PrimitiveOutcome::Stop,
        _ => PrimitiveOutcome::Failed,
    };
    tracing::trace!("primitive {} -> {:?}", id, outcome);

    memory[PRIMITIVE_RESULT_CODE_ADDRESS as usize] = outcome.result_code();
    memory[PRIMITIVE_CALL_ID_ADDRESS as usize] = primitive::NOP;
    memory[PRIMITIVE_IS_READY_ADDRESS as usize] = PRIMITIVE_NOT_READY;

    Ok(outcome)
}

fn result_pointer(memory: &[u8]) -> Result<usize> {
    let pointer = decode_address(memory, PRIMITIVE_RESULT_POINTER_ADDRESS)?;
    Ok(check_span(memory, pointer, 1)?)
}
