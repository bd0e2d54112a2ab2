//! Reference Jolly virtual machine

use std::fs;
use std::path::Path;

use crate::error::{Result, RuntimeError};
use crate::machine::Machine;
use crate::primitive::{execute_primitive, IOHandler, PrimitiveOutcome};
use jolly_spec::memory::{
    MAX_MEMORY_SIZE, PC_ADDRESS, PRIMITIVE_CALL_ID_ADDRESS, PRIMITIVE_IS_READY_ADDRESS,
    PRIMITIVE_READY,
};
use jolly_spec::{decode_address, decode_instruction, encoding::check_span, Address};

/// VM configuration
#[derive(Debug, Clone)]
pub struct VMConfig {
    /// Size of the memory array in bytes
    pub memory_size: usize,

    /// Bytes served to the GET_CHAR primitive
    pub input: Vec<u8>,
}

impl Default for VMConfig {
    fn default() -> Self {
        Self {
            memory_size: MAX_MEMORY_SIZE,
            input: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VMStatus {
    Running,
    Stopped,
}

/// Byte-copy-jump machine
///
/// Each step copies `memory[from]` to `memory[to]` and continues at `jump`.
/// A pending primitive call is served before the instruction.
pub struct VM {
    memory: Vec<u8>,
    pc: Address,
    status: VMStatus,
    io: IOHandler,
}

impl VM {
    /// Create a machine with zeroed memory and pc 0
    pub fn new(config: VMConfig) -> Self {
        Self {
            memory: vec![0; config.memory_size],
            pc: 0,
            status: VMStatus::Running,
            io: IOHandler::new(config.input),
        }
    }

    /// Create a machine whose memory starts with `image`
    pub fn from_image(image: &[u8], config: VMConfig) -> Result<Self> {
        let mut vm = Self::new(config);
        vm.load_bytes(image)?;
        Ok(vm)
    }

    /// Replace memory with `image` (zero-filled past its end) and reload the pc
    pub fn load_bytes(&mut self, image: &[u8]) -> Result<()> {
        if image.len() > self.memory.len() {
            return Err(RuntimeError::ImageTooLarge {
                size: image.len(),
                max: self.memory.len(),
            });
        }
        self.memory.fill(0);
        self.memory[..image.len()].copy_from_slice(image);
        self.status = VMStatus::Running;
        self.reload_pc()?;
        tracing::debug!("loaded {} byte image, pc = {:#08x}", image.len(), self.pc);
        Ok(())
    }

    /// Load the pc from its serialized form at `PC_ADDRESS`
    pub fn reload_pc(&mut self) -> Result<()> {
        self.pc = decode_address(&self.memory, PC_ADDRESS)?;
        Ok(())
    }

    pub fn set_pc(&mut self, pc: Address) -> Result<()> {
        check_span(&self.memory, pc, 1)?;
        self.pc = pc;
        Ok(())
    }

    pub fn status(&self) -> VMStatus {
        self.status
    }

    pub fn is_stopped(&self) -> bool {
        self.status == VMStatus::Stopped
    }

    /// Bytes written by PUT_CHAR so far
    pub fn output(&self) -> &[u8] {
        self.io.outputs()
    }

    pub fn take_output(&mut self) -> Vec<u8> {
        self.io.take_outputs()
    }

    pub fn push_input(&mut self, bytes: &[u8]) {
        self.io.push_input(bytes);
    }
}

impl Machine for VM {
    fn load_image(&mut self, path: &Path) -> Result<()> {
        let image = fs::read(path)?;
        self.load_bytes(&image)
    }

    fn pc(&self) -> Address {
        self.pc
    }

    fn step(&mut self) -> Result<()> {
        if self.is_stopped() {
            return Err(RuntimeError::Stopped { pc: self.pc });
        }

        if self.is_primitive_ready()
            && execute_primitive(&mut self.memory, &mut self.io)? == PrimitiveOutcome::Stop
        {
            self.status = VMStatus::Stopped;
            tracing::debug!("machine stopped at pc {:#08x}", self.pc);
            return Ok(());
        }

        let instr = decode_instruction(&self.memory, self.pc)?;
        let from = check_span(&self.memory, instr.from, 1)?;
        let to = check_span(&self.memory, instr.to, 1)?;
        tracing::trace!(
            "pc={:#08x} copy [{:#08x}] -> [{:#08x}], jump {:#08x}",
            self.pc,
            instr.from,
            instr.to,
            instr.jump
        );

        self.memory[to] = self.memory[from];
        self.pc = instr.jump;
        Ok(())
    }

    fn is_primitive_ready(&self) -> bool {
        self.memory.get(PRIMITIVE_IS_READY_ADDRESS as usize) == Some(&PRIMITIVE_READY)
    }

    fn primitive_call_id(&self) -> u8 {
        self.memory
            .get(PRIMITIVE_CALL_ID_ADDRESS as usize)
            .copied()
            .unwrap_or_default()
    }

    fn memory(&self) -> &[u8] {
        &self.memory
    }

    fn memory_mut(&mut self) -> &mut [u8] {
        &mut self.memory
    }
}
