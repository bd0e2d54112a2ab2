//! # Jolly Runtime
//!
//! The boundary between the ijolly monitor and a Jolly virtual machine, plus a
//! reference software implementation of that boundary.
//!
//! ## Features
//!
//! - **[`Machine`]**: load an image, read the pc, execute one instruction,
//!   query primitive-call readiness and id, access raw memory
//! - **[`VM`]**: byte-copy-jump machine with the built-in primitives
//!   (nop, fail, put char, get char, stop)
//!
//! ## Example
//!
//! ```rust
//! use jolly_runtime::{Machine, VM, VMConfig};
//! use jolly_spec::{encode_address, encode_instruction, Instruction};
//!
//! let mut vm = VM::new(VMConfig::default());
//! encode_instruction(vm.memory_mut(), 0x100, &Instruction::new(0x200, 0x201, 0x100)).unwrap();
//! encode_address(vm.memory_mut(), 0, 0x100).unwrap();
//! vm.reload_pc().unwrap();
//!
//! vm.step().unwrap();
//! assert_eq!(vm.pc(), 0x100);
//! ```

pub mod error;
pub mod machine;
pub mod primitive;
pub mod vm;

pub use error::{RuntimeError, Result};
pub use machine::Machine;
pub use primitive::{IOHandler, PrimitiveOutcome};
pub use vm::{VM, VMConfig, VMStatus};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        let _ = VMConfig::default();
        let _ = VMStatus::Running;
        let _ = PrimitiveOutcome::Ok;
    }

    #[test]
    fn test_vm_is_a_machine() {
        fn assert_machine<M: Machine>(_: &M) {}
        let vm = VM::new(VMConfig::default());
        assert_machine(&vm);
    }
}
