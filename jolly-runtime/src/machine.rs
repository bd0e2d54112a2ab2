//! VM boundary used by the monitor

use std::path::Path;

use crate::error::Result;
use jolly_spec::Address;

/// A byte-addressed Jolly machine
///
/// The monitor drives a machine exclusively through this trait. `step`
/// executes exactly one instruction; everything else is a query or a raw
/// memory access.
pub trait Machine {
    /// Replace memory with the image stored at `path` and reload the pc
    fn load_image(&mut self, path: &Path) -> Result<()>;

    /// Current program counter
    fn pc(&self) -> Address;

    /// Execute one instruction
    fn step(&mut self) -> Result<()>;

    /// True when a primitive call is pending
    fn is_primitive_ready(&self) -> bool;

    /// Id of the pending (or last requested) primitive call
    fn primitive_call_id(&self) -> u8;

    fn memory(&self) -> &[u8];

    fn memory_mut(&mut self) -> &mut [u8];
}
