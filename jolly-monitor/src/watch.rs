//! Memory watchers
//!
//! A watcher names a region of memory that is shown after each stepping
//! command.

use crate::error::{MonitorError, Result};
use crate::renderer::Radix;
use jolly_spec::encoding::check_span;
use jolly_spec::memory::{
    PC_ADDRESS, PRIMITIVE_CALL_ID_ADDRESS, PRIMITIVE_IS_READY_ADDRESS,
    PRIMITIVE_RESULT_CODE_ADDRESS, PRIMITIVE_RESULT_POINTER_ADDRESS,
};
use jolly_spec::Address;

/// Watchers covering the VM control region: (name, address, length)
pub const VM_VARIABLE_WATCHERS: [(&str, Address, u32); 5] = [
    ("serialized_pc", PC_ADDRESS, 3),
    ("primitive_is_ready", PRIMITIVE_IS_READY_ADDRESS, 1),
    ("primitive_call_id", PRIMITIVE_CALL_ID_ADDRESS, 1),
    ("primitive_result_code", PRIMITIVE_RESULT_CODE_ADDRESS, 1),
    ("primitive_result_pointer", PRIMITIVE_RESULT_POINTER_ADDRESS, 3),
];

/// Padding used for the watcher address
const ADDRESS_PADDING: usize = 8;

/// Padding used for each watched byte
const BYTE_PADDING: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryWatcher {
    pub name: String,
    pub address: Address,
    pub length: u32,
}

impl MemoryWatcher {
    /// Fails when `length` is zero
    pub fn new(name: impl Into<String>, address: Address, length: u32) -> Result<Self> {
        if length == 0 {
            return Err(MonitorError::invalid_argument(
                "watch",
                "length must be at least 1",
            ));
        }
        Ok(Self {
            name: name.into(),
            address,
            length,
        })
    }

    /// Last watched address (inclusive)
    pub fn end_address(&self) -> u64 {
        (self.address as u64 + self.length as u64).saturating_sub(1)
    }

    /// The watched bytes
    pub fn extract<'m>(&self, memory: &'m [u8]) -> jolly_spec::Result<&'m [u8]> {
        let start = check_span(memory, self.address, self.length as usize)?;
        Ok(&memory[start..start + self.length as usize])
    }

    /// Watched bytes as 2-digit, unprefixed numbers
    pub fn render_bytes(&self, memory: &[u8], radix: Radix) -> jolly_spec::Result<String> {
        Ok(self
            .extract(memory)?
            .iter()
            .map(|&b| radix.render(b as u64, BYTE_PADDING, Some("")))
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// `"name" address: bytes`
    pub fn render(&self, memory: &[u8], radix: Radix) -> jolly_spec::Result<String> {
        Ok(format!(
            "\"{}\" {}: {}",
            self.name,
            radix.render_padded(self.address as u64, ADDRESS_PADDING),
            self.render_bytes(memory, radix)?
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct WatchList {
    watchers: Vec<MemoryWatcher>,
}

impl WatchList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a watcher; names may repeat
    pub fn add(&mut self, name: impl Into<String>, address: Address, length: u32) -> Result<()> {
        let watcher = MemoryWatcher::new(name, address, length)?;
        tracing::debug!(
            "watching {:?} at {:#08x}..={:#08x}",
            watcher.name,
            watcher.address,
            watcher.end_address()
        );
        self.watchers.push(watcher);
        Ok(())
    }

    /// Add the VM control region watchers
    pub fn add_vm_variables(&mut self) -> Result<()> {
        for (name, address, length) in VM_VARIABLE_WATCHERS {
            self.add(name, address, length)?;
        }
        Ok(())
    }

    /// Most recently added watcher called `name`
    pub fn get(&self, name: &str) -> Option<&MemoryWatcher> {
        self.watchers.iter().rev().find(|w| w.name == name)
    }

    pub fn has_any(&self) -> bool {
        !self.watchers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.watchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watchers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemoryWatcher> {
        self.watchers.iter()
    }

    /// One rendered line per watcher, in insertion order
    pub fn list(&self, memory: &[u8], radix: Radix) -> Result<Vec<String>> {
        self.watchers
            .iter()
            .map(|w| w.render(memory, radix).map_err(MonitorError::from))
            .collect()
    }
}
