//! Stepping control
//!
//! Every search loop here is unbounded on purpose: a predicate that never
//! holds keeps stepping until the operator raises the [`Interrupt`]. The flag
//! is polled before each `step()`, so a loop always stops between two
//! instructions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::Result;
use crate::labels::LabelTable;
use crate::renderer::Radix;
use jolly_runtime::Machine;
use jolly_spec::{decode_instruction, Address};

/// Padding used when rendering the pc
pub const PC_PADDING: usize = 8;

/// Cancellation flag shared with whoever can interrupt the monitor
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Clear the flag, returning whether it was raised
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

/// What a stepping operation did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub steps: u64,
    pub interrupted: bool,
    /// Trace lines, one per executed step when tracing
    pub trace: Vec<String>,
}

/// Renders trace lines: labels at the pc, then the pc
#[derive(Debug, Clone, Copy)]
pub struct Tracer<'a> {
    pub labels: &'a LabelTable,
    pub radix: Radix,
}

impl<'a> Tracer<'a> {
    pub fn new(labels: &'a LabelTable, radix: Radix) -> Self {
        Self { labels, radix }
    }

    pub fn line(&self, pc: Address) -> String {
        let pc_text = self.radix.render_padded(pc as u64, PC_PADDING);
        let names = self.labels.labels_at(pc);
        if names.is_empty() {
            pc_text
        } else {
            format!("{}: {}", names.join(", "), pc_text)
        }
    }
}

pub struct ExecutionController<'a, M: Machine + ?Sized> {
    machine: &'a mut M,
    interrupt: &'a Interrupt,
}

impl<'a, M: Machine + ?Sized> ExecutionController<'a, M> {
    pub fn new(machine: &'a mut M, interrupt: &'a Interrupt) -> Self {
        Self { machine, interrupt }
    }

    /// Execute `count` instructions
    pub fn step_count(&mut self, count: u64, tracer: Option<&Tracer<'_>>) -> Result<StepOutcome> {
        let mut outcome = StepOutcome::default();
        for _ in 0..count {
            if self.interrupted(&mut outcome) {
                break;
            }
            if let Some(tracer) = tracer {
                outcome.trace.push(tracer.line(self.machine.pc()));
            }
            self.machine.step()?;
            outcome.steps += 1;
        }
        tracing::debug!("stepped {} of {} instructions", outcome.steps, count);
        Ok(outcome)
    }

    /// Step until a primitive call is ready (with id `primitive_id`, if given)
    pub fn step_until_primitive_ready(&mut self, primitive_id: Option<u8>) -> Result<StepOutcome> {
        let outcome = self.step_until(|m| {
            Ok(m.is_primitive_ready()
                && primitive_id.map_or(true, |id| m.primitive_call_id() == id))
        })?;
        tracing::debug!("primitive wait ({:?}) took {} steps", primitive_id, outcome.steps);
        Ok(outcome)
    }

    /// Step until the pc equals `target`
    pub fn step_until_program_counter_equals(&mut self, target: Address) -> Result<StepOutcome> {
        let outcome = self.step_until(|m| Ok(m.pc() == target))?;
        tracing::debug!("reached {:#08x} after {} steps", target, outcome.steps);
        Ok(outcome)
    }

    /// Step until the instruction based at `target` stores into `target`
    ///
    /// Only that one self-targeting pattern is detected; an instruction
    /// elsewhere whose destination is `target` does not stop the loop.
    pub fn step_until_about_to_write(&mut self, target: Address) -> Result<StepOutcome> {
        let outcome = self.step_until(|m| {
            Ok(decode_instruction(m.memory(), target)?.writes_to(target))
        })?;
        tracing::debug!("write watch {:#08x} took {} steps", target, outcome.steps);
        Ok(outcome)
    }

    fn step_until(&mut self, mut done: impl FnMut(&M) -> Result<bool>) -> Result<StepOutcome> {
        let mut outcome = StepOutcome::default();
        while !self.interrupted(&mut outcome) && !done(&*self.machine)? {
            self.machine.step()?;
            outcome.steps += 1;
        }
        Ok(outcome)
    }

    fn interrupted(&self, outcome: &mut StepOutcome) -> bool {
        if self.interrupt.take() {
            tracing::warn!("interrupted after {} steps", outcome.steps);
            outcome.interrupted = true;
        }
        outcome.interrupted
    }
}
