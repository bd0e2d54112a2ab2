//! The monitor facade
//!
//! [`Debugger`] owns a [`Machine`] together with the monitor state (radix,
//! trace flag, watchers, labels, macros) and exposes one method per command.
//! Every command returns the text to show, which may be empty.

use std::path::Path;

use crate::command::{parse_line, Argument};
use crate::control::{ExecutionController, Interrupt, StepOutcome, Tracer, PC_PADDING};
use crate::error::{MonitorError, Result};
use crate::labels::{Label, LabelTable};
use crate::macros::MacroRegistry;
use crate::memory_view::{HexDump, MemoryView, DEFAULT_HEXDUMP_LINES};
use crate::renderer::Radix;
use crate::watch::WatchList;
use jolly_runtime::Machine;
use jolly_spec::encoding::check_address_value;
use jolly_spec::{Address, Instruction};

const BYTE_PADDING: usize = 4;
const ADDRESS_PADDING: usize = 8;
const PRIMITIVE_ID_PADDING: usize = 2;

/// Command table: (name, synopsis, summary)
pub const COMMANDS: &[(&str, &str, &str)] = &[
    ("dec", "dec", "Print integers in decimal"),
    ("hex", "hex", "Print integers in hexadecimal"),
    ("next", "next [count]", "Execute count instructions (default 1)"),
    ("nextprim", "nextprim [primitive_id]", "Run until a primitive call is ready"),
    ("nextupto", "nextupto address", "Run until the pc reaches address"),
    ("nextwrite", "nextwrite address", "Run until the instruction at address writes to address"),
    ("trace", "trace [on|off]", "Print each pc while stepping with next"),
    ("pc", "pc", "Print the program counter"),
    ("primready", "primready", "Print whether a primitive call is ready"),
    ("prim", "prim", "Print the primitive call id"),
    ("load", "load path", "Load an image into memory"),
    ("readb", "readb address", "Read the byte at address"),
    ("reada", "reada address", "Read the address (3 bytes) at address"),
    ("readw", "readw address", "Read the word (3 bytes) at address"),
    ("readi", "readi address", "Read the instruction (9 bytes) at address"),
    ("writeb", "writeb address byte", "Write a byte"),
    ("writea", "writea address value", "Write an address (3 bytes)"),
    ("writei", "writei address from to jump", "Write an instruction (9 bytes)"),
    ("hexdump", "hexdump address [lines]", "Hex dump from the line containing address (default 16 lines)"),
    ("hexdumpi", "hexdumpi pointer [lines]", "Hex dump at the address stored at pointer"),
    ("watch", "watch name address [length]", "Show length bytes at address after each step command"),
    ("watch_vm_vars", "watch_vm_vars", "Watch the VM control region"),
    ("watchers", "watchers", "Show all watchers"),
    ("labels", "labels", "List labels"),
    ("label", "label name", "Print the address of a label"),
    ("defm", "defm name command...", "Define a macro"),
    ("callm", "callm name", "Run a macro"),
    ("macros", "macros", "List macros"),
    ("help", "help [command]", "Show help"),
];

/// Initial monitor settings
#[derive(Debug, Clone, Copy, Default)]
pub struct DebuggerConfig {
    pub radix: Radix,
    pub trace: bool,
}

/// Formats the highlighted byte of a hex dump
pub type Emphasis = fn(&str) -> String;

fn bracket(text: &str) -> String {
    format!("[{}]", text)
}

pub struct Debugger<M: Machine> {
    machine: M,
    radix: Radix,
    trace: bool,
    watchers: WatchList,
    labels: LabelTable,
    macros: MacroRegistry,
    interrupt: Interrupt,
    emphasis: Emphasis,
}

impl<M: Machine> Debugger<M> {
    pub fn new(machine: M, config: DebuggerConfig) -> Self {
        Self {
            machine,
            radix: config.radix,
            trace: config.trace,
            watchers: WatchList::new(),
            labels: LabelTable::new(),
            macros: MacroRegistry::new(),
            interrupt: Interrupt::new(),
            emphasis: bracket,
        }
    }

    pub fn machine(&self) -> &M {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut M {
        &mut self.machine
    }

    /// Flag that stops the running step loop when raised
    pub fn interrupt(&self) -> &Interrupt {
        &self.interrupt
    }

    pub fn set_emphasis(&mut self, emphasis: Emphasis) {
        self.emphasis = emphasis;
    }

    pub fn radix(&self) -> Radix {
        self.radix
    }

    pub fn trace_enabled(&self) -> bool {
        self.trace
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Replace the label table
    pub fn load_labels(&mut self, labels: impl IntoIterator<Item = Label>) {
        self.labels.load(labels);
    }

    pub fn watch_list(&self) -> &WatchList {
        &self.watchers
    }

    pub fn macro_registry(&self) -> &MacroRegistry {
        &self.macros
    }

    // ---- Display settings ----

    pub fn set_radix(&mut self, radix: Radix) -> String {
        self.radix = radix;
        format!("Switched integer printing to {}.", radix)
    }

    /// Set the trace flag, or toggle it when `enabled` is `None`
    pub fn set_trace(&mut self, enabled: Option<bool>) -> String {
        self.trace = enabled.unwrap_or(!self.trace);
        if self.trace {
            "Tracing enabled.".to_string()
        } else {
            "Tracing disabled.".to_string()
        }
    }

    // ---- Stepping ----

    pub fn next(&mut self, count: u64) -> Result<String> {
        let tracer = Tracer::new(&self.labels, self.radix);
        let tracer = self.trace.then_some(&tracer);
        let outcome =
            ExecutionController::new(&mut self.machine, &self.interrupt).step_count(count, tracer)?;
        self.step_report(outcome)
    }

    pub fn next_primitive(&mut self, primitive_id: Option<u8>) -> Result<String> {
        let outcome = ExecutionController::new(&mut self.machine, &self.interrupt)
            .step_until_primitive_ready(primitive_id)?;
        self.step_report(outcome)
    }

    pub fn next_up_to(&mut self, address: Address) -> Result<String> {
        let outcome = ExecutionController::new(&mut self.machine, &self.interrupt)
            .step_until_program_counter_equals(address)?;
        self.step_report(outcome)
    }

    pub fn next_write(&mut self, address: Address) -> Result<String> {
        let outcome = ExecutionController::new(&mut self.machine, &self.interrupt)
            .step_until_about_to_write(address)?;
        self.step_report(outcome)
    }

    fn step_report(&self, outcome: StepOutcome) -> Result<String> {
        let mut lines = outcome.trace;
        if outcome.interrupted {
            lines.push(format!("Interrupted after {} steps.", outcome.steps));
        }
        if self.watchers.has_any() {
            lines.push(self.watchers()?);
        }
        Ok(lines.join("\n"))
    }

    // ---- Machine state ----

    pub fn pc(&self) -> String {
        self.radix
            .render_padded(self.machine.pc() as u64, PC_PADDING)
    }

    pub fn primitive_ready(&self) -> String {
        self.machine.is_primitive_ready().to_string()
    }

    pub fn primitive(&self) -> String {
        self.radix
            .render_padded(self.machine.primitive_call_id() as u64, PRIMITIVE_ID_PADDING)
    }

    pub fn load(&mut self, path: &Path) -> Result<String> {
        self.machine.load_image(path)?;
        tracing::debug!("loaded image {}", path.display());
        Ok(String::new())
    }

    // ---- Memory ----

    pub fn read_byte(&self, address: Address) -> Result<String> {
        let byte = MemoryView::new(self.machine.memory()).read_byte(address)?;
        Ok(self.radix.render_padded(byte as u64, BYTE_PADDING))
    }

    pub fn read_address(&self, address: Address) -> Result<String> {
        let value = MemoryView::new(self.machine.memory()).read_address(address)?;
        Ok(self.render_address(value))
    }

    pub fn read_instruction(&self, address: Address) -> Result<String> {
        let instr = MemoryView::new(self.machine.memory()).read_instruction(address)?;
        Ok([instr.from, instr.to, instr.jump]
            .iter()
            .map(|&field| self.render_address(field))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    pub fn write_byte(&mut self, address: Address, value: u8) -> Result<String> {
        MemoryView::new(self.machine.memory_mut()).write_byte(address, value)?;
        Ok(String::new())
    }

    pub fn write_address(&mut self, address: Address, value: u32) -> Result<String> {
        MemoryView::new(self.machine.memory_mut()).write_address(address, value)?;
        Ok(String::new())
    }

    pub fn write_instruction(&mut self, address: Address, instr: &Instruction) -> Result<String> {
        MemoryView::new(self.machine.memory_mut()).write_instruction(address, instr)?;
        Ok(String::new())
    }

    pub fn hex_dump(&self, address: Address, lines: usize) -> Result<String> {
        let dump = MemoryView::new(self.machine.memory()).hex_dump(address, lines, Some(address))?;
        Ok(self.render_dump(&dump))
    }

    pub fn indirect_hex_dump(&self, pointer: Address, lines: usize) -> Result<String> {
        let dump = MemoryView::new(self.machine.memory()).indirect_hex_dump(pointer, lines)?;
        Ok(self.render_dump(&dump))
    }

    fn render_dump(&self, dump: &HexDump) -> String {
        dump.render_with(&self.emphasis)
    }

    fn render_address(&self, value: Address) -> String {
        self.radix.render_padded(value as u64, ADDRESS_PADDING)
    }

    // ---- Watchers ----

    pub fn watch(&mut self, name: &str, address: Address, length: u32) -> Result<String> {
        self.watchers.add(name, address, length)?;
        Ok(String::new())
    }

    pub fn watch_vm_variables(&mut self) -> Result<String> {
        self.watchers.add_vm_variables()?;
        Ok(String::new())
    }

    pub fn watchers(&self) -> Result<String> {
        let mut lines = vec!["Watchers:".to_string()];
        if self.watchers.has_any() {
            lines.extend(self.watchers.list(self.machine.memory(), self.radix)?);
        } else {
            lines.push("No watcher.".to_string());
        }
        Ok(lines.join("\n"))
    }

    // ---- Labels ----

    pub fn list_labels(&self) -> String {
        if self.labels.is_empty() {
            return "No label.".to_string();
        }
        self.labels
            .list()
            .iter()
            .map(|label| format!("{} {}", label.name, self.render_address(label.address)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn label(&self, name: &str) -> Result<String> {
        Ok(self.render_address(self.labels.address_of(name)?))
    }

    // ---- Macros ----

    pub fn define_macro(&mut self, name: &str, tokens: Vec<String>) -> String {
        self.macros.define(name, tokens);
        String::new()
    }

    /// Run a macro through [`Debugger::execute`]
    ///
    /// A macro that calls itself recurses until the stack is exhausted.
    pub fn call_macro(&mut self, name: &str) -> Result<String> {
        let m = self.macros.get(name)?.clone();
        m.run(|line| self.execute(line))
    }

    pub fn list_macros(&self) -> String {
        if self.macros.is_empty() {
            return "No macro.".to_string();
        }
        self.macros
            .list()
            .map(|m| format!("{}: {}", m.name, m.command_line()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn help(&self, command: Option<&str>) -> Result<String> {
        match command {
            None => Ok(COMMANDS
                .iter()
                .map(|(_, synopsis, summary)| format!("  {:<30} {}", synopsis, summary))
                .collect::<Vec<_>>()
                .join("\n")),
            Some(name) => COMMANDS
                .iter()
                .find(|(n, _, _)| *n == name)
                .map(|(_, synopsis, summary)| format!("{}\n\nSynopsis: {}", summary, synopsis))
                .ok_or_else(|| MonitorError::UnknownCommand(name.to_string())),
        }
    }

    // ---- Dispatch ----

    /// Parse and run one command line
    pub fn execute(&mut self, line: &str) -> Result<String> {
        let Some(command) = parse_line(line) else {
            return Ok(String::new());
        };
        tracing::trace!("executing {:?}", line.trim());

        let name = command.name.as_str();
        let args = command.args.as_slice();
        let raw = command.raw_args.as_slice();

        match name {
            "dec" => {
                arity(name, args, 0, 0)?;
                Ok(self.set_radix(Radix::Decimal))
            }
            "hex" => {
                arity(name, args, 0, 0)?;
                Ok(self.set_radix(Radix::Hexadecimal))
            }
            "next" => {
                arity(name, args, 0, 1)?;
                let count = self.optional_integer(name, args.first())?.unwrap_or(1);
                self.next(count)
            }
            "nextprim" => {
                arity(name, args, 0, 1)?;
                let id = self
                    .optional_integer(name, args.first())?
                    .map(|id| {
                        u8::try_from(id).map_err(|_| {
                            MonitorError::invalid_argument(name, "primitive id must be at most 255")
                        })
                    })
                    .transpose()?;
                self.next_primitive(id)
            }
            "nextupto" => {
                arity(name, args, 1, 1)?;
                let address = self.address(&args[0])?;
                self.next_up_to(address)
            }
            "nextwrite" => {
                arity(name, args, 1, 1)?;
                let address = self.address(&args[0])?;
                self.next_write(address)
            }
            "trace" => {
                arity(name, args, 0, 1)?;
                let enabled = match raw.first().map(String::as_str) {
                    None => None,
                    Some("on") => Some(true),
                    Some("off") => Some(false),
                    Some(other) => {
                        return Err(MonitorError::invalid_argument(
                            name,
                            format!("expected on or off, got {:?}", other),
                        ))
                    }
                };
                Ok(self.set_trace(enabled))
            }
            "pc" => {
                arity(name, args, 0, 0)?;
                Ok(self.pc())
            }
            "primready" => {
                arity(name, args, 0, 0)?;
                Ok(self.primitive_ready())
            }
            "prim" => {
                arity(name, args, 0, 0)?;
                Ok(self.primitive())
            }
            "load" => {
                if command.rest.is_empty() {
                    return Err(MonitorError::invalid_argument(name, "expected a path"));
                }
                self.load(Path::new(&command.rest))
            }
            "readb" => {
                arity(name, args, 1, 1)?;
                self.read_byte(self.address(&args[0])?)
            }
            "reada" | "readw" => {
                arity(name, args, 1, 1)?;
                self.read_address(self.address(&args[0])?)
            }
            "readi" => {
                arity(name, args, 1, 1)?;
                self.read_instruction(self.address(&args[0])?)
            }
            "writeb" => {
                arity(name, args, 2, 2)?;
                let address = self.address(&args[0])?;
                let value = self.integer(name, &args[1])?;
                let value = u8::try_from(value).map_err(|_| {
                    MonitorError::invalid_argument(name, format!("{:#x} does not fit in a byte", value))
                })?;
                self.write_byte(address, value)
            }
            "writea" => {
                arity(name, args, 2, 2)?;
                let address = self.address(&args[0])?;
                let value = self.address(&args[1])?;
                self.write_address(address, value)
            }
            "writei" => {
                arity(name, args, 4, 4)?;
                let address = self.address(&args[0])?;
                let instr = Instruction::new(
                    self.address(&args[1])?,
                    self.address(&args[2])?,
                    self.address(&args[3])?,
                );
                self.write_instruction(address, &instr)
            }
            "hexdump" => {
                arity(name, args, 1, 2)?;
                let address = self.address(&args[0])?;
                let lines = self.line_count(name, args.get(1))?;
                self.hex_dump(address, lines)
            }
            "hexdumpi" => {
                arity(name, args, 1, 2)?;
                let pointer = self.address(&args[0])?;
                let lines = self.line_count(name, args.get(1))?;
                self.indirect_hex_dump(pointer, lines)
            }
            "watch" => {
                arity(name, args, 2, 3)?;
                let address = self.address(&args[1])?;
                let length = self.optional_integer(name, args.get(2))?.unwrap_or(1);
                let length = u32::try_from(length)
                    .map_err(|_| MonitorError::invalid_argument(name, "length is too large"))?;
                self.watch(&raw[0], address, length)
            }
            "watch_vm_vars" => {
                arity(name, args, 0, 0)?;
                self.watch_vm_variables()
            }
            "watchers" => {
                arity(name, args, 0, 0)?;
                self.watchers()
            }
            "labels" => {
                arity(name, args, 0, 0)?;
                Ok(self.list_labels())
            }
            "label" => {
                arity(name, args, 1, 1)?;
                self.label(&raw[0])
            }
            "defm" => {
                let Some((macro_name, tokens)) = raw.split_first() else {
                    return Err(MonitorError::invalid_argument(name, "expected a macro name"));
                };
                Ok(self.define_macro(macro_name, tokens.to_vec()))
            }
            "callm" => {
                arity(name, args, 1, 1)?;
                self.call_macro(&raw[0])
            }
            "macros" => {
                arity(name, args, 0, 0)?;
                Ok(self.list_macros())
            }
            "help" => {
                arity(name, args, 0, 1)?;
                self.help(raw.first().map(String::as_str))
            }
            _ => Err(MonitorError::UnknownCommand(name.to_string())),
        }
    }

    /// Resolve an integer argument; `pc` reads the live program counter
    fn integer(&self, command: &str, arg: &Argument) -> Result<u64> {
        match arg {
            Argument::Pc => Ok(self.machine.pc() as u64),
            Argument::Integer(value) => Ok(*value),
            Argument::Word(word) => Err(MonitorError::invalid_argument(
                command,
                format!("expected an integer, got {:?}", word),
            )),
        }
    }

    fn optional_integer(&self, command: &str, arg: Option<&Argument>) -> Result<Option<u64>> {
        arg.map(|arg| self.integer(command, arg)).transpose()
    }

    /// Resolve an address argument; words are looked up as labels
    fn address(&self, arg: &Argument) -> Result<Address> {
        match arg {
            Argument::Pc => Ok(self.machine.pc()),
            Argument::Integer(value) => Ok(check_address_value(*value)?),
            Argument::Word(word) => self.labels.address_of(word),
        }
    }

    fn line_count(&self, command: &str, arg: Option<&Argument>) -> Result<usize> {
        match self.optional_integer(command, arg)? {
            None => Ok(DEFAULT_HEXDUMP_LINES),
            Some(lines) => usize::try_from(lines)
                .map_err(|_| MonitorError::invalid_argument(command, "too many lines")),
        }
    }
}

fn arity(command: &str, args: &[Argument], min: usize, max: usize) -> Result<()> {
    if (min..=max).contains(&args.len()) {
        return Ok(());
    }
    let expected = if min == max {
        min.to_string()
    } else {
        format!("{} to {}", min, max)
    };
    Err(MonitorError::invalid_argument(
        command,
        format!("expected {} arguments, got {}", expected, args.len()),
    ))
}
