//! # Jolly Monitor
//!
//! Inspection and control of a running Jolly machine: stepping with stop
//! conditions, memory reads, writes and hex dumps, watchers, labels and
//! recorded macros.
//!
//! ## Example
//!
//! ```rust
//! use jolly_monitor::{Debugger, DebuggerConfig};
//! use jolly_runtime::{VM, VMConfig};
//!
//! let vm = VM::new(VMConfig { memory_size: 0x1000, ..VMConfig::default() });
//! let mut debugger = Debugger::new(vm, DebuggerConfig::default());
//!
//! debugger.execute("writeb 0x20 0x41").unwrap();
//! assert_eq!(debugger.execute("readb 0x20").unwrap(), "0x0041");
//! ```

pub mod command;
pub mod control;
pub mod debugger;
pub mod error;
pub mod labels;
pub mod macros;
pub mod memory_view;
pub mod renderer;
pub mod watch;

pub use command::{classify, parse_line, Argument, CommandLine};
pub use control::{ExecutionController, Interrupt, StepOutcome, Tracer};
pub use debugger::{Debugger, DebuggerConfig, Emphasis, COMMANDS};
pub use error::{MonitorError, Result};
pub use labels::{parse_label_file, Label, LabelTable};
pub use macros::{Macro, MacroRegistry};
pub use memory_view::{HexDump, HexDumpLine, MemoryView};
pub use renderer::Radix;
pub use watch::{MemoryWatcher, WatchList, VM_VARIABLE_WATCHERS};
