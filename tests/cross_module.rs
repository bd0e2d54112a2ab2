//! Image and label files loaded from disk

mod common;

use std::fs;

use common::*;
use jolly_monitor::{parse_label_file, Debugger, DebuggerConfig, MonitorError};
use jolly_runtime::{Machine, VMConfig, VM};
use tempfile::tempdir;

#[test]
fn test_load_command_reads_image() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hello.jolly");
    fs::write(&path, hello_image()).unwrap();

    let mut dbg = Debugger::new(VM::new(VMConfig::default()), DebuggerConfig::default());
    assert_eq!(dbg.execute("pc").unwrap(), "0x00000000");
    dbg.execute(&format!("load {}", path.display())).unwrap();
    assert_eq!(dbg.execute("pc").unwrap(), "0x00000100");

    dbg.execute("nextprim 4").unwrap();
    assert_eq!(dbg.machine().output(), b"hi");
}

#[test]
fn test_load_missing_image() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.jolly");

    let mut dbg = Debugger::new(VM::new(VMConfig::default()), DebuggerConfig::default());
    assert!(matches!(
        dbg.execute(&format!("load {}", path.display())),
        Err(MonitorError::RuntimeError(_))
    ));
}

#[test]
fn test_reload_restarts_program() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hello.jolly");
    fs::write(&path, hello_image()).unwrap();

    let mut vm = VM::new(VMConfig::default());
    vm.load_image(&path).unwrap();
    let mut dbg = Debugger::new(vm, DebuggerConfig::default());

    dbg.execute("nextprim 4").unwrap();
    dbg.execute("next").unwrap();
    assert!(dbg.machine().is_stopped());

    dbg.execute(&format!("load {}", path.display())).unwrap();
    assert!(!dbg.machine().is_stopped());
    assert_eq!(dbg.execute("pc").unwrap(), "0x00000100");
}

#[test]
fn test_label_file_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hello.labels");
    fs::write(&path, HELLO_LABELS).unwrap();

    let labels = parse_label_file(&fs::read_to_string(&path).unwrap()).unwrap();
    let mut dbg = Debugger::new(
        VM::from_image(&hello_image(), VMConfig::default()).unwrap(),
        DebuggerConfig::default(),
    );
    dbg.load_labels(labels);

    assert_eq!(
        dbg.execute("labels").unwrap(),
        [
            "halt 0x00000148",
            "main 0x00000100",
            "raise_h 0x00000112",
            "raise_i 0x0000012d",
            "select_h 0x00000100",
        ]
        .join("\n")
    );
    assert_eq!(dbg.execute("reada select_h").unwrap(), "0x00000320");
}

#[test]
fn test_malformed_label_file() {
    let err = parse_label_file("main, 0x100\nbroken line\n").unwrap_err();
    assert!(matches!(err, MonitorError::InvalidLabelFile { line: 2, .. }));
}
