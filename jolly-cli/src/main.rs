//! ijolly - interactive monitor for the Jolly VM

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use jolly_monitor::{parse_label_file, Debugger, DebuggerConfig, Radix};
use jolly_runtime::{Machine, VMConfig, VM};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "(ijolly) ";

const BANNER: &str = r",~~_
|/\ =_ _ ~
 _( )_( )\~~
 \,\  _|\ \~~~
    \`   \
    `    `
Welcome to interactive jolly.
Type help to list commands.";

#[derive(Parser, Debug)]
#[command(name = "ijolly", version, about = "Interactive monitor for the Jolly VM")]
struct Cli {
    /// Image loaded into memory at startup
    image: Option<PathBuf>,

    /// Label file (defaults to IMAGE.labels when it exists)
    #[arg(long, value_name = "FILE")]
    labels: Option<PathBuf>,

    /// Commands run before the prompt, one per line
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Bytes served to the GET_CHAR primitive
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print integers in decimal
    #[arg(long)]
    decimal: bool,

    /// Start with tracing enabled
    #[arg(long)]
    trace: bool,

    /// Log filter, e.g. `debug` or `jolly_monitor=trace` (overrides RUST_LOG)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;

    let mut debugger = build_debugger(&cli)?;

    let interrupt = debugger.interrupt().clone();
    ctrlc::set_handler(move || interrupt.raise()).context("failed to install Ctrl-C handler")?;

    if let Some(script) = &cli.script {
        let source = fs::read_to_string(script)
            .with_context(|| format!("failed to read script {}", script.display()))?;
        for line in source.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            run_line(&mut debugger, line);
        }
    }

    repl(&mut debugger)
}

fn init_tracing(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => {
            EnvFilter::try_new(level).with_context(|| format!("invalid log level {:?}", level))?
        }
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
    Ok(())
}

fn build_debugger(cli: &Cli) -> Result<Debugger<VM>> {
    let input = match &cli.input {
        Some(path) => fs::read(path)
            .with_context(|| format!("failed to read input {}", path.display()))?,
        None => Vec::new(),
    };
    let vm = VM::new(VMConfig {
        input,
        ..VMConfig::default()
    });

    let config = DebuggerConfig {
        radix: if cli.decimal {
            Radix::Decimal
        } else {
            Radix::Hexadecimal
        },
        trace: cli.trace,
    };
    let mut debugger = Debugger::new(vm, config);
    debugger.set_emphasis(underline);

    if let Some(image) = &cli.image {
        debugger
            .machine_mut()
            .load_image(image)
            .with_context(|| format!("failed to load image {}", image.display()))?;
    }

    if let Some(path) = label_path(cli) {
        let source = fs::read_to_string(&path)
            .with_context(|| format!("failed to read labels {}", path.display()))?;
        let labels = parse_label_file(&source)
            .with_context(|| format!("failed to parse labels {}", path.display()))?;
        debugger.load_labels(labels);
        tracing::info!("loaded labels from {}", path.display());
    }

    Ok(debugger)
}

/// Explicit `--labels`, else the image's `.labels` sidecar if present
fn label_path(cli: &Cli) -> Option<PathBuf> {
    if let Some(path) = &cli.labels {
        return Some(path.clone());
    }
    cli.image
        .as_deref()
        .map(|image| image.with_extension("labels"))
        .filter(|path| path.exists())
}

fn underline(text: &str) -> String {
    text.underlined().to_string()
}

fn repl(debugger: &mut Debugger<VM>) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    println!("{}", BANNER);

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);

                if matches!(input, "quit" | "exit") {
                    break;
                }
                run_line(debugger, input);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    println!("Bye!");
    Ok(())
}

/// Run one command and print its output, then anything the program wrote
fn run_line(debugger: &mut Debugger<VM>, line: &str) {
    debugger.interrupt().clear();
    match debugger.execute(line) {
        Ok(output) if output.is_empty() => {}
        Ok(output) => println!("{}", output),
        Err(e) => println!("*** {}", e),
    }

    let written = debugger.machine_mut().take_output();
    if !written.is_empty() {
        println!("{}", String::from_utf8_lossy(&written));
    }
}
