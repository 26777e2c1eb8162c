//! Command-line interface for sexpr
//! This binary inspects S-expression sources and echoes data read from stdin.
//!
//! Usage:
//!   sexpr execute `<path>` [--format `<format>`]  - Process a file and print the result
//!   sexpr repl [--display]                     - Read data from stdin and echo each one
//!   sexpr list-formats                         - List all available formats

use clap::{Arg, ArgAction, Command};
use sexpr::sexpr::processor::{available_formats, process_file, ProcessingSpec};
use sexpr::sexpr::writer::{Printer, Style};
use sexpr::{Reader, ReaderConfig, Value};
use std::io::{self, IsTerminal, Write};

fn main() {
    let matches = Command::new("sexpr")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for reading, inspecting and printing S-expressions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("execute")
                .about("Process a source file")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'value-write', 'token-json')")
                        .default_value("value-write"),
                ),
        )
        .subcommand(
            Command::new("repl")
                .about("Read data from stdin and echo each one")
                .arg(
                    Arg::new("display")
                        .long("display")
                        .short('d')
                        .help("Echo in human-readable form instead of re-readable form")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("execute", execute_matches)) => {
            let path = execute_matches
                .get_one::<String>("path")
                .map(String::as_str)
                .unwrap_or_default();
            let format = execute_matches
                .get_one::<String>("format")
                .map(String::as_str)
                .unwrap_or("value-write");
            handle_execute_command(path, format);
        }
        Some(("repl", repl_matches)) => {
            let style = if repl_matches.get_flag("display") {
                Style::Display
            } else {
                Style::Write
            };
            handle_repl_command(style);
        }
        Some(("list-formats", _)) => {
            handle_list_formats_command();
        }
        _ => unreachable!(),
    }
}

/// Handle the execute command
fn handle_execute_command(path: &str, format: &str) {
    let spec = ProcessingSpec::from_string(format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let output = process_file(path, &spec, &ReaderConfig::default()).unwrap_or_else(|e| {
        eprintln!("Execution error: {}", e);
        std::process::exit(1);
    });

    print!("{}", output);
}

/// Handle the repl command
fn handle_repl_command(style: Style) {
    let config = ReaderConfig::default();
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut reader = Reader::new(stdin.lock());
    let mut stdout = io::stdout();

    loop {
        if interactive {
            print!("> ");
            let _ = stdout.flush();
        }
        match reader.read(&config) {
            Ok(Value::Eof) => break,
            Ok(value) => {
                if writeln!(stdout, "{}", Printer::new(&value, style)).is_err() {
                    std::process::exit(1);
                }
            }
            Err(e) => eprintln!("{}: {}", e.kind(), e.message()),
        }
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}
