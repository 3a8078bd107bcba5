//! Command-line interface for cubesym
//! This binary patches KiCad symbol libraries against STM32CubeMX pinout reports.
//!
//! Usage:
//!   cubesym convert `<report>` [--library `<path>`] [--out-dir `<dir>`]  - Patch a library against a report
//!   cubesym symbols `<library>`                                      - List the symbol records in a library
//!   cubesym dump `<library>` [--format `<format>`]                     - Parse a library and re-emit it

use clap::{Arg, Command};
use std::path::Path;
use std::process;

use cubesym::digest::short_digest;
use cubesym::patch::{list_symbols, patch_library};
use cubesym::report::PinoutReport;
use cubesym::sexpr::{parse, to_json};

/// Library patched when no explicit path is given
const DEFAULT_LIBRARY: &str = "/usr/share/kicad/symbols/MCU_ST_STM8.kicad_sym";

fn main() {
    let matches = Command::new("cubesym")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for patching KiCad symbol libraries from STM32CubeMX pinout reports")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("convert")
                .about("Patch a symbol library against a pinout report")
                .arg(
                    Arg::new("report")
                        .help("Path to the CubeMX pinout report")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("library")
                        .long("library")
                        .short('l')
                        .help("Path to the KiCad symbol library to patch")
                        .default_value(DEFAULT_LIBRARY),
                )
                .arg(
                    Arg::new("out-dir")
                        .long("out-dir")
                        .short('o')
                        .help("Directory the patched library is written to")
                        .default_value("."),
                ),
        )
        .subcommand(
            Command::new("symbols")
                .about("List the symbol records in a library")
                .arg(
                    Arg::new("library")
                        .help("Path to the KiCad symbol library")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("dump")
                .about("Parse a library and re-emit it for inspection")
                .arg(
                    Arg::new("library")
                        .help("Path to the KiCad symbol library")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('sexpr' or 'json')")
                        .default_value("sexpr"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("convert", sub)) => {
            let report = sub.get_one::<String>("report").unwrap();
            let library = sub.get_one::<String>("library").unwrap();
            let out_dir = sub.get_one::<String>("out-dir").unwrap();
            handle_convert_command(report, library, out_dir);
        }
        Some(("symbols", sub)) => {
            let library = sub.get_one::<String>("library").unwrap();
            handle_symbols_command(library);
        }
        Some(("dump", sub)) => {
            let library = sub.get_one::<String>("library").unwrap();
            let format = sub.get_one::<String>("format").unwrap();
            handle_dump_command(library, format);
        }
        _ => unreachable!(),
    }
}

/// Handle the convert command
fn handle_convert_command(report_path: &str, library_path: &str, out_dir: &str) {
    let report_text = read_file(report_path);
    let report = PinoutReport::parse(&report_text).unwrap_or_else(|e| {
        eprintln!("Error reading pinout report: {}", e);
        process::exit(1);
    });

    let library_text = read_file(library_path);
    let outcome = patch_library(&library_text, &report).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    for rename in &outcome.renames {
        println!(
            "Renaming pin {} from {} to {}",
            rename.number, rename.old, rename.new
        );
    }

    let file_name = format!(
        "{}_{}.kicad_sym",
        outcome.symbol_id,
        short_digest(&report_text)
    );
    let out_path = Path::new(out_dir).join(file_name);
    if let Err(e) = std::fs::write(&out_path, &outcome.content) {
        eprintln!("Error writing {}: {}", out_path.display(), e);
        process::exit(1);
    }
    println!("New symbol written to {}", out_path.display());
}

/// Handle the symbols command
fn handle_symbols_command(library_path: &str) {
    let library_text = read_file(library_path);
    let symbols = list_symbols(&library_text).unwrap_or_else(|e| {
        eprintln!("Parse error: {}", e);
        process::exit(1);
    });
    for symbol in symbols {
        println!("{}", symbol);
    }
}

/// Handle the dump command
fn handle_dump_command(library_path: &str, format: &str) {
    let library_text = read_file(library_path);
    let tree = parse(&library_text).unwrap_or_else(|e| {
        eprintln!("Parse error: {}", e);
        process::exit(1);
    });
    match format {
        "sexpr" => {
            // The synthetic root is a container, not part of the document.
            for child in &tree.children {
                println!("{}", child);
            }
        }
        "json" => {
            let json = to_json(&tree).unwrap_or_else(|e| {
                eprintln!("Error rendering tree: {}", e);
                process::exit(1);
            });
            println!("{}", json);
        }
        other => {
            eprintln!("Unknown format '{}'", other);
            process::exit(1);
        }
    }
}

fn read_file(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        process::exit(1);
    })
}
