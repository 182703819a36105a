//! exprc command-line driver
//!
//! Reads a source file, analyzes it and prints the syntax tree, the final
//! symbol table and any diagnostics.

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use exprc::feedback::Report;
use exprc::{analyze_with, print_tree, Analysis, Options, Recovery};

/// exprc - typed expression language front-end
#[derive(Parser, Debug)]
#[command(name = "exprc")]
#[command(version = "0.1.0")]
#[command(about = "Lex, parse and type check a typed expression program")]
struct Cli {
    /// Input source file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Stop at the first syntax or semantic error
    #[arg(long)]
    halt_on_error: bool,

    /// Do not print the syntax tree
    #[arg(long)]
    no_tree: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Analyze the input file; returns whether it was free of diagnostics
fn run(cli: &Cli) -> Result<bool> {
    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let recovery = if cli.halt_on_error {
        Recovery::Halt
    } else {
        Recovery::Continue
    };
    let analysis = analyze_with(&source, Options { recovery });

    match cli.format {
        Format::Text => print_text(&analysis, !cli.no_tree),
        Format::Json => {
            let file = cli.input.display().to_string();
            let mut report = Report::new(&analysis, &file);
            if !cli.no_tree {
                report = report.with_tree(&analysis);
            }
            println!("{}", report.to_json().context("serializing report")?);
        }
    }

    Ok(analysis.is_ok())
}

fn print_text(analysis: &Analysis, show_tree: bool) {
    for diagnostic in &analysis.diagnostics {
        eprintln!("{}", diagnostic);
    }

    if show_tree {
        if let Some(program) = &analysis.program {
            println!("Syntax tree:");
            print!("{}", print_tree(program));
            println!();
        }
    }

    println!("Symbol table (final values):");
    for symbol in &analysis.symbols {
        match &symbol.value {
            Some(value) => println!("{} (type: {}): value = {}", symbol.name, symbol.ty, value),
            None => println!("{} (type: {}): value = <unassigned>", symbol.name, symbol.ty),
        }
    }
}
