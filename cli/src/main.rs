use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use seristruct_compiler::options::DEFAULT_EXTENSION;
use seristruct_compiler::{generate_files, GenError, GenOptions, HeaderStyle};

#[derive(Parser)]
#[command(name = "ssgen")]
#[command(about = "Generates SeriStruct records from IDL", long_about = None)]
struct Cli {
    /// Input IDL file
    #[arg(short, long)]
    input: PathBuf,

    /// Path to put generated header files
    #[arg(short, long)]
    output: PathBuf,

    /// Use a #define guard rather than #pragma once
    #[arg(long)]
    guard: bool,

    /// A namespace for qualifying the generated records
    #[arg(short, long)]
    namespace: Option<String>,

    /// The extension for generated header files
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    ext: String,

    /// Make all fields mutable regardless of input
    #[arg(short, long = "mut")]
    mutable: bool,

    /// Print each record's computed layout as JSON on stdout
    #[arg(long)]
    print_layout: bool,
}

impl Cli {
    fn options(&self) -> GenOptions {
        GenOptions {
            header:      if self.guard { HeaderStyle::Guard } else { HeaderStyle::Pragma },
            namespace:   self.namespace.clone(),
            extension:   self.ext.clone(),
            all_mutable: self.mutable,
        }
    }
}

fn run(cli: &Cli) -> Result<(), GenError> {
    // Everything is rendered in memory before the first write
    let files = generate_files(&cli.input, &cli.output, &cli.options())?;

    if cli.print_layout {
        for file in &files {
            println!("{}", serde_json::to_string_pretty(&file.layout)?);
        }
    }

    tracing::info!("Generated {} record(s)", files.len());
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::from(2)
        }
    }
}
