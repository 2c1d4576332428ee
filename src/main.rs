//! Batch driver: load processes from an init file, read logical addresses
//! through the simulated MMU and write the bytes out.

use std::env;
use std::process;

use anyhow::{Context, Result, anyhow, bail};
use log::LevelFilter;

use paged_memory::io::{InitData, read_requests, write_results};
use paged_memory::translation::read_batch;
use paged_memory::{INVALID_READ, MemoryManager, logger};

/// Command-line configuration
struct Config {
    init_file: String,
    input_file: String,
    output_file: String,
    verbose: bool,
}

fn main() {
    let config = match parse_args(env::args().skip(1)) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            eprintln!("{}", USAGE);
            return;
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    let level = if config.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    if let Err(e) = logger::init(level) {
        eprintln!("Warning: logger unavailable: {}", e);
    }

    if let Err(e) = run(&config) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

const USAGE: &str = "\
Paged Memory Simulator - reads bytes through simulated page tables

Usage: rust-paged-memory [OPTIONS] <init_file> <input_file> <output_file>

  init_file    memory size, frame size, max process size; then `pid length` pairs
  input_file   `pid address` pairs to read
  output_file  receives one byte per pair, -1 where the read failed

Options:
  -v, --verbose  print translations, the frame map and page tables
  -h, --help     print this message";

enum Command {
    Help,
    Run(Config),
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command> {
    let mut verbose = false;
    let mut files = Vec::with_capacity(3);

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-v" | "--verbose" => verbose = true,
            _ if arg.starts_with('-') => {
                bail!("unknown option {} (use --help for usage information)", arg)
            }
            _ => files.push(arg),
        }
    }

    let Ok([init_file, input_file, output_file]) = <[String; 3]>::try_from(files) else {
        bail!("expected <init_file> <input_file> <output_file> (use --help for usage information)");
    };
    Ok(Command::Run(Config { init_file, input_file, output_file, verbose }))
}

/// Main logic separated from main() for cleaner error handling
fn run(config: &Config) -> Result<()> {
    // Step 1: Parse initialization file
    let init_data = InitData::from_file(&config.init_file).map_err(|e| anyhow!(e))?;

    if config.verbose {
        eprintln!("=== Paged Memory Simulator ===");
        eprintln!("Init file:   {}", config.init_file);
        eprintln!("Input file:  {}", config.input_file);
        eprintln!("Output file: {}", config.output_file);
        eprintln!();
        eprintln!("Memory size:      {} bytes", init_data.config.memory_size);
        eprintln!("Frame size:       {} bytes", init_data.config.frame_size);
        eprintln!("Processes to create: {}", init_data.processes.len());
        eprintln!();
    }

    // Step 2: Build the manager and load the processes
    let manager = init_data
        .apply()
        .with_context(|| format!("cannot build memory from {}", config.init_file))?;

    if config.verbose {
        eprintln!("Max process size: {} bytes", manager.max_process_size());
        eprintln!(
            "Frames: {} ({} free)",
            manager.frame_count(),
            manager.free_frame_count()
        );
        eprintln!();
        print_memory(&manager)?;
    }

    // Step 3: Read the requests
    let requests = read_requests(&config.input_file).map_err(|e| anyhow!(e))?;

    if config.verbose {
        eprintln!("Reads requested: {}", requests.len());
        eprintln!();
    }

    // Step 4: Read each logical address through the MMU
    let results = if config.verbose {
        read_verbose(&manager, &requests)
    } else {
        read_batch(&manager, &requests)
    };

    if config.verbose {
        eprintln!();
        eprintln!("=== Summary ===");
        let failures = results.iter().filter(|&&r| r == INVALID_READ).count();
        eprintln!("Successful reads: {}", results.len() - failures);
        eprintln!("Failed reads: {}", failures);
        eprintln!();
    }

    // Step 5: Write results to output file
    write_results(&config.output_file, &results).map_err(|e| anyhow!(e))?;

    if config.verbose {
        eprintln!("Results written to: {}", config.output_file);
    }

    Ok(())
}

/// Frame map and every page table
fn print_memory(manager: &MemoryManager) -> Result<()> {
    eprintln!("[PHYSICAL MEMORY]");
    eprintln!("Free Memory: {:.2}%", manager.free_memory_percentage());
    for frame in manager.memory_report()? {
        eprintln!("{}", frame);
    }
    eprintln!();

    for pid in manager.pids() {
        eprintln!("{}", manager.process_page_table_report(pid)?);
    }
    Ok(())
}

/// Read with verbose output
fn read_verbose(manager: &MemoryManager, requests: &[(u32, i64)]) -> Vec<i32> {
    requests
        .iter()
        .map(|&(pid, address)| {
            let translation = usize::try_from(address)
                .map_err(|_| format!("negative address {}", address))
                .and_then(|address| manager.translate(pid, address).map_err(|e| e.to_string()));

            match translation {
                Ok(t) => {
                    eprintln!("{}", t);
                    i32::from(t.value)
                }
                Err(e) => {
                    eprintln!("PID {} LA {} -> ERROR: {}", pid, address, e);
                    INVALID_READ
                }
            }
        })
        .collect()
}
