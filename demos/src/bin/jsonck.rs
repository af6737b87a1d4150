// SPDX-License-Identifier: Apache-2.0

//! Checks that compact JSON files survive a parse and rebuild unchanged.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use demos::{check_file, CheckError, DEFAULT_CAPACITY};

#[derive(Parser)]
#[command(about = "Round-trip JSON files through the event and tree rebuilders")]
struct Options {
    /// Files to check, in order. Checking stops at the first failure.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Maximum number of tree nodes per document.
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,
}

fn main() -> ExitCode {
    env_logger::init();
    let options = Options::parse();

    for path in &options.files {
        if let Err(err) = check_file(path, options.capacity) {
            match &err {
                CheckError::PoolExhausted { .. } => eprintln!("{err}"),
                _ => eprintln!("Error: {err}"),
            }
            eprintln!("The check has failed at file '{}'", path.display());
            return ExitCode::FAILURE;
        }
        println!("{}: ok", path.display());
    }
    ExitCode::SUCCESS
}
