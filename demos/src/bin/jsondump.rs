// SPDX-License-Identifier: Apache-2.0

//! Prints the tree or the event stream of a JSON file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use demos::{trim_trailing_junk, EventPrinter, DEFAULT_CAPACITY};
use log::debug;
use pdajson::{Dump, SaxParser, TreeBuilder};

#[derive(Parser)]
#[command(about = "Dump the parse of a JSON file")]
struct Options {
    file: PathBuf,

    /// Print parser events instead of the tree.
    #[arg(long)]
    events: bool,

    /// Maximum number of tree nodes.
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,
}

fn main() -> ExitCode {
    env_logger::init();
    let options = Options::parse();

    let input = match std::fs::read(&options.file) {
        Ok(input) => input,
        Err(e) => {
            eprintln!(
                "Error: Unable to read file '{}': {}",
                options.file.display(),
                e
            );
            return ExitCode::FAILURE;
        }
    };
    let input = trim_trailing_junk(&input);
    debug!("{} bytes after trimming", input.len());

    if options.events {
        let mut parser = SaxParser::new(EventPrinter::new(String::new()));
        let result = parser.parse(input);
        let message = parser.error().to_owned();
        print!("{}", parser.into_receiver().into_inner());
        if result.is_err() {
            eprintln!("Error: {message}");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    let mut parser = SaxParser::new(TreeBuilder::with_capacity(options.capacity));
    if let Err(e) = parser.parse(input) {
        if parser.receiver().is_allocation_rejected() {
            eprintln!("Error: node pool of {} is exhausted", options.capacity);
        } else {
            eprintln!("Error: {e}\n{}", parser.error());
        }
        return ExitCode::FAILURE;
    }
    if let Some(root) = parser.receiver().root() {
        print!("{}", Dump(root));
    }
    ExitCode::SUCCESS
}
