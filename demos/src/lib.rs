// SPDX-License-Identifier: Apache-2.0

//! Shared pieces of the command-line drivers.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info};
use pdajson::{
    to_json_string, ParseError, SaxEvent, SaxParser, SaxReceiver, SaxStringBuilder, TreeBuilder,
};

/// Node pool size used by the drivers unless told otherwise.
pub const DEFAULT_CAPACITY: usize = 1024 * 1024;

/// Drops the NUL, space, CR and LF bytes editors leave at the end of files.
pub fn trim_trailing_junk(input: &[u8]) -> &[u8] {
    let keep = input
        .iter()
        .rposition(|&b| !matches!(b, 0 | b' ' | b'\r' | b'\n'))
        .map_or(0, |last| last + 1);
    &input[..keep]
}

/// Which rebuild path a check went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Text rebuilt straight from parser events.
    Events,
    /// Text rebuilt from a built tree.
    Tree,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Events => write!(f, "event rebuild"),
            Stage::Tree => write!(f, "tree rebuild"),
        }
    }
}

#[derive(Debug)]
pub enum CheckError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        stage: Stage,
        error: ParseError,
        /// The parser's description of the failure.
        message: String,
    },
    PoolExhausted {
        capacity: usize,
    },
    Mismatch {
        stage: Stage,
        output: Vec<u8>,
    },
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::Io { path, source } => {
                write!(f, "unable to read '{}': {}", path.display(), source)
            }
            CheckError::Parse {
                stage,
                error,
                message,
            } => write!(f, "{stage} failed while parsing ({error})\n{message}"),
            CheckError::PoolExhausted { capacity } => {
                write!(f, "tree rebuild failed, the node pool of {capacity} is exhausted")
            }
            CheckError::Mismatch { stage, output } => write!(
                f,
                "{stage} failed, output differs from input\noutput : '{}'",
                String::from_utf8_lossy(output)
            ),
        }
    }
}

impl std::error::Error for CheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CheckError::Io { source, .. } => Some(source),
            CheckError::Parse { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Checks that rebuilding `input` from parser events reproduces it.
pub fn check_events(input: &[u8]) -> Result<(), CheckError> {
    let mut parser = SaxParser::new(SaxStringBuilder::new());
    parser.parse(input).map_err(|error| CheckError::Parse {
        stage: Stage::Events,
        error,
        message: parser.error().to_owned(),
    })?;
    let output = parser.into_receiver().take_output();
    if output != input {
        return Err(CheckError::Mismatch {
            stage: Stage::Events,
            output,
        });
    }
    Ok(())
}

/// Checks that rebuilding `input` from a tree reproduces it. Returns the
/// number of nodes the tree needed.
pub fn check_tree(input: &[u8], capacity: usize) -> Result<usize, CheckError> {
    let mut parser = SaxParser::new(TreeBuilder::with_capacity(capacity));
    if let Err(error) = parser.parse(input) {
        if parser.receiver().is_allocation_rejected() {
            return Err(CheckError::PoolExhausted { capacity });
        }
        return Err(CheckError::Parse {
            stage: Stage::Tree,
            error,
            message: parser.error().to_owned(),
        });
    }

    let tree = parser.receiver();
    let output = tree.root().map(to_json_string).unwrap_or_default();
    if output != input {
        return Err(CheckError::Mismatch {
            stage: Stage::Tree,
            output,
        });
    }
    Ok(tree.node_count())
}

/// Runs both checks on a document, junk trimmed first.
pub fn check_document(input: &[u8], capacity: usize) -> Result<usize, CheckError> {
    let input = trim_trailing_junk(input);
    check_events(input)?;
    check_tree(input, capacity)
}

/// Reads and checks one file.
pub fn check_file(path: &Path, capacity: usize) -> Result<usize, CheckError> {
    let input = std::fs::read(path).map_err(|source| CheckError::Io {
        path: path.to_owned(),
        source,
    })?;
    debug!("{}: {} bytes", path.display(), input.len());
    let nodes = check_document(&input, capacity)?;
    info!("{}: ok, {} nodes", path.display(), nodes);
    Ok(nodes)
}

/// Receiver that writes one indented line per event.
pub struct EventPrinter<W> {
    out: W,
    depth: usize,
    events: usize,
}

impl<W: fmt::Write> EventPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            depth: 0,
            events: 0,
        }
    }

    /// Events seen in the last document.
    pub fn event_count(&self) -> usize {
        self.events
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: fmt::Arguments<'_>) {
        // a full sink only loses trace lines
        let _ = writeln!(self.out, "{:indent$}{}", "", text, indent = self.depth * 2);
    }
}

impl<W: fmt::Write> SaxReceiver<'_> for EventPrinter<W> {
    fn document_start(&mut self) {
        self.depth = 0;
        self.events = 0;
        self.line(format_args!("document start"));
    }

    fn document_stop(&mut self) -> bool {
        let events = self.events;
        self.line(format_args!("document stop, {events} events"));
        true
    }

    fn document_failure(&mut self) {
        let events = self.events;
        self.line(format_args!("document failure after {events} events"));
    }

    fn sax_event(&mut self, event: SaxEvent, data: &[u8]) {
        self.events += 1;
        match event {
            SaxEvent::ObjectStop | SaxEvent::ArrayStop | SaxEvent::ObjectItemStop => {
                self.depth = self.depth.saturating_sub(1);
            }
            _ => {}
        }
        self.line(format_args!(
            "{} '{}'",
            event.name(),
            String::from_utf8_lossy(data)
        ));
        match event {
            SaxEvent::ObjectStart | SaxEvent::ArrayStart | SaxEvent::ObjectItemStart => {
                self.depth += 1;
            }
            _ => {}
        }
    }
}
