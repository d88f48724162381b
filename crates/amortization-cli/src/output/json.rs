use log::error;
use serde_json::Value;
use std::io::{self, Write};

/// Pretty-print the computation envelope as JSON on stdout.
///
/// A schedule can run to hundreds of periods, so it is streamed straight
/// into a locked stdout rather than built up as one string.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = serde_json::to_writer_pretty(&mut out, value)
        .map_err(io::Error::from)
        .and_then(|()| writeln!(out));
    if let Err(e) = written {
        error!("failed to write JSON output: {e}");
    }
}
