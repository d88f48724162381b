use log::debug;
use serde_json::Value;
use std::io::{self, Read};

/// Read loan parameters piped as JSON, e.g. `cat loan.json | amort schedule`.
/// Returns None when stdin is a terminal or nothing was piped, so the
/// command falls back to its flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    debug!("read {} bytes of loan parameters from stdin", buffer.len());

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse loan parameters from stdin: {e}"))?;
    Ok(Some(value))
}
