//! Command output
//!
//! Every command writes either one JSON envelope line or the plain text tree
//! dump to stdout.

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write `{"status":"ok","data":...}` as one line to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_envelope(&mut io::stdout().lock(), data)
}

/// Write plain text to stdout
pub fn write_text(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn write_envelope<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    let envelope = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *out, &envelope)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_is_one_line() {
        let mut buffer = Vec::new();
        write_envelope(&mut buffer, serde_json::json!([{"id": 1}])).unwrap();

        let line = String::from_utf8(buffer).unwrap();
        assert_eq!(line.matches('\n').count(), 1);

        let parsed: Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["data"][0]["id"], 1);
    }
}
