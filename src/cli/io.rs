//! JSON I/O handling for CLI
//!
//! - Input: one JSON document on stdin (may span lines)
//! - Output: one JSON envelope line on stdout
//! - UTF-8 only

use std::io::{self, Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::{CliError, CliResult};

/// Read one JSON document from a reader
pub fn read_json<T: DeserializeOwned, R: Read>(mut reader: R) -> CliResult<T> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    Ok(serde_json::from_str(&input)?)
}

/// Read one JSON document from stdin
pub fn read_request<T: DeserializeOwned>() -> CliResult<T> {
    read_json(io::stdin().lock())
}

/// Write a success envelope to a writer
pub fn write_envelope<T: Serialize, W: Write>(mut writer: W, data: &T) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut writer, &response)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    write_envelope(io::stdout().lock(), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_read_multiline_json() {
        let input = b"{\n  \"event_id\": \"evt-1\"\n}\n";
        let value: Value = read_json(&input[..]).unwrap();
        assert_eq!(value["event_id"], "evt-1");
    }

    #[test]
    fn test_read_empty_input() {
        let result: CliResult<Value> = read_json(&b"  \n"[..]);
        assert!(result.is_err());
    }

    #[test]
    fn test_envelope_shape() {
        let mut buffer = Vec::new();
        write_envelope(&mut buffer, &serde_json::json!({"n": 1})).unwrap();

        let parsed: Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["data"]["n"], 1);
    }
}
