//! JSON output for the CLI
//!
//! One JSON object per command on stdout:
//! - `{"status":"ok","data":...}`
//! - `{"status":"error","code":...,"message":...}`

use std::io::{self, Write};

use serde_json::{json, Value};

use super::errors::CliResult;

pub fn write_response(data: Value) -> CliResult<()> {
    write_line(&mut io::stdout(), &response(data))
}

pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_line(&mut io::stdout(), &error_response(code, message))
}

pub(crate) fn response(data: Value) -> Value {
    json!({
        "status": "ok",
        "data": data
    })
}

pub(crate) fn error_response(code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

fn write_line<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
