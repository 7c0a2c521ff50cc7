//! Implementations of the `*Element` traits.

use crate::{ValueFormat, WriteDataError};
use std::io;

/// Writes `formatted` followed by a newline.
fn write_line<W: io::Write>(mut writer: W, formatted: &str) -> Result<(), WriteDataError> {
    writer.write_all(formatted.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Writes an integer with `format`.
fn write_integer<W: io::Write>(
    writer: W,
    value: i128,
    format: &ValueFormat,
) -> Result<(), WriteDataError> {
    write_line(writer, &format.format_integer(value))
}

/// Writes a float with `format`.
fn write_float<W: io::Write>(
    writer: W,
    value: f64,
    format: &ValueFormat,
) -> Result<(), WriteDataError> {
    write_line(writer, &format.format_float(value))
}

mod primitive;
