use std::io::Write;

use serde::Serialize;

use crate::error::AppResult;

pub fn write<W: Write, T: Serialize>(writer: &mut W, value: &T) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}
