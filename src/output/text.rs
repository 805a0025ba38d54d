use std::io::Write;

use crate::error::AppResult;

pub fn write_block<W: Write>(writer: &mut W, block: &str) -> AppResult<()> {
    writeln!(writer, "{}", block.trim_end())?;
    Ok(())
}
