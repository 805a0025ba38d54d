pub mod json;
pub mod text;

use std::io::{self, Write};

use serde::Serialize;

use crate::error::AppResult;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(json: bool) -> Self {
        let mode = if json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };
        Self { mode }
    }

    /// Prints `text` in text mode, `json_value` pretty-printed in JSON mode.
    pub fn emit<T: Serialize>(&self, text: &str, json_value: &T) -> AppResult<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_to(&mut handle, text, json_value)
    }

    pub fn write_to<W: Write, T: Serialize>(
        &self,
        writer: &mut W,
        text: &str,
        json_value: &T,
    ) -> AppResult<()> {
        match self.mode {
            OutputMode::Text => text::write_block(writer, text),
            OutputMode::Json => json::write(writer, json_value),
        }
    }
}
