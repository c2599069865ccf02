use colored::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::errors::{FieldsError, Result};
use crate::models::field::FieldDefinition;

pub const SEPARATOR: &str = "===================";

/// Writes field definitions as text, highlighted when going to a terminal.
pub struct Presenter<W: Write> {
    out: W,
    highlight: bool,
}

impl Presenter<io::StdoutLock<'static>> {
    pub fn console() -> Self {
        Self::new(io::stdout().lock(), true)
    }
}

impl Presenter<BufWriter<File>> {
    /// Creates (or truncates) `path` for plain-text output.
    pub fn file(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| {
            FieldsError::Output(format!("Cannot open '{}': {}", path.display(), e))
        })?;
        Ok(Self::new(BufWriter::new(file), false))
    }
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W, highlight: bool) -> Self {
        Self { out, highlight }
    }

    pub fn write_field(&mut self, field: &FieldDefinition) -> io::Result<()> {
        let header = format!("Field Name: {} (ID: {})", field.name, field.id);
        if self.highlight {
            writeln!(self.out, "{}", header.on_green())?;
        } else {
            writeln!(self.out, "{}", header)?;
        }

        for value in &field.values {
            let line = format!("\tValue Name: {} (ID: {})", value.value, value.id);
            if self.highlight {
                writeln!(self.out, "{}", line.green())?;
            } else {
                writeln!(self.out, "{}", line)?;
            }
        }

        Ok(())
    }

    pub fn write_separator(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", SEPARATOR)
    }

    /// Renders every field with a separator between consecutive entries.
    pub fn write_fields<'a, I>(&mut self, fields: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a FieldDefinition>,
    {
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                self.write_separator()?;
            }
            self.write_field(field)?;
        }
        Ok(())
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
