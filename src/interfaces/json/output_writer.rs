use crate::domain::payment::PayOutput;
use crate::error::Result;
use std::io::Write;

/// Writes payment results as JSON Lines.
pub struct OutputWriter<W: Write> {
    writer: W,
}

impl<W: Write> OutputWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_output(&mut self, output: &PayOutput) -> Result<()> {
        serde_json::to_writer(&mut self.writer, output)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
