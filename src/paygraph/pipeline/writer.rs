//! Output of the running median, one two-decimal line per processed record.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::paygraph::error::PipelineError;

/// Appends the current median as a `%.2f` line per processed record.
#[derive(Debug)]
pub struct MedianWriter<W: Write> {
    out: W,
}

impl MedianWriter<BufWriter<File>> {
    /// Creates (truncating) the output file behind a buffered writer.
    pub fn create(path: &Path) -> Result<Self, PipelineError> {
        let file = File::create(path)
            .map_err(|e| PipelineError::io(e, format!("create {}", path.display())))?;
        Ok(MedianWriter::new(BufWriter::new(file)))
    }
}

impl<W: Write> MedianWriter<W> {
    pub fn new(out: W) -> Self {
        MedianWriter { out }
    }

    pub fn write_median(&mut self, median: f64) -> Result<(), PipelineError> {
        writeln!(self.out, "{:.2}", median)
            .map_err(|e| PipelineError::io(e, "write median line"))
    }

    pub fn flush(&mut self) -> Result<(), PipelineError> {
        self.out
            .flush()
            .map_err(|e| PipelineError::io(e, "flush output"))
    }
}
