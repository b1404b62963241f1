//! Line-oriented driver wiring a payment stream into the graph engine.
//!
//! One JSON object per input line, one median line per processed record. A
//! record that fails to decode, parse, or validate is logged and skipped —
//! one bad record never aborts the stream. Stale records below the retention
//! floor still emit the current (unchanged) median, matching the reference
//! driver.

pub mod record;
pub mod writer;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{info, warn};

use crate::paygraph::config::GraphConfig;
use crate::paygraph::error::PipelineError;
use crate::paygraph::graph::{TransactionGraph, TransactionOutcome};

use self::record::PaymentRecord;
use self::writer::MedianWriter;

/// Streams `input` through a fresh graph, appending the running median to
/// `output`. Returns the number of median lines written.
pub fn run_pipeline(
    input: &Path,
    output: &Path,
    config: GraphConfig,
) -> Result<u64, PipelineError> {
    let file = File::open(input)
        .map_err(|e| PipelineError::io(e, format!("open {}", input.display())))?;
    let reader = BufReader::new(file);
    let mut writer = MedianWriter::create(output)?;
    let mut graph = TransactionGraph::new(config);

    let mut written = 0u64;
    for (index, line) in reader.lines().enumerate() {
        let line =
            line.map_err(|e| PipelineError::io(e, format!("read {}", input.display())))?;
        if line.trim().is_empty() {
            continue;
        }
        match process_line(&mut graph, &line) {
            Ok(_) => {
                writer.write_median(graph.median())?;
                written += 1;
            }
            Err(err) => warn!("skipping line {}: {}", index + 1, err),
        }
    }
    writer.flush()?;
    info!(
        "wrote {} median line(s); graph holds {} edge(s) across {} node(s)",
        written,
        graph.edge_count(),
        graph.node_count()
    );
    Ok(written)
}

/// Decodes one line and feeds it to the graph.
pub fn process_line(
    graph: &mut TransactionGraph,
    line: &str,
) -> Result<TransactionOutcome, PipelineError> {
    let record = PaymentRecord::from_json_line(line)?;
    let timestamp = record.epoch_seconds()?;
    Ok(graph.process_transaction(timestamp, &record.actor, &record.target)?)
}
