//! CSV export for simulated power series.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::TIMESTAMP_FORMAT;
use crate::timeseries::{POWER_COLUMN, TimeSeries};

/// Name of the index column.
const INDEX_COLUMN: &str = "datetime";

/// Exports a time series to a CSV file at the given path.
///
/// Writes a header row followed by one data row per timestamp. Produces
/// deterministic output for identical inputs.
///
/// # Arguments
///
/// * `series` - Simulated power series
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(series: &TimeSeries, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(series, buf)
}

/// Writes a time series as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(series: &TimeSeries, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record([INDEX_COLUMN, POWER_COLUMN])?;
    for s in series.rows() {
        wtr.write_record(&[
            s.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            format!("{:.6}", s.power_kw),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
