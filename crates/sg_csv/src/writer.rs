//! CSV serialization of a ranking report

use anyhow::{Context, Result};
use sg_core::RankingReport;
use std::io::Write;

/// Write header and rows. Rows can have different lengths.
pub fn write_report<W: Write>(report: &RankingReport, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    csv_writer
        .write_record(report.header())
        .context("Failed to write CSV header")?;
    for row in report.rows() {
        csv_writer.write_record(&row).context("Failed to write CSV row")?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;

    Ok(())
}
