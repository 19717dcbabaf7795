//! CSV export for report cost rows.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::report::SizingReport;

/// Column header for the cost export.
const HEADER: &str = "unit,period,runtime_hours,gallons,rental,fuel_cost,\
                       delivery,pm_cost,total,co2_tons";

/// Exports a report's cost rows to a CSV file at the given path.
///
/// Writes a header row followed by one row per (unit, period): EBOSS weekly
/// and monthly, then the standard generator. Produces deterministic output
/// for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(report: &SizingReport, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(report, buf)
}

/// Writes a report's cost rows as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(report: &SizingReport, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for (unit, b) in report.cost_rows() {
        wtr.write_record(&[
            unit.to_string(),
            b.period.to_string(),
            format!("{:.2}", b.runtime_hours),
            format!("{:.2}", b.gallons),
            format!("{:.2}", b.rental),
            format!("{:.2}", b.fuel_cost),
            format!("{:.2}", b.delivery),
            format!("{:.2}", b.pm_cost),
            format!("{:.2}", b.total),
            format!("{:.4}", b.co2_tons),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
