use anyhow::Result;
use std::io::Write;

use crate::application::BudgetReport;
use crate::domain::{format_cents, Percentage};

/// Writes a budget report out in machine-readable formats.
pub struct Exporter<'a> {
    report: &'a BudgetReport,
}

impl<'a> Exporter<'a> {
    pub fn new(report: &'a BudgetReport) -> Self {
        Self { report }
    }

    /// Export items to CSV format. Returns the number of rows written.
    pub fn export_items_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["kind", "id", "description", "value", "percentage"])?;

        let mut count = 0;
        for item in self.report.items() {
            let id = item.id.to_string();
            let value = format_cents(item.value);
            let percentage = item.percentage.map(percentage_cell).unwrap_or_default();

            csv_writer.write_record([
                item.kind.as_str(),
                id.as_str(),
                item.description.as_str(),
                value.as_str(),
                percentage.as_str(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the full report as pretty-printed JSON
    pub fn export_report_json<W: Write>(&self, mut writer: W) -> Result<()> {
        let json = serde_json::to_string_pretty(self.report)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// `-1` when undefined, like the JSON form.
fn percentage_cell(percentage: Percentage) -> String {
    i64::from(percentage).to_string()
}
