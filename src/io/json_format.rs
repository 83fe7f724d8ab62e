//! JSON settlement output
//!
//! Reports are written as one pretty-printed array with an object per
//! group: its name, currency, display columns, totals and rows. Totals use
//! the camelCase names the web client expects (`totalPaid`, `totalUnPaid`, ...).

use crate::core::columns::ColumnMetadata;
use crate::core::report::GroupReport;
use crate::types::{FormattedRow, FormattedTotals, SettleError};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    group: &'a str,
    currency: &'a str,
    columns: Vec<ColumnMetadata>,
    totals: FormattedTotals,
    rows: Vec<FormattedRow>,
}

/// Write settlement reports as JSON
///
/// Without per-trip columns, the rows carry no trip shares either.
pub fn write_reports_json(
    reports: &[GroupReport],
    per_trip_columns: bool,
    output: &mut dyn Write,
) -> Result<(), SettleError> {
    let documents: Vec<JsonReport> = reports
        .iter()
        .map(|report| {
            let formatted = report.formatted();
            let mut rows = formatted.rows;
            if !per_trip_columns {
                rows.iter_mut().for_each(|row| row.trips.clear());
            }

            JsonReport {
                group: &report.group,
                currency: &report.currency,
                columns: report.columns(per_trip_columns),
                totals: formatted.totals,
                rows,
            }
        })
        .collect();

    serde_json::to_writer_pretty(&mut *output, &documents)?;
    writeln!(output)?;
    output.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Member, Trip};
    use rust_decimal::Decimal;
    use serde_json::Value;

    fn render(per_trip: bool) -> Value {
        let members = vec![
            Member::new(1, "Alice").with_paid(Decimal::new(30, 0)),
            Member::new(2, "Bob"),
        ];
        let trips = vec![Trip::new("Dinner", Decimal::new(20, 0), vec![1, 2])];
        let report = GroupReport::settle("Dinner Club", "$", &members, &trips);

        let mut output = Vec::new();
        write_reports_json(&[report], per_trip, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_totals_use_web_names() {
        let json = render(false);
        let totals = &json[0]["totals"];

        assert_eq!(totals["totalMember"], 2);
        assert_eq!(totals["totalPaid"], "$30.00");
        assert_eq!(totals["totalRemain"], "$20.00");
        assert_eq!(totals["totalSpend"], "-$10.00");
        assert_eq!(totals["totalUnPaid"], "-$10.00");
    }

    #[test]
    fn test_rows_and_columns() {
        let json = render(false);
        let report = &json[0];

        assert_eq!(report["group"], "Dinner Club");
        assert_eq!(report["currency"], "$");
        assert_eq!(report["rows"][1]["name"], "Bob");
        assert_eq!(report["rows"][1]["memberIndex"], 1);
        assert_eq!(report["rows"][1]["unpaid"], "-$10.00");
        assert_eq!(report["rows"][1]["trips"].as_array().unwrap().len(), 0);
        assert_eq!(report["columns"].as_array().unwrap().len(), 5);
        assert_eq!(report["columns"][1]["header"], "Name");
        assert_eq!(report["columns"][1]["align"], "left");
        assert_eq!(report["columns"][1]["width"]["kind"], "min");
    }

    #[test]
    fn test_per_trip_rows_carry_shares() {
        let json = render(true);
        let report = &json[0];

        assert_eq!(report["columns"].as_array().unwrap().len(), 6);
        assert_eq!(report["rows"][0]["trips"][0]["trip"], "Dinner");
        assert_eq!(report["rows"][0]["trips"][0]["share"], "$10.00");
    }
}
