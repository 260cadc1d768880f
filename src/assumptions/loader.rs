//! CSV-based loader for per-period assumptions
//!
//! Expected header (any subset, missing columns default to 0):
//! `revenue,cost_rate,cost,expense,sales_tax_rate,tax,investment,depreciation`

use std::io::Read;
use std::path::Path;

use csv::{Reader, Trim};

use super::{PeriodAssumptions, PeriodInput};
use crate::error::Result;

/// Load period assumptions from a CSV file, one row per period
pub fn load_periods<P: AsRef<Path>>(path: P) -> Result<PeriodAssumptions> {
    let file = std::fs::File::open(path)?;
    load_periods_from_reader(file)
}

/// Load period assumptions from any reader (e.g., string buffer, stdin)
pub fn load_periods_from_reader<R: Read>(reader: R) -> Result<PeriodAssumptions> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    read_rows(&mut csv_reader)
}

fn read_rows<R: Read>(reader: &mut Reader<R>) -> Result<PeriodAssumptions> {
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: PeriodInput = result?;
        rows.push(row);
    }
    log::debug!("loaded {} assumption periods from CSV", rows.len());

    PeriodAssumptions::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CashflowError;

    #[test]
    fn test_load_periods_from_reader() {
        let data = "revenue,cost_rate,sales_tax_rate,investment,depreciation\n\
                    1000000,0.6,0.1,50000,10000\n\
                    1000000,0.6,0.1,0,10000\n";

        let assumptions = load_periods_from_reader(data.as_bytes()).unwrap();
        assert_eq!(assumptions.len(), 2);

        let first = assumptions.get(0).unwrap();
        assert_eq!(first.revenue, 1_000_000.0);
        assert_eq!(first.cost_rate, 0.6);
        assert_eq!(first.investment, 50_000.0);
        // Columns absent from the header default to zero
        assert_eq!(first.tax, 0.0);
        assert_eq!(first.expense, 0.0);

        assert_eq!(assumptions.get(1).unwrap().investment, 0.0);
    }

    #[test]
    fn test_invalid_row_rejected() {
        let data = "revenue,cost_rate\n100,2.0\n";
        let err = load_periods_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CashflowError::InvalidParameter { .. }));
    }

    #[test]
    fn test_unparseable_value_is_csv_error() {
        let data = "revenue\nabc\n";
        let err = load_periods_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CashflowError::Csv(_)));
    }
}
