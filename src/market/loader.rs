//! CSV-based market data loader
//!
//! Loads the external parameter and deal tables from CSV. Blank cells map
//! to `None` and malformed rows are skipped with a warning; sparseness is
//! the normal condition for this data, not an error.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use super::deal::FirmDeal;
use super::parameter::FirmParameter;

/// Default path to the market data directory
pub const DEFAULT_MARKET_PATH: &str = "data/market";

/// Errors from loading market data files.
///
/// These surface only in loaders and binaries; the engine itself never
/// sees them (it takes in-memory tables).
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("failed to open market data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read market data csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Load firm parameters from `firm_parameters.csv` in the given directory.
///
/// Expected headers: `firm,name,value,note`.
pub fn load_parameters(dir: &Path) -> Result<Vec<FirmParameter>, MarketDataError> {
    let file = File::open(dir.join("firm_parameters.csv"))?;
    load_parameters_from_reader(file)
}

/// Load firm parameters from any reader.
pub fn load_parameters_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<FirmParameter>, MarketDataError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => log::warn!("skipping malformed parameter row: {}", e),
        }
    }

    Ok(rows)
}

/// Load firm deals from `firm_deals.csv` in the given directory.
///
/// Expected headers: `firm,upfrontMin,upfrontMax,backendMin,backendMax,notes`.
pub fn load_deals(dir: &Path) -> Result<Vec<FirmDeal>, MarketDataError> {
    let file = File::open(dir.join("firm_deals.csv"))?;
    load_deals_from_reader(file)
}

/// Load firm deals from any reader.
pub fn load_deals_from_reader<R: Read>(reader: R) -> Result<Vec<FirmDeal>, MarketDataError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => log::warn!("skipping malformed deal row: {}", e),
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_parameters_with_blanks() {
        let csv = "firm,name,value,note\n\
                   Morgan Stanley,newGridPayout,0.48,desk estimate\n\
                   UBS,newGridPayout,,\n\
                   ,annualGrowthRate,0.08,\n";
        let rows = load_parameters_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].value, Some(0.48));
        assert_eq!(rows[0].note.as_deref(), Some("desk estimate"));
        assert_eq!(rows[1].value, None);
        assert!(rows[2].firm.is_empty());
    }

    #[test]
    fn test_load_deals_with_partial_ranges() {
        let csv = "firm,upfrontMin,upfrontMax,backendMin,backendMax,notes\n\
                   Morgan Stanley,1.5,2.0,0.2,0.4,\n\
                   Sanctuary,0.5,,,,verbal only\n";
        let rows = load_deals_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].upfront_midpoint(), Some(1.75));
        assert_eq!(rows[1].upfront_midpoint(), Some(0.5));
        assert_eq!(rows[1].backend_midpoint(), None);
        assert_eq!(rows[1].notes.as_deref(), Some("verbal only"));
    }

    #[test]
    fn test_malformed_rows_are_skipped_not_fatal() {
        let csv = "firm,name,value,note\n\
                   Morgan Stanley,newGridPayout,not-a-number,\n\
                   UBS,newGridPayout,0.51,\n";
        let rows = load_parameters_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, Some(0.51));
    }
}
