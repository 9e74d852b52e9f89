//! Load advisor books from CSV
//!
//! Batch tooling reads one profile per row. Cells come straight from
//! spreadsheet exports, so every field goes through the same lenient
//! coercion as the JSON surface.

use std::io::Read;
use std::path::Path;

use thiserror::Error;

use super::profile::{coerce, AdvisorProfile};

/// Errors from loading an advisor book file.
#[derive(Debug, Error)]
pub enum BookLoadError {
    #[error("failed to open advisor book: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read advisor book csv: {0}")]
    Csv(#[from] csv::Error),
}

/// One advisor row from a book export.
#[derive(Debug, Clone)]
pub struct BookEntry {
    pub advisor_id: String,
    pub profile: AdvisorProfile,
}

/// Raw CSV row matching the book export columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "AdvisorId", default)]
    advisor_id: String,
    #[serde(rename = "AUM", default)]
    aum: String,
    #[serde(rename = "TrailingRevenue", default)]
    trailing_revenue: String,
    #[serde(rename = "FeeBasedPct", default)]
    fee_based_pct: String,
    #[serde(rename = "DeferredComp", default)]
    deferred_comp: String,
    #[serde(rename = "CompetingDeal", default)]
    competing_deal: String,
    #[serde(rename = "Banking", default)]
    banking: String,
    #[serde(rename = "InternationalCountries", default)]
    international_countries: String,
    #[serde(rename = "Lending", default)]
    lending: String,
    #[serde(rename = "SMA", default)]
    sma: String,
    #[serde(rename = "Households", default)]
    households: String,
}

impl CsvRow {
    fn into_entry(self) -> BookEntry {
        let countries: Vec<String> = self
            .international_countries
            .split(['|', ';'])
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        let households = coerce::parse_amount(&self.households);

        BookEntry {
            advisor_id: self.advisor_id,
            profile: AdvisorProfile {
                aum: coerce::parse_amount(&self.aum),
                trailing_revenue: coerce::parse_amount(&self.trailing_revenue),
                fee_based_pct: coerce::parse_amount(&self.fee_based_pct),
                deferred_comp_outstanding: coerce::parse_flag(&self.deferred_comp),
                under_competing_deal: coerce::parse_flag(&self.competing_deal),
                banking_relationship: coerce::parse_flag(&self.banking),
                international_countries: countries,
                lending_relationship: coerce::parse_flag(&self.lending),
                uses_smas: coerce::parse_flag(&self.sma),
                household_count: if households.is_sign_negative() {
                    0
                } else {
                    households as u32
                },
            },
        }
    }
}

/// Load all advisors from a CSV book export.
pub fn load_book<P: AsRef<Path>>(path: P) -> Result<Vec<BookEntry>, BookLoadError> {
    let file = std::fs::File::open(path)?;
    load_book_from_reader(file)
}

/// Load all advisors from any reader.
pub fn load_book_from_reader<R: Read>(reader: R) -> Result<Vec<BookEntry>, BookLoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = match result {
            Ok(row) => row,
            Err(e) => {
                log::warn!("skipping malformed advisor row: {}", e);
                continue;
            }
        };
        entries.push(row.into_entry());
    }

    Ok(entries)
}
