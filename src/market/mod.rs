//! External market data: firm identities, parameters, deals, economics

mod deal;
mod economics;
mod firms;
mod parameter;
pub mod loader;

pub use deal::{resolve_deal, FirmDeal};
pub use economics::FirmEconomics;
pub use firms::{normalize, normalize_selection, CanonicalFirm};
pub use loader::{MarketDataError, DEFAULT_MARKET_PATH};
pub use parameter::{resolve_parameter, FirmParameter};

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Container for the externally sourced tables one computation reads.
///
/// Both tables are optional in practice; an empty container is valid and
/// every lookup falls back to its caller-supplied default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    #[serde(default)]
    pub parameters: Vec<FirmParameter>,

    #[serde(default)]
    pub deals: Vec<FirmDeal>,
}

impl MarketData {
    /// Empty tables; every lookup resolves to its default.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(parameters: Vec<FirmParameter>, deals: Vec<FirmDeal>) -> Self {
        Self { parameters, deals }
    }

    /// Load both tables from CSV files in the default location (data/market/)
    pub fn from_csv() -> Result<Self, MarketDataError> {
        Self::from_csv_path(Path::new(DEFAULT_MARKET_PATH))
    }

    /// Load both tables from CSV files in a specific directory
    pub fn from_csv_path(dir: &Path) -> Result<Self, MarketDataError> {
        Ok(Self {
            parameters: loader::load_parameters(dir)?,
            deals: loader::load_deals(dir)?,
        })
    }
}
