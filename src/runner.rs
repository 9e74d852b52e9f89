//! Offer runner for efficient repeated computations
//!
//! Pre-loads market data once, then allows computing offers for many
//! profiles and configs without re-reading CSV files.

use crate::advisor::AdvisorProfile;
use crate::history::{BestDealStore, NoHistory};
use crate::market::{MarketData, MarketDataError};
use crate::projection::{OfferConfig, OfferEngine, OfferResult};

/// Pre-loaded runner for batch offer computations
///
/// # Example
/// ```ignore
/// let runner = OfferRunner::from_csv()?;
///
/// for entry in advisors {
///     let result = runner.run(&entry.profile, &firm_names, OfferConfig::default());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct OfferRunner {
    market: MarketData,
}

impl OfferRunner {
    /// Create a runner with empty market tables; every lookup falls back
    /// to its business default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner with pre-built market data
    pub fn with_market(market: MarketData) -> Self {
        Self { market }
    }

    /// Create a runner by loading market data from the default CSV location
    pub fn from_csv() -> Result<Self, MarketDataError> {
        Ok(Self {
            market: MarketData::from_csv()?,
        })
    }

    /// Create a runner from a specific market data directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, MarketDataError> {
        Ok(Self {
            market: MarketData::from_csv_path(path)?,
        })
    }

    /// Compute one offer result without history (percent change is zero)
    pub fn run(
        &self,
        profile: &AdvisorProfile,
        firm_names: &[String],
        config: OfferConfig,
    ) -> OfferResult {
        self.run_with_history(profile, firm_names, config, &NoHistory)
    }

    /// Compute one offer result against an injected history store
    pub fn run_with_history(
        &self,
        profile: &AdvisorProfile,
        firm_names: &[String],
        config: OfferConfig,
        history: &dyn BestDealStore,
    ) -> OfferResult {
        let engine = OfferEngine::new(config);
        engine.compute(profile, firm_names, &self.market, history)
    }

    /// Get reference to the loaded market data for inspection
    pub fn market(&self) -> &MarketData {
        &self.market
    }

    /// Get mutable reference to the market data for customization
    pub fn market_mut(&mut self) -> &mut MarketData {
        &mut self.market
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{CanonicalFirm, FirmDeal};

    #[test]
    fn test_runner_with_in_memory_market() {
        let market = MarketData::new(
            vec![],
            vec![FirmDeal::new("morgan stanley", 1.5, 2.0, 0.2, 0.4)],
        );
        let runner = OfferRunner::with_market(market);
        let profile = AdvisorProfile::new(120_000_000.0, 1_000_000.0, 75.0);

        let result = runner.run(
            &profile,
            &["Morgan Stanley".to_string()],
            OfferConfig::default(),
        );

        assert_eq!(result.best_firm, Some(CanonicalFirm::MorganStanley));
        assert_eq!(result.metrics.total_deal.pct_change, 0.0);
    }

    #[test]
    fn test_runner_reuses_market_across_runs() {
        let runner = OfferRunner::new();
        let profile = AdvisorProfile::new(120_000_000.0, 1_000_000.0, 75.0);
        let firms = vec!["goldman".to_string()];

        let first = runner.run(&profile, &firms, OfferConfig::default());
        let second = runner.run(&profile, &firms, OfferConfig::default());

        assert_eq!(
            first.metrics.total_deal.value,
            second.metrics.total_deal.value
        );
    }
}
