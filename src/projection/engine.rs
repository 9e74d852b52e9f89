//! Core projection engine for per-firm, per-year offer trajectories
//!
//! One generic loop over the firm economics table replaces any per-firm
//! branching: every firm is priced from the same year-phase formula with
//! its own table row. Year 1 carries the guaranteed upfront, year 2 the
//! backend payment, year 3 onward is grid only; the recruiting deal is
//! fully amortized by year 3.

use crate::adjustments::{compute_adjustments, DealAdjustments};
use crate::advisor::AdvisorProfile;
use crate::history::BestDealStore;
use crate::market::{
    normalize_selection, resolve_deal, resolve_parameter, CanonicalFirm, FirmEconomics,
    MarketData,
};

use super::aggregate::aggregate;
use super::finite_or;
use super::offers::{FirmSeries, FirmUpfront, OfferResult, YearlyOffer};

/// Default projection horizon in years.
pub const DEFAULT_HORIZON_YEARS: u32 = 10;

/// Default annual book growth rate.
pub const DEFAULT_ANNUAL_GROWTH_RATE: f64 = 0.08;

/// Default grid payout at the advisor's current firm, for the
/// stay-vs-move baseline.
pub const DEFAULT_CURRENT_GRID_PAYOUT: f64 = 0.50;

/// Per-firm grid payout override in the external parameter table.
pub const PARAM_NEW_GRID_PAYOUT: &str = "newGridPayout";

/// Configuration for one offer computation
#[derive(Debug, Clone)]
pub struct OfferConfig {
    /// Number of years to project
    pub horizon_years: u32,

    /// Annual growth rate applied to trailing revenue
    pub annual_growth_rate: f64,

    /// Grid payout ratio at the advisor's current firm
    pub current_grid_payout: f64,

    /// Whether advanced business-mix attributes are honored
    pub premium_access: bool,
}

impl Default for OfferConfig {
    fn default() -> Self {
        Self {
            horizon_years: DEFAULT_HORIZON_YEARS,
            annual_growth_rate: DEFAULT_ANNUAL_GROWTH_RATE,
            current_grid_payout: DEFAULT_CURRENT_GRID_PAYOUT,
            premium_access: false,
        }
    }
}

/// Main offer projection engine
pub struct OfferEngine {
    config: OfferConfig,
}

impl OfferEngine {
    /// Create a new engine with the given config
    pub fn new(config: OfferConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OfferConfig {
        &self.config
    }

    /// Compute a complete offer result for raw firm-name selections.
    ///
    /// Unmapped names are ignored. The previous best deal is read from
    /// `history` before aggregation and the new best is written back
    /// after, per the side-channel contract.
    pub fn compute(
        &self,
        profile: &AdvisorProfile,
        firm_names: &[String],
        market: &MarketData,
        history: &dyn BestDealStore,
    ) -> OfferResult {
        let selected = normalize_selection(firm_names);
        self.compute_selected(profile, &selected, market, history)
    }

    /// Compute a complete offer result for an already-normalized selection.
    pub fn compute_selected(
        &self,
        profile: &AdvisorProfile,
        selected: &[CanonicalFirm],
        market: &MarketData,
        history: &dyn BestDealStore,
    ) -> OfferResult {
        let gated = self.gated_profile(profile);
        let adjustments = compute_adjustments(&gated);
        let (comparison, upfronts) = self.project_all(&gated, selected, market, adjustments);

        let previous_best = history.load();
        let result = aggregate(
            &gated,
            comparison,
            upfronts,
            selected,
            previous_best,
            &self.config,
        );
        history.store(result.metrics.total_deal.value);

        result
    }

    /// Project the yearly series for every canonical firm.
    ///
    /// Firms outside `selected` get an all-zero series of full width so
    /// the output shape is identical across calls.
    pub fn project(
        &self,
        profile: &AdvisorProfile,
        selected: &[CanonicalFirm],
        market: &MarketData,
    ) -> Vec<FirmSeries> {
        let gated = self.gated_profile(profile);
        let adjustments = compute_adjustments(&gated);
        self.project_all(&gated, selected, market, adjustments).0
    }

    /// Apply premium gating before any rule evaluation.
    fn gated_profile(&self, profile: &AdvisorProfile) -> AdvisorProfile {
        if self.config.premium_access {
            profile.clone()
        } else {
            profile.without_premium_attributes()
        }
    }

    fn project_all(
        &self,
        profile: &AdvisorProfile,
        selected: &[CanonicalFirm],
        market: &MarketData,
        adjustments: DealAdjustments,
    ) -> (Vec<FirmSeries>, Vec<FirmUpfront>) {
        let mut comparison = Vec::with_capacity(CanonicalFirm::ALL.len());
        let mut upfronts = Vec::with_capacity(CanonicalFirm::ALL.len());

        for firm in CanonicalFirm::ALL {
            if selected.contains(&firm) {
                let (series, upfront) = self.project_firm(firm, profile, market, adjustments);
                comparison.push(series);
                upfronts.push(upfront);
            } else {
                comparison.push(FirmSeries::zeroed(firm, self.config.horizon_years));
                upfronts.push(FirmUpfront { firm, value: 0.0 });
            }
        }

        (comparison, upfronts)
    }

    /// Project one selected firm across the horizon.
    fn project_firm(
        &self,
        firm: CanonicalFirm,
        profile: &AdvisorProfile,
        market: &MarketData,
        adjustments: DealAdjustments,
    ) -> (FirmSeries, FirmUpfront) {
        let econ = FirmEconomics::for_firm(firm);
        let base_rev_millions = finite_or(profile.trailing_revenue, 0.0) / 1_000_000.0;

        let grid_ratio = resolve_parameter(
            &market.parameters,
            firm,
            PARAM_NEW_GRID_PAYOUT,
            econ.grid_payout,
        );

        let deal = resolve_deal(&market.deals, firm);

        // Fixed overrides win over resolved deal data; otherwise the deal
        // midpoint, then the business-default fallback.
        let upfront_rate = econ
            .fixed_upfront
            .or_else(|| deal.and_then(|d| d.upfront_midpoint()))
            .unwrap_or(econ.fallback_upfront);
        let backend_rate = deal
            .and_then(|d| d.backend_midpoint())
            .unwrap_or(econ.fallback_backend);

        let guaranteed_upfront = finite_or(
            upfront_rate * adjustments.upfront_multiplier() * base_rev_millions,
            0.0,
        );
        let backend_payment = finite_or(
            backend_rate * adjustments.backend_multiplier() * base_rev_millions,
            0.0,
        );

        let growth = 1.0 + self.config.annual_growth_rate;
        let mut years = Vec::with_capacity(self.config.horizon_years as usize);

        for year in 1..=self.config.horizon_years {
            let rev_millions = base_rev_millions * growth.powi(year as i32 - 1);
            let grid_payout = rev_millions * grid_ratio;

            let value = match year {
                1 => guaranteed_upfront + grid_payout,
                2 => backend_payment + grid_payout,
                _ => grid_payout,
            };

            years.push(YearlyOffer {
                year,
                value: finite_or(value, 0.0),
            });
        }

        (
            FirmSeries { firm, years },
            FirmUpfront {
                firm,
                value: guaranteed_upfront,
            },
        )
    }
}

impl Default for OfferEngine {
    fn default() -> Self {
        Self::new(OfferConfig::default())
    }
}
