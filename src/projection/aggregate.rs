//! Aggregation, ranking, and the stay-vs-move delta
//!
//! The best-offer selection never returns NaN or null: a three-tier
//! fallback chain runs from ranked totals, to a multiple of the best
//! guaranteed upfront, to a fixed business floor.

use crate::advisor::AdvisorProfile;
use crate::market::CanonicalFirm;

use super::engine::OfferConfig;
use super::finite_or;
use super::offers::{
    BackendComposition, FirmSeries, FirmUpfront, Metric, OfferMetrics, OfferResult,
};

/// Weight applied to the best guaranteed upfront when no ranked total is
/// usable; approximates three years of comparable income.
pub const UPFRONT_INCOME_YEARS: f64 = 3.0;

/// Final floor for the best-offer figure, in millions.
pub const DEFAULT_BEST_DEAL_MILLIONS: f64 = 3.5;

/// Rank the projected series and assemble the result object.
///
/// `previous_best` feeds the period-over-period percent change; absent or
/// non-positive values report a change of zero.
pub fn aggregate(
    profile: &AdvisorProfile,
    comparison: Vec<FirmSeries>,
    upfronts: Vec<FirmUpfront>,
    selected: &[CanonicalFirm],
    previous_best: Option<f64>,
    config: &OfferConfig,
) -> OfferResult {
    let (best_firm, best_value) = best_offer(&comparison, &upfronts, selected);

    let pct_change = match previous_best {
        Some(prev) if prev.is_finite() && prev > 0.0 => {
            finite_or((best_value - prev) / prev * 100.0, 0.0)
        }
        _ => 0.0,
    };

    let revenue = finite_or(profile.trailing_revenue, 0.0);
    let stay_total = stay_trajectory_total(revenue, config);
    let comp_delta = finite_or(best_value * 1_000_000.0 - stay_total, 0.0);

    OfferResult {
        metrics: OfferMetrics {
            total_deal: Metric {
                value: best_value,
                pct_change,
            },
            trailing_revenue: Metric::flat(revenue),
            total_comp_delta: Metric::flat(comp_delta),
        },
        best_firm,
        comparison,
        guaranteed_upfront: upfronts,
        backend_composition: BackendComposition::default(),
    }
}

/// Best-offer selection with the three-tier fallback chain.
fn best_offer(
    comparison: &[FirmSeries],
    upfronts: &[FirmUpfront],
    selected: &[CanonicalFirm],
) -> (Option<CanonicalFirm>, f64) {
    // Tier 1: maximum ranked total among selected firms
    let mut best: Option<(CanonicalFirm, f64)> = None;
    for series in comparison {
        if !selected.contains(&series.firm) {
            continue;
        }
        let total = series.total();
        if !total.is_finite() || total <= 0.0 {
            continue;
        }
        if best.map_or(true, |(_, b)| total > b) {
            best = Some((series.firm, total));
        }
    }
    if let Some((firm, total)) = best {
        return (Some(firm), total);
    }

    // Tier 2: best guaranteed upfront weighted to comparable income
    let best_upfront = upfronts
        .iter()
        .map(|u| u.value)
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold(f64::NEG_INFINITY, f64::max);
    if best_upfront.is_finite() && best_upfront > 0.0 {
        log::debug!("no usable ranked total; falling back to weighted upfront");
        return (None, best_upfront * UPFRONT_INCOME_YEARS);
    }

    // Tier 3: fixed business floor
    log::debug!("no usable upfront either; using fixed best-deal floor");
    (None, DEFAULT_BEST_DEAL_MILLIONS)
}

/// Total compensation over the horizon if the advisor stays put, dollars.
fn stay_trajectory_total(revenue: f64, config: &OfferConfig) -> f64 {
    let growth = 1.0 + config.annual_growth_rate;
    (1..=config.horizon_years)
        .map(|year| revenue * growth.powi(year as i32 - 1) * config.current_grid_payout)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{BestDealStore, InMemoryBestDealStore};
    use crate::market::MarketData;
    use crate::projection::engine::OfferEngine;
    use approx::assert_relative_eq;

    fn run(
        profile: &AdvisorProfile,
        selected: &[CanonicalFirm],
        market: &MarketData,
        previous: Option<f64>,
    ) -> OfferResult {
        let store = match previous {
            Some(v) => InMemoryBestDealStore::with_value(v),
            None => InMemoryBestDealStore::new(),
        };
        OfferEngine::default().compute_selected(profile, selected, market, &store)
    }

    #[test]
    fn test_best_offer_picks_maximum_selected_total() {
        let profile = AdvisorProfile::new(120_000_000.0, 1_000_000.0, 75.0);
        let selected = [CanonicalFirm::MorganStanley, CanonicalFirm::Independent];
        let result = run(&profile, &selected, &MarketData::empty(), None);

        // Independent's 0.80 grid beats the wirehouse over ten years
        assert_eq!(result.best_firm, Some(CanonicalFirm::Independent));
        assert!(result.metrics.total_deal.value > 0.0);
    }

    #[test]
    fn test_no_nan_with_all_zero_inputs() {
        let profile = AdvisorProfile::new(0.0, 0.0, 0.0);
        let result = run(&profile, &[], &MarketData::empty(), None);

        assert!(result.metrics.total_deal.value.is_finite());
        assert!(result.metrics.total_comp_delta.value.is_finite());
        assert!(result.metrics.trailing_revenue.value.is_finite());
    }

    #[test]
    fn test_empty_selection_hits_fixed_floor() {
        let profile = AdvisorProfile::new(0.0, 0.0, 0.0);
        let result = run(&profile, &[], &MarketData::empty(), None);

        assert_eq!(result.metrics.total_deal.value, DEFAULT_BEST_DEAL_MILLIONS);
        assert_eq!(result.best_firm, None);
    }

    #[test]
    fn test_pct_change_against_previous_best() {
        let profile = AdvisorProfile::new(0.0, 0.0, 75.0);
        // Zero revenue forces the 3.5 floor; prior best of 3.5 means 0% change
        let result = run(&profile, &[], &MarketData::empty(), Some(3.5));
        assert_relative_eq!(result.metrics.total_deal.pct_change, 0.0);

        let doubled = run(&profile, &[], &MarketData::empty(), Some(1.75));
        assert_relative_eq!(doubled.metrics.total_deal.pct_change, 100.0);
    }

    #[test]
    fn test_pct_change_zero_without_history() {
        let profile = AdvisorProfile::new(120_000_000.0, 1_000_000.0, 75.0);
        let result = run(&profile, &[CanonicalFirm::Goldman], &MarketData::empty(), None);
        assert_eq!(result.metrics.total_deal.pct_change, 0.0);
    }

    #[test]
    fn test_stay_vs_move_delta() {
        let profile = AdvisorProfile::new(120_000_000.0, 1_000_000.0, 75.0);
        let selected = [CanonicalFirm::Independent];
        let result = run(&profile, &selected, &MarketData::empty(), None);

        // Stay baseline: 1M revenue at 50% grid compounding 8% for 10 years
        let growth: f64 = 1.08;
        let stay: f64 = (1..=10)
            .map(|y| 1_000_000.0 * growth.powi(y - 1) * 0.50)
            .sum();
        let expected = result.metrics.total_deal.value * 1_000_000.0 - stay;
        assert_relative_eq!(
            result.metrics.total_comp_delta.value,
            expected,
            max_relative = 1e-12
        );
        // Independent's higher grid plus a deal must beat staying at 50%
        assert!(result.metrics.total_comp_delta.value > 0.0);
    }

    #[test]
    fn test_new_best_is_written_back_to_history() {
        let profile = AdvisorProfile::new(120_000_000.0, 1_000_000.0, 75.0);
        let store = InMemoryBestDealStore::new();
        let result = OfferEngine::default().compute_selected(
            &profile,
            &[CanonicalFirm::Goldman],
            &MarketData::empty(),
            &store,
        );

        assert_eq!(store.load(), Some(result.metrics.total_deal.value));
    }

    #[test]
    fn test_result_shape_is_fixed_width() {
        let profile = AdvisorProfile::new(120_000_000.0, 1_000_000.0, 75.0);
        let result = run(
            &profile,
            &[CanonicalFirm::Rbc],
            &MarketData::empty(),
            None,
        );

        assert_eq!(result.comparison.len(), CanonicalFirm::ALL.len());
        assert_eq!(result.guaranteed_upfront.len(), CanonicalFirm::ALL.len());
        for (series, firm) in result.comparison.iter().zip(CanonicalFirm::ALL) {
            assert_eq!(series.firm, firm);
        }
    }
}
