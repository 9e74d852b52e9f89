//! Offer output structures for projections

use serde::{Deserialize, Serialize};

use crate::market::CanonicalFirm;

use super::finite_or;

/// One row of a firm's time series: compensation for one year, in
/// millions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyOffer {
    /// 1-indexed projection year.
    pub year: u32,
    pub value: f64,
}

/// A firm's full projected series, always `horizon_years` long.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmSeries {
    pub firm: CanonicalFirm,
    pub years: Vec<YearlyOffer>,
}

impl FirmSeries {
    /// All-zero series of full width, used for unselected firms so the
    /// comparison table keeps a fixed shape.
    pub fn zeroed(firm: CanonicalFirm, horizon_years: u32) -> Self {
        Self {
            firm,
            years: (1..=horizon_years)
                .map(|year| YearlyOffer { year, value: 0.0 })
                .collect(),
        }
    }

    /// Sum of the series; non-finite entries count as zero.
    pub fn total(&self) -> f64 {
        self.years
            .iter()
            .map(|y| finite_or(y.value, 0.0))
            .sum()
    }
}

/// Single guaranteed-upfront figure per firm, in millions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmUpfront {
    pub firm: CanonicalFirm,
    pub value: f64,
}

/// A headline number with its period-over-period percent change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub value: f64,
    pub pct_change: f64,
}

impl Metric {
    pub fn flat(value: f64) -> Self {
        Self {
            value,
            pct_change: 0.0,
        }
    }
}

/// Headline metrics block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferMetrics {
    /// Best total deal value among the selected firms, millions.
    pub total_deal: Metric,

    /// The advisor's trailing twelve-month revenue, dollars.
    pub trailing_revenue: Metric,

    /// Ten-year stay-vs-move delta, dollars.
    pub total_comp_delta: Metric,
}

/// Share of backend compensation attributable to each driver, percent.
pub const BACKEND_GROWTH_SHARE_PCT: f64 = 45.0;
pub const BACKEND_ASSETS_SHARE_PCT: f64 = 35.0;
pub const BACKEND_TENURE_SHARE_PCT: f64 = 20.0;

/// Backend-composition breakdown shown alongside the comparison table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendComposition {
    pub growth_pct: f64,
    pub assets_pct: f64,
    pub tenure_pct: f64,
}

impl Default for BackendComposition {
    fn default() -> Self {
        Self {
            growth_pct: BACKEND_GROWTH_SHARE_PCT,
            assets_pct: BACKEND_ASSETS_SHARE_PCT,
            tenure_pct: BACKEND_TENURE_SHARE_PCT,
        }
    }
}

/// Complete engine output: metrics, fixed-width comparison table, per-firm
/// upfront figures, and the backend breakdown.
///
/// Constructed fresh on every invocation and never mutated after return.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferResult {
    pub metrics: OfferMetrics,

    /// Firm whose total won the ranking; `None` when a fallback tier
    /// supplied the best-offer value instead.
    pub best_firm: Option<CanonicalFirm>,

    /// One series per canonical firm, in `CanonicalFirm::ALL` order.
    pub comparison: Vec<FirmSeries>,

    /// One guaranteed-upfront figure per canonical firm, same order.
    pub guaranteed_upfront: Vec<FirmUpfront>,

    pub backend_composition: BackendComposition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_series_shape() {
        let series = FirmSeries::zeroed(CanonicalFirm::Goldman, 10);
        assert_eq!(series.years.len(), 10);
        assert_eq!(series.years[0].year, 1);
        assert_eq!(series.years[9].year, 10);
        assert_eq!(series.total(), 0.0);
    }

    #[test]
    fn test_total_ignores_non_finite_entries() {
        let mut series = FirmSeries::zeroed(CanonicalFirm::Goldman, 3);
        series.years[0].value = 1.5;
        series.years[1].value = f64::NAN;
        series.years[2].value = 2.0;
        assert_eq!(series.total(), 3.5);
    }

    #[test]
    fn test_backend_composition_sums_to_hundred() {
        let comp = BackendComposition::default();
        assert_eq!(comp.growth_pct + comp.assets_pct + comp.tenure_pct, 100.0);
    }
}
