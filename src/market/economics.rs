//! Per-firm payout economics and business-default fallbacks
//!
//! One static table drives the per-firm/per-year projection loop. Grid
//! ratios approximate historical payout norms: ~50% for wirehouses,
//! 75–85% for lower-overhead models. Fallback ratios are business
//! defaults, not computed values; they must be preserved exactly for
//! output compatibility.

use super::firms::CanonicalFirm;

/// Payout economics for one canonical firm.
#[derive(Debug, Clone, Copy)]
pub struct FirmEconomics {
    pub firm: CanonicalFirm,

    /// Ongoing grid payout as a fraction of trailing revenue. Used when no
    /// `newGridPayout` parameter resolves for the firm.
    pub grid_payout: f64,

    /// Guaranteed-upfront multiple of trailing revenue when no deal row
    /// resolves.
    pub fallback_upfront: f64,

    /// Backend multiple of trailing revenue when no deal row resolves.
    pub fallback_backend: f64,

    /// Hard upfront override applied regardless of resolved deal data.
    // TODO: confirm the Sanctuary/Truist 60% override with the recruiting
    // desk; it predates the current deal table.
    pub fixed_upfront: Option<f64>,
}

static FIRM_ECONOMICS: [FirmEconomics; 14] = [
    FirmEconomics {
        firm: CanonicalFirm::MorganStanley,
        grid_payout: 0.50,
        fallback_upfront: 1.60,
        fallback_backend: 0.30,
        fixed_upfront: None,
    },
    FirmEconomics {
        firm: CanonicalFirm::MerrillLynch,
        grid_payout: 0.50,
        fallback_upfront: 1.50,
        fallback_backend: 0.30,
        fixed_upfront: None,
    },
    FirmEconomics {
        firm: CanonicalFirm::UbsWealth,
        grid_payout: 0.50,
        fallback_upfront: 1.55,
        fallback_backend: 0.30,
        fixed_upfront: None,
    },
    FirmEconomics {
        firm: CanonicalFirm::Ameriprise,
        grid_payout: 0.60,
        fallback_upfront: 1.30,
        fallback_backend: 0.25,
        fixed_upfront: None,
    },
    FirmEconomics {
        firm: CanonicalFirm::Finet,
        grid_payout: 0.85,
        fallback_upfront: 1.00,
        fallback_backend: 0.15,
        fixed_upfront: None,
    },
    FirmEconomics {
        firm: CanonicalFirm::Independent,
        grid_payout: 0.80,
        fallback_upfront: 1.00,
        fallback_backend: 0.10,
        fixed_upfront: None,
    },
    FirmEconomics {
        firm: CanonicalFirm::Goldman,
        grid_payout: 0.50,
        fallback_upfront: 1.35,
        fallback_backend: 0.25,
        fixed_upfront: None,
    },
    FirmEconomics {
        firm: CanonicalFirm::Jpm,
        grid_payout: 0.50,
        fallback_upfront: 1.40,
        fallback_backend: 0.25,
        fixed_upfront: None,
    },
    FirmEconomics {
        firm: CanonicalFirm::Rbc,
        grid_payout: 0.52,
        fallback_upfront: 1.50,
        fallback_backend: 0.25,
        fixed_upfront: None,
    },
    FirmEconomics {
        firm: CanonicalFirm::RaymondJames,
        grid_payout: 0.55,
        fallback_upfront: 1.25,
        fallback_backend: 0.20,
        fixed_upfront: None,
    },
    FirmEconomics {
        firm: CanonicalFirm::Rockefeller,
        grid_payout: 0.55,
        fallback_upfront: 1.75,
        fallback_backend: 0.35,
        fixed_upfront: None,
    },
    FirmEconomics {
        firm: CanonicalFirm::Sanctuary,
        grid_payout: 0.75,
        fallback_upfront: 0.60,
        fallback_backend: 0.10,
        fixed_upfront: Some(0.60),
    },
    FirmEconomics {
        firm: CanonicalFirm::WellsFargo,
        grid_payout: 0.50,
        fallback_upfront: 1.50,
        fallback_backend: 0.25,
        fixed_upfront: None,
    },
    FirmEconomics {
        firm: CanonicalFirm::Truist,
        grid_payout: 0.60,
        fallback_upfront: 0.60,
        fallback_backend: 0.10,
        fixed_upfront: Some(0.60),
    },
];

impl FirmEconomics {
    /// Economics row for a canonical firm. Total over the closed enum.
    pub fn for_firm(firm: CanonicalFirm) -> &'static FirmEconomics {
        FIRM_ECONOMICS
            .iter()
            .find(|e| e.firm == firm)
            .unwrap_or(&FIRM_ECONOMICS[5]) // Independent; unreachable for the closed enum
    }
}
