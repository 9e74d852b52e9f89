//! Deal adjustments derived from the advisor's business mix
//!
//! A fixed, additive rule stack. Percentages are simple sums, never
//! compounded; the projection applies them as `(1 + pct)` multipliers
//! against base deal figures. Sums are accepted as-is without clamping,
//! so a heavily penalized profile can produce a negative multiplier.

use crate::advisor::AdvisorProfile;

/// Additive upfront/backend adjustments, as signed fractions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DealAdjustments {
    pub upfront_pct: f64,
    pub backend_pct: f64,
}

impl DealAdjustments {
    /// Multiplier applied to guaranteed-upfront deal figures.
    pub fn upfront_multiplier(&self) -> f64 {
        1.0 + self.upfront_pct
    }

    /// Multiplier applied to backend deal figures.
    pub fn backend_multiplier(&self) -> f64 {
        1.0 + self.backend_pct
    }
}

/// Evaluate the rule stack for one profile.
///
/// Rules run in a fixed order for testability; addition makes the order
/// irrelevant to the result.
pub fn compute_adjustments(profile: &AdvisorProfile) -> DealAdjustments {
    let mut upfront = 0.0;
    let mut backend = 0.0;

    // 1. Fee-based tier
    let fee = if profile.fee_based_pct.is_finite() {
        profile.fee_based_pct
    } else {
        0.0
    };
    if fee >= 85.0 {
        upfront += 0.05;
        backend += 0.10;
    } else if fee < 65.0 {
        upfront -= 0.05;
        backend -= 0.05;
    }

    // 2. Banking relationship
    if profile.banking_relationship {
        upfront += 0.02;
    }

    // 3. International: base credit, breadth credit past three countries,
    //    and a flat diversity credit
    if profile.has_international() {
        upfront += 0.03;
        if profile.international_countries.len() > 3 {
            upfront += 0.02;
        }
        upfront += 0.02;
    }

    // 4. Lending relationship
    if profile.lending_relationship {
        upfront += 0.02;
    }

    // 5. Separately-managed accounts
    if profile.uses_smas {
        upfront += 0.02;
    }

    // 6. Household scale
    if profile.household_count > 100 {
        backend += 0.03;
    }

    // 7. Outstanding deferred comp reduces what a firm will front
    if profile.deferred_comp_outstanding {
        upfront -= 0.03;
    }

    // 8. Already under a competing deal
    if profile.under_competing_deal {
        upfront -= 0.05;
        backend -= 0.05;
    }

    DealAdjustments {
        upfront_pct: upfront,
        backend_pct: backend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base_profile() -> AdvisorProfile {
        AdvisorProfile::new(100_000_000.0, 1_000_000.0, 75.0)
    }

    #[test]
    fn test_neutral_profile_has_no_adjustment() {
        let adj = compute_adjustments(&base_profile());
        assert_eq!(adj, DealAdjustments::default());
        assert_eq!(adj.upfront_multiplier(), 1.0);
    }

    #[test]
    fn test_fee_based_tiers() {
        let mut profile = base_profile();

        profile.fee_based_pct = 85.0;
        let high = compute_adjustments(&profile);
        assert_relative_eq!(high.upfront_pct, 0.05);
        assert_relative_eq!(high.backend_pct, 0.10);

        profile.fee_based_pct = 64.9;
        let low = compute_adjustments(&profile);
        assert_relative_eq!(low.upfront_pct, -0.05);
        assert_relative_eq!(low.backend_pct, -0.05);

        profile.fee_based_pct = 65.0;
        assert_eq!(compute_adjustments(&profile), DealAdjustments::default());
    }

    #[test]
    fn test_international_has_three_additive_terms() {
        let mut profile = base_profile();
        profile.international_countries =
            vec!["UK".into(), "CH".into(), "SG".into(), "HK".into()];

        let adj = compute_adjustments(&profile);
        // 0.03 base + 0.02 breadth (>3 countries) + 0.02 diversity
        assert_relative_eq!(adj.upfront_pct, 0.07, epsilon = 1e-12);

        profile.international_countries.truncate(2);
        let narrow = compute_adjustments(&profile);
        assert_relative_eq!(narrow.upfront_pct, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_rules_are_additive() {
        let mut profile = base_profile();
        profile.fee_based_pct = 90.0;
        profile.banking_relationship = true;
        profile.lending_relationship = true;
        profile.uses_smas = true;
        profile.household_count = 150;
        profile.deferred_comp_outstanding = true;
        profile.under_competing_deal = true;

        let adj = compute_adjustments(&profile);
        // 0.05 + 0.02 + 0.02 + 0.02 - 0.03 - 0.05
        assert_relative_eq!(adj.upfront_pct, 0.03, epsilon = 1e-12);
        // 0.10 + 0.03 - 0.05
        assert_relative_eq!(adj.backend_pct, 0.08, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_sums_are_not_clamped() {
        let mut profile = base_profile();
        profile.fee_based_pct = 10.0;
        profile.deferred_comp_outstanding = true;
        profile.under_competing_deal = true;

        let adj = compute_adjustments(&profile);
        assert_relative_eq!(adj.upfront_pct, -0.13, epsilon = 1e-12);
        assert!(adj.upfront_multiplier() < 1.0);
    }
}
