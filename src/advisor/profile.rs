//! Advisor book-of-business profile
//!
//! The profile arrives from an upstream form layer that delivers numbers
//! as numbers, formatted strings ("$1,200,000", "85%"), or nothing at
//! all. Malformed values coerce to a default instead of rejecting the
//! request; the engine downstream never sees a parse error.

use serde::{Deserialize, Serialize};

/// An advisor's book of business and business-mix attributes.
///
/// Immutable input, owned by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorProfile {
    /// Assets under management, dollars.
    #[serde(default, deserialize_with = "coerce::lenient_f64")]
    pub aum: f64,

    /// Trailing twelve-month revenue, dollars.
    #[serde(default, deserialize_with = "coerce::lenient_f64")]
    pub trailing_revenue: f64,

    /// Share of the book billed as advisory fees, 0-100.
    #[serde(default, deserialize_with = "coerce::lenient_f64")]
    pub fee_based_pct: f64,

    /// Unvested deferred compensation still outstanding at the current firm.
    #[serde(default, deserialize_with = "coerce::lenient_bool")]
    pub deferred_comp_outstanding: bool,

    /// Currently bound by a competing recruiting deal.
    #[serde(default, deserialize_with = "coerce::lenient_bool")]
    pub under_competing_deal: bool,

    #[serde(default, deserialize_with = "coerce::lenient_bool")]
    pub banking_relationship: bool,

    /// Countries covered by international client relationships; the
    /// relationship is present iff the list is non-empty.
    #[serde(default)]
    pub international_countries: Vec<String>,

    #[serde(default, deserialize_with = "coerce::lenient_bool")]
    pub lending_relationship: bool,

    /// Uses separately-managed accounts.
    #[serde(default, deserialize_with = "coerce::lenient_bool")]
    pub uses_smas: bool,

    #[serde(default, deserialize_with = "coerce::lenient_u32")]
    pub household_count: u32,
}

impl AdvisorProfile {
    /// Profile with the three book figures set and no business-mix flags.
    pub fn new(aum: f64, trailing_revenue: f64, fee_based_pct: f64) -> Self {
        Self {
            aum,
            trailing_revenue,
            fee_based_pct,
            ..Self::default()
        }
    }

    pub fn has_international(&self) -> bool {
        !self.international_countries.is_empty()
    }

    /// Copy of the profile with the premium-gated attributes cleared.
    ///
    /// Non-premium callers keep the book figures and the negative rules
    /// (deferred comp, competing deal) but none of the advanced
    /// business-mix credits.
    pub fn without_premium_attributes(&self) -> Self {
        Self {
            banking_relationship: false,
            international_countries: Vec::new(),
            lending_relationship: false,
            uses_smas: false,
            household_count: 0,
            ..self.clone()
        }
    }
}

/// Lenient deserializers for upstream values of unreliable shape.
pub(crate) mod coerce {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Num(f64),
        Text(String),
        Flag(bool),
    }

    /// Parse a formatted amount string ("$1,200,000", "85%", " 42 ").
    /// Anything unparseable is 0.
    pub fn parse_amount(raw: &str) -> f64 {
        let cleaned: String = raw
            .chars()
            .filter(|c| !matches!(c, '$' | ',' | '%' | ' '))
            .collect();
        match cleaned.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => 0.0,
        }
    }

    pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawNumber>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawNumber::Num(v)) if v.is_finite() => v,
            Some(RawNumber::Text(s)) => parse_amount(&s),
            Some(RawNumber::Flag(b)) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
            _ => 0.0,
        })
    }

    pub fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = lenient_f64(deserializer)?;
        Ok(if value.is_sign_negative() { 0 } else { value as u32 })
    }

    /// Truthy strings and non-zero numbers count as set.
    pub fn parse_flag(raw: &str) -> bool {
        matches!(
            raw.trim().to_lowercase().as_str(),
            "y" | "yes" | "true" | "1" | "x"
        )
    }

    pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawNumber>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawNumber::Flag(b)) => b,
            Some(RawNumber::Num(v)) => v != 0.0,
            Some(RawNumber::Text(s)) => parse_flag(&s),
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_strings_coerce() {
        let json = r#"{
            "aum": "$250,000,000",
            "trailingRevenue": 1200000,
            "feeBasedPct": "85%"
        }"#;
        let profile: AdvisorProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.aum, 250_000_000.0);
        assert_eq!(profile.trailing_revenue, 1_200_000.0);
        assert_eq!(profile.fee_based_pct, 85.0);
    }

    #[test]
    fn test_garbage_coerces_to_zero_not_error() {
        let json = r#"{"aum": "n/a", "trailingRevenue": null, "feeBasedPct": "??"}"#;
        let profile: AdvisorProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.aum, 0.0);
        assert_eq!(profile.trailing_revenue, 0.0);
        assert_eq!(profile.fee_based_pct, 0.0);
    }

    #[test]
    fn test_flag_coercion() {
        let json = r#"{
            "bankingRelationship": "Y",
            "lendingRelationship": 1,
            "usesSmas": false,
            "householdCount": "150"
        }"#;
        let profile: AdvisorProfile = serde_json::from_str(json).unwrap();

        assert!(profile.banking_relationship);
        assert!(profile.lending_relationship);
        assert!(!profile.uses_smas);
        assert_eq!(profile.household_count, 150);
    }

    #[test]
    fn test_missing_fields_default() {
        let profile: AdvisorProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile.trailing_revenue, 0.0);
        assert!(!profile.has_international());
        assert_eq!(profile.household_count, 0);
    }

    #[test]
    fn test_without_premium_attributes() {
        let mut profile = AdvisorProfile::new(100_000_000.0, 1_000_000.0, 90.0);
        profile.banking_relationship = true;
        profile.international_countries = vec!["UK".to_string()];
        profile.lending_relationship = true;
        profile.uses_smas = true;
        profile.household_count = 200;
        profile.deferred_comp_outstanding = true;

        let gated = profile.without_premium_attributes();

        assert!(!gated.banking_relationship);
        assert!(!gated.has_international());
        assert!(!gated.lending_relationship);
        assert!(!gated.uses_smas);
        assert_eq!(gated.household_count, 0);
        // Book figures and negative rules survive gating
        assert_eq!(gated.trailing_revenue, 1_000_000.0);
        assert!(gated.deferred_comp_outstanding);
    }
}
