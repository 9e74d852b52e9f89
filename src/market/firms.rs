//! Canonical firm identifiers and raw-name normalization
//!
//! External parameter and deal tables spell firm names inconsistently
//! ("Morgan Stanley", "morganstanley", "MS"). Every lookup in the engine
//! goes through one shared variant table so the normalizer and both
//! resolvers can never drift apart.

use serde::{Deserialize, Serialize};

/// Closed set of recruiting destinations the engine can compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalFirm {
    MorganStanley,
    MerrillLynch,
    UbsWealth,
    Ameriprise,
    Finet,
    Independent,
    Goldman,
    Jpm,
    Rbc,
    RaymondJames,
    Rockefeller,
    Sanctuary,
    WellsFargo,
    #[serde(rename = "tru")]
    Truist,
}

impl CanonicalFirm {
    /// Fixed iteration order for every fixed-width output table.
    pub const ALL: [CanonicalFirm; 14] = [
        CanonicalFirm::MorganStanley,
        CanonicalFirm::MerrillLynch,
        CanonicalFirm::UbsWealth,
        CanonicalFirm::Ameriprise,
        CanonicalFirm::Finet,
        CanonicalFirm::Independent,
        CanonicalFirm::Goldman,
        CanonicalFirm::Jpm,
        CanonicalFirm::Rbc,
        CanonicalFirm::RaymondJames,
        CanonicalFirm::Rockefeller,
        CanonicalFirm::Sanctuary,
        CanonicalFirm::WellsFargo,
        CanonicalFirm::Truist,
    ];

    /// Human-readable name used in console and CSV output.
    pub fn display_name(&self) -> &'static str {
        match self {
            CanonicalFirm::MorganStanley => "Morgan Stanley",
            CanonicalFirm::MerrillLynch => "Merrill Lynch",
            CanonicalFirm::UbsWealth => "UBS Wealth",
            CanonicalFirm::Ameriprise => "Ameriprise",
            CanonicalFirm::Finet => "Wells Fargo FiNet",
            CanonicalFirm::Independent => "Independent",
            CanonicalFirm::Goldman => "Goldman Sachs",
            CanonicalFirm::Jpm => "J.P. Morgan",
            CanonicalFirm::Rbc => "RBC Wealth",
            CanonicalFirm::RaymondJames => "Raymond James",
            CanonicalFirm::Rockefeller => "Rockefeller",
            CanonicalFirm::Sanctuary => "Sanctuary Wealth",
            CanonicalFirm::WellsFargo => "Wells Fargo",
            CanonicalFirm::Truist => "Truist",
        }
    }
}

/// One row of the shared variant table.
///
/// `variants[0]` is always the lowercase display form; the substring
/// fallback in [`normalize`] matches against it.
struct FirmVariants {
    firm: CanonicalFirm,
    variants: &'static [&'static str],
}

/// The single source of truth for raw-name matching.
///
/// Smaller regional brokers (Edward Jones, Stifel) are deliberately
/// bucketed under Raymond James for deal-comparison purposes.
const FIRM_VARIANTS: &[FirmVariants] = &[
    FirmVariants {
        firm: CanonicalFirm::MorganStanley,
        variants: &["morgan stanley", "morganstanley", "ms", "mswm"],
    },
    FirmVariants {
        firm: CanonicalFirm::MerrillLynch,
        variants: &["merrill lynch", "merrill", "ml", "bofa", "bank of america"],
    },
    FirmVariants {
        firm: CanonicalFirm::UbsWealth,
        variants: &["ubs wealth", "ubs", "ubs financial services"],
    },
    FirmVariants {
        firm: CanonicalFirm::Ameriprise,
        variants: &["ameriprise", "ameriprise financial", "amp"],
    },
    FirmVariants {
        firm: CanonicalFirm::Finet,
        variants: &["wells fargo finet", "finet", "wfafn"],
    },
    FirmVariants {
        firm: CanonicalFirm::Independent,
        variants: &["independent", "indy", "ria"],
    },
    FirmVariants {
        firm: CanonicalFirm::Goldman,
        variants: &["goldman sachs", "goldman", "gs", "gs pwm"],
    },
    FirmVariants {
        firm: CanonicalFirm::Jpm,
        variants: &["j.p. morgan", "jpm", "jp morgan", "jpmorgan", "jpmc", "chase"],
    },
    FirmVariants {
        firm: CanonicalFirm::Rbc,
        variants: &["rbc wealth", "rbc", "royal bank of canada"],
    },
    FirmVariants {
        firm: CanonicalFirm::RaymondJames,
        variants: &["raymond james", "rj", "edward jones", "ed jones", "stifel"],
    },
    FirmVariants {
        firm: CanonicalFirm::Rockefeller,
        variants: &["rockefeller", "rockefeller capital", "rockefeller capital management"],
    },
    FirmVariants {
        firm: CanonicalFirm::Sanctuary,
        variants: &["sanctuary wealth", "sanctuary"],
    },
    FirmVariants {
        firm: CanonicalFirm::WellsFargo,
        variants: &["wells fargo", "wells", "wf", "wfa", "wells fargo advisors"],
    },
    FirmVariants {
        firm: CanonicalFirm::Truist,
        variants: &["truist", "tru", "bb&t"],
    },
];

/// Map a raw firm-name string to its canonical firm.
///
/// Lower-cases and trims the input, tries an exact variant match, then
/// falls back to substring containment in both directions against the
/// canonical display forms. Unmapped input yields `None`; this function
/// never panics.
pub fn normalize(raw: &str) -> Option<CanonicalFirm> {
    let cleaned = raw.trim().to_lowercase();
    if cleaned.is_empty() {
        return None;
    }

    for entry in FIRM_VARIANTS {
        if entry.variants.iter().any(|v| *v == cleaned) {
            return Some(entry.firm);
        }
    }

    // Substring fallback against the display form. The reverse direction
    // needs at least three characters or every one-letter string would
    // match the first firm containing it.
    for entry in FIRM_VARIANTS {
        let display = entry.variants[0];
        if cleaned.contains(display) {
            return Some(entry.firm);
        }
        if cleaned.len() >= 3 && display.contains(cleaned.as_str()) {
            return Some(entry.firm);
        }
    }

    None
}

/// Normalize a list of raw names into a deduplicated selection,
/// preserving first-seen order. Unmapped names are dropped.
pub fn normalize_selection(raw_names: &[String]) -> Vec<CanonicalFirm> {
    let mut selected = Vec::new();
    for raw in raw_names {
        match normalize(raw) {
            Some(firm) => {
                if !selected.contains(&firm) {
                    selected.push(firm);
                }
            }
            None => log::debug!("unmapped firm name ignored: {:?}", raw),
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_variants() {
        assert_eq!(normalize("Morgan Stanley"), Some(CanonicalFirm::MorganStanley));
        assert_eq!(normalize("ms"), Some(CanonicalFirm::MorganStanley));
        assert_eq!(normalize("  UBS  "), Some(CanonicalFirm::UbsWealth));
        assert_eq!(normalize("jp morgan"), Some(CanonicalFirm::Jpm));
        assert_eq!(normalize("BB&T"), Some(CanonicalFirm::Truist));
    }

    #[test]
    fn test_regional_brokers_bucket_under_raymond_james() {
        for raw in ["raymond james", "rj", "edward jones", "ed jones", "stifel"] {
            assert_eq!(normalize(raw), Some(CanonicalFirm::RaymondJames), "variant {:?}", raw);
        }
    }

    #[test]
    fn test_every_variant_in_table_maps_to_its_firm() {
        for entry in FIRM_VARIANTS {
            for variant in entry.variants {
                assert_eq!(normalize(variant), Some(entry.firm), "variant {:?}", variant);
            }
        }
    }

    #[test]
    fn test_substring_fallback() {
        // Raw name containing the display form
        assert_eq!(
            normalize("Morgan Stanley Wealth Management"),
            Some(CanonicalFirm::MorganStanley)
        );
        // Raw name contained in the display form
        assert_eq!(normalize("merrill ly"), Some(CanonicalFirm::MerrillLynch));
    }

    #[test]
    fn test_finet_wins_over_wells_fargo_on_exact_match() {
        assert_eq!(normalize("Wells Fargo FiNet"), Some(CanonicalFirm::Finet));
        assert_eq!(normalize("Wells Fargo"), Some(CanonicalFirm::WellsFargo));
    }

    #[test]
    fn test_unmapped_returns_none() {
        assert_eq!(normalize("xyz-not-a-firm"), None);
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
    }

    #[test]
    fn test_normalize_is_stable() {
        for raw in ["Morgan Stanley", "xyz-not-a-firm", "stifel"] {
            assert_eq!(normalize(raw), normalize(raw));
        }
    }

    #[test]
    fn test_selection_dedups_and_drops_unmapped() {
        let raw = vec![
            "Morgan Stanley".to_string(),
            "ms".to_string(),
            "not-a-firm".to_string(),
            "UBS".to_string(),
        ];
        assert_eq!(
            normalize_selection(&raw),
            vec![CanonicalFirm::MorganStanley, CanonicalFirm::UbsWealth]
        );
    }
}
