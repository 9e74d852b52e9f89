//! Sparse recruiting-deal table and lookup
//!
//! Deal rows carry upfront and backend ranges as multiples of trailing
//! revenue. Callers combine the bounds via arithmetic mean before use.

use serde::{Deserialize, Serialize};

use super::firms::{normalize, CanonicalFirm};

/// One firm's recruiting-deal terms from the external store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmDeal {
    /// Raw firm name as spelled in the source table.
    #[serde(default)]
    pub firm: String,

    /// Guaranteed-upfront range, as multiples of trailing revenue.
    #[serde(default)]
    pub upfront_min: Option<f64>,
    #[serde(default)]
    pub upfront_max: Option<f64>,

    /// Backend (deferred, year-two) range, same units.
    #[serde(default)]
    pub backend_min: Option<f64>,
    #[serde(default)]
    pub backend_max: Option<f64>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl FirmDeal {
    pub fn new(
        firm: &str,
        upfront_min: f64,
        upfront_max: f64,
        backend_min: f64,
        backend_max: f64,
    ) -> Self {
        Self {
            firm: firm.to_string(),
            upfront_min: Some(upfront_min),
            upfront_max: Some(upfront_max),
            backend_min: Some(backend_min),
            backend_max: Some(backend_max),
            notes: None,
        }
    }

    /// Midpoint of the upfront range; one missing bound stands in for both.
    pub fn upfront_midpoint(&self) -> Option<f64> {
        midpoint(self.upfront_min, self.upfront_max)
    }

    /// Midpoint of the backend range.
    pub fn backend_midpoint(&self) -> Option<f64> {
        midpoint(self.backend_min, self.backend_max)
    }
}

fn midpoint(lo: Option<f64>, hi: Option<f64>) -> Option<f64> {
    let lo = lo.filter(|v| v.is_finite());
    let hi = hi.filter(|v| v.is_finite());
    match (lo, hi) {
        (Some(a), Some(b)) => Some((a + b) / 2.0),
        (Some(a), None) | (None, Some(a)) => Some(a),
        (None, None) => None,
    }
}

/// Abbreviation-prone firms that get a widened substring pass when the
/// variant table misses. A deliberate loosening of matching precision for
/// this small allowlist only.
const LOOSE_TOKENS: &[(CanonicalFirm, &[&str])] = &[
    (CanonicalFirm::MorganStanley, &["morgan", "ms"]),
    (CanonicalFirm::MerrillLynch, &["merrill", "ml"]),
    (CanonicalFirm::Goldman, &["goldman", "gs"]),
];

/// Look up a firm's deal row.
///
/// First pass uses the shared variant table; for allowlisted firms a
/// second pass accepts any row whose name merely contains a known
/// abbreviation token. Returns the first hit in table order, or `None`.
pub fn resolve_deal(table: &[FirmDeal], firm: CanonicalFirm) -> Option<&FirmDeal> {
    for row in table {
        if normalize(&row.firm) == Some(firm) {
            return Some(row);
        }
    }

    let tokens = LOOSE_TOKENS
        .iter()
        .find(|(f, _)| *f == firm)
        .map(|(_, tokens)| *tokens)?;

    for row in table {
        let cleaned = row.firm.trim().to_lowercase();
        if cleaned.is_empty() {
            continue;
        }
        if tokens.iter().any(|t| cleaned.contains(t)) {
            log::debug!(
                "deal row {:?} matched {} via widened token search",
                row.firm,
                firm.display_name()
            );
            return Some(row);
        }
    }

    None
}
