//! Sparse per-firm parameter table and lookup
//!
//! Parameters arrive from an external tabular store with duplicate rows,
//! inconsistent firm spellings, and missing values. A failed lookup is
//! never an error; the caller always supplies the default.

use serde::{Deserialize, Serialize};

use super::firms::{normalize, CanonicalFirm};

/// One sparse fact about one firm, as delivered by the external store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmParameter {
    /// Raw firm name as spelled in the source table.
    #[serde(default)]
    pub firm: String,

    /// Parameter name, matched case-insensitively.
    #[serde(default)]
    pub name: String,

    /// Numeric value; absent or non-finite values are skipped.
    #[serde(default)]
    pub value: Option<f64>,

    /// Free-text note carried through from the source.
    #[serde(default)]
    pub note: Option<String>,
}

impl FirmParameter {
    pub fn new(firm: &str, name: &str, value: f64) -> Self {
        Self {
            firm: firm.to_string(),
            name: name.to_string(),
            value: Some(value),
            note: None,
        }
    }
}

/// Look up a named parameter for a canonical firm.
///
/// Scans the table in order and returns the first row whose firm
/// normalizes to `firm` (same variant table as [`normalize`]), whose name
/// matches case-insensitively, and whose value is finite. Returns
/// `default` when nothing matches.
pub fn resolve_parameter(
    table: &[FirmParameter],
    firm: CanonicalFirm,
    name: &str,
    default: f64,
) -> f64 {
    let wanted = name.trim();

    for row in table {
        if !row.name.trim().eq_ignore_ascii_case(wanted) {
            continue;
        }
        if normalize(&row.firm) != Some(firm) {
            continue;
        }
        match row.value {
            Some(v) if v.is_finite() => return v,
            _ => continue,
        }
    }

    log::trace!(
        "no {} parameter for {}, using default {}",
        wanted,
        firm.display_name(),
        default
    );
    default
}
