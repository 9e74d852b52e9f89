//! Offer Engine - Deterministic compensation offer projections for advisor recruiting
//!
//! This library provides:
//! - Firm-name normalization over a closed set of recruiting destinations
//! - Sparse parameter and deal resolution with business-default fallbacks
//! - Business-mix adjustment rules over an advisor profile
//! - Ten-year per-firm compensation projections
//! - Offer ranking with a stay-vs-move delta and history-based percent change

pub mod advisor;
pub mod adjustments;
pub mod history;
pub mod market;
pub mod projection;
pub mod runner;

// Re-export commonly used types
pub use advisor::AdvisorProfile;
pub use adjustments::{compute_adjustments, DealAdjustments};
pub use history::{BestDealStore, FileBestDealStore, InMemoryBestDealStore, NoHistory};
pub use market::{normalize, CanonicalFirm, FirmDeal, FirmParameter, MarketData};
pub use projection::{OfferConfig, OfferEngine, OfferResult};
pub use runner::OfferRunner;
