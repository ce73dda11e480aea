//! Trade-in valuation: condition-adjusted base value, flat bonuses, the
//! seasonal/regional demand forecast, and the comparison views built on top.

mod config;
pub mod demand;
mod offers;
mod pricing;

pub use config::{NetworkOfferRule, UpgradeCandidate, ValuationConfig};
pub use offers::{network_offers, upgrade_options, NetworkOffer, UpgradeOption};
pub use pricing::{assemble_valuation, estimate_value, Condition, ConditionParseError, Valuation};
