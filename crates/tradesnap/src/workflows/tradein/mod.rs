//! Trade-in composition: lookup, checks, valuation, demand forecast and the
//! comparison views, recorded against the customer journey.

pub mod router;
pub mod service;

pub use router::tradein_router;
pub use service::{RngFactory, TradeInQuote, TradeInService, TradeInServiceError};
