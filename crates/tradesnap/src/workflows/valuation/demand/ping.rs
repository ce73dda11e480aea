use super::DemandForecast;
use serde::{Deserialize, Serialize};

/// Outcome of alerting the buyer network about a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingSummary {
    pub locations_notified: usize,
    pub interested_buyers: u32,
    pub best_match: Option<String>,
    pub estimated_days_to_sell: Option<u32>,
}

impl PingSummary {
    /// Notify every hotspot. With no hotspots nobody is notified, but the best
    /// region is still reported as the match.
    pub fn from_forecast(forecast: &DemandForecast) -> Self {
        let hotspots: Vec<_> = forecast.hotspots().collect();
        let best = hotspots.first().copied().or(forecast.best_region.as_ref());

        Self {
            locations_notified: hotspots.len(),
            interested_buyers: hotspots.iter().map(|region| region.buyers_waiting).sum(),
            best_match: best.map(|region| region.location.clone()),
            estimated_days_to_sell: best.map(|region| region.days_to_sell),
        }
    }
}
