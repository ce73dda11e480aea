//! Seasonal and regional demand forecasting for trade-in stock.
//!
//! The model name picks a body type, the body type and season pick a national
//! demand level, and that level is spread across the dealer network with
//! per-site modifiers and random jitter. The strongest region feeds the
//! demand bonus.

mod bonus;
mod classifier;
mod ping;
mod regional;
mod seasonal;

pub use bonus::{demand_bonus, MAX_DEMAND_BONUS};
pub use classifier::{classify_model, VehicleType};
pub use ping::PingSummary;
pub use regional::{synthesize_regional_demand, NetworkLocation, RegionalDemand};
pub use seasonal::{seasonal_demand, seasonal_trend, DemandLevel, Season, Trend, TrendDirection};

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandForecast {
    pub vehicle_type: VehicleType,
    pub season: Season,
    pub national_demand: DemandLevel,
    pub trend: Trend,
    pub regions: Vec<RegionalDemand>,
    pub best_region: Option<RegionalDemand>,
    pub demand_bonus: u32,
}

impl DemandForecast {
    /// Regions at high or very high demand, best first.
    pub fn hotspots(&self) -> impl Iterator<Item = &RegionalDemand> {
        self.regions
            .iter()
            .filter(|region| region.demand_level.is_hotspot())
    }
}

/// Forecast engine bound to a dealer network.
#[derive(Debug, Clone)]
pub struct DemandForecaster {
    locations: Vec<NetworkLocation>,
}

impl Default for DemandForecaster {
    fn default() -> Self {
        Self::new(NetworkLocation::standard_network())
    }
}

impl DemandForecaster {
    pub fn new(locations: Vec<NetworkLocation>) -> Self {
        Self { locations }
    }

    pub fn locations(&self) -> &[NetworkLocation] {
        &self.locations
    }

    pub fn forecast<R: Rng + ?Sized>(
        &self,
        model: &str,
        today: NaiveDate,
        rng: &mut R,
    ) -> DemandForecast {
        forecast_demand(model, today, &self.locations, rng)
    }
}

/// Classifier, season, national level, trend, regional spread, best region,
/// then bonus. Regional figures are redrawn on every call.
pub fn forecast_demand<R: Rng + ?Sized>(
    model: &str,
    today: NaiveDate,
    locations: &[NetworkLocation],
    rng: &mut R,
) -> DemandForecast {
    let vehicle_type = classify_model(model);
    let season = Season::from_date(today);
    let national_demand = seasonal_demand(season, vehicle_type);
    let trend = seasonal_trend(vehicle_type, season);
    let regions = synthesize_regional_demand(vehicle_type, national_demand, locations, rng);
    let best_region = regions.first().cloned();
    let demand_bonus = demand_bonus(national_demand, best_region.as_ref());

    tracing::debug!(
        model,
        vehicle_type = vehicle_type.label(),
        season = season.label(),
        national = national_demand.label(),
        demand_bonus,
        "demand forecast generated"
    );

    DemandForecast {
        vehicle_type,
        season,
        national_demand,
        trend,
        regions,
        best_region,
        demand_bonus,
    }
}
