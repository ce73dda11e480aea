use super::classifier::VehicleType;
use super::seasonal::DemandLevel;
use rand::Rng;
use serde::{Deserialize, Serialize};

const SCORE_FLOOR: i32 = 10;
const SCORE_CEILING: i32 = 98;
const SCORE_JITTER: i32 = 8;
const RURAL_UTILITY_BOOST: i32 = 15;
const AFFLUENT_PERFORMANCE_BOOST: i32 = 12;
const MIN_DAYS_TO_SELL: u32 = 3;
const MAX_STOCK: u32 = 5;
const BUSY_MARKET_SCORE: u8 = 60;
const BUSY_MARKET_BUYERS: u32 = 12;
const QUIET_MARKET_BUYERS: u32 = 3;

/// Dealer site with its fixed local-market adjustments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkLocation {
    pub name: String,
    pub base_modifier: i32,
    pub rural_friendly: bool,
    pub affluent: bool,
    pub distance_miles: u32,
}

impl NetworkLocation {
    fn new(
        name: &str,
        base_modifier: i32,
        rural_friendly: bool,
        affluent: bool,
        miles: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            base_modifier,
            rural_friendly,
            affluent,
            distance_miles: miles,
        }
    }

    /// The six-site Midlands-anchored network, distances from Birmingham.
    pub fn standard_network() -> Vec<Self> {
        vec![
            Self::new("Sytner BMW Birmingham", 0, false, false, 0),
            Self::new("Sytner BMW Solihull", 4, false, true, 8),
            Self::new("Sytner BMW Coventry", -2, true, false, 15),
            Self::new("Sytner BMW Manchester", 6, false, false, 86),
            Self::new("Sytner BMW Bristol", -3, true, false, 88),
            Self::new("Sytner BMW London", 8, false, true, 118),
        ]
    }
}

/// Per-site demand snapshot. Regenerated on every forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalDemand {
    pub location: String,
    pub demand_level: DemandLevel,
    pub score: u8,
    pub days_to_sell: u32,
    pub stock_level: u32,
    pub buyers_waiting: u32,
    pub distance_miles: u32,
}

fn days_to_sell(score: u8) -> u32 {
    let days = (60.0 - f64::from(score) * 0.5).floor();
    if days < f64::from(MIN_DAYS_TO_SELL) {
        MIN_DAYS_TO_SELL
    } else {
        days as u32
    }
}

fn score_location<R: Rng + ?Sized>(
    location: &NetworkLocation,
    vehicle_type: VehicleType,
    national: DemandLevel,
    rng: &mut R,
) -> RegionalDemand {
    let mut score = national.base_score() + location.base_modifier;
    if location.rural_friendly && vehicle_type.favors_winter() {
        score += RURAL_UTILITY_BOOST;
    }
    if location.affluent && vehicle_type.favors_summer() {
        score += AFFLUENT_PERFORMANCE_BOOST;
    }
    score += rng.gen_range(-SCORE_JITTER..=SCORE_JITTER);

    let score = score.clamp(SCORE_FLOOR, SCORE_CEILING) as u8;
    let stock_level = rng.gen_range(0..=MAX_STOCK);
    let buyers_waiting = if score > BUSY_MARKET_SCORE {
        rng.gen_range(0..=BUSY_MARKET_BUYERS)
    } else {
        rng.gen_range(0..=QUIET_MARKET_BUYERS)
    };

    RegionalDemand {
        location: location.name.clone(),
        demand_level: DemandLevel::from_score(score),
        score,
        days_to_sell: days_to_sell(score),
        stock_level,
        buyers_waiting,
        distance_miles: location.distance_miles,
    }
}

/// Spread the national level across the network, highest score first.
///
/// Scores carry a random offset, so two calls with the same inputs differ
/// unless the caller supplies a seeded generator. Ties keep network order.
pub fn synthesize_regional_demand<R: Rng + ?Sized>(
    vehicle_type: VehicleType,
    national: DemandLevel,
    locations: &[NetworkLocation],
    rng: &mut R,
) -> Vec<RegionalDemand> {
    let mut regions: Vec<RegionalDemand> = locations
        .iter()
        .map(|location| score_location(location, vehicle_type, national, rng))
        .collect();
    regions.sort_by(|a, b| b.score.cmp(&a.score));
    regions
}
