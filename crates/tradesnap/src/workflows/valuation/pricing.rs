use super::config::ValuationConfig;
use crate::workflows::vehicle::Vehicle;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Qualitative wear assessment chosen by staff for each valuation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Excellent,
    #[default]
    Good,
    Fair,
    Poor,
}

impl Condition {
    pub const fn ordered() -> [Self; 4] {
        [Self::Excellent, Self::Good, Self::Fair, Self::Poor]
    }

    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Excellent => 1.05,
            Self::Good => 1.0,
            Self::Fair => 0.9,
            Self::Poor => 0.8,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown condition '{0}' (expected excellent, good, fair, or poor)")]
pub struct ConditionParseError(pub String);

impl FromStr for Condition {
    type Err = ConditionParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "excellent" => Ok(Self::Excellent),
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "poor" => Ok(Self::Poor),
            _ => Err(ConditionParseError(raw.to_string())),
        }
    }
}

/// Condition-adjusted value before any bonuses.
///
/// `base = base_price - age * depreciation - mileage / divisor`, scaled by the
/// condition multiplier and truncated toward zero. The floor is the only
/// guard: high mileage or old vehicles bottom out at `floor_value`.
pub fn estimate_value(
    vehicle: &Vehicle,
    condition: Condition,
    today: NaiveDate,
    config: &ValuationConfig,
) -> u32 {
    let age = vehicle.age(today) as f64;
    let base = config.base_price
        - age * config.depreciation_per_year
        - f64::from(vehicle.mileage) / config.mileage_divisor;
    let adjusted = (base * condition.multiplier()).trunc();

    if adjusted <= f64::from(config.floor_value) {
        config.floor_value
    } else {
        adjusted.min(f64::from(u32::MAX)) as u32
    }
}

/// Offer breakdown. All components are additive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valuation {
    pub base_value: u32,
    pub condition: Condition,
    pub stock_bonus: u32,
    pub same_day_bonus: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demand_bonus: Option<u32>,
}

impl Valuation {
    pub fn total(&self) -> u32 {
        self.base_value
            .saturating_add(self.stock_bonus)
            .saturating_add(self.same_day_bonus)
            .saturating_add(self.demand_bonus.unwrap_or(0))
    }

    pub fn valid_until(&self, issued_at: NaiveDateTime, config: &ValuationConfig) -> NaiveDateTime {
        issued_at + Duration::hours(config.offer_validity_hours)
    }
}

/// Combine the base estimate with the flat bonuses and, when enabled, the
/// forecast's demand bonus.
pub fn assemble_valuation(
    vehicle: &Vehicle,
    condition: Condition,
    today: NaiveDate,
    demand_bonus: Option<u32>,
    config: &ValuationConfig,
) -> Valuation {
    Valuation {
        base_value: estimate_value(vehicle, condition, today, config),
        condition,
        stock_bonus: config.stock_priority_bonus,
        same_day_bonus: config.same_day_bonus,
        demand_bonus: demand_bonus.filter(|_| config.include_demand_bonus),
    }
}
