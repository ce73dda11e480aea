use serde::{Deserialize, Serialize};

/// Comparison row for another site in the dealer network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkOfferRule {
    pub location: String,
    pub discount: u32,
    pub distance: String,
}

/// Upgrade vehicle offered against the customer's trade-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeCandidate {
    pub model: String,
    pub year: i32,
    pub price: u32,
    pub monthly: u32,
}

/// Business constants for valuations. The source variants never agreed on
/// these, so they are configuration rather than contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    pub base_price: f64,
    pub depreciation_per_year: f64,
    pub mileage_divisor: f64,
    pub floor_value: u32,
    pub stock_priority_bonus: u32,
    pub same_day_bonus: u32,
    pub include_demand_bonus: bool,
    pub offer_validity_hours: i64,
    pub network_offers: Vec<NetworkOfferRule>,
    pub upgrades: Vec<UpgradeCandidate>,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            base_price: 25_000.0,
            depreciation_per_year: 2_000.0,
            mileage_divisor: 10.0,
            floor_value: 100,
            stock_priority_bonus: 500,
            same_day_bonus: 200,
            include_demand_bonus: true,
            offer_validity_hours: 48,
            network_offers: vec![
                NetworkOfferRule {
                    location: "Sytner BMW Birmingham".to_string(),
                    discount: 0,
                    distance: "Current".to_string(),
                },
                NetworkOfferRule {
                    location: "Sytner BMW Solihull".to_string(),
                    discount: 300,
                    distance: "8 miles".to_string(),
                },
                NetworkOfferRule {
                    location: "Sytner BMW Coventry".to_string(),
                    discount: 500,
                    distance: "15 miles".to_string(),
                },
            ],
            upgrades: vec![
                UpgradeCandidate {
                    model: "BMW 5 Series 530e M Sport".to_string(),
                    year: 2023,
                    price: 45_000,
                    monthly: 520,
                },
                UpgradeCandidate {
                    model: "BMW X3 xDrive30e".to_string(),
                    year: 2024,
                    price: 52_000,
                    monthly: 580,
                },
                UpgradeCandidate {
                    model: "BMW 4 Series 420i Coupe".to_string(),
                    year: 2023,
                    price: 38_000,
                    monthly: 420,
                },
            ],
        }
    }
}
