use super::regional::RegionalDemand;
use super::seasonal::DemandLevel;

pub const MAX_DEMAND_BONUS: u32 = 1_100;

const fn national_bonus(level: DemandLevel) -> u32 {
    match level {
        DemandLevel::VeryHigh => 800,
        DemandLevel::High => 500,
        DemandLevel::Moderate => 200,
        DemandLevel::Low | DemandLevel::VeryLow => 0,
    }
}

const fn regional_bonus(score: u8) -> u32 {
    if score >= 85 {
        300
    } else if score >= 75 {
        150
    } else {
        0
    }
}

/// Flat bonus from national demand plus the strongest regional market.
pub fn demand_bonus(national: DemandLevel, best_region: Option<&RegionalDemand>) -> u32 {
    national_bonus(national) + best_region.map_or(0, |region| regional_bonus(region.score))
}
