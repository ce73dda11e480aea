use super::classifier::VehicleType;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn from_date(date: NaiveDate) -> Self {
        match date.month() {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Autumn,
            _ => Self::Winter,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
            Self::Winter => "Winter",
        }
    }
}

/// Expected buyer interest, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl DemandLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            85.. => Self::VeryHigh,
            70..=84 => Self::High,
            50..=69 => Self::Moderate,
            30..=49 => Self::Low,
            _ => Self::VeryLow,
        }
    }

    /// Starting regional score before location modifiers.
    pub const fn base_score(self) -> i32 {
        match self {
            Self::VeryHigh => 90,
            Self::High => 75,
            Self::Moderate => 55,
            Self::Low => 35,
            Self::VeryLow => 20,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::VeryLow => "#ef476f",
            Self::Low => "#f4a261",
            Self::Moderate => "#ffd166",
            Self::High => "#00b4d8",
            Self::VeryHigh => "#06d6a0",
        }
    }

    pub const fn bonus_multiplier(self) -> f64 {
        match self {
            Self::VeryLow => 0.90,
            Self::Low => 0.95,
            Self::Moderate => 1.0,
            Self::High => 1.08,
            Self::VeryHigh => 1.15,
        }
    }

    pub const fn is_hotspot(self) -> bool {
        matches!(self, Self::High | Self::VeryHigh)
    }
}

const SEASONAL_DEMAND: &[(Season, VehicleType, DemandLevel)] = &[
    (Season::Spring, VehicleType::Convertible, DemandLevel::VeryHigh),
    (Season::Spring, VehicleType::Sports, DemandLevel::High),
    (Season::Spring, VehicleType::Coupe, DemandLevel::High),
    (Season::Spring, VehicleType::Hatchback, DemandLevel::High),
    (Season::Spring, VehicleType::Pickup, DemandLevel::Low),
    (Season::Summer, VehicleType::Convertible, DemandLevel::VeryHigh),
    (Season::Summer, VehicleType::Sports, DemandLevel::VeryHigh),
    (Season::Summer, VehicleType::Coupe, DemandLevel::High),
    (Season::Summer, VehicleType::Mpv, DemandLevel::High),
    (Season::Summer, VehicleType::Estate, DemandLevel::High),
    (Season::Summer, VehicleType::Suv, DemandLevel::Low),
    (Season::Autumn, VehicleType::Suv, DemandLevel::High),
    (Season::Autumn, VehicleType::Crossover, DemandLevel::High),
    (Season::Autumn, VehicleType::Pickup, DemandLevel::High),
    (Season::Autumn, VehicleType::Estate, DemandLevel::High),
    (Season::Autumn, VehicleType::Convertible, DemandLevel::Low),
    (Season::Autumn, VehicleType::Sports, DemandLevel::Low),
    (Season::Winter, VehicleType::Suv, DemandLevel::VeryHigh),
    (Season::Winter, VehicleType::Pickup, DemandLevel::VeryHigh),
    (Season::Winter, VehicleType::Crossover, DemandLevel::High),
    (Season::Winter, VehicleType::Convertible, DemandLevel::VeryLow),
    (Season::Winter, VehicleType::Sports, DemandLevel::Low),
    (Season::Winter, VehicleType::Coupe, DemandLevel::Low),
];

/// National demand for a body type this season; pairs not in the table are moderate.
pub fn seasonal_demand(season: Season, vehicle_type: VehicleType) -> DemandLevel {
    SEASONAL_DEMAND
        .iter()
        .find(|(s, t, _)| *s == season && *t == vehicle_type)
        .map(|(_, _, level)| *level)
        .unwrap_or(DemandLevel::Moderate)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Rising,
    Stable,
    Falling,
}

impl TrendDirection {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rising => "Rising",
            Self::Stable => "Stable",
            Self::Falling => "Falling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    pub percent: i8,
}

impl Trend {
    const fn new(direction: TrendDirection, percent: i8) -> Self {
        Self { direction, percent }
    }
}

/// Fixed seasonal swing for summer- and winter-favoured body types; flat otherwise.
pub fn seasonal_trend(vehicle_type: VehicleType, season: Season) -> Trend {
    use TrendDirection::{Falling, Rising, Stable};

    if vehicle_type.favors_summer() {
        match season {
            Season::Spring => Trend::new(Rising, 18),
            Season::Summer => Trend::new(Stable, 2),
            Season::Autumn => Trend::new(Falling, -15),
            Season::Winter => Trend::new(Stable, -5),
        }
    } else if vehicle_type.favors_winter() {
        match season {
            Season::Autumn => Trend::new(Rising, 22),
            Season::Winter => Trend::new(Stable, 3),
            Season::Spring => Trend::new(Falling, -12),
            Season::Summer => Trend::new(Stable, -3),
        }
    } else {
        Trend::new(Stable, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, 15).expect("valid date")
    }

    #[test]
    fn seasons_follow_calendar_months() {
        let seasons: Vec<Season> = (1..=12).map(|month| Season::from_date(date(month))).collect();
        use Season::*;
        assert_eq!(
            seasons,
            vec![
                Winter, Winter, Spring, Spring, Spring, Summer, Summer, Summer, Autumn, Autumn,
                Autumn, Winter
            ]
        );
    }

    #[test]
    fn score_thresholds_map_to_levels() {
        assert_eq!(DemandLevel::from_score(98), DemandLevel::VeryHigh);
        assert_eq!(DemandLevel::from_score(85), DemandLevel::VeryHigh);
        assert_eq!(DemandLevel::from_score(84), DemandLevel::High);
        assert_eq!(DemandLevel::from_score(70), DemandLevel::High);
        assert_eq!(DemandLevel::from_score(69), DemandLevel::Moderate);
        assert_eq!(DemandLevel::from_score(50), DemandLevel::Moderate);
        assert_eq!(DemandLevel::from_score(49), DemandLevel::Low);
        assert_eq!(DemandLevel::from_score(30), DemandLevel::Low);
        assert_eq!(DemandLevel::from_score(29), DemandLevel::VeryLow);
        assert_eq!(DemandLevel::from_score(10), DemandLevel::VeryLow);
    }

    #[test]
    fn missing_table_entries_default_to_moderate() {
        for season in [Season::Spring, Season::Summer, Season::Autumn, Season::Winter] {
            assert_eq!(
                seasonal_demand(season, VehicleType::Saloon),
                DemandLevel::Moderate
            );
        }
        assert_eq!(
            seasonal_demand(Season::Winter, VehicleType::Suv),
            DemandLevel::VeryHigh
        );
    }

    #[test]
    fn summer_favoured_trend_table() {
        let expected = [
            (Season::Spring, TrendDirection::Rising, 18),
            (Season::Summer, TrendDirection::Stable, 2),
            (Season::Autumn, TrendDirection::Falling, -15),
            (Season::Winter, TrendDirection::Stable, -5),
        ];
        for vehicle_type in [VehicleType::Sports, VehicleType::Convertible, VehicleType::Coupe] {
            for (season, direction, percent) in expected {
                assert_eq!(
                    seasonal_trend(vehicle_type, season),
                    Trend { direction, percent }
                );
            }
        }
    }

    #[test]
    fn winter_favoured_trend_table() {
        let expected = [
            (Season::Autumn, TrendDirection::Rising, 22),
            (Season::Winter, TrendDirection::Stable, 3),
            (Season::Spring, TrendDirection::Falling, -12),
            (Season::Summer, TrendDirection::Stable, -3),
        ];
        for vehicle_type in [VehicleType::Suv, VehicleType::Crossover, VehicleType::Pickup] {
            for (season, direction, percent) in expected {
                assert_eq!(
                    seasonal_trend(vehicle_type, season),
                    Trend { direction, percent }
                );
            }
        }
    }

    #[test]
    fn other_types_are_flat_all_year() {
        for season in [Season::Spring, Season::Summer, Season::Autumn, Season::Winter] {
            assert_eq!(
                seasonal_trend(VehicleType::Estate, season),
                Trend::new(TrendDirection::Stable, 0)
            );
        }
    }
}
