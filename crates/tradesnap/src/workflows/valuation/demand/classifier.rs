use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Sports,
    Convertible,
    Suv,
    Crossover,
    Saloon,
    Estate,
    Hatchback,
    Coupe,
    Mpv,
    Pickup,
}

impl VehicleType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sports => "Sports",
            Self::Convertible => "Convertible",
            Self::Suv => "SUV",
            Self::Crossover => "Crossover",
            Self::Saloon => "Saloon",
            Self::Estate => "Estate",
            Self::Hatchback => "Hatchback",
            Self::Coupe => "Coupe",
            Self::Mpv => "MPV",
            Self::Pickup => "Pickup",
        }
    }

    /// Sports, convertible, and coupe: demand peaks in spring and summer.
    pub const fn favors_summer(self) -> bool {
        matches!(self, Self::Sports | Self::Convertible | Self::Coupe)
    }

    /// SUV, crossover, and pickup: demand peaks in autumn and winter.
    pub const fn favors_winter(self) -> bool {
        matches!(self, Self::Suv | Self::Crossover | Self::Pickup)
    }
}

/// First match wins, so overlapping patterns are ordered most specific first.
/// X-models sit above the M-models because "x3 m40i" contains "m4";
/// tourer variants sit above the plain series names.
const MODEL_PATTERNS: &[(&str, VehicleType)] = &[
    ("z4", VehicleType::Convertible),
    ("z3", VehicleType::Convertible),
    ("cabrio", VehicleType::Convertible),
    ("convertible", VehicleType::Convertible),
    ("roadster", VehicleType::Convertible),
    ("x1", VehicleType::Crossover),
    ("x2", VehicleType::Crossover),
    ("x3", VehicleType::Suv),
    ("x4", VehicleType::Suv),
    ("x5", VehicleType::Suv),
    ("x6", VehicleType::Suv),
    ("x7", VehicleType::Suv),
    ("xm", VehicleType::Suv),
    ("active tourer", VehicleType::Mpv),
    ("gran tourer", VehicleType::Mpv),
    ("touring", VehicleType::Estate),
    ("estate", VehicleType::Estate),
    ("1 series", VehicleType::Hatchback),
    ("2 series", VehicleType::Coupe),
    ("3 series", VehicleType::Saloon),
    ("4 series", VehicleType::Coupe),
    ("5 series", VehicleType::Saloon),
    ("7 series", VehicleType::Saloon),
    ("8 series", VehicleType::Coupe),
    ("i8", VehicleType::Sports),
    ("m2", VehicleType::Sports),
    ("m3", VehicleType::Sports),
    ("m4", VehicleType::Sports),
    ("m5", VehicleType::Sports),
    ("m8", VehicleType::Sports),
    ("coupe", VehicleType::Coupe),
    ("hatch", VehicleType::Hatchback),
    ("mini", VehicleType::Hatchback),
    ("saloon", VehicleType::Saloon),
    ("hilux", VehicleType::Pickup),
    ("ranger", VehicleType::Pickup),
    ("navara", VehicleType::Pickup),
    ("l200", VehicleType::Pickup),
    ("pickup", VehicleType::Pickup),
    ("pick-up", VehicleType::Pickup),
];

/// Body type for a free-text model name; unrecognised models are saloons.
pub fn classify_model(model: &str) -> VehicleType {
    let model = model.to_lowercase();
    MODEL_PATTERNS
        .iter()
        .find(|(pattern, _)| model.contains(pattern))
        .map(|(_, vehicle_type)| *vehicle_type)
        .unwrap_or(VehicleType::Saloon)
}
