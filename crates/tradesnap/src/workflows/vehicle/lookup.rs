use super::domain::{HistoryFlags, MotAndTax, MotEntry, Recall, Registration, Vehicle};
use chrono::{Duration, NaiveDate};

/// Upstream vehicle data collaborator (DVLA, MOT, recalls, HPI, plate OCR).
pub trait VehicleLookup: Send + Sync {
    fn lookup_vehicle(&self, registration: &Registration) -> Result<Vehicle, LookupError>;
    fn lookup_mot_and_tax(
        &self,
        registration: &Registration,
        today: NaiveDate,
    ) -> Result<MotAndTax, LookupError>;
    fn lookup_recalls(&self, registration: &Registration) -> Result<Vec<Recall>, LookupError>;
    fn history_flags(&self, registration: &Registration) -> Result<HistoryFlags, LookupError>;
    /// Read a plate from a captured image. `None` when nothing legible was found.
    fn extract_plate(&self, image: &[u8]) -> Result<Option<String>, LookupError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("no vehicle found for {0}")]
    NotFound(Registration),
    #[error("lookup provider unavailable: {0}")]
    Unavailable(String),
}

/// Canned provider returning the same 2018 BMW 3 Series for every plate.
#[derive(Debug, Clone, Default)]
pub struct MockVehicleLookup;

const MOCK_PLATE: &str = "KT68XYZ";

fn mot_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

impl VehicleLookup for MockVehicleLookup {
    fn lookup_vehicle(&self, registration: &Registration) -> Result<Vehicle, LookupError> {
        Ok(Vehicle {
            registration: registration.clone(),
            make: "BMW".to_string(),
            model: "3 Series".to_string(),
            year: 2018,
            vin: "WBA8BFAKEVIN12345".to_string(),
            mileage: 54_000,
        })
    }

    fn lookup_mot_and_tax(
        &self,
        _registration: &Registration,
        today: NaiveDate,
    ) -> Result<MotAndTax, LookupError> {
        Ok(MotAndTax {
            mot_next_due: today + Duration::days(120),
            tax_expiry: today + Duration::days(30),
            mot_history: vec![
                MotEntry {
                    date: mot_date(2024, 8, 17),
                    result: "Pass".to_string(),
                    mileage: 52_000,
                },
                MotEntry {
                    date: mot_date(2023, 8, 10),
                    result: "Advisory".to_string(),
                    mileage: 48_000,
                },
                MotEntry {
                    date: mot_date(2022, 8, 5),
                    result: "Pass".to_string(),
                    mileage: 41_000,
                },
            ],
        })
    }

    fn lookup_recalls(&self, _registration: &Registration) -> Result<Vec<Recall>, LookupError> {
        Ok(vec![
            Recall {
                id: "R-2023-001".to_string(),
                summary: "Airbag inflator recall - replace module".to_string(),
                is_open: true,
            },
            Recall {
                id: "R-2022-012".to_string(),
                summary: "Steering column check".to_string(),
                is_open: false,
            },
        ])
    }

    fn history_flags(&self, _registration: &Registration) -> Result<HistoryFlags, LookupError> {
        Ok(HistoryFlags {
            write_off: false,
            theft: false,
            mileage_anomaly: true,
            note: Some("Mileage shows a 5,000 jump in 2021 record".to_string()),
        })
    }

    fn extract_plate(&self, image: &[u8]) -> Result<Option<String>, LookupError> {
        if image.is_empty() {
            return Ok(None);
        }
        Ok(Some(MOCK_PLATE.to_string()))
    }
}
