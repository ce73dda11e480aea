use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tradesnap::workflows::bookings::{Booking, BookingRepository, RepositoryError};
use tradesnap::workflows::valuation::{Condition, ValuationConfig};
use tradesnap::workflows::vehicle::Registration;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) valuation: Arc<ValuationConfig>,
}

/// Process-local booking store; bookings are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryBookingRepository {
    bookings: Arc<Mutex<BTreeMap<String, Booking>>>,
}

impl InMemoryBookingRepository {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Booking>>, RepositoryError> {
        self.bookings
            .lock()
            .map_err(|_| RepositoryError::Unavailable("booking mutex poisoned".to_string()))
    }
}

impl BookingRepository for InMemoryBookingRepository {
    fn insert(&self, booking: Booking) -> Result<Booking, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&booking.reference) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(booking.reference.clone(), booking.clone());
        Ok(booking)
    }

    fn fetch(&self, reference: &str) -> Result<Option<Booking>, RepositoryError> {
        Ok(self.lock()?.get(reference).cloned())
    }

    fn for_registration(
        &self,
        registration: &Registration,
    ) -> Result<Vec<Booking>, RepositoryError> {
        let guard = self.lock()?;
        let mut bookings: Vec<Booking> = guard
            .values()
            .filter(|booking| &booking.registration == registration)
            .cloned()
            .collect();
        bookings.sort_by_key(|booking| booking.booked_at);
        Ok(bookings)
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_condition(raw: &str) -> Result<Condition, String> {
    raw.parse::<Condition>().map_err(|err| err.to_string())
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use tradesnap::workflows::bookings::{BookingKind, CustomerContact};

    fn booking(reference: &str, minute: u32) -> Booking {
        let booked_at: NaiveDateTime = NaiveDate::from_ymd_opt(2024, 10, 3)
            .and_then(|date| date.and_hms_opt(10, minute, 0))
            .expect("valid timestamp");
        Booking {
            reference: reference.to_string(),
            kind: BookingKind::Inspection { offer_value: 8_300 },
            registration: Registration::parse("KT68XYZ").expect("valid plate"),
            garage: "Sytner BMW Birmingham - High St".to_string(),
            date: booked_at.date(),
            time_slot: "11:00 AM".to_string(),
            customer: CustomerContact {
                name: "John Smith".to_string(),
                phone: "07700900000".to_string(),
                email: Some("john@example.com".to_string()),
            },
            booked_at,
        }
    }

    #[test]
    fn repository_rejects_duplicate_references() {
        let repository = InMemoryBookingRepository::default();
        repository
            .insert(booking("INS-202410031005", 5))
            .expect("first insert");
        assert!(matches!(
            repository.insert(booking("INS-202410031005", 5)),
            Err(RepositoryError::Conflict)
        ));
    }

    #[test]
    fn bookings_for_registration_are_chronological() {
        let repository = InMemoryBookingRepository::default();
        repository
            .insert(booking("INS-B", 30))
            .expect("insert later booking");
        repository
            .insert(booking("INS-A", 45))
            .expect("insert latest booking");
        repository
            .insert(booking("INS-C", 1))
            .expect("insert earliest booking");

        let registration = Registration::parse("KT68XYZ").expect("valid plate");
        let references: Vec<String> = repository
            .for_registration(&registration)
            .expect("list")
            .into_iter()
            .map(|booking| booking.reference)
            .collect();
        assert_eq!(references, vec!["INS-C", "INS-B", "INS-A"]);
    }

    #[test]
    fn parse_helpers_report_bad_input() {
        assert!(parse_date("2024-13-01").is_err());
        assert_eq!(parse_condition("FAIR"), Ok(Condition::Fair));
        assert!(parse_condition("mint").is_err());
    }
}
