use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::workflows::bookings::domain::{
    Booking, CustomerContact, InspectionBookingRequest, RecallBookingRequest, GARAGES,
    INSPECTION_SLOTS, TIME_SLOTS,
};
use crate::workflows::bookings::repository::{BookingRepository, RepositoryError};
use crate::workflows::bookings::BookingService;
use crate::workflows::journey::InMemoryJourneyStore;
use crate::workflows::vehicle::{MockVehicleLookup, Registration};

pub(super) fn registration() -> Registration {
    Registration::parse("KT68 XYZ").expect("valid plate")
}

pub(super) fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 10, 3)
        .and_then(|date| date.and_hms_opt(10, 15, 0))
        .expect("valid timestamp")
}

pub(super) fn contact(email: Option<&str>) -> CustomerContact {
    CustomerContact {
        name: "John Smith".to_string(),
        phone: "07700 900000".to_string(),
        email: email.map(str::to_string),
    }
}

pub(super) fn recall_request(date: NaiveDate) -> RecallBookingRequest {
    RecallBookingRequest {
        registration: registration(),
        recall_id: "R-2023-001".to_string(),
        garage: GARAGES[0].to_string(),
        date,
        time_slot: TIME_SLOTS[1].to_string(),
        customer: contact(None),
    }
}

pub(super) fn inspection_request(date: NaiveDate) -> InspectionBookingRequest {
    InspectionBookingRequest {
        registration: registration(),
        offer_value: 8_300,
        garage: None,
        date,
        time_slot: INSPECTION_SLOTS[0].to_string(),
        customer: contact(Some("john.smith@example.com")),
    }
}

/// A date the HTTP handlers will accept, relative to the wall clock they read.
pub(super) fn days_from_today(days: i64) -> NaiveDate {
    Local::now().date_naive() + Duration::days(days)
}

pub(super) fn build_service() -> (
    BookingService<MemoryRepository, MockVehicleLookup>,
    Arc<MemoryRepository>,
    Arc<InMemoryJourneyStore>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let journeys = Arc::new(InMemoryJourneyStore::default());
    let service = BookingService::new(
        repository.clone(),
        Arc::new(MockVehicleLookup),
        journeys.clone(),
    );
    (service, repository, journeys)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) bookings: Arc<Mutex<BTreeMap<String, Booking>>>,
}

impl BookingRepository for MemoryRepository {
    fn insert(&self, booking: Booking) -> Result<Booking, RepositoryError> {
        let mut guard = self.bookings.lock().expect("repository mutex poisoned");
        if guard.contains_key(&booking.reference) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(booking.reference.clone(), booking.clone());
        Ok(booking)
    }

    fn fetch(&self, reference: &str) -> Result<Option<Booking>, RepositoryError> {
        let guard = self.bookings.lock().expect("repository mutex poisoned");
        Ok(guard.get(reference).cloned())
    }

    fn for_registration(
        &self,
        registration: &Registration,
    ) -> Result<Vec<Booking>, RepositoryError> {
        let guard = self.bookings.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|booking| &booking.registration == registration)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl BookingRepository for UnavailableRepository {
    fn insert(&self, _booking: Booking) -> Result<Booking, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _reference: &str) -> Result<Option<Booking>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_registration(
        &self,
        _registration: &Registration,
    ) -> Result<Vec<Booking>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
