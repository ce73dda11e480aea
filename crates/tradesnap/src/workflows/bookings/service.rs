use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use super::domain::{
    Booking, BookingKind, InspectionBookingRequest, RecallBookingRequest,
    DEFAULT_INSPECTION_GARAGE,
};
use super::policy::{validate_inspection_booking, validate_recall_booking, BookingError};
use super::repository::{BookingRepository, RepositoryError};
use crate::workflows::journey::{JourneyEvent, JourneyRecord, JourneyStore};
use crate::workflows::vehicle::{LookupError, Registration, VehicleLookup};

/// Validates booking requests, persists confirmations and journals them.
pub struct BookingService<R, L> {
    repository: Arc<R>,
    lookup: Arc<L>,
    journeys: Arc<dyn JourneyStore>,
}

impl<R, L> BookingService<R, L>
where
    R: BookingRepository + 'static,
    L: VehicleLookup + 'static,
{
    pub fn new(repository: Arc<R>, lookup: Arc<L>, journeys: Arc<dyn JourneyStore>) -> Self {
        Self {
            repository,
            lookup,
            journeys,
        }
    }

    /// Book a dealer slot to fix an open recall on the vehicle.
    pub fn book_recall_repair(
        &self,
        request: RecallBookingRequest,
        now: NaiveDateTime,
    ) -> Result<Booking, BookingServiceError> {
        let recalls = self.lookup.lookup_recalls(&request.registration)?;
        validate_recall_booking(&request, &recalls, now.date())?;

        let kind = BookingKind::RecallRepair {
            recall_id: request.recall_id,
        };
        let booking = Booking {
            reference: kind.reference(now),
            kind,
            registration: request.registration,
            garage: request.garage,
            date: request.date,
            time_slot: request.time_slot,
            customer: request.customer,
            booked_at: now,
        };

        self.confirm(booking)
    }

    /// Book the physical inspection that locks in a quoted offer.
    pub fn book_inspection(
        &self,
        request: InspectionBookingRequest,
        now: NaiveDateTime,
    ) -> Result<Booking, BookingServiceError> {
        validate_inspection_booking(&request, now.date())?;

        let kind = BookingKind::Inspection {
            offer_value: request.offer_value,
        };
        let booking = Booking {
            reference: kind.reference(now),
            kind,
            registration: request.registration,
            garage: request
                .garage
                .unwrap_or_else(|| DEFAULT_INSPECTION_GARAGE.to_string()),
            date: request.date,
            time_slot: request.time_slot,
            customer: request.customer,
            booked_at: now,
        };

        self.confirm(booking)
    }

    pub fn get(&self, reference: &str) -> Result<Booking, BookingServiceError> {
        let booking = self
            .repository
            .fetch(reference)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(booking)
    }

    pub fn for_registration(
        &self,
        registration: &Registration,
    ) -> Result<Vec<Booking>, BookingServiceError> {
        Ok(self.repository.for_registration(registration)?)
    }

    fn confirm(&self, booking: Booking) -> Result<Booking, BookingServiceError> {
        let stored = self.repository.insert(booking)?;

        info!(
            reference = %stored.reference,
            registration = %stored.registration,
            kind = stored.kind.label(),
            garage = %stored.garage,
            date = %stored.date,
            slot = %stored.time_slot,
            "booking confirmed"
        );

        let record = JourneyRecord {
            registration: stored.registration.clone(),
            recorded_at: stored.booked_at,
            event: JourneyEvent::BookingConfirmed {
                reference: stored.reference.clone(),
            },
        };
        // The booking is already stored; a journal failure only costs history.
        if let Err(error) = self.journeys.record(record) {
            warn!(reference = %stored.reference, %error, "failed to journal booking");
        }

        Ok(stored)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BookingServiceError {
    #[error(transparent)]
    Invalid(#[from] BookingError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
