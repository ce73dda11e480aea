use super::common::*;
use chrono::Duration;
use std::sync::Arc;

use crate::workflows::bookings::{
    BookingError, BookingKind, BookingRepository, BookingService, BookingServiceError,
    RepositoryError,
};
use crate::workflows::journey::{InMemoryJourneyStore, JourneyEvent, JourneyStore};
use crate::workflows::vehicle::MockVehicleLookup;

#[test]
fn recall_booking_is_stored_and_journaled() {
    let (service, repository, journeys) = build_service();
    let date = now().date() + Duration::days(5);

    let booking = service
        .book_recall_repair(recall_request(date), now())
        .expect("recall booking succeeds");

    assert_eq!(booking.reference, "RCL-R-2023-001-202410031015");
    assert_eq!(
        booking.kind,
        BookingKind::RecallRepair {
            recall_id: "R-2023-001".to_string()
        }
    );
    assert_eq!(booking.registration.as_str(), "KT68XYZ");

    let stored = repository
        .fetch(&booking.reference)
        .expect("fetch succeeds")
        .expect("booking present");
    assert_eq!(stored, booking);

    let history = journeys
        .for_registration(&registration())
        .expect("journeys readable");
    assert_eq!(history.len(), 1);
    assert_eq!(
        history[0].event,
        JourneyEvent::BookingConfirmed {
            reference: booking.reference.clone()
        }
    );
}

#[test]
fn inspection_defaults_to_the_quoting_garage() {
    let (service, _, _) = build_service();
    let booking = service
        .book_inspection(inspection_request(now().date()), now())
        .expect("same-day inspection allowed");

    assert_eq!(booking.reference, "INS-202410031015");
    assert_eq!(booking.garage, "Sytner BMW Birmingham - High St");
    assert_eq!(booking.kind, BookingKind::Inspection { offer_value: 8_300 });
}

#[test]
fn closed_recall_is_rejected_before_storage() {
    let (service, repository, journeys) = build_service();
    let mut request = recall_request(now().date() + Duration::days(2));
    request.recall_id = "R-2022-012".to_string();

    match service.book_recall_repair(request, now()) {
        Err(BookingServiceError::Invalid(BookingError::RecallClosed(id))) => {
            assert_eq!(id, "R-2022-012")
        }
        other => panic!("expected closed recall, got {other:?}"),
    }
    assert!(repository.bookings.lock().expect("lock").is_empty());
    assert!(journeys.all().expect("journeys readable").is_empty());
}

#[test]
fn same_minute_duplicate_is_a_conflict() {
    let (service, _, _) = build_service();
    let date = now().date() + Duration::days(1);

    service
        .book_inspection(inspection_request(date), now())
        .expect("first booking succeeds");
    let second = service.book_inspection(inspection_request(date), now());

    assert!(matches!(
        second,
        Err(BookingServiceError::Repository(RepositoryError::Conflict))
    ));
}

#[test]
fn get_propagates_not_found() {
    let (service, _, _) = build_service();
    assert!(matches!(
        service.get("INS-000000000000"),
        Err(BookingServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn for_registration_lists_every_booking_kind() {
    let (service, _, _) = build_service();
    service
        .book_recall_repair(recall_request(now().date() + Duration::days(3)), now())
        .expect("recall booking");
    service
        .book_inspection(inspection_request(now().date()), now())
        .expect("inspection booking");

    let bookings = service
        .for_registration(&registration())
        .expect("bookings readable");
    assert_eq!(bookings.len(), 2);
}

#[test]
fn repository_outage_surfaces_unavailable() {
    let service = BookingService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MockVehicleLookup),
        Arc::new(InMemoryJourneyStore::default()),
    );

    let result = service.book_inspection(inspection_request(now().date()), now());
    assert!(matches!(
        result,
        Err(BookingServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
}
