//! Recall-repair and inspection bookings against the dealer network.

pub mod domain;
mod policy;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    Booking, BookingKind, CustomerContact, InspectionBookingRequest, RecallBookingRequest,
    GARAGES, INSPECTION_SLOTS, TIME_SLOTS,
};
pub use policy::BookingError;
pub use repository::{BookingRepository, RepositoryError};
pub use router::booking_router;
pub use service::{BookingService, BookingServiceError};

#[cfg(test)]
mod tests;
