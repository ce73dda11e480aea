use super::domain::Booking;
use crate::workflows::vehicle::Registration;

/// Storage seam for confirmed bookings, keyed by reference.
pub trait BookingRepository: Send + Sync {
    fn insert(&self, booking: Booking) -> Result<Booking, RepositoryError>;
    fn fetch(&self, reference: &str) -> Result<Option<Booking>, RepositoryError>;
    fn for_registration(&self, registration: &Registration)
        -> Result<Vec<Booking>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("booking already exists")]
    Conflict,
    #[error("booking not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
