pub mod bookings;
pub mod journey;
pub mod tradein;
pub mod valuation;
pub mod vehicle;
