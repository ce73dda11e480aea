//! Vehicle identity, registration validation, and the lookup collaborator seam.
//!
//! Every upstream data source (DVLA, MOT, HPI, plate OCR) sits behind
//! [`VehicleLookup`]; [`MockVehicleLookup`] is the canned implementation used
//! by the service and tests.

pub mod domain;
mod lookup;
mod validation;

pub use domain::{
    BadgeSeverity, HistoryFlags, MotAndTax, MotEntry, Recall, Registration, StatusBadge, Vehicle,
    VehicleAlerts,
};
pub use lookup::{LookupError, MockVehicleLookup, VehicleLookup};
pub use validation::{validate_email, validate_phone, RegistrationError};
