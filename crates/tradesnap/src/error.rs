use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::bookings::{BookingServiceError, RepositoryError};
use crate::workflows::journey::JourneyStoreError;
use crate::workflows::tradein::TradeInServiceError;
use crate::workflows::vehicle::{LookupError, RegistrationError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Registration(RegistrationError),
    TradeIn(TradeInServiceError),
    Booking(BookingServiceError),
    Journey(JourneyStoreError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Registration(err) => write!(f, "invalid registration: {}", err),
            AppError::TradeIn(err) => write!(f, "trade-in error: {}", err),
            AppError::Booking(err) => write!(f, "booking error: {}", err),
            AppError::Journey(err) => write!(f, "journey error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Registration(err) => Some(err),
            AppError::TradeIn(err) => Some(err),
            AppError::Booking(err) => Some(err),
            AppError::Journey(err) => Some(err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Registration(_)
            | AppError::TradeIn(
                TradeInServiceError::Registration(_) | TradeInServiceError::PlateUnreadable,
            )
            | AppError::Booking(BookingServiceError::Invalid(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::TradeIn(TradeInServiceError::Lookup(LookupError::NotFound(_)))
            | AppError::Booking(BookingServiceError::Lookup(LookupError::NotFound(_)))
            | AppError::Booking(BookingServiceError::Repository(RepositoryError::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Booking(BookingServiceError::Repository(RepositoryError::Conflict)) => {
                StatusCode::CONFLICT
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::TradeIn(_)
            | AppError::Booking(_)
            | AppError::Journey(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<RegistrationError> for AppError {
    fn from(value: RegistrationError) -> Self {
        Self::Registration(value)
    }
}

impl From<TradeInServiceError> for AppError {
    fn from(value: TradeInServiceError) -> Self {
        Self::TradeIn(value)
    }
}

impl From<BookingServiceError> for AppError {
    fn from(value: BookingServiceError) -> Self {
        Self::Booking(value)
    }
}

impl From<JourneyStoreError> for AppError {
    fn from(value: JourneyStoreError) -> Self {
        Self::Journey(value)
    }
}
