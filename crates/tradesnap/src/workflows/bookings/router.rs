use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde_json::json;

use super::domain::{
    InspectionBookingRequest, RecallBookingRequest, GARAGES, INSPECTION_SLOTS, TIME_SLOTS,
};
use super::repository::BookingRepository;
use super::service::{BookingService, BookingServiceError};
use crate::error::AppError;
use crate::workflows::vehicle::VehicleLookup;

/// HTTP endpoints for recall-repair and inspection bookings.
pub fn booking_router<R, L>(service: Arc<BookingService<R, L>>) -> Router
where
    R: BookingRepository + 'static,
    L: VehicleLookup + 'static,
{
    Router::new()
        .route("/api/v1/bookings/options", get(options_handler))
        .route("/api/v1/bookings/recall", post(recall_handler::<R, L>))
        .route(
            "/api/v1/bookings/inspection",
            post(inspection_handler::<R, L>),
        )
        .route("/api/v1/bookings/:reference", get(fetch_handler::<R, L>))
        .with_state(service)
}

pub(crate) async fn options_handler() -> Response {
    let payload = json!({
        "garages": GARAGES,
        "time_slots": TIME_SLOTS,
        "inspection_slots": INSPECTION_SLOTS,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn recall_handler<R, L>(
    State(service): State<Arc<BookingService<R, L>>>,
    axum::Json(request): axum::Json<RecallBookingRequest>,
) -> Response
where
    R: BookingRepository + 'static,
    L: VehicleLookup + 'static,
{
    let now = Local::now().naive_local();
    match service.book_recall_repair(request, now) {
        Ok(booking) => (StatusCode::CREATED, axum::Json(booking)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn inspection_handler<R, L>(
    State(service): State<Arc<BookingService<R, L>>>,
    axum::Json(request): axum::Json<InspectionBookingRequest>,
) -> Response
where
    R: BookingRepository + 'static,
    L: VehicleLookup + 'static,
{
    let now = Local::now().naive_local();
    match service.book_inspection(request, now) {
        Ok(booking) => (StatusCode::CREATED, axum::Json(booking)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_handler<R, L>(
    State(service): State<Arc<BookingService<R, L>>>,
    Path(reference): Path<String>,
) -> Response
where
    R: BookingRepository + 'static,
    L: VehicleLookup + 'static,
{
    match service.get(&reference) {
        Ok(booking) => (StatusCode::OK, axum::Json(booking)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: BookingServiceError) -> Response {
    AppError::from(error).into_response()
}
