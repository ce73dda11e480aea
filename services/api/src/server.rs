use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryBookingRepository};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use tradesnap::config::AppConfig;
use tradesnap::error::AppError;
use tradesnap::telemetry;
use tradesnap::workflows::bookings::BookingService;
use tradesnap::workflows::journey::journey_store_from_config;
use tradesnap::workflows::tradein::TradeInService;
use tradesnap::workflows::vehicle::MockVehicleLookup;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        valuation: Arc::new(config.valuation.clone()),
    };

    let lookup = Arc::new(MockVehicleLookup);
    let journeys = journey_store_from_config(&config.journey);
    let tradein_service = Arc::new(TradeInService::new(
        lookup.clone(),
        journeys.clone(),
        config.valuation.clone(),
    ));
    let booking_service = Arc::new(BookingService::new(
        Arc::new(InMemoryBookingRepository::default()),
        lookup,
        journeys,
    ));

    let app = with_service_routes(tradein_service, booking_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        journey_store = ?config.journey.store_path,
        "trade-in service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
