use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

use crate::workflows::journey::{JourneyEvent, JourneyRecord, JourneyStore, JourneyStoreError};
use crate::workflows::valuation::demand::{DemandForecast, DemandForecaster, PingSummary};
use crate::workflows::valuation::{
    assemble_valuation, estimate_value, network_offers, upgrade_options, Condition, NetworkOffer,
    UpgradeOption, Valuation, ValuationConfig,
};
use crate::workflows::vehicle::{
    HistoryFlags, LookupError, MotAndTax, Recall, Registration, RegistrationError, Vehicle,
    VehicleAlerts, VehicleLookup,
};

/// Produces a fresh generator for each forecast.
pub type RngFactory = Arc<dyn Fn() -> StdRng + Send + Sync>;

/// Everything staff need to present an offer for one vehicle.
#[derive(Debug, Clone, Serialize)]
pub struct TradeInQuote {
    pub vehicle: Vehicle,
    pub mot_and_tax: MotAndTax,
    pub recalls: Vec<Recall>,
    pub history_flags: HistoryFlags,
    pub alerts: VehicleAlerts,
    pub valuation: Valuation,
    pub total_offer: u32,
    pub forecast: DemandForecast,
    pub network_offers: Vec<NetworkOffer>,
    pub upgrades: Vec<UpgradeOption>,
    pub issued_at: NaiveDateTime,
    pub valid_until: NaiveDateTime,
}

pub struct TradeInService<L> {
    lookup: Arc<L>,
    journeys: Arc<dyn JourneyStore>,
    forecaster: DemandForecaster,
    config: ValuationConfig,
    rng: RngFactory,
}

impl<L> TradeInService<L>
where
    L: VehicleLookup + 'static,
{
    pub fn new(lookup: Arc<L>, journeys: Arc<dyn JourneyStore>, config: ValuationConfig) -> Self {
        Self {
            lookup,
            journeys,
            forecaster: DemandForecaster::default(),
            config,
            rng: Arc::new(StdRng::from_entropy),
        }
    }

    pub fn with_forecaster(mut self, forecaster: DemandForecaster) -> Self {
        self.forecaster = forecaster;
        self
    }

    /// Swap the entropy source, typically for a seeded generator in tests.
    pub fn with_rng_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> StdRng + Send + Sync + 'static,
    {
        self.rng = Arc::new(factory);
        self
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    pub fn lookup_vehicle(&self, raw_registration: &str) -> Result<Vehicle, TradeInServiceError> {
        let registration = Registration::parse(raw_registration)?;
        Ok(self.lookup.lookup_vehicle(&registration)?)
    }

    /// Full quote for a typed registration.
    pub fn quote(
        &self,
        raw_registration: &str,
        condition: Condition,
        now: NaiveDateTime,
    ) -> Result<TradeInQuote, TradeInServiceError> {
        let registration = Registration::parse(raw_registration)?;
        self.quote_registration(&registration, condition, now)
    }

    /// Full quote for a photographed plate.
    pub fn quote_from_image(
        &self,
        image: &[u8],
        condition: Condition,
        now: NaiveDateTime,
    ) -> Result<TradeInQuote, TradeInServiceError> {
        let plate = self
            .lookup
            .extract_plate(image)?
            .ok_or(TradeInServiceError::PlateUnreadable)?;
        let registration = Registration::parse(&plate)?;
        self.quote_registration(&registration, condition, now)
    }

    pub fn forecast(&self, vehicle: &Vehicle, today: NaiveDate) -> DemandForecast {
        let mut rng = (self.rng)();
        self.forecaster.forecast(&vehicle.model, today, &mut rng)
    }

    /// Alert the hotspots in a fresh forecast and journal the outcome.
    pub fn ping_network(
        &self,
        vehicle: &Vehicle,
        now: NaiveDateTime,
    ) -> Result<PingSummary, TradeInServiceError> {
        let forecast = self.forecast(vehicle, now.date());
        let summary = PingSummary::from_forecast(&forecast);

        info!(
            registration = %vehicle.registration,
            notified = summary.locations_notified,
            buyers = summary.interested_buyers,
            best_match = summary.best_match.as_deref().unwrap_or("none"),
            "buyer network pinged"
        );

        self.journeys.record(JourneyRecord {
            registration: vehicle.registration.clone(),
            recorded_at: now,
            event: JourneyEvent::NetworkPinged {
                summary: summary.clone(),
            },
        })?;

        Ok(summary)
    }

    pub fn journeys(
        &self,
        registration: &Registration,
    ) -> Result<Vec<JourneyRecord>, TradeInServiceError> {
        Ok(self.journeys.for_registration(registration)?)
    }

    fn quote_registration(
        &self,
        registration: &Registration,
        condition: Condition,
        now: NaiveDateTime,
    ) -> Result<TradeInQuote, TradeInServiceError> {
        let today = now.date();
        let vehicle = self.lookup.lookup_vehicle(registration)?;
        let mot_and_tax = self.lookup.lookup_mot_and_tax(registration, today)?;
        let recalls = self.lookup.lookup_recalls(registration)?;
        let history_flags = self.lookup.history_flags(registration)?;
        let alerts = VehicleAlerts::from_checks(&history_flags, &recalls);

        let forecast = self.forecast(&vehicle, today);
        let valuation = assemble_valuation(
            &vehicle,
            condition,
            today,
            Some(forecast.demand_bonus),
            &self.config,
        );
        let total_offer = valuation.total();
        let trade_in_value = estimate_value(&vehicle, Condition::Good, today, &self.config);

        let quote = TradeInQuote {
            mot_and_tax,
            recalls,
            history_flags,
            alerts,
            total_offer,
            network_offers: network_offers(total_offer, &self.config),
            upgrades: upgrade_options(trade_in_value, &self.config),
            issued_at: now,
            valid_until: valuation.valid_until(now, &self.config),
            valuation,
            forecast,
            vehicle,
        };

        info!(
            registration = %registration,
            condition = %condition,
            total = quote.total_offer,
            alerts = quote.alerts.total_alerts,
            "trade-in quote issued"
        );

        self.journeys.record(JourneyRecord {
            registration: registration.clone(),
            recorded_at: now,
            event: JourneyEvent::Quoted {
                vehicle: quote.vehicle.display_name(),
                condition,
                total_offer: quote.total_offer,
                demand_bonus: quote.valuation.demand_bonus,
            },
        })?;

        Ok(quote)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TradeInServiceError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Journey(#[from] JourneyStoreError),
    #[error("no registration plate could be read from the image")]
    PlateUnreadable,
}
