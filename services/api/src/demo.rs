use crate::infra::{parse_condition, parse_date, InMemoryBookingRepository};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tradesnap::config::AppConfig;
use tradesnap::error::AppError;
use tradesnap::workflows::bookings::{
    Booking, BookingService, CustomerContact, InspectionBookingRequest, RecallBookingRequest,
    GARAGES, INSPECTION_SLOTS, TIME_SLOTS,
};
use tradesnap::workflows::journey::{
    journey_store_from_config, JourneyEvent, JourneyStore, TradeInSession,
};
use tradesnap::workflows::tradein::{TradeInQuote, TradeInService};
use tradesnap::workflows::valuation::demand::{DemandForecast, DemandForecaster, PingSummary};
use tradesnap::workflows::valuation::Condition;
use tradesnap::workflows::vehicle::{MockVehicleLookup, Registration};

#[derive(Args, Debug)]
pub(crate) struct ValueArgs {
    /// Registration plate, spaces allowed
    #[arg(long)]
    pub(crate) registration: String,
    /// Condition grade: excellent, good, fair, or poor
    #[arg(long, value_parser = parse_condition, default_value = "good")]
    pub(crate) condition: Condition,
    /// Valuation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Seed the regional demand jitter for repeatable output
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct ForecastArgs {
    /// Model description, e.g. "X5 xDrive40i"
    #[arg(long)]
    pub(crate) model: String,
    /// Forecast date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Seed the regional demand jitter for repeatable output
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Registration plate used for the walkthrough
    #[arg(long, default_value = "KT68 XYZ")]
    pub(crate) registration: String,
    /// Condition grade: excellent, good, fair, or poor
    #[arg(long, value_parser = parse_condition, default_value = "good")]
    pub(crate) condition: Condition,
    /// Override the demo date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Seed the regional demand jitter for repeatable output
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) fn run_value(args: ValueArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let now = issue_time(args.today);
    let journeys = journey_store_from_config(&config.journey);
    let service = tradein_service(&config, journeys, args.seed);

    let quote = service.quote(&args.registration, args.condition, now)?;
    render_quote(&quote);
    Ok(())
}

pub(crate) fn run_forecast(args: ForecastArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let forecaster = DemandForecaster::default();
    let forecast = match args.seed {
        Some(seed) => forecaster.forecast(&args.model, today, &mut StdRng::seed_from_u64(seed)),
        None => forecaster.forecast(&args.model, today, &mut rand::thread_rng()),
    };

    println!("Demand forecast for {} on {}", args.model, today);
    render_forecast(&forecast);
    render_ping(&PingSummary::from_forecast(&forecast));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let now = issue_time(args.today);
    let journeys = journey_store_from_config(&config.journey);
    let lookup = Arc::new(MockVehicleLookup);
    let tradein = tradein_service(&config, journeys.clone(), args.seed);
    let bookings = BookingService::new(
        Arc::new(InMemoryBookingRepository::default()),
        lookup,
        journeys,
    );
    let mut session = TradeInSession::new();

    println!("TradeSnap trade-in demo");
    let registration = Registration::parse(&args.registration)?;
    session.start_lookup(registration.clone(), false);

    let quote = tradein.quote(registration.as_str(), args.condition, now)?;
    if session.is_summary_visible() {
        render_quote(&quote);
    }

    println!("\nPinging the buyer network");
    let summary = tradein.ping_network(&quote.vehicle, now)?;
    session.cache_ping(summary);
    if let Some(summary) = session.cached_ping() {
        render_ping(summary);
    }

    if let Some(recall) = quote.recalls.iter().find(|recall| recall.is_open) {
        println!("\nBooking recall repair for {} ({})", recall.id, recall.summary);
        session.toggle_recall_form(&recall.id);
        let request = RecallBookingRequest {
            registration: registration.clone(),
            recall_id: recall.id.clone(),
            garage: GARAGES[0].to_string(),
            date: now.date() + Duration::days(1),
            time_slot: TIME_SLOTS[0].to_string(),
            customer: demo_customer(),
        };
        match bookings.book_recall_repair(request, now) {
            Ok(booking) => {
                render_booking(&booking);
                session.close_recall_form(&recall.id);
            }
            Err(err) => println!("  Recall booking rejected: {}", err),
        }
    }

    println!("\nBooking inspection to lock in {}", pounds(quote.total_offer));
    session.open_inspection_booking();
    let request = InspectionBookingRequest {
        registration: registration.clone(),
        offer_value: quote.total_offer,
        garage: None,
        date: now.date(),
        time_slot: INSPECTION_SLOTS[0].to_string(),
        customer: demo_customer(),
    };
    match bookings.book_inspection(request, now) {
        Ok(booking) => render_booking(&booking),
        Err(err) => println!("  Inspection booking rejected: {}", err),
    }
    session.close_inspection_booking();

    println!("\nJourney log for {}", registration);
    for record in tradein.journeys(&registration)? {
        println!(
            "  - {} {}",
            record.recorded_at.format("%Y-%m-%d %H:%M"),
            describe_event(&record.event)
        );
    }

    Ok(())
}

fn tradein_service(
    config: &AppConfig,
    journeys: Arc<dyn JourneyStore>,
    seed: Option<u64>,
) -> TradeInService<MockVehicleLookup> {
    let service = TradeInService::new(
        Arc::new(MockVehicleLookup),
        journeys,
        config.valuation.clone(),
    );
    match seed {
        Some(seed) => service.with_rng_factory(move || StdRng::seed_from_u64(seed)),
        None => service,
    }
}

fn issue_time(today: Option<NaiveDate>) -> NaiveDateTime {
    let now = Local::now().naive_local();
    today.map_or(now, |date| date.and_time(now.time()))
}

fn demo_customer() -> CustomerContact {
    CustomerContact {
        name: "John Smith".to_string(),
        phone: "07700 900123".to_string(),
        email: Some("john.smith@example.com".to_string()),
    }
}

/// Whole pounds with thousands separators, e.g. `£12,345`.
pub(crate) fn pounds(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("£{grouped}")
}

fn render_quote(quote: &TradeInQuote) {
    let vehicle = &quote.vehicle;
    println!(
        "\n{} {} ({}) | VIN {} | {} miles",
        vehicle.year,
        vehicle.display_name(),
        vehicle.registration,
        vehicle.vin,
        vehicle.mileage
    );
    println!(
        "- MOT due {} | tax expires {}",
        quote.mot_and_tax.mot_next_due, quote.mot_and_tax.tax_expiry
    );
    for entry in &quote.mot_and_tax.mot_history {
        println!(
            "    {} {} at {} miles",
            entry.date, entry.result, entry.mileage
        );
    }

    println!("Checks ({} alerts)", quote.alerts.total_alerts);
    for badge in &quote.alerts.badges {
        println!("  - {}", badge.label);
    }
    if let Some(note) = &quote.history_flags.note {
        println!("  Note: {}", note);
    }
    for recall in &quote.recalls {
        let state = if recall.is_open { "OPEN" } else { "closed" };
        println!("  - Recall {} [{}]: {}", recall.id, state, recall.summary);
    }

    let valuation = &quote.valuation;
    println!("\nOffer breakdown ({} condition)", valuation.condition.label());
    println!("  Base value:           {}", pounds(valuation.base_value));
    println!("  Stock priority bonus: {}", pounds(valuation.stock_bonus));
    println!("  Same-day bonus:       {}", pounds(valuation.same_day_bonus));
    if let Some(bonus) = valuation.demand_bonus {
        println!("  Demand bonus:         {}", pounds(bonus));
    }
    println!("  Total offer:          {}", pounds(quote.total_offer));
    println!(
        "  Valid until {}",
        quote.valid_until.format("%d %B %Y %H:%M")
    );

    println!("\nDemand snapshot");
    render_forecast(&quote.forecast);

    println!("\nNetwork offers");
    for offer in &quote.network_offers {
        let marker = if offer.is_best { " (best)" } else { "" };
        println!(
            "  - {}: {} [{}]{}",
            offer.location,
            pounds(offer.value),
            offer.distance,
            marker
        );
    }

    println!("\nUpgrade options");
    for upgrade in &quote.upgrades {
        println!(
            "  - {} {} at {} | deposit {} | trade-in covers {}% | {}/month",
            upgrade.year,
            upgrade.model,
            pounds(upgrade.price),
            pounds(upgrade.deposit_needed),
            upgrade.coverage_pct,
            pounds(upgrade.monthly)
        );
    }
}

fn render_forecast(forecast: &DemandForecast) {
    println!(
        "- {} in {}: national demand {} ({})",
        forecast.vehicle_type.label(),
        forecast.season.label(),
        forecast.national_demand.label(),
        forecast.national_demand.color()
    );
    println!(
        "- Trend: {} {:+}%",
        forecast.trend.direction.label(),
        forecast.trend.percent
    );
    for region in &forecast.regions {
        println!(
            "  {:<12} score {:>2} {:<9} | {:>2} days to sell | stock {} | {} buyers waiting | {} mi",
            region.location,
            region.score,
            region.demand_level.label(),
            region.days_to_sell,
            region.stock_level,
            region.buyers_waiting,
            region.distance_miles
        );
    }
    match &forecast.best_region {
        Some(best) => println!("- Best region: {} (score {})", best.location, best.score),
        None => println!("- Best region: none configured"),
    }
    println!("- Demand bonus: {}", pounds(forecast.demand_bonus));
}

fn render_ping(summary: &PingSummary) {
    println!(
        "- Notified {} hotspot locations | {} interested buyers",
        summary.locations_notified, summary.interested_buyers
    );
    match (&summary.best_match, summary.estimated_days_to_sell) {
        (Some(location), Some(days)) => {
            println!("- Best match: {} (about {} days to sell)", location, days)
        }
        (Some(location), None) => println!("- Best match: {}", location),
        _ => println!("- Best match: none"),
    }
}

fn render_booking(booking: &Booking) {
    println!(
        "- {} confirmed: {} at {}",
        booking.kind.label(),
        booking.reference,
        booking.garage
    );
    println!(
        "  {} for {}",
        booking.appointment_label(),
        booking.customer.name
    );
}

fn describe_event(event: &JourneyEvent) -> String {
    match event {
        JourneyEvent::Quoted {
            vehicle,
            condition,
            total_offer,
            demand_bonus,
        } => {
            let bonus = demand_bonus
                .map(|bonus| format!(" incl. {} demand bonus", pounds(bonus)))
                .unwrap_or_default();
            format!(
                "quoted {} ({}) at {}{}",
                vehicle,
                condition.label(),
                pounds(*total_offer),
                bonus
            )
        }
        JourneyEvent::NetworkPinged { summary } => format!(
            "pinged network: {} locations, {} buyers",
            summary.locations_notified, summary.interested_buyers
        ),
        JourneyEvent::BookingConfirmed { reference } => format!("booking confirmed {}", reference),
    }
}
