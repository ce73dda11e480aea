use super::domain::{
    CustomerContact, InspectionBookingRequest, RecallBookingRequest, GARAGES, INSPECTION_SLOTS,
    TIME_SLOTS,
};
use crate::workflows::vehicle::{validate_email, validate_phone, Recall};
use chrono::{Duration, NaiveDate};

const RECALL_MIN_DAYS_AHEAD: i64 = 1;
const RECALL_MAX_DAYS_AHEAD: i64 = 60;
const INSPECTION_MAX_DAYS_AHEAD: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("customer name is required")]
    MissingName,
    #[error("phone number must contain at least 10 digits")]
    InvalidPhone,
    #[error("email address is required for inspections")]
    MissingEmail,
    #[error("email address '{0}' is not valid")]
    InvalidEmail(String),
    #[error("unknown garage '{0}'")]
    UnknownGarage(String),
    #[error("time slot '{0}' is not available")]
    UnknownSlot(String),
    #[error("date {date} is outside the bookable window {earliest} to {latest}")]
    DateOutOfRange {
        date: NaiveDate,
        earliest: NaiveDate,
        latest: NaiveDate,
    },
    #[error("recall {0} is not recorded against this vehicle")]
    UnknownRecall(String),
    #[error("recall {0} is already closed")]
    RecallClosed(String),
}

fn check_contact(contact: &CustomerContact, email_required: bool) -> Result<(), BookingError> {
    if contact.name.trim().is_empty() {
        return Err(BookingError::MissingName);
    }
    if !validate_phone(&contact.phone) {
        return Err(BookingError::InvalidPhone);
    }

    match contact.email.as_deref().map(str::trim) {
        Some(email) if !email.is_empty() => {
            if !validate_email(email) {
                return Err(BookingError::InvalidEmail(email.to_string()));
            }
        }
        _ if email_required => return Err(BookingError::MissingEmail),
        _ => {}
    }

    Ok(())
}

fn check_window(
    date: NaiveDate,
    today: NaiveDate,
    min_days: i64,
    max_days: i64,
) -> Result<(), BookingError> {
    let earliest = today + Duration::days(min_days);
    let latest = today + Duration::days(max_days);
    if date < earliest || date > latest {
        return Err(BookingError::DateOutOfRange {
            date,
            earliest,
            latest,
        });
    }
    Ok(())
}

fn check_slot(slot: &str, allowed: &[&str]) -> Result<(), BookingError> {
    if allowed.contains(&slot) {
        Ok(())
    } else {
        Err(BookingError::UnknownSlot(slot.to_string()))
    }
}

fn check_garage(garage: &str) -> Result<(), BookingError> {
    if GARAGES.contains(&garage) {
        Ok(())
    } else {
        Err(BookingError::UnknownGarage(garage.to_string()))
    }
}

/// Recall repairs: open recall, known garage and slot, tomorrow to 60 days out.
pub(crate) fn validate_recall_booking(
    request: &RecallBookingRequest,
    recalls: &[Recall],
    today: NaiveDate,
) -> Result<(), BookingError> {
    let recall = recalls
        .iter()
        .find(|recall| recall.id == request.recall_id)
        .ok_or_else(|| BookingError::UnknownRecall(request.recall_id.clone()))?;
    if !recall.is_open {
        return Err(BookingError::RecallClosed(recall.id.clone()));
    }

    check_garage(&request.garage)?;
    check_slot(&request.time_slot, &TIME_SLOTS)?;
    check_window(
        request.date,
        today,
        RECALL_MIN_DAYS_AHEAD,
        RECALL_MAX_DAYS_AHEAD,
    )?;
    check_contact(&request.customer, false)
}

/// Inspections: same day up to a week out, email mandatory.
pub(crate) fn validate_inspection_booking(
    request: &InspectionBookingRequest,
    today: NaiveDate,
) -> Result<(), BookingError> {
    if let Some(garage) = &request.garage {
        check_garage(garage)?;
    }
    check_slot(&request.time_slot, &INSPECTION_SLOTS)?;
    check_window(request.date, today, 0, INSPECTION_MAX_DAYS_AHEAD)?;
    check_contact(&request.customer, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::vehicle::Registration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 3).expect("valid date")
    }

    fn contact(email: Option<&str>) -> CustomerContact {
        CustomerContact {
            name: "John Smith".to_string(),
            phone: "07700 900000".to_string(),
            email: email.map(str::to_string),
        }
    }

    fn recalls() -> Vec<Recall> {
        vec![
            Recall {
                id: "R-2023-001".to_string(),
                summary: "Airbag".to_string(),
                is_open: true,
            },
            Recall {
                id: "R-2022-012".to_string(),
                summary: "Steering".to_string(),
                is_open: false,
            },
        ]
    }

    fn recall_request(days_ahead: i64) -> RecallBookingRequest {
        RecallBookingRequest {
            registration: Registration::parse("KT68XYZ").expect("valid plate"),
            recall_id: "R-2023-001".to_string(),
            garage: GARAGES[2].to_string(),
            date: today() + Duration::days(days_ahead),
            time_slot: TIME_SLOTS[0].to_string(),
            customer: contact(None),
        }
    }

    fn inspection_request(days_ahead: i64, email: Option<&str>) -> InspectionBookingRequest {
        InspectionBookingRequest {
            registration: Registration::parse("KT68XYZ").expect("valid plate"),
            offer_value: 8_300,
            garage: None,
            date: today() + Duration::days(days_ahead),
            time_slot: INSPECTION_SLOTS[0].to_string(),
            customer: contact(email),
        }
    }

    #[test]
    fn recall_window_runs_from_tomorrow_to_sixty_days() {
        assert!(validate_recall_booking(&recall_request(1), &recalls(), today()).is_ok());
        assert!(validate_recall_booking(&recall_request(60), &recalls(), today()).is_ok());
        assert!(matches!(
            validate_recall_booking(&recall_request(0), &recalls(), today()),
            Err(BookingError::DateOutOfRange { .. })
        ));
        assert!(matches!(
            validate_recall_booking(&recall_request(61), &recalls(), today()),
            Err(BookingError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn closed_or_unknown_recalls_cannot_be_booked() {
        let mut request = recall_request(3);
        request.recall_id = "R-2022-012".to_string();
        assert_eq!(
            validate_recall_booking(&request, &recalls(), today()),
            Err(BookingError::RecallClosed("R-2022-012".to_string()))
        );

        request.recall_id = "R-1999-000".to_string();
        assert_eq!(
            validate_recall_booking(&request, &recalls(), today()),
            Err(BookingError::UnknownRecall("R-1999-000".to_string()))
        );
    }

    #[test]
    fn recall_email_is_optional_but_checked() {
        let mut request = recall_request(3);
        request.customer.email = Some("   ".to_string());
        assert!(validate_recall_booking(&request, &recalls(), today()).is_ok());

        request.customer.email = Some("not-an-email".to_string());
        assert_eq!(
            validate_recall_booking(&request, &recalls(), today()),
            Err(BookingError::InvalidEmail("not-an-email".to_string()))
        );
    }

    #[test]
    fn recall_rejects_unknown_garage_and_slot() {
        let mut request = recall_request(3);
        request.garage = "Sytner BMW Leeds".to_string();
        assert!(matches!(
            validate_recall_booking(&request, &recalls(), today()),
            Err(BookingError::UnknownGarage(_))
        ));

        let mut request = recall_request(3);
        request.time_slot = "Next Available (30 mins)".to_string();
        assert!(matches!(
            validate_recall_booking(&request, &recalls(), today()),
            Err(BookingError::UnknownSlot(_))
        ));
    }

    #[test]
    fn inspection_requires_email_and_week_window() {
        let email = Some("customer@example.com");
        assert!(validate_inspection_booking(&inspection_request(0, email), today()).is_ok());
        assert!(validate_inspection_booking(&inspection_request(7, email), today()).is_ok());
        assert!(matches!(
            validate_inspection_booking(&inspection_request(8, email), today()),
            Err(BookingError::DateOutOfRange { .. })
        ));
        assert_eq!(
            validate_inspection_booking(&inspection_request(1, None), today()),
            Err(BookingError::MissingEmail)
        );
    }

    #[test]
    fn contact_requires_name_and_phone() {
        let mut request = inspection_request(1, Some("customer@example.com"));
        request.customer.name = "  ".to_string();
        assert_eq!(
            validate_inspection_booking(&request, today()),
            Err(BookingError::MissingName)
        );

        let mut request = inspection_request(1, Some("customer@example.com"));
        request.customer.phone = "0770".to_string();
        assert_eq!(
            validate_inspection_booking(&request, today()),
            Err(BookingError::InvalidPhone)
        );
    }
}
