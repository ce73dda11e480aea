use crate::workflows::vehicle::Registration;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const GARAGES: [&str; 6] = [
    "Sytner BMW Birmingham - High St",
    "Sytner BMW Manchester - Oxford Rd",
    "Sytner BMW London - Park Lane",
    "Sytner BMW Bristol - Temple Way",
    "Sytner BMW Solihull - Stratford Rd",
    "Sytner BMW Coventry - Ring Road",
];

pub const TIME_SLOTS: [&str; 4] = ["09:00 AM", "11:00 AM", "02:00 PM", "04:00 PM"];

pub const INSPECTION_SLOTS: [&str; 4] = [
    "Next Available (30 mins)",
    "11:00 AM",
    "02:00 PM",
    "04:00 PM",
];

/// Inspections happen at the site that issued the quote unless one is chosen.
pub const DEFAULT_INSPECTION_GARAGE: &str = GARAGES[0];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerContact {
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecallBookingRequest {
    pub registration: Registration,
    pub recall_id: String,
    pub garage: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub customer: CustomerContact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionBookingRequest {
    pub registration: Registration,
    pub offer_value: u32,
    #[serde(default)]
    pub garage: Option<String>,
    pub date: NaiveDate,
    pub time_slot: String,
    pub customer: CustomerContact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookingKind {
    RecallRepair { recall_id: String },
    Inspection { offer_value: u32 },
}

impl BookingKind {
    /// `RCL-{recall}-{YYYYmmddHHMM}` or `INS-{YYYYmmddHHMM}`, minute resolution.
    pub fn reference(&self, booked_at: NaiveDateTime) -> String {
        let stamp = booked_at.format("%Y%m%d%H%M");
        match self {
            BookingKind::RecallRepair { recall_id } => format!("RCL-{recall_id}-{stamp}"),
            BookingKind::Inspection { .. } => format!("INS-{stamp}"),
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            BookingKind::RecallRepair { .. } => "Recall Repair",
            BookingKind::Inspection { .. } => "Inspection",
        }
    }
}

/// Confirmed booking as stored and returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub reference: String,
    #[serde(flatten)]
    pub kind: BookingKind,
    pub registration: Registration,
    pub garage: String,
    pub date: NaiveDate,
    pub time_slot: String,
    pub customer: CustomerContact,
    pub booked_at: NaiveDateTime,
}

impl Booking {
    /// Human readable confirmation, e.g. "14 October 2024 at 11:00 AM".
    pub fn appointment_label(&self) -> String {
        format!("{} at {}", self.date.format("%d %B %Y"), self.time_slot)
    }
}
