use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalised registration plate: uppercase, no whitespace, 5-10 alphanumerics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Registration(pub(crate) String);

impl Registration {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Registration {
    type Error = super::RegistrationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<Registration> for String {
    fn from(registration: Registration) -> Self {
        registration.0
    }
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vehicle identity as returned by the lookup collaborator. Built fresh per lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub registration: Registration,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: String,
    pub mileage: u32,
}

impl Vehicle {
    /// Calendar-year age. Negative for model years in the future.
    pub fn age(&self, today: NaiveDate) -> i64 {
        i64::from(today.year()) - i64::from(self.year)
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotEntry {
    pub date: NaiveDate,
    pub result: String,
    pub mileage: u32,
}

impl MotEntry {
    pub fn is_pass(&self) -> bool {
        self.result.eq_ignore_ascii_case("pass")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotAndTax {
    pub mot_next_due: NaiveDate,
    pub tax_expiry: NaiveDate,
    pub mot_history: Vec<MotEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recall {
    pub id: String,
    pub summary: String,
    pub is_open: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFlags {
    pub write_off: bool,
    pub theft: bool,
    pub mileage_anomaly: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl HistoryFlags {
    pub fn has_issues(&self) -> bool {
        self.write_off || self.theft || self.mileage_anomaly
    }

    pub fn issue_count(&self) -> usize {
        [self.write_off, self.theft, self.mileage_anomaly]
            .into_iter()
            .filter(|flag| *flag)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeSeverity {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBadge {
    pub label: String,
    pub severity: BadgeSeverity,
}

impl StatusBadge {
    fn new(label: impl Into<String>, severity: BadgeSeverity) -> Self {
        Self {
            label: label.into(),
            severity,
        }
    }
}

/// Roll-up of history and recall checks shown alongside a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleAlerts {
    pub badges: Vec<StatusBadge>,
    pub open_recalls: usize,
    pub total_alerts: usize,
}

impl VehicleAlerts {
    pub fn from_checks(flags: &HistoryFlags, recalls: &[Recall]) -> Self {
        let open_recalls = recalls.iter().filter(|recall| recall.is_open).count();

        let mut badges = Vec::new();
        if flags.write_off {
            badges.push(StatusBadge::new("Write-off", BadgeSeverity::Error));
        }
        if flags.theft {
            badges.push(StatusBadge::new("Theft Record", BadgeSeverity::Error));
        }
        if flags.mileage_anomaly {
            badges.push(StatusBadge::new("Mileage Anomaly", BadgeSeverity::Warning));
        }
        if open_recalls > 0 {
            badges.push(StatusBadge::new(
                format!("{open_recalls} Open Recall(s)"),
                BadgeSeverity::Warning,
            ));
        }
        if badges.is_empty() {
            badges.push(StatusBadge::new("No Issues Found", BadgeSeverity::Success));
        }

        // Open recalls count once, however many there are.
        let total_alerts = flags.issue_count() + usize::from(open_recalls > 0);

        Self {
            badges,
            open_recalls,
            total_alerts,
        }
    }
}
