use crate::workflows::valuation::demand::PingSummary;
use crate::workflows::vehicle::Registration;
use serde::Serialize;

/// Working state for one staff member's lookup. Starting a new lookup wipes
/// everything from the previous vehicle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TradeInSession {
    registration: Option<Registration>,
    image_captured: bool,
    show_summary: bool,
    open_recall_form: Option<String>,
    show_inspection_booking: bool,
    cached_ping: Option<PingSummary>,
}

impl TradeInSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_lookup(&mut self, registration: Registration, image_captured: bool) {
        self.reset();
        self.registration = Some(registration);
        self.image_captured = image_captured;
        self.show_summary = true;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn registration(&self) -> Option<&Registration> {
        self.registration.as_ref()
    }

    pub fn image_captured(&self) -> bool {
        self.image_captured
    }

    /// The summary page only renders once a registration is in hand.
    pub fn is_summary_visible(&self) -> bool {
        self.show_summary && self.registration.is_some()
    }

    /// Only one recall form is open at a time; toggling the open one closes it.
    pub fn toggle_recall_form(&mut self, recall_id: &str) {
        if self.open_recall_form.as_deref() == Some(recall_id) {
            self.open_recall_form = None;
        } else {
            self.open_recall_form = Some(recall_id.to_string());
        }
    }

    pub fn close_recall_form(&mut self, recall_id: &str) {
        if self.open_recall_form.as_deref() == Some(recall_id) {
            self.open_recall_form = None;
        }
    }

    pub fn is_recall_form_open(&self, recall_id: &str) -> bool {
        self.open_recall_form.as_deref() == Some(recall_id)
    }

    pub fn open_inspection_booking(&mut self) {
        self.show_inspection_booking = true;
    }

    pub fn close_inspection_booking(&mut self) {
        self.show_inspection_booking = false;
    }

    pub fn is_inspection_booking_open(&self) -> bool {
        self.show_inspection_booking
    }

    pub fn cache_ping(&mut self, summary: PingSummary) {
        self.cached_ping = Some(summary);
    }

    pub fn cached_ping(&self) -> Option<&PingSummary> {
        self.cached_ping.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(raw: &str) -> Registration {
        Registration::parse(raw).expect("valid plate")
    }

    fn ping() -> PingSummary {
        PingSummary {
            locations_notified: 2,
            interested_buyers: 9,
            best_match: Some("Sytner BMW London".to_string()),
            estimated_days_to_sell: Some(14),
        }
    }

    #[test]
    fn new_lookup_clears_previous_vehicle_state() {
        let mut session = TradeInSession::new();
        session.start_lookup(registration("KT68XYZ"), true);
        session.toggle_recall_form("R-2023-001");
        session.open_inspection_booking();
        session.cache_ping(ping());

        session.start_lookup(registration("AB12CDE"), false);

        assert_eq!(session.registration(), Some(&registration("AB12CDE")));
        assert!(session.is_summary_visible());
        assert!(!session.image_captured());
        assert!(!session.is_recall_form_open("R-2023-001"));
        assert!(!session.is_inspection_booking_open());
        assert!(session.cached_ping().is_none());
    }

    #[test]
    fn recall_forms_are_mutually_exclusive() {
        let mut session = TradeInSession::new();
        session.toggle_recall_form("R1");
        session.toggle_recall_form("R2");
        assert!(!session.is_recall_form_open("R1"));
        assert!(session.is_recall_form_open("R2"));

        session.toggle_recall_form("R2");
        assert!(!session.is_recall_form_open("R2"));

        session.toggle_recall_form("R1");
        session.close_recall_form("R2");
        assert!(session.is_recall_form_open("R1"));
        session.close_recall_form("R1");
        assert!(!session.is_recall_form_open("R1"));
    }

    #[test]
    fn reset_returns_to_input_page() {
        let mut session = TradeInSession::new();
        session.start_lookup(registration("KT68XYZ"), false);
        session.reset();
        assert_eq!(session, TradeInSession::default());
        assert!(!session.is_summary_visible());
    }
}
