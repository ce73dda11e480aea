use super::domain::Registration;

const PLATE_MIN_LENGTH: usize = 5;
const PLATE_MAX_LENGTH: usize = 10;
const PHONE_MIN_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("registration is empty")]
    Empty,
    #[error("registration must be 5-10 characters (found {found})")]
    Length { found: usize },
    #[error("registration may only contain letters and digits")]
    InvalidCharacters,
}

impl Registration {
    /// Normalise and validate a typed or OCR'd plate.
    pub fn parse(raw: &str) -> Result<Self, RegistrationError> {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|ch| *ch != ' ')
            .map(|ch| ch.to_ascii_uppercase())
            .collect();

        if cleaned.is_empty() {
            return Err(RegistrationError::Empty);
        }

        let found = cleaned.chars().count();
        if !(PLATE_MIN_LENGTH..=PLATE_MAX_LENGTH).contains(&found) {
            return Err(RegistrationError::Length { found });
        }

        if !cleaned
            .chars()
            .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit())
        {
            return Err(RegistrationError::InvalidCharacters);
        }

        Ok(Self(cleaned))
    }
}

impl std::str::FromStr for Registration {
    type Err = RegistrationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

pub fn validate_phone(raw: &str) -> bool {
    raw.chars().filter(char::is_ascii_digit).count() >= PHONE_MIN_DIGITS
}

/// Loose `local@domain.tld` shape check: exactly one `@`, a non-empty local
/// part, and a domain with a `.` that has characters on both sides.
pub fn validate_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(at, ch)| ch == '.' && at > 0 && at + 1 < domain.len())
}
