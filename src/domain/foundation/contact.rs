//! Client contact data shared by memberships, reservations and rentals.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::rules::{check_field, Rule};
use super::ValidationError;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zÁÉÍÓÚÜÑáéíóúüñ][A-Za-zÁÉÍÓÚÜÑáéíóúüñ .'\-]*$").unwrap());

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9 \-]{10,20}$").unwrap());

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Rules for person names (holders, members, guests).
pub static NAME_RULES: &[Rule] = &[
    Rule::Required,
    Rule::Pattern {
        regex: &NAME_PATTERN,
        message: "only letters, spaces and apostrophes are allowed",
    },
    Rule::Predicate {
        check: |v| v.chars().count() <= 100,
        message: "must be at most 100 characters",
    },
];

/// Rules for phone numbers (used for WhatsApp delivery).
pub static PHONE_RULES: &[Rule] = &[
    Rule::Required,
    Rule::Pattern {
        regex: &PHONE_PATTERN,
        message: "must contain 10 to 15 digits",
    },
    Rule::Predicate {
        check: |v| (10..=15).contains(&v.chars().filter(char::is_ascii_digit).count()),
        message: "must contain 10 to 15 digits",
    },
];

/// Rules for the optional e-mail address.
pub static EMAIL_RULES: &[Rule] = &[Rule::Pattern {
    regex: &EMAIL_PATTERN,
    message: "is not a valid e-mail address",
}];

/// Validated person name.
pub fn validate_name(field: &str, raw: &str) -> Result<String, ValidationError> {
    check_field(field, Some(raw), NAME_RULES)?;
    Ok(raw.trim().to_string())
}

/// Contact details of a guest or membership holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

impl ContactInfo {
    /// Validates and normalizes raw form values.
    ///
    /// Phone numbers keep only digits and a leading `+`; a blank e-mail
    /// becomes `None`.
    pub fn new(name: &str, phone: &str, email: Option<&str>) -> Result<Self, ValidationError> {
        let name = validate_name("nombre", name)?;
        check_field("telefono", Some(phone), PHONE_RULES)?;
        check_field("email", email, EMAIL_RULES)?;

        let phone = phone.trim();
        let mut normalized: String = phone.chars().filter(char::is_ascii_digit).collect();
        if phone.starts_with('+') {
            normalized.insert(0, '+');
        }

        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_lowercase);

        Ok(Self {
            name,
            phone: normalized,
            email,
        })
    }
}
