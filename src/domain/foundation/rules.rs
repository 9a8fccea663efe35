//! Declarative field validation rules.
//!
//! A field's rules are a static slice of [`Rule`] values; [`check_field`] is
//! the single dispatcher that evaluates them in order and stops at the first
//! failure. Optional fields simply omit [`Rule::Required`]: every other rule
//! is skipped for blank input.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// One validation rule for a text field.
#[derive(Clone, Copy)]
pub enum Rule {
    /// Value must be present and not blank.
    Required,

    /// Value must match the pattern.
    Pattern {
        regex: &'static Lazy<Regex>,
        message: &'static str,
    },

    /// Value must satisfy the predicate.
    Predicate {
        check: fn(&str) -> bool,
        message: &'static str,
    },
}

/// Evaluates `rules` against `value` for `field`.
pub fn check_field(
    field: &str,
    value: Option<&str>,
    rules: &[Rule],
) -> Result<(), ValidationError> {
    let value = value.map(str::trim).unwrap_or_default();
    for rule in rules {
        match rule {
            Rule::Required => {
                if value.is_empty() {
                    return Err(ValidationError::empty_field(field));
                }
            }
            Rule::Pattern { regex, message } => {
                if !value.is_empty() && !regex.is_match(value) {
                    return Err(ValidationError::invalid_format(field, *message));
                }
            }
            Rule::Predicate { check, message } => {
                if !value.is_empty() && !check(value) {
                    return Err(ValidationError::invalid_format(field, *message));
                }
            }
        }
    }
    Ok(())
}
