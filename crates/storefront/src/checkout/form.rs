//! Shipping form validation.
//!
//! Validation collects every failure into one list rather than stopping at
//! the first, so the client can render all field errors in a single pass.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use comforty_core::ShippingAddress;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]{2,}$").expect("valid name regex"));

const MIN_PHONE_DIGITS: usize = 10;
const MIN_POSTAL_LEN: usize = 5;
const MIN_ADDRESS_LEN: usize = 5;

/// Raw shipping details as submitted by the client.
///
/// Every field defaults to empty so a partial submission still deserializes
/// and produces field-level validation errors instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

impl ShippingForm {
    /// Validate the form, returning a clean [`ShippingAddress`] or every
    /// field error found.
    ///
    /// # Errors
    ///
    /// Returns the full list of validation messages. The list is never empty
    /// on the `Err` path.
    pub fn validate(&self) -> Result<ShippingAddress, Vec<String>> {
        let mut errors = Vec::new();

        validate_name(&mut errors, "First name", &self.first_name);
        validate_name(&mut errors, "Last name", &self.last_name);

        let email = self.email.trim();
        if email.is_empty() {
            errors.push("Email is required.".to_string());
        } else if !EMAIL_RE.is_match(email) {
            errors.push("Email address is invalid.".to_string());
        }

        let phone_digits = self.phone.chars().filter(char::is_ascii_digit).count();
        if self.phone.trim().is_empty() {
            errors.push("Phone is required.".to_string());
        } else if phone_digits < MIN_PHONE_DIGITS {
            errors.push("Phone number must have at least 10 digits.".to_string());
        }

        let address = self.address.trim();
        if address.is_empty() {
            errors.push("Address is required.".to_string());
        } else if address.len() < MIN_ADDRESS_LEN {
            errors.push("Address must be at least 5 characters.".to_string());
        }

        validate_required(&mut errors, "City", &self.city);
        validate_required(&mut errors, "State", &self.state);

        let postal = self.postal_code.trim();
        if postal.is_empty() {
            errors.push("Postal code is required.".to_string());
        } else if postal.len() < MIN_POSTAL_LEN {
            errors.push("Postal code must be at least 5 characters.".to_string());
        }

        validate_required(&mut errors, "Country", &self.country);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ShippingAddress {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: email.to_string(),
            phone: self.phone.trim().to_string(),
            address: address.to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            postal_code: postal.to_string(),
            country: self.country.trim().to_string(),
        })
    }
}

fn validate_required(errors: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{field} is required."));
    }
}

fn validate_name(errors: &mut Vec<String>, field: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.push(format!("{field} is required."));
    } else if !NAME_RE.is_match(value) {
        errors.push(format!(
            "{field} must be at least 2 letters and contain only letters."
        ));
    }
}
