use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9()\-.\s]+$").expect("valid phone regex"));

const MIN_PHONE_DIGITS: usize = 8;

/// Contact fields entered on the last step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Email,
    Phone,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<ContactField, &'static str>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self.fields().map(|field| field.to_string()).collect();
        write!(f, "invalid contact details: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn get(&self, field: ContactField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn fields(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.errors.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn add(&mut self, field: ContactField, message: &'static str) {
        self.errors.insert(field, message);
    }
}

impl ClientDetails {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Returns the trimmed details, or every field that failed.
    pub fn validate(&self) -> Result<ClientDetails, ValidationErrors> {
        let details = ClientDetails {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        };
        let mut errors = ValidationErrors::default();

        if details.name.is_empty() {
            errors.add(ContactField::Name, "Please enter your name");
        }

        if details.email.is_empty() {
            errors.add(ContactField::Email, "Please enter your email");
        } else if !EMAIL_RE.is_match(&details.email) {
            errors.add(ContactField::Email, "Please enter a valid email address");
        }

        let digits = details.phone.chars().filter(char::is_ascii_digit).count();
        if details.phone.is_empty() {
            errors.add(ContactField::Phone, "Please enter your phone number");
        } else if !PHONE_RE.is_match(&details.phone) || digits < MIN_PHONE_DIGITS {
            errors.add(ContactField::Phone, "Please enter a valid phone number");
        }

        if errors.is_empty() {
            Ok(details)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_details_are_trimmed() {
        let details = ClientDetails::new("  João ", "joao@x.com ", " 11999999999");
        let clean = details.validate().unwrap();
        assert_eq!(clean, ClientDetails::new("João", "joao@x.com", "11999999999"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let errors = ClientDetails::new("João", "not-an-email", "11999999999")
            .validate()
            .unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![ContactField::Email]);
        assert_eq!(
            errors.get(ContactField::Email),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn every_blank_field_is_reported() {
        let errors = ClientDetails::default().validate().unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![ContactField::Name, ContactField::Email, ContactField::Phone]
        );
        assert_eq!(errors.to_string(), "invalid contact details: name, email, phone");
    }

    #[test]
    fn phone_accepts_formatting_but_needs_enough_digits() {
        assert!(ClientDetails::new("A", "a@b.co", "+55 (11) 99999-9999").validate().is_ok());
        assert!(ClientDetails::new("A", "a@b.co", "12345").validate().is_err());
        assert!(ClientDetails::new("A", "a@b.co", "call me maybe").validate().is_err());
    }
}
