use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

// `\s` in JS also covers U+FEFF, which Unicode does not class as whitespace.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$")
        .expect("email pattern is valid")
});

pub const REQUIRED_FIELDS: [&str; 4] = ["name", "email", "service", "message"];

/// Form entries at submit time, keyed by field name. A repeated name keeps
/// its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    fields: BTreeMap<String, String>,
}

impl FormSnapshot {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn filled(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }
}

impl FromIterator<(String, String)> for FormSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Por favor, completá todos los campos requeridos.")]
    MissingFields,
    #[error("Por favor, ingresá un email válido.")]
    InvalidEmail,
}

/// A contact request that passed local validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub service: String,
    pub message: String,
}

impl TryFrom<&FormSnapshot> for ContactRequest {
    type Error = ValidationError;

    fn try_from(snapshot: &FormSnapshot) -> Result<Self, Self::Error> {
        let (Some(name), Some(email), Some(service), Some(message)) = (
            snapshot.filled("name"),
            snapshot.filled("email"),
            snapshot.filled("service"),
            snapshot.filled("message"),
        ) else {
            return Err(ValidationError::MissingFields);
        };

        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(ContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            service: service.to_string(),
            message: message.to_string(),
        })
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
