use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::FlowError;

/// Contact details collected before the quote is handed off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub best_time_to_call: Option<String>,
    pub notes: Option<String>,
}

/// Loose `local@domain.tld` check.
pub fn is_valid_email(email: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl ContactDetails {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { first_name: first_name.into(), last_name: last_name.into(), email: email.into(), ..Self::default() }
    }

    /// Trim every field, dropping blank optional ones, and check required fields.
    pub fn validated(self) -> Result<Self, FlowError> {
        let first_name = self.first_name.trim().to_string();
        let last_name = self.last_name.trim().to_string();
        let email = self.email.trim().to_string();

        if first_name.is_empty() { return Err(FlowError::MissingField("first name")) }
        if last_name.is_empty() { return Err(FlowError::MissingField("last name")) }
        if email.is_empty() { return Err(FlowError::MissingField("email")) }
        if !is_valid_email(&email) { return Err(FlowError::InvalidEmail(email)) }

        Ok(Self {
            first_name,
            last_name,
            email,
            phone: trimmed(self.phone),
            best_time_to_call: trimmed(self.best_time_to_call),
            notes: trimmed(self.notes),
        })
    }

    #[inline]
    pub fn full_name(&self) -> String { format!("{} {}", self.first_name, self.last_name) }
}
