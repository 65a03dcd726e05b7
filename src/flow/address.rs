use serde::{Deserialize, Serialize};

/// Shortest composed address accepted for lookup.
pub const MIN_ADDRESS_LEN: usize = 10;

/// The address fields on the first screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressForm {
    pub street: String,
    pub city: String,
    pub zip: String,
}

impl AddressForm {
    pub fn new(street: impl Into<String>, city: impl Into<String>, zip: impl Into<String>) -> Self {
        Self { street: street.into(), city: city.into(), zip: zip.into() }
    }

    /// A single free-text line, e.g. `"1 Main St, Springfield, 12345"`.
    pub fn from_line(line: impl Into<String>) -> Self {
        Self { street: line.into(), ..Self::default() }
    }

    /// Non-empty fields joined with `", "`.
    pub fn composed(&self) -> String {
        [&self.street, &self.city, &self.zip]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether the composed address is long enough to submit.
    pub fn is_submittable(&self) -> bool { self.composed().chars().count() >= MIN_ADDRESS_LEN }
}
