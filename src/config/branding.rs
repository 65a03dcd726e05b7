use serde::{Deserialize, Serialize};

/// Contractor branding shown around the widget. The geometry core never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingConfig {
    pub company_name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub logo_url: Option<String>,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            company_name: "Professional Roofing Services".into(),
            primary_color: "#22c55e".into(),
            secondary_color: "#16a34a".into(),
            accent_color: "#15803d".into(),
            logo_url: None,
        }
    }
}
