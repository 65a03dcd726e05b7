use serde::{Deserialize, Serialize};

use super::ContactDetails;
use crate::config::TierKey;
use crate::estimate::{Pitch, QuoteBreakdown};
use crate::geom::{Coordinate, Polygon};

/// Everything the lead-capture collaborator receives once the flow completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadBundle {
    pub company_name: String,
    /// Address as typed by the homeowner.
    pub entered_address: String,
    /// Address as resolved by the geocoder.
    pub address: String,
    pub location: Coordinate,
    pub footprint_id: String,
    pub roof_polygon: Polygon,
    pub roof_area_square_feet: f64,
    pub roof_squares: f64,
    pub pitch: Pitch,
    pub tier: TierKey,
    pub tier_name: String,
    pub price_per_square_foot: f64,
    pub total_price: f64,
    pub breakdown: QuoteBreakdown,
    pub contact: ContactDetails,
}
