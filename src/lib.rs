#![doc = "RoofQuote public API"]
mod common;
pub mod config;
pub mod editor;
pub mod estimate;
pub mod flow;
pub mod footprint;
pub mod geocode;
pub mod geom;
pub mod surface;

#[doc(inline)]
pub use common::write_json_atomic;

#[doc(inline)]
pub use config::{ConfigProvider, PricingConfig, Settings, StaticConfig, TierKey};

#[doc(inline)]
pub use editor::{EditMode, EditorError, PolygonEditor};

#[doc(inline)]
pub use estimate::{estimate, Pitch, QuoteEstimate};

#[doc(inline)]
pub use flow::{FlowError, LeadBundle, Step, WidgetFlow};

#[doc(inline)]
pub use footprint::{find_closest_building, BuildingFootprint, FootprintLookupError, FootprintSource};

#[doc(inline)]
pub use geocode::{GeocodeError, Geocoder};

#[doc(inline)]
pub use geom::{polygon_area_square_meters, square_meters_to_square_feet, Coordinate, Polygon};

#[doc(inline)]
pub use surface::{HeadlessSurface, MapSurface};
