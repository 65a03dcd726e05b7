mod area;
mod centroid;
mod coord;

pub use area::{
    area_square_meters, polygon_area_square_meters, roof_squares, signed_area_square_meters,
    spherical_area_square_meters, square_meters_to_square_feet, AreaModel,
    METERS_PER_DEGREE_LAT, SQUARE_FEET_PER_ROOF_SQUARE, SQUARE_FEET_PER_SQUARE_METER,
};
pub use centroid::{bounds_center, vertex_centroid};
pub use coord::{Coordinate, GeometryError, Polygon};
