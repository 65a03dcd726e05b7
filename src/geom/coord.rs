use serde::{Deserialize, Serialize};

/// Errors raised when building geometry from untrusted input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// Latitude outside [-90, 90] or longitude outside [-180, 180], or a non-finite value.
    #[error("coordinate out of range: lat={latitude}, lng={longitude}")]
    OutOfRange { latitude: f64, longitude: f64 },

    /// A polygon needs at least three vertices.
    #[error("polygon has {0} vertices, at least 3 are required")]
    TooFewVertices(usize),
}

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting values outside the valid lat/lng ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeometryError> {
        let valid = latitude.is_finite() && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(GeometryError::OutOfRange { latitude, longitude });
        }
        Ok(Self { latitude, longitude })
    }

    /// Offset by a number of degrees. The result is not range-checked.
    #[inline]
    pub fn offset(&self, d_lat: f64, d_lng: f64) -> Self {
        Self { latitude: self.latitude + d_lat, longitude: self.longitude + d_lng }
    }

    /// Euclidean distance in raw degree space (not meters).
    #[inline]
    pub fn degree_distance(&self, other: &Coordinate) -> f64 {
        (self.latitude - other.latitude).hypot(self.longitude - other.longitude)
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self { geo::Coord { x: c.longitude, y: c.latitude } }
}

impl From<geo::Coord<f64>> for Coordinate {
    fn from(c: geo::Coord<f64>) -> Self { Coordinate { latitude: c.y, longitude: c.x } }
}

/// An implicitly closed ring of at least three coordinates, in drawing order.
///
/// The first vertex is not repeated at the end; the closing edge is implied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coordinate>", into = "Vec<Coordinate>")]
pub struct Polygon {
    points: Vec<Coordinate>,
}

impl Polygon {
    /// Build a polygon from vertices, dropping a duplicated closing vertex if present.
    pub fn new(mut points: Vec<Coordinate>) -> Result<Self, GeometryError> {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 3 {
            return Err(GeometryError::TooFewVertices(points.len()));
        }
        Ok(Self { points })
    }

    /// Wrap vertices already known to form a valid ring.
    pub(crate) fn from_ring(points: Vec<Coordinate>) -> Self {
        debug_assert!(points.len() >= 3);
        Self { points }
    }

    /// Number of distinct vertices.
    #[inline] pub fn len(&self) -> usize { self.points.len() }

    /// Always false; kept for API symmetry with slices.
    #[inline] pub fn is_empty(&self) -> bool { self.points.is_empty() }

    /// Vertices in drawing order.
    #[inline] pub fn points(&self) -> &[Coordinate] { &self.points }

    /// Consume into the vertex list.
    #[inline] pub fn into_points(self) -> Vec<Coordinate> { self.points }

    /// Convert to a closed `geo::Polygon` in (x = lng, y = lat) order.
    pub fn to_geo(&self) -> geo::Polygon<f64> {
        to_geo_polygon(&self.points)
    }
}

impl TryFrom<Vec<Coordinate>> for Polygon {
    type Error = GeometryError;
    fn try_from(points: Vec<Coordinate>) -> Result<Self, Self::Error> { Polygon::new(points) }
}

impl From<Polygon> for Vec<Coordinate> {
    fn from(p: Polygon) -> Self { p.points }
}

impl AsRef<[Coordinate]> for Polygon {
    fn as_ref(&self) -> &[Coordinate] { &self.points }
}

/// Build a `geo::Polygon` from an open vertex list (geo closes the ring itself).
pub(crate) fn to_geo_polygon(points: &[Coordinate]) -> geo::Polygon<f64> {
    let ring: Vec<geo::Coord<f64>> = points.iter().copied().map(Into::into).collect();
    geo::Polygon::new(geo::LineString(ring), vec![])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lng: f64) -> Coordinate { Coordinate::new(lat, lng).unwrap() }

    #[test]
    fn coordinate_range_checks() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(90.1, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn polygon_requires_three_vertices() {
        assert_eq!(
            Polygon::new(vec![c(0.0, 0.0), c(0.0, 1.0)]),
            Err(GeometryError::TooFewVertices(2))
        );
        assert!(Polygon::new(vec![c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)]).is_ok());
    }

    #[test]
    fn polygon_drops_repeated_closing_vertex() {
        let p = Polygon::new(vec![c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0), c(0.0, 0.0)]).unwrap();
        assert_eq!(p.len(), 3);

        // a closed two-vertex ring is still degenerate
        assert_eq!(
            Polygon::new(vec![c(0.0, 0.0), c(0.0, 1.0), c(0.0, 0.0)]),
            Err(GeometryError::TooFewVertices(2))
        );
    }

    #[test]
    fn polygon_deserialize_rejects_short_rings() {
        let json = r#"[{"latitude":1.0,"longitude":2.0},{"latitude":1.5,"longitude":2.5}]"#;
        assert!(serde_json::from_str::<Polygon>(json).is_err());
    }

    #[test]
    fn geo_conversion_swaps_axes() {
        let g: geo::Coord<f64> = c(10.0, 20.0).into();
        assert_eq!((g.x, g.y), (20.0, 10.0));
        assert_eq!(Coordinate::from(g), c(10.0, 20.0));
    }

    #[test]
    fn degree_distance_is_euclidean() {
        assert!((c(0.0, 0.0).degree_distance(&c(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }
}
