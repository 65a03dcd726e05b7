use geo::{BoundingRect, Centroid};

use super::coord::Coordinate;

/// Arithmetic mean of the vertices (not the area-weighted centroid).
///
/// Returns `None` for an empty vertex list.
pub fn vertex_centroid(points: &[Coordinate]) -> Option<Coordinate> {
    let multi: geo::MultiPoint<f64> = points.iter()
        .map(|&p| geo::Point::from(geo::Coord::from(p)))
        .collect();
    multi.centroid().map(|p| Coordinate::from(p.0))
}

/// Center of the lng/lat bounding box, used to position a map view.
pub fn bounds_center(points: &[Coordinate]) -> Option<Coordinate> {
    let line: geo::LineString<f64> = points.iter().copied().map(geo::Coord::from).collect();
    line.bounding_rect().map(|rect| Coordinate::from(rect.center()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lng: f64) -> Coordinate { Coordinate { latitude: lat, longitude: lng } }

    #[test]
    fn centroid_is_vertex_mean() {
        // Unevenly spaced vertices pull the mean away from the area centroid.
        let pts = [c(0.0, 0.0), c(0.0, 4.0), c(0.0, 3.0), c(2.0, 4.0), c(2.0, 0.0)];
        let centroid = vertex_centroid(&pts).unwrap();
        assert!((centroid.latitude - 0.8).abs() < 1e-12);
        assert!((centroid.longitude - 2.2).abs() < 1e-12);
    }

    #[test]
    fn centroid_of_nothing_is_none() {
        assert!(vertex_centroid(&[]).is_none());
        assert!(bounds_center(&[]).is_none());
    }

    #[test]
    fn bounds_center_of_square() {
        let pts = [c(10.0, 20.0), c(10.0, 22.0), c(12.0, 22.0), c(12.0, 20.0)];
        assert_eq!(bounds_center(&pts), Some(c(11.0, 21.0)));
    }
}
