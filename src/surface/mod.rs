mod headless;
mod loader;
#[cfg(feature = "network")]
mod static_map;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::{AreaModel, Coordinate};

pub use headless::HeadlessSurface;
pub use loader::{load_maps, MapsInitError, MapsLoader, MapsRuntime};
#[cfg(feature = "network")]
pub use static_map::static_map_url;

/// Opaque reference to a polygon overlay on a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolygonHandle(pub(crate) u64);

impl fmt::Display for PolygonHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "PolygonHandle({})", self.0) }
}

/// Visual style of the overlay, tied to the editor mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayStyle {
    /// Shape accepted by the user (green).
    Confirmed,
    /// Shape being edited (blue).
    Editing,
}

impl OverlayStyle {
    #[inline]
    pub fn for_editable(editable: bool) -> Self {
        if editable { OverlayStyle::Editing } else { OverlayStyle::Confirmed }
    }

    /// Stroke and fill colour as `#rrggbb`.
    pub fn color(&self) -> &'static str {
        match self {
            OverlayStyle::Confirmed => "#10b981",
            OverlayStyle::Editing => "#3b82f6",
        }
    }

    #[inline] pub fn stroke_opacity(&self) -> f64 { 0.8 }
    #[inline] pub fn fill_opacity(&self) -> f64 { 0.35 }
    #[inline] pub fn stroke_weight(&self) -> u8 { 2 }
}

/// Base imagery of the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapType {
    #[default]
    Satellite,
    Hybrid,
    Roadmap,
}

impl MapType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapType::Satellite => "satellite",
            MapType::Hybrid => "hybrid",
            MapType::Roadmap => "roadmap",
        }
    }
}

/// Camera position; always top-down (no tilt or heading).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub map_type: MapType,
}

/// Errors from overlay operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    #[error("{0} is not attached")]
    UnknownHandle(PolygonHandle),

    #[error("{0} is not editable")]
    NotEditable(PolygonHandle),

    #[error("vertex {index} out of range for path of {len}")]
    VertexOutOfRange { index: usize, len: usize },
}

/// Callback invoked with the full path after each vertex add, move or removal.
pub type PathListener = Box<dyn FnMut(&[Coordinate])>;

/// An interactive map that shows at most a handful of polygon overlays.
///
/// Listeners registered with [`MapSurface::on_path_changed`] fire only for user
/// gestures on an editable overlay, synchronously with the change. Programmatic
/// [`MapSurface::set_path`] does not notify. [`MapSurface::detach`] removes the
/// overlay together with every listener registered on it, and is a no-op for an
/// unknown handle.
pub trait MapSurface {
    /// Center the camera on a coordinate.
    fn set_view(&mut self, center: Coordinate, zoom: u8);

    /// Add a polygon overlay with the given path.
    fn attach_polygon(&mut self, path: &[Coordinate], editable: bool) -> PolygonHandle;

    /// Toggle vertex handles; also switches the overlay style.
    fn set_editable(&mut self, handle: PolygonHandle, editable: bool) -> Result<(), SurfaceError>;

    /// Register a path-change listener on an overlay.
    fn on_path_changed(&mut self, handle: PolygonHandle, listener: PathListener) -> Result<(), SurfaceError>;

    /// The path currently drawn on screen.
    fn path(&self, handle: PolygonHandle) -> Result<Vec<Coordinate>, SurfaceError>;

    /// Repaint an overlay with a new path without notifying listeners.
    fn set_path(&mut self, handle: PolygonHandle, path: &[Coordinate]) -> Result<(), SurfaceError>;

    /// Remove an overlay and release its listeners.
    fn detach(&mut self, handle: PolygonHandle);

    /// How this surface measures areas.
    fn area_model(&self) -> AreaModel { AreaModel::Planar }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_follows_editability() {
        assert_eq!(OverlayStyle::for_editable(true), OverlayStyle::Editing);
        assert_eq!(OverlayStyle::for_editable(false), OverlayStyle::Confirmed);
        assert_ne!(OverlayStyle::Editing.color(), OverlayStyle::Confirmed.color());
    }
}
