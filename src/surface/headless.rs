use std::collections::BTreeMap;

use tracing::trace;

use super::{MapSurface, MapType, MapView, MapsRuntime, OverlayStyle, PathListener, PolygonHandle, SurfaceError};
use crate::geom::{AreaModel, Coordinate};

struct Overlay {
    path: Vec<Coordinate>,
    editable: bool,
    listeners: Vec<PathListener>,
}

/// In-memory map surface with no imagery.
///
/// Stands in for an interactive map in tests and on the command line. User
/// gestures are simulated with [`move_vertex`](Self::move_vertex),
/// [`insert_vertex`](Self::insert_vertex) and [`remove_vertex`](Self::remove_vertex).
pub struct HeadlessSurface {
    view: Option<MapView>,
    overlays: BTreeMap<u64, Overlay>,
    next_id: u64,
    area_model: AreaModel,
}

impl Default for HeadlessSurface {
    fn default() -> Self { Self::new() }
}

impl HeadlessSurface {
    /// A surface without a map runtime; areas use the planar model.
    pub fn new() -> Self {
        Self { view: None, overlays: BTreeMap::new(), next_id: 0, area_model: AreaModel::Planar }
    }

    /// A surface backed by a loaded map runtime; areas use the spherical model.
    pub fn with_runtime(_runtime: &MapsRuntime) -> Self {
        Self { area_model: AreaModel::Spherical, ..Self::new() }
    }

    #[inline] pub fn view(&self) -> Option<&MapView> { self.view.as_ref() }

    /// Number of overlays currently attached.
    #[inline] pub fn overlay_count(&self) -> usize { self.overlays.len() }

    /// Total listeners registered across all attached overlays.
    pub fn listener_count(&self) -> usize {
        self.overlays.values().map(|o| o.listeners.len()).sum()
    }

    pub fn is_editable(&self, handle: PolygonHandle) -> Option<bool> {
        self.overlays.get(&handle.0).map(|o| o.editable)
    }

    pub fn style(&self, handle: PolygonHandle) -> Option<OverlayStyle> {
        self.is_editable(handle).map(OverlayStyle::for_editable)
    }

    /// Drag vertex `index` to `to`.
    pub fn move_vertex(&mut self, handle: PolygonHandle, index: usize, to: Coordinate) -> Result<(), SurfaceError> {
        self.gesture(handle, |path| {
            let len = path.len();
            let vertex = path.get_mut(index).ok_or(SurfaceError::VertexOutOfRange { index, len })?;
            *vertex = to;
            Ok(())
        })
    }

    /// Insert a new vertex before position `index` (`index == len` appends).
    pub fn insert_vertex(&mut self, handle: PolygonHandle, index: usize, at: Coordinate) -> Result<(), SurfaceError> {
        self.gesture(handle, |path| {
            if index > path.len() {
                return Err(SurfaceError::VertexOutOfRange { index, len: path.len() });
            }
            path.insert(index, at);
            Ok(())
        })
    }

    /// Delete vertex `index`. The path may drop below three vertices.
    pub fn remove_vertex(&mut self, handle: PolygonHandle, index: usize) -> Result<(), SurfaceError> {
        self.gesture(handle, |path| {
            if index >= path.len() {
                return Err(SurfaceError::VertexOutOfRange { index, len: path.len() });
            }
            path.remove(index);
            Ok(())
        })
    }

    /// Apply a user edit to an editable overlay, then notify its listeners.
    fn gesture<F>(&mut self, handle: PolygonHandle, edit: F) -> Result<(), SurfaceError>
    where F: FnOnce(&mut Vec<Coordinate>) -> Result<(), SurfaceError> {
        let Overlay { path, editable, listeners } = self.overlays.get_mut(&handle.0)
            .ok_or(SurfaceError::UnknownHandle(handle))?;
        if !*editable {
            return Err(SurfaceError::NotEditable(handle));
        }
        edit(path)?;
        trace!("[surface] {handle} edited, {} vertices", path.len());
        for listener in listeners.iter_mut() {
            listener(path.as_slice());
        }
        Ok(())
    }

    fn overlay_mut(&mut self, handle: PolygonHandle) -> Result<&mut Overlay, SurfaceError> {
        self.overlays.get_mut(&handle.0).ok_or(SurfaceError::UnknownHandle(handle))
    }
}

impl MapSurface for HeadlessSurface {
    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        let map_type = self.view.map(|v| v.map_type).unwrap_or(MapType::Satellite);
        self.view = Some(MapView { center, zoom, map_type });
    }

    fn attach_polygon(&mut self, path: &[Coordinate], editable: bool) -> PolygonHandle {
        let handle = PolygonHandle(self.next_id);
        self.next_id += 1;
        self.overlays.insert(handle.0, Overlay { path: path.to_vec(), editable, listeners: Vec::new() });
        trace!("[surface] attached {handle}");
        handle
    }

    fn set_editable(&mut self, handle: PolygonHandle, editable: bool) -> Result<(), SurfaceError> {
        self.overlay_mut(handle)?.editable = editable;
        Ok(())
    }

    fn on_path_changed(&mut self, handle: PolygonHandle, listener: PathListener) -> Result<(), SurfaceError> {
        self.overlay_mut(handle)?.listeners.push(listener);
        Ok(())
    }

    fn path(&self, handle: PolygonHandle) -> Result<Vec<Coordinate>, SurfaceError> {
        self.overlays.get(&handle.0)
            .map(|o| o.path.clone())
            .ok_or(SurfaceError::UnknownHandle(handle))
    }

    fn set_path(&mut self, handle: PolygonHandle, path: &[Coordinate]) -> Result<(), SurfaceError> {
        self.overlay_mut(handle)?.path = path.to_vec();
        Ok(())
    }

    fn detach(&mut self, handle: PolygonHandle) {
        if self.overlays.remove(&handle.0).is_some() {
            trace!("[surface] detached {handle}");
        }
    }

    fn area_model(&self) -> AreaModel { self.area_model }
}
