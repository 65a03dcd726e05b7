use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, info, warn};

use super::{EditMode, EditorError};
use crate::geom::{area_square_meters, square_meters_to_square_feet, AreaModel, Coordinate, Polygon};
use crate::surface::{MapSurface, PolygonHandle};

/// Callback receiving the roof area in ft² after every change.
pub type AreaListener = Box<dyn FnMut(f64)>;

type ListenerSlot = Rc<RefCell<Option<AreaListener>>>;

/// The polygon currently attached to the surface.
struct Session {
    handle: PolygonHandle,
    /// Last committed path.
    original: Polygon,
    /// Area of `original`, in ft².
    committed_area: f64,
    /// Area of the path on screen, in ft². Shared with the surface listener.
    live_area: Rc<Cell<f64>>,
}

/// Viewing/Editing state machine over a single polygon overlay.
///
/// The editor owns its map surface and holds at most one overlay at a time.
/// Attaching a new polygon detaches the previous one first, and dropping the
/// editor detaches whatever is still attached.
///
/// Area is recomputed synchronously on every user edit of the overlay and
/// pushed to the registered [`AreaListener`].
pub struct PolygonEditor<S: MapSurface> {
    surface: S,
    session: Option<Session>,
    mode: EditMode,
    listener: ListenerSlot,
}

fn area_square_feet(points: &[Coordinate], model: AreaModel) -> f64 {
    square_meters_to_square_feet(area_square_meters(points, model))
}

fn emit(slot: &RefCell<Option<AreaListener>>, area: f64) {
    if let Some(listener) = slot.borrow_mut().as_mut() {
        listener(area);
    }
}

impl<S: MapSurface> PolygonEditor<S> {
    /// An editor with nothing attached.
    pub fn new(surface: S) -> Self {
        Self { surface, session: None, mode: EditMode::Viewing, listener: Rc::new(RefCell::new(None)) }
    }

    /// Register the area callback, replacing any previous one.
    pub fn on_area_change<F>(&mut self, listener: F) where F: FnMut(f64) + 'static {
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    #[inline] pub fn mode(&self) -> EditMode { self.mode }
    #[inline] pub fn surface(&self) -> &S { &self.surface }
    #[inline] pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }
    #[inline] pub fn has_polygon(&self) -> bool { self.session.is_some() }

    /// Overlay handle of the attached polygon.
    #[inline] pub fn handle(&self) -> Option<PolygonHandle> { self.session.as_ref().map(|s| s.handle) }

    /// The last committed path.
    #[inline] pub fn original_path(&self) -> Option<&Polygon> { self.session.as_ref().map(|s| &s.original) }

    /// Area of the path currently drawn, in ft².
    #[inline] pub fn area_square_feet(&self) -> Option<f64> { self.session.as_ref().map(|s| s.live_area.get()) }

    /// Area of the last committed path, in ft².
    #[inline] pub fn committed_area_square_feet(&self) -> Option<f64> { self.session.as_ref().map(|s| s.committed_area) }

    /// The path currently drawn on the surface, which may be dirty while editing.
    pub fn current_path(&self) -> Result<Vec<Coordinate>, EditorError> {
        let session = self.session()?;
        Ok(self.surface.path(session.handle)?)
    }

    /// Replace the attached polygon, tearing down the previous overlay first.
    ///
    /// `area_override` pins the reported area (in ft²) until the user edits the
    /// shape; otherwise the area is computed from the polygon.
    pub fn attach(&mut self, polygon: Polygon, area_override: Option<f64>) -> Result<(), EditorError> {
        self.detach();

        let model = self.surface.area_model();
        let area = area_override.unwrap_or_else(|| area_square_feet(polygon.points(), model));
        let live_area = Rc::new(Cell::new(area));

        let handle = self.surface.attach_polygon(polygon.points(), false);
        let listener = {
            let live_area = Rc::clone(&live_area);
            let slot = Rc::clone(&self.listener);
            Box::new(move |path: &[Coordinate]| {
                let area = area_square_feet(path, model);
                live_area.set(area);
                emit(&slot, area);
            })
        };
        if let Err(e) = self.surface.on_path_changed(handle, listener) {
            self.surface.detach(handle);
            return Err(e.into());
        }

        info!("[editor] attached {handle} ({} vertices, {area:.0} ft²)", polygon.len());
        self.session = Some(Session { handle, original: polygon, committed_area: area, live_area });
        self.mode = EditMode::Viewing;
        emit(&self.listener, area);
        Ok(())
    }

    /// Remove the overlay and its listeners. Idempotent.
    pub fn detach(&mut self) {
        if let Some(session) = self.session.take() {
            self.surface.detach(session.handle);
            debug!("[editor] detached {}", session.handle);
        }
        self.mode = EditMode::Viewing;
    }

    /// Viewing → Editing. Snapshots the on-screen path as the committed one.
    ///
    /// Calling this while already editing leaves the session untouched.
    pub fn start_editing(&mut self) -> Result<(), EditorError> {
        let handle = self.session()?.handle;
        if self.mode == EditMode::Editing {
            debug!("[editor] already editing");
            return Ok(());
        }

        let snapshot = Polygon::new(self.surface.path(handle)?)?;
        self.surface.set_editable(handle, true)?;
        if let Some(session) = self.session.as_mut() {
            session.original = snapshot;
        }
        self.mode = EditMode::Editing;
        debug!("[editor] editing {handle}");
        Ok(())
    }

    /// Editing → Viewing, committing the on-screen path.
    ///
    /// A path with fewer than three vertices is rejected and the editor stays in Editing.
    pub fn save_changes(&mut self) -> Result<(), EditorError> {
        let handle = self.editing_handle()?;
        let polygon = Polygon::new(self.surface.path(handle)?).inspect_err(|e| {
            warn!("[editor] refusing to save: {e}");
        })?;

        self.surface.set_editable(handle, false)?;
        self.surface.set_path(handle, polygon.points())?;
        if let Some(session) = self.session.as_mut() {
            session.committed_area = session.live_area.get();
            session.original = polygon;
            info!("[editor] saved {handle} ({:.0} ft²)", session.committed_area);
        }
        self.mode = EditMode::Viewing;
        Ok(())
    }

    /// Discard on-screen edits and keep editing.
    pub fn reset_changes(&mut self) -> Result<(), EditorError> {
        self.editing_handle()?;
        self.restore()
    }

    /// Discard on-screen edits and return to Viewing.
    pub fn cancel_changes(&mut self) -> Result<(), EditorError> {
        let handle = self.editing_handle()?;
        self.restore()?;
        self.surface.set_editable(handle, false)?;
        self.mode = EditMode::Viewing;
        Ok(())
    }

    /// Repaint from the committed path and re-emit the committed area.
    fn restore(&mut self) -> Result<(), EditorError> {
        let session = self.session.as_ref().ok_or(EditorError::NoPolygon)?;
        self.surface.set_path(session.handle, session.original.points())?;
        session.live_area.set(session.committed_area);
        debug!("[editor] restored {}", session.handle);
        emit(&self.listener, session.committed_area);
        Ok(())
    }

    fn session(&self) -> Result<&Session, EditorError> {
        self.session.as_ref().ok_or(EditorError::NoPolygon)
    }

    fn editing_handle(&self) -> Result<PolygonHandle, EditorError> {
        let handle = self.session()?.handle;
        if self.mode != EditMode::Editing {
            return Err(EditorError::NotEditing);
        }
        Ok(handle)
    }
}

impl<S: MapSurface> Drop for PolygonEditor<S> {
    fn drop(&mut self) { self.detach(); }
}
