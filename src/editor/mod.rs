mod polygon_editor;

use serde::{Deserialize, Serialize};

use crate::geom::GeometryError;
use crate::surface::SurfaceError;

pub use polygon_editor::{AreaListener, PolygonEditor};

/// Edit-session mode of a roof polygon.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Shape is confirmed; the on-screen path equals the committed path.
    #[default]
    Viewing,
    /// Vertex handles are live and the on-screen path may differ from the committed one.
    Editing,
}

/// Errors from editor transitions. None of them change the editor's mode.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditorError {
    /// The on-screen path cannot be committed.
    #[error("invalid roof polygon: {0}")]
    InvalidPolygon(#[from] GeometryError),

    #[error("editor is not in editing mode")]
    NotEditing,

    #[error("no polygon is attached")]
    NoPolygon,

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
