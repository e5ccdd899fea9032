//! The seam between the engine and the map widget.
//!
//! The widget implements [`MapSurface`] and forwards user interaction as
//! [`RendererEvent`]s. The engine never talks to the widget any other
//! way, which keeps renderer/engine interaction a single, non-recursive
//! dispatch path.

use serde::{Deserialize, Serialize};

use mapify_config::ShapeStyle;

use crate::geometry::{Geometry, GeometryType};

/// Opaque id of a rendered overlay, issued by the surface.
///
/// A feature owns exactly one handle for its lifetime; the engine
/// releases it (detach) whenever the feature leaves the live set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct OverlayHandle(u64);

impl OverlayHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OverlayHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "overlay-{}", self.0)
    }
}

/// Everything the engine asks of the map widget.
///
/// All calls are synchronous and assumed to succeed once the widget has
/// loaded; the engine holds the only mutable reference.
pub trait MapSurface {
    /// Renders a geometry and returns the handle of the new overlay.
    fn attach(&mut self, geometry: &Geometry, style: &ShapeStyle) -> OverlayHandle;

    /// Removes an overlay from the surface. The handle is dead afterwards.
    fn detach(&mut self, overlay: OverlayHandle);

    /// Re-styles an existing overlay.
    fn apply_style(&mut self, overlay: OverlayHandle, style: &ShapeStyle);

    /// Enables or disables interactive geometry editing (vertex drag etc.).
    fn set_editable(&mut self, overlay: OverlayHandle, editable: bool);

    /// Shows or hides an overlay without detaching it.
    fn set_visible(&mut self, overlay: OverlayHandle, visible: bool);

    /// Arms interactive drawing for a geometry type, or disarms it.
    fn arm_drawing(&mut self, mode: Option<GeometryType>);
}

/// User interaction reported by the map widget.
///
/// Delivered to [`DrawingManager::handle_event`] in the order the host
/// event loop produced them; the engine consumes each one synchronously.
///
/// [`DrawingManager::handle_event`]: crate::manager::DrawingManager::handle_event
#[derive(Debug, Clone, PartialEq)]
pub enum RendererEvent {
    /// The user finished drawing a shape; the widget already rendered it
    /// and minted `overlay` for it.
    DrawCompleted {
        overlay: OverlayHandle,
        geometry: Geometry,
    },
    /// An overlay's geometry changed in place (vertex drag, resize, move).
    GeometryEdited {
        overlay: OverlayHandle,
        geometry: Geometry,
    },
    /// The user clicked an overlay.
    OverlayClicked { overlay: OverlayHandle },
}
