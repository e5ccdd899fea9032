// Shared test double for the map widget.

use std::collections::HashMap;

use mapify_config::ShapeStyle;
use mapify_core::{
    DrawingManager, Feature, FeatureId, Geometry, GeometryType, LatLng, LatLngBounds,
    MapSurface, OverlayHandle, RendererEvent,
};

/// Records every call the engine makes, and can mint overlay handles the
/// way the real widget does when the user finishes drawing.
#[derive(Debug, Default)]
pub struct MockSurface {
    next_handle: u64,
    pub live: Vec<OverlayHandle>,
    /// Engine-requested attaches (history restores); user draws mint
    /// their overlays via [`MockSurface::mint`] instead.
    pub attach_count: usize,
    pub detach_count: usize,
    pub styles: HashMap<OverlayHandle, ShapeStyle>,
    pub editable: HashMap<OverlayHandle, bool>,
    pub visibility: HashMap<OverlayHandle, bool>,
    pub armed: Option<GeometryType>,
}

impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the widget rendering a user-drawn overlay.
    pub fn mint(&mut self) -> OverlayHandle {
        let handle = OverlayHandle::new(self.next_handle);
        self.next_handle += 1;
        self.live.push(handle);
        handle
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, overlay: OverlayHandle) -> bool {
        self.live.contains(&overlay)
    }
}

impl MapSurface for MockSurface {
    fn attach(&mut self, _geometry: &Geometry, style: &ShapeStyle) -> OverlayHandle {
        let handle = self.mint();
        self.attach_count += 1;
        self.styles.insert(handle, *style);
        handle
    }

    fn detach(&mut self, overlay: OverlayHandle) {
        self.live.retain(|h| *h != overlay);
        self.detach_count += 1;
        self.styles.remove(&overlay);
        self.editable.remove(&overlay);
        self.visibility.remove(&overlay);
    }

    fn apply_style(&mut self, overlay: OverlayHandle, style: &ShapeStyle) {
        self.styles.insert(overlay, *style);
    }

    fn set_editable(&mut self, overlay: OverlayHandle, editable: bool) {
        self.editable.insert(overlay, editable);
    }

    fn set_visible(&mut self, overlay: OverlayHandle, visible: bool) {
        self.visibility.insert(overlay, visible);
    }

    fn arm_drawing(&mut self, mode: Option<GeometryType>) {
        self.armed = mode;
    }
}

pub fn manager() -> DrawingManager<MockSurface> {
    DrawingManager::new(MockSurface::new())
}

/// Drives a full user draw: mint an overlay, deliver the completion
/// event, and return the id of the feature it produced (which the
/// manager selects).
pub fn draw(manager: &mut DrawingManager<MockSurface>, geometry: Geometry) -> FeatureId {
    let overlay = manager.surface_mut().mint();
    manager.handle_event(RendererEvent::DrawCompleted { overlay, geometry });
    manager
        .selected_feature()
        .expect("draw completion selects the new feature")
        .id()
}

pub fn point(lat: f64, lng: f64) -> Geometry {
    Geometry::Point {
        position: LatLng::new(lat, lng),
    }
}

pub fn polygon() -> Geometry {
    Geometry::Polygon {
        path: vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 1.0),
            LatLng::new(1.0, 1.0),
        ],
    }
}

pub fn circle(radius_m: f64) -> Geometry {
    Geometry::Circle {
        center: LatLng::new(10.0, 20.0),
        radius_m,
    }
}

pub fn rectangle() -> Geometry {
    Geometry::Rectangle {
        bounds: LatLngBounds::new(LatLng::new(0.0, 0.0), LatLng::new(2.0, 3.0)),
    }
}

/// Ids of the live features, in z-order.
pub fn ids(manager: &DrawingManager<MockSurface>) -> Vec<FeatureId> {
    manager.features().iter().map(Feature::id).collect()
}
