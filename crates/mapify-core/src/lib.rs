//! Headless map-editing engine.
//!
//! Owns the set of user-drawn features, the current drawing mode and
//! selection, a layer registry, and a linear undo/redo history of the
//! feature set. The map widget itself stays behind the [`MapSurface`]
//! trait: the engine asks it to attach/detach overlays and apply styles,
//! and consumes its typed [`RendererEvent`]s (draw completed, geometry
//! edited, overlay clicked) strictly in arrival order.
pub mod feature;
pub mod geometry;
pub mod layer;
pub mod manager;
pub mod measure;
pub mod surface;

pub use feature::{Feature, FeatureId};
pub use geometry::{Geometry, GeometryType, LatLng, LatLngBounds};
pub use layer::{Layer, LayerId, LayerRegistry};
pub use manager::DrawingManager;
pub use surface::{MapSurface, OverlayHandle, RendererEvent};
