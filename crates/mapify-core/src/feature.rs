/// A user-drawn feature: geometry plus overlay handle plus properties.
use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::geometry::{Geometry, GeometryType};
use crate::layer::LayerId;
use crate::surface::OverlayHandle;

/// Unique, time-ordered feature id (UUIDv7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureId(Uuid);

impl FeatureId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for FeatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One drawn shape with its rendered overlay and property map.
///
/// The id and geometry type are fixed at creation. The overlay handle is
/// owned exclusively by this feature: whoever removes the feature from
/// the live set must detach the overlay first.
#[derive(Debug, Clone)]
pub struct Feature {
    id: FeatureId,
    layer: LayerId,
    geometry_type: GeometryType,
    geometry: Geometry,
    overlay: OverlayHandle,
    properties: Map<String, Value>,
}

impl Feature {
    /// Builds a feature with `name` and `createdAt` (RFC 3339 UTC)
    /// properties, the way a completed draw operation produces one.
    pub fn new(
        layer: LayerId,
        geometry: Geometry,
        overlay: OverlayHandle,
        name: impl Into<String>,
    ) -> Self {
        let mut properties = Map::new();
        properties.insert("name".into(), Value::String(name.into()));
        properties.insert(
            "createdAt".into(),
            Value::String(Utc::now().to_rfc3339()),
        );
        Self {
            id: FeatureId::new(),
            layer,
            geometry_type: geometry.geometry_type(),
            geometry,
            overlay,
            properties,
        }
    }

    pub fn id(&self) -> FeatureId {
        self.id
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn overlay(&self) -> OverlayHandle {
        self.overlay
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    pub fn name(&self) -> &str {
        self.properties
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.properties
            .insert("name".into(), Value::String(name.to_string()));
    }

    /// Replaces the geometry after an in-place edit. The new geometry
    /// must keep the feature's type; a mismatch is rejected.
    pub(crate) fn set_geometry(&mut self, geometry: Geometry) -> bool {
        if geometry.geometry_type() != self.geometry_type {
            return false;
        }
        self.geometry = geometry;
        true
    }

    pub(crate) fn set_overlay(&mut self, overlay: OverlayHandle) {
        self.overlay = overlay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::LatLng;
    use crate::layer::LayerRegistry;

    fn sample(layer: LayerId) -> Feature {
        Feature::new(
            layer,
            Geometry::Point {
                position: LatLng::new(1.0, 2.0),
            },
            OverlayHandle::new(7),
            "Point 1",
        )
    }

    #[test]
    fn test_ids_are_unique_and_time_ordered() {
        let a = FeatureId::new();
        let b = FeatureId::new();
        assert_ne!(a, b);
        assert!(a < b);
    }

    #[test]
    fn test_new_feature_has_name_and_created_at() {
        let layers = LayerRegistry::new();
        let f = sample(layers.active());
        assert_eq!(f.name(), "Point 1");
        let created = f.properties().get("createdAt").unwrap().as_str().unwrap();
        assert!(created.contains('T'), "not a timestamp: {created}");
        assert_eq!(f.geometry_type(), GeometryType::Point);
    }

    #[test]
    fn test_set_geometry_rejects_type_change() {
        let layers = LayerRegistry::new();
        let mut f = sample(layers.active());
        let changed = f.set_geometry(Geometry::Circle {
            center: LatLng::new(0.0, 0.0),
            radius_m: 10.0,
        });
        assert!(!changed);
        assert_eq!(f.geometry_type(), GeometryType::Point);

        let moved = f.set_geometry(Geometry::Point {
            position: LatLng::new(9.0, 9.0),
        });
        assert!(moved);
        assert_eq!(
            f.geometry(),
            &Geometry::Point {
                position: LatLng::new(9.0, 9.0)
            }
        );
    }

    #[test]
    fn test_set_name_overwrites_property() {
        let layers = LayerRegistry::new();
        let mut f = sample(layers.active());
        f.set_name("Harbor");
        assert_eq!(f.name(), "Harbor");
        // createdAt untouched
        assert!(f.properties().contains_key("createdAt"));
    }
}
