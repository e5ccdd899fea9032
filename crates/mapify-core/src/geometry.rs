/// Geographic primitives for drawn features.
use serde::{Deserialize, Serialize};

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Corners in ring order: SW, SE, NE, NW.
    pub fn corners(&self) -> [LatLng; 4] {
        let sw = self.south_west;
        let ne = self.north_east;
        [
            sw,
            LatLng::new(sw.lat, ne.lng),
            ne,
            LatLng::new(ne.lat, sw.lng),
        ]
    }
}

/// The five drawable geometry types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    Line,
    Polygon,
    Circle,
    Rectangle,
}

impl GeometryType {
    /// Display name used for default feature naming ("Polygon 3").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::Line => "Line",
            Self::Polygon => "Polygon",
            Self::Circle => "Circle",
            Self::Rectangle => "Rectangle",
        }
    }
}

impl std::fmt::Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Shape data for one drawn feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point {
        position: LatLng,
    },
    /// Open polyline, at least two vertices once complete.
    Line {
        path: Vec<LatLng>,
    },
    /// Outer ring without the closing vertex; closed at export time.
    Polygon {
        path: Vec<LatLng>,
    },
    Circle {
        center: LatLng,
        radius_m: f64,
    },
    Rectangle {
        bounds: LatLngBounds,
    },
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Self::Point { .. } => GeometryType::Point,
            Self::Line { .. } => GeometryType::Line,
            Self::Polygon { .. } => GeometryType::Polygon,
            Self::Circle { .. } => GeometryType::Circle,
            Self::Rectangle { .. } => GeometryType::Rectangle,
        }
    }
}
