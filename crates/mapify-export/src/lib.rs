//! GeoJSON and KML export for drawn features.
//!
//! The UI shell feeds `DrawingManager::features()` and `layers()` in
//! here together with the export dialog's options; the result is a text
//! blob ready to offer as a download.
pub mod file;
pub mod geojson;
pub mod kml;

use mapify_config::{ShapeStyle, ToolStyles};
use mapify_core::{Feature, GeometryType, LatLng, Layer, LayerId};

pub use file::{export_file_name, write_export};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    GeoJson,
    Kml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::GeoJson => "geojson",
            Self::Kml => "kml",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::GeoJson => "application/geo+json",
            Self::Kml => "application/vnd.google-earth.kml+xml",
        }
    }
}

/// Options from the export dialog.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Layer names to include; `None` exports every layer.
    pub layers: Option<Vec<String>>,
    pub include_styles: bool,
    pub include_properties: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            layers: None,
            include_styles: true,
            include_properties: true,
        }
    }
}

/// Renders the features in the chosen format.
pub fn export(
    format: ExportFormat,
    features: &[Feature],
    layers: &[Layer],
    styles: &ToolStyles,
    options: &ExportOptions,
) -> anyhow::Result<String> {
    match format {
        ExportFormat::GeoJson => geojson::render(features, layers, styles, options),
        ExportFormat::Kml => Ok(kml::render(features, layers, styles, options)),
    }
}

pub(crate) fn layer_name(layers: &[Layer], id: LayerId) -> Option<&str> {
    layers.iter().find(|l| l.id() == id).map(Layer::name)
}

/// Applies the layer-name filter. A feature whose layer is not in the
/// registry only survives when no filter is set.
pub(crate) fn selected<'a>(
    features: &'a [Feature],
    layers: &[Layer],
    options: &ExportOptions,
) -> Vec<&'a Feature> {
    features
        .iter()
        .filter(|f| match &options.layers {
            None => true,
            Some(names) => layer_name(layers, f.layer())
                .map_or(false, |name| names.iter().any(|n| n == name)),
        })
        .collect()
}

pub(crate) fn base_style(styles: &ToolStyles, geometry_type: GeometryType) -> ShapeStyle {
    match geometry_type {
        GeometryType::Point => styles.point.base,
        GeometryType::Line => styles.line.base,
        GeometryType::Polygon => styles.polygon.base,
        GeometryType::Circle => styles.circle.base,
        GeometryType::Rectangle => styles.rectangle.base,
    }
}

/// Closes an open ring by repeating the first vertex.
pub(crate) fn closed_ring(path: &[LatLng]) -> Vec<LatLng> {
    let mut ring = path.to_vec();
    if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
        if last != first {
            ring.push(first);
        }
    }
    ring
}
