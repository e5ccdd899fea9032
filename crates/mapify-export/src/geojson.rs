/// GeoJSON rendering: one `FeatureCollection` per export.
///
/// Geometry mapping: point and circle become `Point` (circles keep a
/// `radius_m` property), lines become `LineString`, polygons and
/// rectangles become `Polygon` with a single closed outer ring.
/// Styles, when included, use simplestyle-spec property keys.
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};

use mapify_config::ToolStyles;
use mapify_core::{Feature, Geometry, LatLng, Layer};

use crate::{base_style, closed_ring, layer_name, selected, ExportOptions};

#[derive(Serialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    features: Vec<GeoFeature>,
}

#[derive(Serialize)]
struct GeoFeature {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: Map<String, Value>,
    geometry: GeoGeometry,
}

#[derive(Serialize)]
struct GeoGeometry {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: Value,
}

fn position(p: LatLng) -> Value {
    json!([p.lng, p.lat])
}

fn ring(path: &[LatLng]) -> Value {
    Value::Array(path.iter().copied().map(position).collect())
}

fn geometry_of(geometry: &Geometry) -> GeoGeometry {
    match geometry {
        Geometry::Point { position: p } => GeoGeometry {
            kind: "Point",
            coordinates: position(*p),
        },
        Geometry::Circle { center, .. } => GeoGeometry {
            kind: "Point",
            coordinates: position(*center),
        },
        Geometry::Line { path } => GeoGeometry {
            kind: "LineString",
            coordinates: ring(path),
        },
        Geometry::Polygon { path } => GeoGeometry {
            kind: "Polygon",
            coordinates: Value::Array(vec![ring(&closed_ring(path))]),
        },
        Geometry::Rectangle { bounds } => GeoGeometry {
            kind: "Polygon",
            coordinates: Value::Array(vec![ring(&closed_ring(&bounds.corners()))]),
        },
    }
}

fn properties_of(
    feature: &Feature,
    layers: &[Layer],
    styles: &ToolStyles,
    options: &ExportOptions,
) -> Map<String, Value> {
    let mut props = if options.include_properties {
        let mut props = feature.properties().clone();
        if let Some(name) = layer_name(layers, feature.layer()) {
            props.insert("layer".into(), Value::String(name.to_string()));
        }
        props
    } else {
        Map::new()
    };

    // Part of the geometry contract, not an optional property
    if let Geometry::Circle { radius_m, .. } = feature.geometry() {
        props.insert("radius_m".into(), json!(radius_m));
    }

    if options.include_styles {
        let style = base_style(styles, feature.geometry_type());
        props.insert("stroke".into(), Value::String(style.stroke_color.to_hex()));
        props.insert("stroke-width".into(), json!(style.stroke_weight));
        props.insert("stroke-opacity".into(), json!(style.stroke_opacity));
        if let Some(fill) = style.fill_color {
            props.insert("fill".into(), Value::String(fill.to_hex()));
            props.insert("fill-opacity".into(), json!(style.fill_opacity));
        }
    }
    props
}

/// Renders a pretty-printed `FeatureCollection`. An empty feature list
/// yields a valid, empty collection.
pub fn render(
    features: &[Feature],
    layers: &[Layer],
    styles: &ToolStyles,
    options: &ExportOptions,
) -> Result<String> {
    let collection = FeatureCollection {
        kind: "FeatureCollection",
        features: selected(features, layers, options)
            .into_iter()
            .map(|feature| GeoFeature {
                kind: "Feature",
                properties: properties_of(feature, layers, styles, options),
                geometry: geometry_of(feature.geometry()),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&collection).context("serializing GeoJSON")
}
