/// KML rendering: a `<kml><Document>` envelope with one `<Placemark>`
/// per feature, assembled as text.
///
/// Coordinates are `lng,lat` tuples. Styles, when included, are inline
/// `<Style>` blocks with KML's `aabbggrr` colors; properties go into
/// `<ExtendedData>`.
use serde_json::Value;

use mapify_config::ToolStyles;
use mapify_core::{Feature, Geometry, LatLng, Layer};

use crate::{base_style, closed_ring, layer_name, selected, ExportOptions};

/// Escapes text content for XML.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn coordinate(p: LatLng) -> String {
    format!("{},{}", p.lng, p.lat)
}

fn coordinate_list(path: &[LatLng]) -> String {
    path.iter()
        .map(|p| coordinate(*p))
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_geometry(out: &mut String, geometry: &Geometry) {
    match geometry {
        Geometry::Point { position } | Geometry::Circle { center: position, .. } => {
            out.push_str(&format!(
                "      <Point><coordinates>{}</coordinates></Point>\n",
                coordinate(*position)
            ));
        }
        Geometry::Line { path } => {
            out.push_str(&format!(
                "      <LineString><coordinates>{}</coordinates></LineString>\n",
                coordinate_list(path)
            ));
        }
        Geometry::Polygon { path } => push_polygon(out, &closed_ring(path)),
        Geometry::Rectangle { bounds } => push_polygon(out, &closed_ring(&bounds.corners())),
    }
}

fn push_polygon(out: &mut String, ring: &[LatLng]) {
    out.push_str("      <Polygon><outerBoundaryIs><LinearRing><coordinates>");
    out.push_str(&coordinate_list(ring));
    out.push_str("</coordinates></LinearRing></outerBoundaryIs></Polygon>\n");
}

fn push_style(out: &mut String, feature: &Feature, styles: &ToolStyles) {
    let style = base_style(styles, feature.geometry_type());
    out.push_str("      <Style>\n");
    out.push_str(&format!(
        "        <LineStyle><color>{}</color><width>{}</width></LineStyle>\n",
        style.stroke_color.to_kml(style.stroke_opacity),
        style.stroke_weight
    ));
    if let Some(fill) = style.fill_color {
        out.push_str(&format!(
            "        <PolyStyle><color>{}</color></PolyStyle>\n",
            fill.to_kml(style.fill_opacity)
        ));
    }
    out.push_str("      </Style>\n");
}

fn data_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn push_extended_data(
    out: &mut String,
    feature: &Feature,
    layers: &[Layer],
    options: &ExportOptions,
) {
    let radius = match feature.geometry() {
        Geometry::Circle { radius_m, .. } => Some(*radius_m),
        _ => None,
    };

    let mut entries: Vec<(String, String)> = Vec::new();
    if options.include_properties {
        for (key, value) in feature.properties() {
            if key == "name" {
                continue; // already the placemark name
            }
            entries.push((key.clone(), data_value(value)));
        }
        if let Some(layer) = layer_name(layers, feature.layer()) {
            entries.push(("layer".to_string(), layer.to_string()));
        }
    }
    if let Some(radius_m) = radius {
        entries.push(("radius_m".to_string(), radius_m.to_string()));
    }
    if entries.is_empty() {
        return;
    }

    out.push_str("      <ExtendedData>\n");
    for (key, value) in entries {
        out.push_str(&format!(
            "        <Data name=\"{}\"><value>{}</value></Data>\n",
            escape(&key),
            escape(&value)
        ));
    }
    out.push_str("      </ExtendedData>\n");
}

/// Renders the KML document. An empty feature list yields a valid,
/// empty `<Document>`.
pub fn render(
    features: &[Feature],
    layers: &[Layer],
    styles: &ToolStyles,
    options: &ExportOptions,
) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<kml xmlns=\"http://www.opengis.net/kml/2.2\">\n");
    out.push_str("  <Document>\n");
    out.push_str("    <name>Mapify Export</name>\n");
    out.push_str("    <description>Exported features from Mapify</description>\n");

    for feature in selected(features, layers, options) {
        out.push_str("    <Placemark>\n");
        out.push_str(&format!(
            "      <name>{}</name>\n",
            escape(feature.name())
        ));
        if options.include_styles {
            push_style(&mut out, feature, styles);
        }
        push_extended_data(&mut out, feature, layers, options);
        push_geometry(&mut out, feature.geometry());
        out.push_str("    </Placemark>\n");
    }

    out.push_str("  </Document>\n");
    out.push_str("</kml>\n");
    out
}
