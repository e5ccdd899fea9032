/// Visual styles for drawn shapes, per tool, with base and selected
/// variants.
use serde::{Deserialize, Serialize};

use crate::color::HexColor;

/// Stroke and fill attributes applied to a rendered overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub stroke_color: HexColor,
    pub stroke_weight: f32,
    /// 0.0–1.0.
    pub stroke_opacity: f32,
    /// `None` for open shapes (points use it for the marker body).
    pub fill_color: Option<HexColor>,
    /// 0.0–1.0; ignored when `fill_color` is `None`.
    pub fill_opacity: f32,
}

impl ShapeStyle {
    /// Stroke-only style (lines).
    pub fn stroke(color: HexColor, weight: f32, opacity: f32) -> Self {
        Self {
            stroke_color: color,
            stroke_weight: weight,
            stroke_opacity: opacity,
            fill_color: None,
            fill_opacity: 0.0,
        }
    }

    /// Adds a fill to a stroke style.
    pub fn with_fill(mut self, color: HexColor, opacity: f32) -> Self {
        self.fill_color = Some(color);
        self.fill_opacity = opacity;
        self
    }

    fn sanitize(&mut self) {
        self.stroke_weight = self.stroke_weight.clamp(0.5, 20.0);
        self.stroke_opacity = self.stroke_opacity.clamp(0.0, 1.0);
        self.fill_opacity = self.fill_opacity.clamp(0.0, 1.0);
    }
}

/// Base (deselected) and selected styles for one drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolStyle {
    pub base: ShapeStyle,
    pub selected: ShapeStyle,
}

impl ToolStyle {
    fn sanitize(&mut self) {
        self.base.sanitize();
        self.selected.sanitize();
    }
}

/// Style table for every drawing tool.
///
/// One named field per tool rather than a map keyed on the core crate's
/// geometry type, so this crate stays independent of `mapify-core`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolStyles {
    pub point: ToolStyle,
    pub line: ToolStyle,
    pub polygon: ToolStyle,
    pub circle: ToolStyle,
    pub rectangle: ToolStyle,
}

/// Filled shape pair: selection thickens the stroke and deepens the fill.
fn filled_tool(hex: &str) -> ToolStyle {
    let color = HexColor::from_hex(hex).unwrap_or(HexColor::rgb(0, 0, 0));
    ToolStyle {
        base: ShapeStyle::stroke(color, 2.0, 0.8).with_fill(color, 0.3),
        selected: ShapeStyle::stroke(color, 3.0, 1.0).with_fill(color, 0.5),
    }
}

impl Default for ToolStyles {
    fn default() -> Self {
        let marker_fill = HexColor::rgb(0x3B, 0x82, 0xF6);
        let marker_stroke = HexColor::rgb(0x25, 0x63, 0xEB);
        let marker = ShapeStyle::stroke(marker_stroke, 2.0, 1.0).with_fill(marker_fill, 1.0);
        let line_color = HexColor::rgb(0x10, 0xB9, 0x81);

        Self {
            // Point markers do not change appearance when selected.
            point: ToolStyle {
                base: marker,
                selected: marker,
            },
            line: ToolStyle {
                base: ShapeStyle::stroke(line_color, 3.0, 0.8),
                selected: ShapeStyle::stroke(line_color, 5.0, 1.0),
            },
            polygon: filled_tool("#6366F1"),
            circle: filled_tool("#F59E0B"),
            rectangle: filled_tool("#EF4444"),
        }
    }
}

impl ToolStyles {
    /// Clamps every style to valid ranges.
    pub fn sanitize(&mut self) {
        self.point.sanitize();
        self.line.sanitize();
        self.polygon.sanitize();
        self.circle.sanitize();
        self.rectangle.sanitize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let styles = ToolStyles::default();
        assert_eq!(styles.line.base.stroke_color.to_hex(), "#10B981");
        assert_eq!(styles.polygon.base.stroke_color.to_hex(), "#6366F1");
        assert_eq!(styles.circle.base.stroke_color.to_hex(), "#F59E0B");
        assert_eq!(styles.rectangle.base.stroke_color.to_hex(), "#EF4444");
        assert_eq!(
            styles.point.base.fill_color.unwrap().to_hex(),
            "#3B82F6"
        );
    }

    #[test]
    fn test_selection_heavier_than_base() {
        let styles = ToolStyles::default();
        for tool in [styles.line, styles.polygon, styles.circle, styles.rectangle] {
            assert!(tool.selected.stroke_weight > tool.base.stroke_weight);
            assert!(tool.selected.stroke_opacity >= tool.base.stroke_opacity);
        }
        assert!(styles.polygon.selected.fill_opacity > styles.polygon.base.fill_opacity);
    }

    #[test]
    fn test_point_selected_is_base() {
        let styles = ToolStyles::default();
        assert_eq!(styles.point.selected, styles.point.base);
    }

    #[test]
    fn test_line_has_no_fill() {
        let styles = ToolStyles::default();
        assert!(styles.line.base.fill_color.is_none());
        assert!(styles.line.selected.fill_color.is_none());
    }

    #[test]
    fn test_sanitize_clamps() {
        let mut styles = ToolStyles::default();
        styles.line.base.stroke_weight = 500.0;
        styles.line.base.stroke_opacity = 3.0;
        styles.polygon.selected.fill_opacity = -0.5;
        styles.sanitize();
        assert!((styles.line.base.stroke_weight - 20.0).abs() < f32::EPSILON);
        assert!((styles.line.base.stroke_opacity - 1.0).abs() < f32::EPSILON);
        assert!(styles.polygon.selected.fill_opacity.abs() < f32::EPSILON);
    }

    #[test]
    fn test_serde_round_trip() {
        let styles = ToolStyles::default();
        let json = serde_json::to_string_pretty(&styles).unwrap();
        let parsed: ToolStyles = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, styles);
    }
}
