//! Drawing state, selection, layers, and undo/redo over drawn features.
//!
//! `DrawingManager` is the single owner of the feature list. The map
//! widget reports user interaction through [`RendererEvent`]s; the UI
//! shell calls the public operations directly. Every mutation of the
//! feature set (create, edit, rename, delete) pushes a full snapshot
//! onto the history stack, so undo/redo restore exact prior states.

use anyhow::{bail, Result};

use mapify_config::{AppConfig, ToolStyle, ToolStyles};
use mapify_history::{HistoryConfig, Snapshots};

use crate::feature::{Feature, FeatureId};
use crate::geometry::{Geometry, GeometryType};
use crate::layer::{Layer, LayerId, LayerRegistry};
use crate::surface::{MapSurface, OverlayHandle, RendererEvent};

fn tool_style(styles: &ToolStyles, geometry_type: GeometryType) -> &ToolStyle {
    match geometry_type {
        GeometryType::Point => &styles.point,
        GeometryType::Line => &styles.line,
        GeometryType::Polygon => &styles.polygon,
        GeometryType::Circle => &styles.circle,
        GeometryType::Rectangle => &styles.rectangle,
    }
}

/// Owns drawn features, drawing mode, selection, layers, and history.
///
/// Single-threaded and synchronous: every operation completes before
/// returning, in the order events arrive. Operations whose precondition
/// does not hold (undo at the oldest snapshot, delete without a
/// selection) are no-ops rather than errors.
pub struct DrawingManager<S: MapSurface> {
    surface: S,
    styles: ToolStyles,
    mode: Option<GeometryType>,
    /// Insertion order = z-order.
    features: Vec<Feature>,
    /// Weak reference: an id, re-validated against `features` on access.
    selected: Option<FeatureId>,
    layers: LayerRegistry,
    history: Snapshots<Vec<Feature>>,
}

impl<S: MapSurface> std::fmt::Debug for DrawingManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingManager")
            .field("mode", &self.mode)
            .field("features", &self.features.len())
            .field("selected", &self.selected)
            .field("layers", &self.layers.len())
            .field("can_undo", &self.history.can_undo())
            .field("can_redo", &self.history.can_redo())
            .finish_non_exhaustive()
    }
}

impl<S: MapSurface> DrawingManager<S> {
    /// Creates a manager with default styles and history depth.
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, &AppConfig::default())
    }

    pub fn with_config(surface: S, config: &AppConfig) -> Self {
        Self {
            surface,
            styles: config.styles,
            mode: None,
            features: Vec::new(),
            selected: None,
            layers: LayerRegistry::new(),
            history: Snapshots::new(
                Vec::new(),
                &HistoryConfig::with_max_depth(config.history_depth),
            ),
        }
    }

    // ── Drawing mode ───────────────────────────────────────────────

    /// Arms (or disarms) interactive drawing on the surface.
    ///
    /// Entering a drawing mode clears the selection: drawing and an
    /// active selection are mutually exclusive.
    pub fn set_drawing_mode(&mut self, mode: Option<GeometryType>) {
        self.mode = mode;
        self.surface.arm_drawing(mode);
        if mode.is_some() {
            self.clear_selection();
        }
        tracing::debug!(?mode, "drawing mode set");
    }

    pub fn drawing_mode(&self) -> Option<GeometryType> {
        self.mode
    }

    // ── Renderer events ────────────────────────────────────────────

    /// Consumes one event from the map widget, synchronously.
    pub fn handle_event(&mut self, event: RendererEvent) {
        match event {
            RendererEvent::DrawCompleted { overlay, geometry } => {
                self.on_draw_completed(overlay, geometry);
            }
            RendererEvent::GeometryEdited { overlay, geometry } => {
                self.on_geometry_edited(overlay, geometry);
            }
            RendererEvent::OverlayClicked { overlay } => {
                self.on_overlay_clicked(overlay);
            }
        }
    }

    fn on_draw_completed(&mut self, overlay: OverlayHandle, geometry: Geometry) {
        let geometry_type = geometry.geometry_type();
        let name = format!("{} {}", geometry_type, self.features.len() + 1);
        let layer = self.layers.active();
        let feature = Feature::new(layer, geometry, overlay, name);
        let id = feature.id();

        // The widget rendered the overlay already; honor layer visibility.
        let visible = self.layers.get(layer).map_or(true, Layer::visible);
        if !visible {
            self.surface.set_visible(overlay, false);
        }

        self.features.push(feature);
        self.push_snapshot();
        self.set_drawing_mode(None);
        self.select_feature(id);
        tracing::debug!(%id, %geometry_type, count = self.features.len(), "feature drawn");
    }

    fn on_geometry_edited(&mut self, overlay: OverlayHandle, geometry: Geometry) {
        let Some(feature) = self.features.iter_mut().find(|f| f.overlay() == overlay) else {
            tracing::warn!(%overlay, "edit event for unknown overlay; ignored");
            return;
        };
        let id = feature.id();
        if !feature.set_geometry(geometry) {
            tracing::warn!(%overlay, "edit event would change geometry type; ignored");
            return;
        }
        self.push_snapshot();
        tracing::debug!(%id, "geometry edited");
    }

    fn on_overlay_clicked(&mut self, overlay: OverlayHandle) {
        let Some(id) = self
            .features
            .iter()
            .find(|f| f.overlay() == overlay)
            .map(Feature::id)
        else {
            tracing::warn!(%overlay, "click event for unknown overlay; ignored");
            return;
        };
        self.select_feature(id);
    }

    // ── Selection ──────────────────────────────────────────────────

    /// Selects a feature: deselects the current one, applies the
    /// selected style, and enables interactive editing for every type
    /// except point markers. Re-selecting the same feature re-applies
    /// the style (harmless).
    pub fn select_feature(&mut self, id: FeatureId) {
        if self.feature(id).is_none() {
            tracing::warn!(%id, "select ignored: unknown feature");
            return;
        }
        self.deselect_current();

        let Some(feature) = self.features.iter().find(|f| f.id() == id) else {
            return;
        };
        let geometry_type = feature.geometry_type();
        let overlay = feature.overlay();
        let style = tool_style(&self.styles, geometry_type).selected;
        self.surface.apply_style(overlay, &style);
        if geometry_type != GeometryType::Point {
            self.surface.set_editable(overlay, true);
        }
        self.selected = Some(id);
    }

    /// Deselects without selecting anything else. Safe when nothing is
    /// selected.
    pub fn clear_selection(&mut self) {
        self.deselect_current();
    }

    fn deselect_current(&mut self) {
        let Some(id) = self.selected.take() else {
            return;
        };
        // The referenced feature may already be gone (weak reference).
        let Some(feature) = self.features.iter().find(|f| f.id() == id) else {
            return;
        };
        let geometry_type = feature.geometry_type();
        let overlay = feature.overlay();
        let style = tool_style(&self.styles, geometry_type).base;
        self.surface.apply_style(overlay, &style);
        if geometry_type != GeometryType::Point {
            self.surface.set_editable(overlay, false);
        }
    }

    /// The selected feature, if it still exists.
    pub fn selected_feature(&self) -> Option<&Feature> {
        self.selected.and_then(|id| self.feature(id))
    }

    // ── Mutations ──────────────────────────────────────────────────

    /// Deletes the selected feature: detaches its overlay, removes it,
    /// snapshots. No-op without a selection.
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected else {
            tracing::debug!("delete ignored: nothing selected");
            return;
        };
        let Some(pos) = self.features.iter().position(|f| f.id() == id) else {
            self.selected = None;
            tracing::warn!(%id, "selection referenced a missing feature");
            return;
        };
        let feature = self.features.remove(pos);
        self.surface.detach(feature.overlay());
        self.selected = None;
        self.push_snapshot();
        tracing::debug!(%id, count = self.features.len(), "feature deleted");
    }

    /// Renames a feature and snapshots. Empty names are rejected.
    pub fn rename_feature(&mut self, id: FeatureId, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            bail!("feature name must not be empty");
        }
        let Some(feature) = self.features.iter_mut().find(|f| f.id() == id) else {
            bail!("unknown feature: {id}");
        };
        feature.set_name(name);
        self.push_snapshot();
        Ok(())
    }

    // ── History ────────────────────────────────────────────────────

    /// Snapshots the current feature list as the new present entry.
    ///
    /// Clones the list (copy-then-swap), so a snapshot taken while
    /// reacting to an event never aliases the live list.
    fn push_snapshot(&mut self) {
        self.history.push(self.features.clone());
    }

    /// Steps back one snapshot. No-op at the oldest entry.
    pub fn undo(&mut self) {
        let Some(snapshot) = self.history.undo() else {
            tracing::debug!("undo ignored: at oldest snapshot");
            return;
        };
        let target = snapshot.clone();
        self.restore(target);
        tracing::debug!(count = self.features.len(), "undo applied");
    }

    /// Steps forward one snapshot. No-op at the newest entry.
    pub fn redo(&mut self) {
        let Some(snapshot) = self.history.redo() else {
            tracing::debug!("redo ignored: at newest snapshot");
            return;
        };
        let target = snapshot.clone();
        self.restore(target);
        tracing::debug!(count = self.features.len(), "redo applied");
    }

    /// Swaps the live set for a snapshot: detaches every live overlay,
    /// re-attaches every snapshot feature with a fresh handle. Selection
    /// is cleared unconditionally.
    fn restore(&mut self, snapshot: Vec<Feature>) {
        self.selected = None;
        for feature in &self.features {
            self.surface.detach(feature.overlay());
        }
        self.features = snapshot;
        for feature in &mut self.features {
            let style = tool_style(&self.styles, feature.geometry_type()).base;
            let overlay = self.surface.attach(feature.geometry(), &style);
            feature.set_overlay(overlay);
            let visible = self
                .layers
                .get(feature.layer())
                .map_or(true, Layer::visible);
            if !visible {
                self.surface.set_visible(overlay, false);
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ── Layers ─────────────────────────────────────────────────────

    /// Adds an auto-named layer and makes it active.
    pub fn add_layer(&mut self) -> LayerId {
        let id = self.layers.add();
        tracing::debug!(%id, count = self.layers.len(), "layer added");
        id
    }

    /// Removes a layer along with its features (one snapshot). Refuses
    /// to remove the last remaining layer.
    pub fn remove_layer(&mut self, id: LayerId) -> Result<()> {
        let removed = self.layers.remove(id)?;

        let doomed: Vec<OverlayHandle> = self
            .features
            .iter()
            .filter(|f| f.layer() == id)
            .map(Feature::overlay)
            .collect();
        if !doomed.is_empty() {
            if let Some(selected) = self.selected {
                let on_layer = self
                    .feature(selected)
                    .map(|f| f.layer() == id)
                    .unwrap_or(false);
                if on_layer {
                    self.selected = None;
                }
            }
            for overlay in &doomed {
                self.surface.detach(*overlay);
            }
            self.features.retain(|f| f.layer() != id);
            self.push_snapshot();
        }
        tracing::debug!(layer = removed.name(), features = doomed.len(), "layer removed");
        Ok(())
    }

    pub fn rename_layer(&mut self, id: LayerId, name: &str) -> Result<()> {
        self.layers.rename(id, name)
    }

    /// Toggles a layer and forwards visibility to each of its overlays.
    pub fn set_layer_visible(&mut self, id: LayerId, visible: bool) -> Result<()> {
        self.layers.set_visible(id, visible)?;
        for feature in self.features.iter().filter(|f| f.layer() == id) {
            self.surface.set_visible(feature.overlay(), visible);
        }
        Ok(())
    }

    /// New features are created on the active layer.
    pub fn set_active_layer(&mut self, id: LayerId) -> Result<()> {
        self.layers.set_active(id)
    }

    pub fn active_layer(&self) -> LayerId {
        self.layers.active()
    }

    pub fn layers(&self) -> &[Layer] {
        self.layers.layers()
    }

    // ── Queries ────────────────────────────────────────────────────

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.features.iter().find(|f| f.id() == id)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for the shell that wires surface and manager
    /// together (and for test doubles).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // ── Teardown ───────────────────────────────────────────────────

    /// Disarms drawing, detaches every live overlay, drops all engine
    /// state, and hands the widget back to the shell. Taking `self` by
    /// value makes a second call impossible.
    pub fn dispose(mut self) -> S {
        self.surface.arm_drawing(None);
        for feature in &self.features {
            self.surface.detach(feature.overlay());
        }
        tracing::debug!(features = self.features.len(), "drawing manager disposed");
        self.surface
    }
}
