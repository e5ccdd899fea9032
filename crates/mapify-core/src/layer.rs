/// Layer registry: named, orderable groups that features belong to.
use anyhow::{bail, Result};
use uuid::Uuid;

/// Unique, time-ordered layer id (UUIDv7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(Uuid);

impl LayerId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One layer. Visibility is a rendering attribute; hidden layers keep
/// their features and stay exportable.
#[derive(Debug, Clone)]
pub struct Layer {
    id: LayerId,
    name: String,
    visible: bool,
}

impl Layer {
    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visible(&self) -> bool {
        self.visible
    }
}

/// Ordered collection of layers plus the active one.
///
/// Never empty: it is created with a "Default Layer" and refuses to
/// remove the final remaining layer. New features land on the active
/// layer.
#[derive(Debug, Clone)]
pub struct LayerRegistry {
    layers: Vec<Layer>,
    active: LayerId,
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerRegistry {
    pub fn new() -> Self {
        let default_layer = Layer {
            id: LayerId::new(),
            name: "Default Layer".to_string(),
            visible: true,
        };
        let active = default_layer.id;
        Self {
            layers: vec![default_layer],
            active,
        }
    }

    /// Adds an auto-named layer ("Layer N") and makes it active.
    pub fn add(&mut self) -> LayerId {
        let layer = Layer {
            id: LayerId::new(),
            name: format!("Layer {}", self.layers.len() + 1),
            visible: true,
        };
        let id = layer.id;
        self.layers.push(layer);
        self.active = id;
        id
    }

    /// Removes a layer. Fails on an unknown id or when it is the last
    /// remaining layer. If the removed layer was active, the first
    /// remaining layer becomes active.
    pub fn remove(&mut self, id: LayerId) -> Result<Layer> {
        if self.layers.len() <= 1 {
            bail!("cannot remove the last remaining layer");
        }
        let Some(pos) = self.layers.iter().position(|l| l.id == id) else {
            bail!("unknown layer: {id}");
        };
        let removed = self.layers.remove(pos);
        if self.active == id {
            self.active = self.layers[0].id;
        }
        Ok(removed)
    }

    /// Renames a layer. Empty or whitespace-only names are rejected.
    pub fn rename(&mut self, id: LayerId, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            bail!("layer name must not be empty");
        }
        let Some(layer) = self.layers.iter_mut().find(|l| l.id == id) else {
            bail!("unknown layer: {id}");
        };
        layer.name = name.to_string();
        Ok(())
    }

    pub fn set_visible(&mut self, id: LayerId, visible: bool) -> Result<()> {
        let Some(layer) = self.layers.iter_mut().find(|l| l.id == id) else {
            bail!("unknown layer: {id}");
        };
        layer.visible = visible;
        Ok(())
    }

    pub fn set_active(&mut self, id: LayerId) -> Result<()> {
        if !self.layers.iter().any(|l| l.id == id) {
            bail!("unknown layer: {id}");
        }
        self.active = id;
        Ok(())
    }

    pub fn active(&self) -> LayerId {
        self.active
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
