/// Configuration for the map editor: drawing styles, viewport defaults,
/// and the JSON config file lifecycle (load, save, sanitize).
pub mod color;
pub mod config;
pub mod style;

pub use color::HexColor;
pub use config::{AppConfig, MapDefaults};
pub use style::{ShapeStyle, ToolStyle, ToolStyles};
