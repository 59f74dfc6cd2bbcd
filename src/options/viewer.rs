use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Standalone viewer window settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Viewer", inline)]
#[serde(default)]
pub struct ViewerOptions {
    /// Window title.
    #[schemars(skip)]
    pub title: String,
    /// Clear color behind the balls.
    #[schemars(title = "Background", with = "String")]
    pub background: Color,
    /// Pixels per dp. `None` follows the window's scale factor.
    #[schemars(title = "Density", range(min = 0.5, max = 16.0), extend("step" = 0.5))]
    pub density: Option<f32>,
    /// Initial inner window width in logical pixels.
    #[schemars(skip)]
    pub window_width: u32,
    /// Initial inner window height in logical pixels.
    #[schemars(skip)]
    pub window_height: u32,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            title: "duoball".to_owned(),
            background: Color::WHITE,
            density: None,
            window_width: 320,
            window_height: 240,
        }
    }
}
