//! Animation and viewer options with TOML preset support.
//!
//! Ball geometry/colors, traversal timing and viewer window settings are
//! consolidated here. Options serialize to/from TOML so a look can be saved
//! as a preset and loaded back by the viewer binary.

mod balls;
mod timing;
mod viewer;

use std::path::Path;

pub use balls::{
    BallConfig, DEFAULT_COLOR1, DEFAULT_COLOR2, DEFAULT_GAP, DEFAULT_LTR_SCALE,
    DEFAULT_MIX_COLOR, DEFAULT_RADIUS, DEFAULT_RTL_SCALE,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use timing::{
    TimingConfig, DEFAULT_DURATION_MS, DEFAULT_PAUSE_DURATION_MS,
    DEFAULT_SCALE_END_FRACTION, DEFAULT_SCALE_START_FRACTION,
};
pub use viewer::ViewerOptions;

use crate::error::DuoballError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[timing]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Ball radii, scales and colors.
    pub balls: BallConfig,
    /// Traversal duration, pause and scale ramps.
    pub timing: TimingConfig,
    /// Standalone viewer settings.
    pub viewer: ViewerOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults and
    /// invalid values are sanitized.
    pub fn load(path: &Path) -> Result<Self, DuoballError> {
        let content =
            std::fs::read_to_string(path).map_err(DuoballError::Io)?;
        let mut options: Self = toml::from_str(&content)
            .map_err(|e| DuoballError::OptionsParse(e.to_string()))?;
        options.sanitize();
        log::info!("Loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), DuoballError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DuoballError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(DuoballError::Io)?;
        }
        std::fs::write(path, content).map_err(DuoballError::Io)?;
        log::info!("Saved options to {}", path.display());
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Sanitize ball and timing values in place.
    pub fn sanitize(&mut self) {
        self.balls.sanitize();
        self.timing.sanitize();
    }

    /// Sanitized copy of the ball configuration.
    #[must_use]
    pub fn ball_config(&self) -> BallConfig {
        self.balls.clone().sanitized()
    }

    /// Sanitized copy of the timing configuration.
    #[must_use]
    pub fn timing_config(&self) -> TimingConfig {
        self.timing.clone().sanitized()
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Color;

    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r##"
[timing]
pause_duration_ms = 0

[balls]
mix_color = "#202020"
"##;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.timing.pause_duration_ms, 0);
        assert_eq!(opts.balls.mix_color, Color(0xFF20_2020));
        // Everything else should be default
        assert_eq!(opts.timing.duration_ms, DEFAULT_DURATION_MS);
        assert_eq!(opts.balls.radius1, DEFAULT_RADIUS);
        assert_eq!(opts.balls.color1, DEFAULT_COLOR1);
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let toml_str = r#"
[balls]
color1 = "red"
"#;
        assert!(toml::from_str::<Options>(toml_str).is_err());
    }

    #[test]
    fn accessors_sanitize() {
        let mut opts = Options::default();
        opts.balls.radius2 = 0.0;
        opts.timing.scale_end_fraction = 1.5;
        assert_eq!(opts.ball_config().radius2, DEFAULT_RADIUS);
        assert_eq!(
            opts.timing_config().scale_end_fraction,
            DEFAULT_SCALE_END_FRACTION
        );
        // The stored options stay untouched
        assert_eq!(opts.balls.radius2, 0.0);
    }

    #[test]
    fn save_then_load_sanitizes() {
        let dir = std::env::temp_dir()
            .join(format!("duoball-options-{}", std::process::id()));
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.balls.gap = -4.0;
        opts.viewer.title = "custom".to_owned();
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded.balls.gap, DEFAULT_GAP);
        assert_eq!(loaded.viewer.title, "custom");
        assert_eq!(Options::list_presets(&dir), vec!["preset".to_owned()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Options::load(Path::new("/definitely/not/here.toml"))
            .unwrap_err();
        assert!(matches!(err, DuoballError::Io(_)));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("balls"));
        assert!(props.contains_key("timing"));
        assert!(props.contains_key("viewer"));

        let balls = &props["balls"]["properties"];
        assert!(balls.get("radius1").is_some());
        assert!(balls.get("mix_color").is_some());

        // Window plumbing is not exposed
        let viewer = &props["viewer"]["properties"];
        assert!(viewer.get("background").is_some());
        assert!(viewer.get("title").is_none());
    }
}
