use egui::{Pos2, pos2};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::viewport::ZoomLimits;

/// Environment variable naming a JSON file with an [`EditorConfig`].
pub const CONFIG_ENV_VAR: &str = "MAP_LAB_CONFIG";

/// Tunables for the map editor.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub zoom: ZoomLimits,
    /// Hit radius of an element at scale 1, in world units
    pub element_hit_radius: f32,
    /// How close the pointer must be to a path polyline, in screen pixels
    pub path_hit_tolerance: f32,
    /// Where the "add element" action places new elements, in world units
    pub default_drop_position: Pos2,
    pub grid_spacing: f32,
    pub grid_extent: f32,
    /// Maximum number of undo steps kept
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomLimits::default(),
            element_hit_radius: 24.0,
            path_hit_tolerance: 6.0,
            default_drop_position: pos2(400.0, 300.0),
            grid_spacing: 100.0,
            grid_extent: 5000.0,
            history_limit: 100,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the viewport and hit testing cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.zoom.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "zoom limits {:?} need 0 < min <= max and step > 1",
                self.zoom
            )));
        }
        let positive = [
            ("element_hit_radius", self.element_hit_radius),
            ("grid_spacing", self.grid_spacing),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        let non_negative = [
            ("path_hit_tolerance", self.path_hit_tolerance),
            ("grid_extent", self.grid_extent),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        let drop = self.default_drop_position;
        if !(drop.x.is_finite() && drop.y.is_finite()) {
            return Err(ConfigError::Invalid("default_drop_position must be finite".to_owned()));
        }
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Loads the file named by `MAP_LAB_CONFIG`, or the defaults when unset or unreadable.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded editor config from {}", path);
                config
            }
            Err(err) => {
                log::warn!("Ignoring editor config {}: {}", path, err);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = EditorConfig::from_json_str(r#"{ "element_hit_radius": 30.0 }"#).unwrap();
        assert_eq!(config.element_hit_radius, 30.0);
        assert_eq!(config.zoom, ZoomLimits::default());
        assert_eq!(config.default_drop_position, pos2(400.0, 300.0));
    }

    #[test]
    fn nested_zoom_limits_parse() {
        let config =
            EditorConfig::from_json_str(r#"{ "zoom": { "min": 0.5, "max": 2.0 } }"#).unwrap();
        assert_eq!(config.zoom.min, 0.5);
        assert_eq!(config.zoom.max, 2.0);
        assert_eq!(config.zoom.step, ZoomLimits::default().step);
    }

    #[test]
    fn inverted_or_degenerate_zoom_limits_are_rejected() {
        for json in [
            r#"{ "zoom": { "min": 2.0, "max": 1.0 } }"#,
            r#"{ "zoom": { "min": 0.0 } }"#,
            r#"{ "zoom": { "step": 1.0 } }"#,
            r#"{ "grid_spacing": 0.0 }"#,
            r#"{ "path_hit_tolerance": -1.0 }"#,
        ] {
            assert!(
                matches!(EditorConfig::from_json_str(json), Err(ConfigError::Invalid(_))),
                "{json} was accepted"
            );
        }
    }

    #[test]
    fn config_file_with_bad_limits_is_rejected() {
        let path = std::env::temp_dir().join(format!("map_lab_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "zoom": { "min": 2.0, "max": 1.0 } }"#).unwrap();

        assert!(matches!(EditorConfig::load(&path), Err(ConfigError::Invalid(_))));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(matches!(
            EditorConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
