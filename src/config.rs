//! Per-scene configuration.
//!
//! Every tunable the scene consults lives here and travels with the scene instance; there is
//! no process-wide default. A partial JSON object overrides only the keys it names.

use crate::error::ConfigError;
use crate::geometry::path::PathStyle;
use crate::model::Rect;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Radius given to new nodes and to nodes loaded without one.
    pub node_radius: u32,
    pub min_radius: u32,
    pub max_radius: u32,
    pub radius_step: u32,
    /// Scene area used while no background image is set.
    pub bounds: Rect,
    pub arrow_size: f32,
    pub loop_angle_deg: f32,
    pub loop_height_factor: f32,
    pub loop_label_gap: f32,
    pub reciprocal_offset: f32,
    pub edge_hit_tolerance: f32,
    pub default_weight: String,
    pub weights_visible: bool,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            node_radius: 40,
            min_radius: 10,
            max_radius: 200,
            radius_step: 5,
            bounds: Rect::new(-7500.0, -7500.0, 15000.0, 15000.0),
            arrow_size: 20.0,
            loop_angle_deg: 35.0,
            loop_height_factor: 1.6,
            loop_label_gap: 15.0,
            reciprocal_offset: 30.0,
            edge_hit_tolerance: 6.0,
            default_weight: "1".to_string(),
            weights_visible: true,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: SceneConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_radius == 0 {
            return Err(ConfigError::Invalid("min_radius must be positive".into()));
        }
        if self.min_radius > self.max_radius {
            return Err(ConfigError::Invalid(format!(
                "min_radius {} exceeds max_radius {}",
                self.min_radius, self.max_radius
            )));
        }
        if !(self.bounds.width > 0.0 && self.bounds.height > 0.0) {
            return Err(ConfigError::Invalid("bounds must have a positive size".into()));
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(ConfigError::Invalid(format!(
                "zoom range [{}, {}] is empty",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }

    pub fn clamp_radius(&self, radius: u32) -> u32 {
        radius.min(self.max_radius).max(self.min_radius)
    }

    pub fn path_style(&self) -> PathStyle {
        PathStyle {
            arrow_size: self.arrow_size,
            loop_angle_deg: self.loop_angle_deg,
            loop_height_factor: self.loop_height_factor,
            loop_label_gap: self.loop_label_gap,
            reciprocal_offset: self.reciprocal_offset,
        }
    }
}
