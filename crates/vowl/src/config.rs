//! Configuration types for the visualization engine.
//!
//! [`AppConfig`] is the deserializable counterpart of [`Options`]: the CLI
//! loads it from TOML and converts it into the per-instance options object.
//! Every field is optional; missing values fall back to engine defaults.

use serde::Deserialize;

use crate::options::Options;

/// Top-level application configuration combining force and view settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Force-simulation tuning section.
    #[serde(default)]
    force: ForceConfig,

    /// Viewport and zoom section.
    #[serde(default)]
    view: ViewConfig,
}

impl AppConfig {
    pub fn force(&self) -> &ForceConfig {
        &self.force
    }

    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    /// Builds an [`Options`] value, applying every configured override on
    /// top of the defaults.
    pub fn to_options(&self) -> Options {
        let mut options = Options::new();

        if let (Some(width), Some(height)) = (self.view.width, self.view.height) {
            options.set_size(width, height);
        }
        if let (Some(min), Some(max)) = (self.view.min_magnification, self.view.max_magnification)
        {
            options.set_magnification_bounds(min, max);
        }
        if let Some(charge) = self.force.charge {
            options.set_charge(charge);
        }
        if let Some(gravity) = self.force.gravity {
            options.set_gravity(gravity);
        }
        if let Some(strength) = self.force.link_strength {
            options.set_link_strength(strength);
        }
        if let Some(distance) = self.force.class_distance {
            options.set_class_distance(distance);
        }
        if let Some(distance) = self.force.datatype_distance {
            options.set_datatype_distance(distance);
        }
        if let Some(distance) = self.force.default_link_distance {
            options.set_default_link_distance(distance);
        }

        options
    }
}

/// Force-simulation tuning constants.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForceConfig {
    #[serde(default)]
    charge: Option<f32>,
    #[serde(default)]
    gravity: Option<f32>,
    #[serde(default)]
    link_strength: Option<f32>,
    #[serde(default)]
    class_distance: Option<f32>,
    #[serde(default)]
    datatype_distance: Option<f32>,
    #[serde(default)]
    default_link_distance: Option<f32>,
}

/// Viewport size and zoom bounds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    width: Option<f32>,
    #[serde(default)]
    height: Option<f32>,
    #[serde(default)]
    min_magnification: Option<f32>,
    #[serde(default)]
    max_magnification: Option<f32>,
}
