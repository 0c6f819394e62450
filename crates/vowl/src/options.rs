//! Per-instance configuration for a running visualization.
//!
//! Every [`Graph`](crate::Graph) owns one [`Options`] value. Force constants
//! and zoom bounds are read on every tick and every redraw; the module
//! chains are consumed in order during updates and click dispatch.

use crate::filter::FilterModule;
use crate::select::SelectionModule;

const DEFAULT_WIDTH: f32 = 800.0;
const DEFAULT_HEIGHT: f32 = 600.0;
const DEFAULT_MIN_MAGNIFICATION: f32 = 0.1;
const DEFAULT_MAX_MAGNIFICATION: f32 = 4.0;
const DEFAULT_CHARGE: f32 = -500.0;
const DEFAULT_GRAVITY: f32 = 0.025;
const DEFAULT_LINK_STRENGTH: f32 = 1.0;
const DEFAULT_CLASS_DISTANCE: f32 = 200.0;
const DEFAULT_DATATYPE_DISTANCE: f32 = 120.0;
const DEFAULT_LINK_DISTANCE: f32 = 200.0;

/// Configuration for one visualization instance.
pub struct Options {
    width: f32,
    height: f32,
    min_magnification: f32,
    max_magnification: f32,
    charge: f32,
    gravity: f32,
    link_strength: f32,
    class_distance: f32,
    datatype_distance: f32,
    default_link_distance: f32,
    filter_modules: Vec<Box<dyn FilterModule>>,
    selection_modules: Vec<Box<dyn SelectionModule>>,
    data: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            min_magnification: DEFAULT_MIN_MAGNIFICATION,
            max_magnification: DEFAULT_MAX_MAGNIFICATION,
            charge: DEFAULT_CHARGE,
            gravity: DEFAULT_GRAVITY,
            link_strength: DEFAULT_LINK_STRENGTH,
            class_distance: DEFAULT_CLASS_DISTANCE,
            datatype_distance: DEFAULT_DATATYPE_DISTANCE,
            default_link_distance: DEFAULT_LINK_DISTANCE,
            filter_modules: Vec::new(),
            selection_modules: Vec::new(),
            data: None,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_size(&mut self, width: f32, height: f32) -> &mut Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn min_magnification(&self) -> f32 {
        self.min_magnification
    }

    pub fn max_magnification(&self) -> f32 {
        self.max_magnification
    }

    pub fn set_magnification_bounds(&mut self, min: f32, max: f32) -> &mut Self {
        self.min_magnification = min;
        self.max_magnification = max;
        self
    }

    pub fn charge(&self) -> f32 {
        self.charge
    }

    pub fn set_charge(&mut self, charge: f32) -> &mut Self {
        self.charge = charge;
        self
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: f32) -> &mut Self {
        self.gravity = gravity;
        self
    }

    pub fn link_strength(&self) -> f32 {
        self.link_strength
    }

    pub fn set_link_strength(&mut self, strength: f32) -> &mut Self {
        self.link_strength = strength;
        self
    }

    /// Base edge separation for links between class-kind nodes.
    pub fn class_distance(&self) -> f32 {
        self.class_distance
    }

    pub fn set_class_distance(&mut self, distance: f32) -> &mut Self {
        self.class_distance = distance;
        self
    }

    /// Base edge separation for links touching a datatype-kind node.
    pub fn datatype_distance(&self) -> f32 {
        self.datatype_distance
    }

    pub fn set_datatype_distance(&mut self, distance: f32) -> &mut Self {
        self.datatype_distance = distance;
        self
    }

    /// Reference distance a link with the default separation renders
    /// straight at; shorter per-kind distances bend the curve.
    pub fn default_link_distance(&self) -> f32 {
        self.default_link_distance
    }

    pub fn set_default_link_distance(&mut self, distance: f32) -> &mut Self {
        self.default_link_distance = distance;
        self
    }

    pub fn filter_modules(&self) -> &[Box<dyn FilterModule>] {
        &self.filter_modules
    }

    pub fn filter_modules_mut(&mut self) -> &mut [Box<dyn FilterModule>] {
        &mut self.filter_modules
    }

    pub fn add_filter_module(&mut self, module: Box<dyn FilterModule>) -> &mut Self {
        self.filter_modules.push(module);
        self
    }

    pub fn selection_modules_mut(&mut self) -> &mut [Box<dyn SelectionModule>] {
        &mut self.selection_modules
    }

    pub fn add_selection_module(&mut self, module: Box<dyn SelectionModule>) -> &mut Self {
        self.selection_modules.push(module);
        self
    }

    /// The raw JSON payload the controller parses on start and reload.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn set_data(&mut self, data: impl Into<String>) -> &mut Self {
        self.data = Some(data.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::new();
        assert_eq!(options.width(), 800.0);
        assert_eq!(options.height(), 600.0);
        assert_eq!(options.charge(), -500.0);
        assert!(options.data().is_none());
        assert!(options.filter_modules().is_empty());
    }

    #[test]
    fn test_setters_chain() {
        let mut options = Options::new();
        options
            .set_size(1024.0, 768.0)
            .set_charge(-300.0)
            .set_data("{}");

        assert_eq!(options.width(), 1024.0);
        assert_eq!(options.charge(), -300.0);
        assert_eq!(options.data(), Some("{}"));
    }
}
