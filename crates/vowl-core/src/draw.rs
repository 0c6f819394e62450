//! Scene-graph primitives and draw contracts.
//!
//! The engine core never draws a concrete shape itself. Nodes carry a
//! [`NodeDrawable`] and properties carry a [`PropertyDrawable`]; the render
//! pipeline hands them scene [`Group`]s to fill and applies positions to
//! those groups on every simulation tick.

mod label;
mod layer;
mod rectangular;
mod round;

pub use label::PropertyView;
pub use layer::{Group, Layer, MarkerDefs, Primitive, RenderLayer};
pub use rectangular::RectangularNode;
pub use round::RoundNode;

use std::fmt;

use crate::geometry::Size;

/// Draw contract for node shapes.
///
/// Implementations own their rendered size and focus/hover state; the
/// engine only reads the size accessors and forwards gestures.
pub trait NodeDrawable: fmt::Debug {
    /// Attach the node's visual representation to `group`.
    ///
    /// `extra_classes` are appended after the shape's own classes.
    fn draw_node(&mut self, group: &mut Group, label: &str, extra_classes: &[&str]);

    fn width(&self) -> f32;

    fn height(&self) -> f32;

    /// Radius used by link-distance and border-intersection calculations.
    fn actual_radius(&self) -> f32;

    /// Grow the shape so `label` fits.
    ///
    /// Called before drawing and again after a language switch, since
    /// labels of varying length change the rendered size.
    fn fit_label(&mut self, label: &str);

    fn toggle_focus(&mut self);

    fn is_focused(&self) -> bool;

    fn set_hover_highlighting(&mut self, enable: bool);
}

/// Draw contract for properties: label, cardinality annotations, and the
/// edge path itself.
pub trait PropertyDrawable: fmt::Debug {
    /// Draw the property label into `group`.
    ///
    /// Returns `false` when there is no visible label; the caller then
    /// removes the group from the scene instead of leaving it empty.
    fn draw_property(&mut self, group: &mut Group, label: Option<&str>) -> bool;

    /// Draw one cardinality annotation into `group`.
    ///
    /// Same removal rule as [`PropertyDrawable::draw_property`].
    fn draw_cardinality(&mut self, group: &mut Group, text: Option<&str>) -> bool;

    /// Draw the edge path into `group`, registering any arrow marker in
    /// `markers`. The path data is rewritten on every tick.
    fn draw_link(&mut self, group: &mut Group, markers: &mut MarkerDefs);

    /// Rendered size of the label box, for hit testing.
    fn label_size(&self) -> Size;
}
