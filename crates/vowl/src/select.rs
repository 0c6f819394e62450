//! Click-selection dispatch.

use log::debug;

use vowl_core::elements::{NodeRef, PropertyRef};

/// The element a click gesture resolved to.
#[derive(Debug, Clone)]
pub enum SelectedElement {
    Node(NodeRef),
    Property(PropertyRef),
}

/// A pluggable handler invoked for every click on a node or property label.
pub trait SelectionModule {
    fn handle(&mut self, selected: &SelectedElement);
}

/// Toggles focus highlighting on the clicked node.
#[derive(Debug, Default)]
pub struct FocusHandler;

impl FocusHandler {
    pub fn new() -> Self {
        Self
    }
}

impl SelectionModule for FocusHandler {
    fn handle(&mut self, selected: &SelectedElement) {
        match selected {
            SelectedElement::Node(node) => {
                let mut node = node.borrow_mut();
                node.shape_mut().toggle_focus();
                debug!(node = node.id(), focused = node.shape().is_focused();
                    "focus toggled");
            }
            SelectedElement::Property(property) => {
                debug!(property = property.borrow().id(); "property selected");
            }
        }
    }
}
