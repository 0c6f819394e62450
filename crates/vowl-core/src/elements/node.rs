use std::cell::RefCell;
use std::rc::Rc;

use super::{LanguageMap, LinkRef};
use crate::draw::{NodeDrawable, RectangularNode, RoundNode};
use crate::geometry::Point;

/// Shared handle to a node; identity is `Rc` pointer identity.
pub type NodeRef = Rc<RefCell<Node>>;

/// The kind of schema element a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Class,
    Thing,
    Datatype,
    Literal,
}

impl NodeKind {
    /// Datatype-kind nodes get shorter link distances and rectangular
    /// shapes.
    pub fn is_datatype(self) -> bool {
        matches!(self, Self::Datatype | Self::Literal)
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Thing => "thing",
            Self::Datatype => "datatype",
            Self::Literal => "literal",
        }
    }
}

/// A displayed schema node.
///
/// The position is simulation-owned and mutated every tick. `locked` is set
/// while a drag gesture holds the node; `frozen` is set while simulation
/// influence is globally disabled. Either flag suppresses simulation-driven
/// position writes, but never manual drag repositioning.
#[derive(Debug)]
pub struct Node {
    id: String,
    kind: NodeKind,
    labels: LanguageMap,
    position: Point,
    locked: bool,
    frozen: bool,
    links: Vec<LinkRef>,
    shape: Box<dyn NodeDrawable>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind, labels: LanguageMap) -> Self {
        let shape: Box<dyn NodeDrawable> = if kind.is_datatype() {
            Box::new(RectangularNode::new())
        } else {
            Box::new(RoundNode::new())
        };

        Self {
            id: id.into(),
            kind,
            labels,
            position: Point::default(),
            locked: false,
            frozen: false,
            links: Vec::new(),
            shape,
        }
    }

    pub fn shared(self) -> NodeRef {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_datatype(&self) -> bool {
        self.kind.is_datatype()
    }

    pub fn label_for(&self, language: &str) -> Option<&str> {
        self.labels.label_for(language)
    }

    /// Falls back to the node id when no label is present.
    pub fn display_label(&self, language: &str) -> &str {
        self.label_for(language).unwrap_or(&self.id)
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn frozen(&self) -> bool {
        self.frozen
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    /// Incident links, recomputed from the displayed link set after every
    /// filter pass.
    pub fn links(&self) -> &[LinkRef] {
        &self.links
    }

    pub fn set_links(&mut self, links: Vec<LinkRef>) {
        self.links = links;
    }

    pub fn shape(&self) -> &dyn NodeDrawable {
        self.shape.as_ref()
    }

    pub fn shape_mut(&mut self) -> &mut dyn NodeDrawable {
        self.shape.as_mut()
    }

    pub fn actual_radius(&self) -> f32 {
        self.shape.actual_radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_follows_kind() {
        let class = Node::new("A", NodeKind::Class, LanguageMap::from_default("A"));
        let datatype = Node::new("B", NodeKind::Datatype, LanguageMap::from_default("B"));

        // Round shapes are as tall as wide; rectangles are not.
        assert_eq!(class.shape().width(), class.shape().height());
        assert_ne!(datatype.shape().width(), datatype.shape().height());
    }

    #[test]
    fn test_display_label_falls_back_to_id() {
        let node = Node::new("ex:Thing", NodeKind::Thing, LanguageMap::new());
        assert_eq!(node.display_label("en"), "ex:Thing");
    }

    #[test]
    fn test_flags_default_clear() {
        let node = Node::new("A", NodeKind::Class, LanguageMap::new());
        assert!(!node.locked());
        assert!(!node.frozen());
    }
}
