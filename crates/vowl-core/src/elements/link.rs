use std::cell::Cell;
use std::rc::Rc;

use super::{NodeRef, PropertyRef};
use crate::geometry::Point;

/// Shared handle to a renderable link.
pub type LinkRef = Rc<Link>;

/// One renderable edge between two nodes.
///
/// A link carries exactly one property, or a property together with its
/// inverse when both are displayed; the pair shares the single edge. Links
/// are rebuilt from the displayed property set after every filter pass, so
/// they hold no mutable state beyond the layout-owned curve point.
#[derive(Debug)]
pub struct Link {
    property: PropertyRef,
    inverse: Option<PropertyRef>,
    domain: NodeRef,
    range: NodeRef,
    parallel_index: i32,
    curve_point: Cell<Point>,
}

impl Link {
    pub fn new(
        property: PropertyRef,
        inverse: Option<PropertyRef>,
        domain: NodeRef,
        range: NodeRef,
        parallel_index: i32,
    ) -> Self {
        Self {
            property,
            inverse,
            domain,
            range,
            parallel_index,
            curve_point: Cell::new(Point::default()),
        }
    }

    pub fn shared(self) -> LinkRef {
        Rc::new(self)
    }

    pub fn property(&self) -> &PropertyRef {
        &self.property
    }

    pub fn inverse(&self) -> Option<&PropertyRef> {
        self.inverse.as_ref()
    }

    pub fn domain(&self) -> &NodeRef {
        &self.domain
    }

    pub fn range(&self) -> &NodeRef {
        &self.range
    }

    /// Zero for a lone edge; ±1, ±2, ... for edges sharing a node pair,
    /// fanning them apart.
    pub fn parallel_index(&self) -> i32 {
        self.parallel_index
    }

    /// The bend point the layout maintains between the endpoints.
    pub fn curve_point(&self) -> Point {
        self.curve_point.get()
    }

    pub fn set_curve_point(&self, point: Point) {
        self.curve_point.set(point);
    }

    pub fn is_loop(&self) -> bool {
        Rc::ptr_eq(&self.domain, &self.range)
    }

    /// Whether the link touches the given node at either end.
    pub fn connects(&self, node: &NodeRef) -> bool {
        Rc::ptr_eq(&self.domain, node) || Rc::ptr_eq(&self.range, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{LanguageMap, Node, NodeKind, Property, PropertyKind};

    fn node(id: &str) -> NodeRef {
        Node::new(id, NodeKind::Class, LanguageMap::from_default(id)).shared()
    }

    fn link_between(domain: &NodeRef, range: &NodeRef) -> Link {
        let property = Property::new(
            "p",
            PropertyKind::Object,
            LanguageMap::new(),
            domain.clone(),
            range.clone(),
        )
        .shared();
        Link::new(property, None, domain.clone(), range.clone(), 0)
    }

    #[test]
    fn test_loop_detection() {
        let a = node("A");
        let b = node("B");

        assert!(link_between(&a, &a).is_loop());
        assert!(!link_between(&a, &b).is_loop());
    }

    #[test]
    fn test_connects_uses_identity() {
        let a = node("A");
        let b = node("B");
        let c = node("C");
        let link = link_between(&a, &b);

        assert!(link.connects(&a));
        assert!(link.connects(&b));
        assert!(!link.connects(&c));
    }

    #[test]
    fn test_curve_point_interior_mutability() {
        let a = node("A");
        let b = node("B");
        let link = link_between(&a, &b).shared();

        link.set_curve_point(Point::new(3.0, 4.0));
        assert_eq!(link.curve_point(), Point::new(3.0, 4.0));
    }
}
