//! The pluggable filter pipeline.
//!
//! Modules run in configured order, each consuming the previous module's
//! output. Before each module runs, links and incident-link lists are
//! recomputed from the module's own input set, so a module sees full
//! connectivity for the nodes it is about to judge rather than an already
//! pruned graph. The final link pass over the surviving subgraph happens in
//! the controller, not here.

use std::rc::Rc;

use log::debug;

use vowl_core::elements::{NodeRef, PropertyRef};

use crate::links::{create_links, store_links_on_nodes};

/// A pluggable stage narrowing the displayed node and property sets.
///
/// `filter` computes and stores the module's output; the readback methods
/// return it until the next `filter` call. Modules never mutate the
/// elements themselves, only select among them.
pub trait FilterModule {
    fn filter(&mut self, nodes: &[NodeRef], properties: &[PropertyRef]);
    fn filtered_nodes(&self) -> &[NodeRef];
    fn filtered_properties(&self) -> &[PropertyRef];
}

/// Runs the module chain and returns the fully filtered sets.
///
/// With zero modules configured the input sets pass through unchanged.
pub fn run_pipeline(
    modules: &mut [Box<dyn FilterModule>],
    nodes: Vec<NodeRef>,
    properties: Vec<PropertyRef>,
) -> (Vec<NodeRef>, Vec<PropertyRef>) {
    let mut nodes = nodes;
    let mut properties = properties;

    for module in modules {
        let links = create_links(&nodes, &properties);
        store_links_on_nodes(&nodes, &links);

        module.filter(&nodes, &properties);
        nodes = module.filtered_nodes().to_vec();
        properties = module.filtered_properties().to_vec();
        debug!(nodes = nodes.len(), properties = properties.len();
            "filter module applied");
    }

    (nodes, properties)
}

/// Removes nodes with fewer than a minimum number of incident links.
///
/// Reads the incident-link lists the pipeline recomputed from its input
/// set, so degree reflects the unfiltered connectivity of that stage.
#[derive(Debug, Default)]
pub struct DegreeFilter {
    min_degree: usize,
    nodes: Vec<NodeRef>,
    properties: Vec<PropertyRef>,
}

impl DegreeFilter {
    pub fn new(min_degree: usize) -> Self {
        Self {
            min_degree,
            nodes: Vec::new(),
            properties: Vec::new(),
        }
    }
}

impl FilterModule for DegreeFilter {
    fn filter(&mut self, nodes: &[NodeRef], properties: &[PropertyRef]) {
        self.nodes = nodes
            .iter()
            .filter(|node| node.borrow().links().len() >= self.min_degree)
            .cloned()
            .collect();

        let survives = |node: &NodeRef| self.nodes.iter().any(|n| Rc::ptr_eq(n, node));
        self.properties = properties
            .iter()
            .filter(|property| {
                let p = property.borrow();
                survives(p.domain()) && survives(p.range())
            })
            .cloned()
            .collect();
    }

    fn filtered_nodes(&self) -> &[NodeRef] {
        &self.nodes
    }

    fn filtered_properties(&self) -> &[PropertyRef] {
        &self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vowl_core::elements::{LanguageMap, Node, NodeKind, Property, PropertyKind};

    fn node(id: &str) -> NodeRef {
        Node::new(id, NodeKind::Class, LanguageMap::from_default(id)).shared()
    }

    fn property(id: &str, domain: &NodeRef, range: &NodeRef) -> PropertyRef {
        Property::new(
            id,
            PropertyKind::Object,
            LanguageMap::new(),
            domain.clone(),
            range.clone(),
        )
        .shared()
    }

    #[test]
    fn test_empty_chain_passes_through() {
        let a = node("A");
        let b = node("B");
        let p = property("p", &a, &b);

        let (nodes, properties) =
            run_pipeline(&mut [], vec![a.clone(), b.clone()], vec![p.clone()]);

        assert_eq!(nodes.len(), 2);
        assert_eq!(properties.len(), 1);
        assert!(Rc::ptr_eq(&nodes[0], &a));
        assert!(Rc::ptr_eq(&properties[0], &p));
    }

    #[test]
    fn test_degree_filter_drops_isolated_nodes() {
        let a = node("A");
        let b = node("B");
        let isolated = node("C");
        let p = property("p", &a, &b);

        let mut modules: Vec<Box<dyn FilterModule>> = vec![Box::new(DegreeFilter::new(1))];
        let (nodes, properties) = run_pipeline(
            &mut modules,
            vec![a.clone(), b.clone(), isolated.clone()],
            vec![p],
        );

        assert_eq!(nodes.len(), 2);
        assert!(!nodes.iter().any(|n| Rc::ptr_eq(n, &isolated)));
        assert_eq!(properties.len(), 1);
    }

    #[test]
    fn test_degree_filter_drops_properties_of_dropped_nodes() {
        let hub = node("hub");
        let a = node("A");
        let leaf = node("leaf");
        let p1 = property("p1", &hub, &a);
        let p2 = property("p2", &hub, &a);
        let p3 = property("p3", &hub, &leaf);

        let mut modules: Vec<Box<dyn FilterModule>> = vec![Box::new(DegreeFilter::new(2))];
        let (nodes, properties) = run_pipeline(
            &mut modules,
            vec![hub.clone(), a.clone(), leaf.clone()],
            vec![p1, p2, p3],
        );

        // leaf has degree 1 and goes; its property goes with it
        assert_eq!(nodes.len(), 2);
        assert_eq!(properties.len(), 2);
    }

    #[test]
    fn test_degree_uses_stage_input_connectivity() {
        // A chain A - B - C: B has degree 2 in the unfiltered graph.
        let a = node("A");
        let b = node("B");
        let c = node("C");
        let p1 = property("p1", &a, &b);
        let p2 = property("p2", &b, &c);

        let mut modules: Vec<Box<dyn FilterModule>> = vec![Box::new(DegreeFilter::new(2))];
        let (nodes, _) = run_pipeline(
            &mut modules,
            vec![a.clone(), b.clone(), c.clone()],
            vec![p1, p2],
        );

        assert_eq!(nodes.len(), 1);
        assert!(Rc::ptr_eq(&nodes[0], &b));
    }
}
