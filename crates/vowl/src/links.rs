//! Derives renderable links from the displayed property set.

use std::rc::Rc;

use indexmap::IndexMap;
use log::warn;

use vowl_core::elements::{Link, LinkRef, NodeRef, PropertyRef};

/// Builds one link per displayed property, merging inverse pairs.
///
/// A property already consumed as another property's inverse produces no
/// link of its own; the pair shares a single edge carrying both. Properties
/// whose domain or range is missing from `nodes` are dropped here, so a
/// filter module that returns an inconsistent subset cannot leave dangling
/// edges. Output order follows input order, keeping element identity stable
/// across redraws.
pub fn create_links(nodes: &[NodeRef], properties: &[PropertyRef]) -> Vec<LinkRef> {
    let displayed = |node: &NodeRef| nodes.iter().any(|n| Rc::ptr_eq(n, node));
    let mut consumed: Vec<PropertyRef> = Vec::new();
    let mut pending: Vec<(PropertyRef, Option<PropertyRef>, NodeRef, NodeRef)> = Vec::new();

    for property in properties {
        if consumed.iter().any(|c| Rc::ptr_eq(c, property)) {
            continue;
        }

        let (domain, range) = {
            let p = property.borrow();
            (p.domain().clone(), p.range().clone())
        };
        if !displayed(&domain) || !displayed(&range) {
            warn!(property = property.borrow().id(); "property endpoint not displayed, dropping");
            continue;
        }

        // An inverse only rides along when it is itself displayed.
        let inverse = property.borrow().inverse().filter(|inv| {
            !Rc::ptr_eq(inv, property) && properties.iter().any(|p| Rc::ptr_eq(p, inv))
        });
        if let Some(inverse) = &inverse {
            consumed.push(inverse.clone());
        }

        pending.push((property.clone(), inverse, domain, range));
    }

    // Fan out links sharing an endpoint pair: for n parallel links the
    // indices are 2i - (n-1), symmetric around zero.
    let mut groups: IndexMap<(usize, usize), Vec<usize>> = IndexMap::new();
    for (i, (_, _, domain, range)) in pending.iter().enumerate() {
        let mut key = (Rc::as_ptr(domain) as usize, Rc::as_ptr(range) as usize);
        if key.0 > key.1 {
            key = (key.1, key.0);
        }
        groups.entry(key).or_default().push(i);
    }

    let mut parallel_indices = vec![0i32; pending.len()];
    for members in groups.values() {
        let n = members.len() as i32;
        for (slot, &link_index) in members.iter().enumerate() {
            parallel_indices[link_index] = 2 * slot as i32 - (n - 1);
        }
    }

    pending
        .into_iter()
        .zip(parallel_indices)
        .map(|((property, inverse, domain, range), parallel_index)| {
            Link::new(property, inverse, domain, range, parallel_index).shared()
        })
        .collect()
}

/// Recomputes every node's incident-link list by a full scan of `links`.
///
/// Never patches incrementally; a fresh scan after every filter pass is the
/// only way the lists stay free of stale entries. Quadratic, which is fine
/// at schema-diagram sizes.
pub fn store_links_on_nodes(nodes: &[NodeRef], links: &[LinkRef]) {
    for node in nodes {
        let incident: Vec<LinkRef> = links
            .iter()
            .filter(|link| link.connects(node))
            .cloned()
            .collect();
        node.borrow_mut().set_links(incident);
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
    fn test_one_link_per_property() {
        let a = node("A");
        let b = node("B");
        let nodes = vec![a.clone(), b.clone()];
        let properties = vec![property("p", &a, &b)];

        let links = create_links(&nodes, &properties);

        assert_eq!(links.len(), 1);
        assert!(Rc::ptr_eq(links[0].domain(), &a));
        assert!(Rc::ptr_eq(links[0].range(), &b));
        assert!(!links[0].is_loop());
    }

    #[test]
    fn test_inverse_pair_merges_into_one_link() {
        let a = node("A");
        let b = node("B");
        let nodes = vec![a.clone(), b.clone()];
        let p = property("p", &a, &b);
        let q = property("q", &b, &a);
        p.borrow_mut().set_inverse(&q);
        q.borrow_mut().set_inverse(&p);

        let links = create_links(&nodes, &[p.clone(), q.clone()]);

        assert_eq!(links.len(), 1);
        assert!(Rc::ptr_eq(links[0].property(), &p));
        assert!(Rc::ptr_eq(links[0].inverse().unwrap(), &q));
    }

    #[test]
    fn test_filtered_inverse_does_not_merge() {
        let a = node("A");
        let b = node("B");
        let nodes = vec![a.clone(), b.clone()];
        let p = property("p", &a, &b);
        let q = property("q", &b, &a);
        p.borrow_mut().set_inverse(&q);

        // q filtered out of the displayed set
        let links = create_links(&nodes, &[p]);

        assert_eq!(links.len(), 1);
        assert!(links[0].inverse().is_none());
    }

    #[test]
    fn test_dangling_endpoint_dropped() {
        let a = node("A");
        let b = node("B");
        let properties = vec![property("p", &a, &b)];

        // b is not in the displayed node set
        let links = create_links(&[a], &properties);

        assert!(links.is_empty());
    }

    #[test]
    fn test_parallel_links_fan_apart() {
        let a = node("A");
        let b = node("B");
        let nodes = vec![a.clone(), b.clone()];
        let properties = vec![
            property("p", &a, &b),
            property("q", &a, &b),
            property("r", &b, &a),
        ];

        let links = create_links(&nodes, &properties);

        assert_eq!(links.len(), 3);
        let mut indices: Vec<i32> = links.iter().map(|l| l.parallel_index()).collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![-2, 0, 2]);
    }

    #[test]
    fn test_lone_link_is_straight() {
        let a = node("A");
        let b = node("B");
        let links = create_links(&[a.clone(), b.clone()], &[property("p", &a, &b)]);
        assert_eq!(links[0].parallel_index(), 0);
    }

    #[test]
    fn test_store_links_on_nodes_counts_loop_once() {
        let a = node("A");
        let nodes = vec![a.clone()];
        let links = create_links(&nodes, &[property("p", &a, &a)]);
        store_links_on_nodes(&nodes, &links);

        assert!(links[0].is_loop());
        assert_eq!(a.borrow().links().len(), 1);
    }

    #[test]
    fn test_store_links_on_nodes_is_idempotent() {
        let a = node("A");
        let b = node("B");
        let nodes = vec![a.clone(), b.clone()];
        let links = create_links(&nodes, &[property("p", &a, &b)]);

        store_links_on_nodes(&nodes, &links);
        let first: Vec<_> = a.borrow().links().to_vec();
        store_links_on_nodes(&nodes, &links);

        assert_eq!(a.borrow().links().len(), first.len());
        for (x, y) in a.borrow().links().iter().zip(&first) {
            assert!(Rc::ptr_eq(x, y));
        }
    }

    #[test]
    fn test_link_order_follows_property_order() {
        let a = node("A");
        let b = node("B");
        let c = node("C");
        let nodes = vec![a.clone(), b.clone(), c.clone()];
        let p1 = property("p1", &a, &b);
        let p2 = property("p2", &b, &c);
        let links = create_links(&nodes, &[p1.clone(), p2.clone()]);

        assert!(Rc::ptr_eq(links[0].property(), &p1));
        assert!(Rc::ptr_eq(links[1].property(), &p2));
    }
}
