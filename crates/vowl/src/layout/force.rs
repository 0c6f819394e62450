//! Force-directed layout simulation.
//!
//! A cooling discrete-step simulation with four forces: pairwise charge
//! repulsion, spring attraction along links towards a per-link target
//! distance, centering gravity, and the link-strength stiffness factor.
//! Each [`Simulation::advance`] call is one tick; the render pipeline
//! observes ticks and refreshes on-screen positions, keeping physics and
//! rendering decoupled.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use log::debug;
use rand::RngExt;

use vowl_core::elements::{LinkRef, Node, NodeRef};
use vowl_core::geometry::Point;

use crate::options::Options;

/// Heat injected by `start`.
const ALPHA_START: f32 = 0.1;

/// Below this the simulation is at rest and stops ticking.
const ALPHA_MIN: f32 = 0.005;

/// Per-tick cooling factor.
const ALPHA_DECAY: f32 = 0.99;

/// Minimum heat after `resume`, enough to relax the graph around a change.
const ALPHA_RESUME: f32 = 0.05;

/// Grid spacing for initial node placement.
const SEED_SPACING: f32 = 100.0;

/// Jitter applied to initial placement so coincident nodes repel cleanly.
const SEED_JITTER: f32 = 10.0;

/// The force-directed simulation owned by one graph controller.
pub struct Simulation {
    charge: f32,
    gravity: f32,
    link_strength: f32,
    class_distance: f32,
    datatype_distance: f32,
    center: Point,
    alpha: f32,
    running: bool,
}

impl Simulation {
    pub fn new(options: &Options) -> Self {
        let mut simulation = Self {
            charge: 0.0,
            gravity: 0.0,
            link_strength: 0.0,
            class_distance: 0.0,
            datatype_distance: 0.0,
            center: Point::default(),
            alpha: 0.0,
            running: false,
        };
        simulation.configure(options);
        simulation
    }

    /// Applies the current force constants and viewport size. Safe to call
    /// mid-run; the next tick uses the new values.
    pub fn configure(&mut self, options: &Options) {
        self.charge = options.charge();
        self.gravity = options.gravity();
        self.link_strength = options.link_strength();
        self.class_distance = options.class_distance();
        self.datatype_distance = options.datatype_distance();
        self.center = Point::new(options.width() / 2.0, options.height() / 2.0);
    }

    /// Places nodes that have no position yet on a jittered grid around the
    /// viewport center. Nodes that survived an update keep their positions.
    pub fn seed_positions(&self, nodes: &[NodeRef]) {
        let unplaced: Vec<&NodeRef> = nodes
            .iter()
            .filter(|node| node.borrow().position().is_zero())
            .collect();
        if unplaced.is_empty() {
            return;
        }

        let columns = (unplaced.len() as f32).sqrt().ceil() as usize;
        let mut rng = rand::rng();
        for (i, node) in unplaced.iter().enumerate() {
            let column = (i % columns) as f32 - columns as f32 / 2.0;
            let row = (i / columns) as f32 - columns as f32 / 2.0;
            let position = Point::new(
                self.center.x() + column * SEED_SPACING + rng.random_range(-SEED_JITTER..SEED_JITTER),
                self.center.y() + row * SEED_SPACING + rng.random_range(-SEED_JITTER..SEED_JITTER),
            );
            node.borrow_mut().set_position(position);
        }
        debug!(placed = unplaced.len(); "seeded initial positions");
    }

    /// Reheats and begins ticking.
    pub fn start(&mut self) {
        self.alpha = ALPHA_START;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Continues ticking with at least enough heat to relax the graph.
    pub fn resume(&mut self) {
        self.alpha = self.alpha.max(ALPHA_RESUME);
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Spring target distance for one link: the per-kind base distance plus
    /// both endpoints' visible radii, so rendered borders end up separated
    /// by the base distance.
    pub fn link_distance(&self, link: &LinkRef) -> f32 {
        let domain = link.domain().borrow();
        let range = link.range().borrow();
        let base = if domain.is_datatype() || range.is_datatype() {
            self.datatype_distance
        } else {
            self.class_distance
        };
        base + domain.actual_radius() + range.actual_radius()
    }

    /// Runs one tick, writing new positions for every node that is neither
    /// locked nor frozen. Returns `false` once the simulation has cooled to
    /// rest or was stopped.
    pub fn advance(&mut self, nodes: &[NodeRef], links: &[LinkRef]) -> bool {
        if !self.running {
            return false;
        }
        if self.alpha < ALPHA_MIN {
            self.running = false;
            return false;
        }

        let index_of: IndexMap<*const RefCell<Node>, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (Rc::as_ptr(node), i))
            .collect();
        let positions: Vec<Point> = nodes.iter().map(|node| node.borrow().position()).collect();
        let mut displacements = vec![Point::default(); nodes.len()];

        // Pairwise charge repulsion.
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let delta = positions[i].sub_point(positions[j]);
                let distance = delta.hypot().max(1.0);
                let push = delta.scale(-self.charge * self.alpha / (distance * distance));
                displacements[i] = displacements[i].add_point(push);
                displacements[j] = displacements[j].sub_point(push);
            }
        }

        // Link springs; loops exert no spring force.
        for link in links {
            if link.is_loop() {
                continue;
            }
            let (Some(&d), Some(&r)) = (
                index_of.get(&Rc::as_ptr(link.domain())),
                index_of.get(&Rc::as_ptr(link.range())),
            ) else {
                continue;
            };

            let delta = positions[r].sub_point(positions[d]);
            let distance = delta.hypot().max(1.0);
            let stretch = (distance - self.link_distance(link)) / distance;
            let shift = delta.scale(stretch * 0.5 * self.link_strength * self.alpha);
            displacements[d] = displacements[d].add_point(shift);
            displacements[r] = displacements[r].sub_point(shift);
        }

        // Centering gravity.
        for (i, position) in positions.iter().enumerate() {
            let pull = self.center.sub_point(*position).scale(self.gravity * self.alpha);
            displacements[i] = displacements[i].add_point(pull);
        }

        for (node, displacement) in nodes.iter().zip(displacements) {
            let mut node = node.borrow_mut();
            if node.locked() || node.frozen() {
                continue;
            }
            let position = node.position().add_point(displacement);
            node.set_position(position);
        }

        self.alpha *= ALPHA_DECAY;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vowl_core::elements::{LanguageMap, Node, NodeKind, Property, PropertyKind};

    use crate::links::create_links;

    fn node_at(id: &str, kind: NodeKind, x: f32, y: f32) -> NodeRef {
        let node = Node::new(id, kind, LanguageMap::from_default(id)).shared();
        node.borrow_mut().set_position(Point::new(x, y));
        node
    }

    fn linked(a: &NodeRef, b: &NodeRef) -> Vec<LinkRef> {
        let property = Property::new(
            "p",
            PropertyKind::Object,
            LanguageMap::new(),
            a.clone(),
            b.clone(),
        )
        .shared();
        create_links(&[a.clone(), b.clone()], &[property])
    }

    #[test]
    fn test_advance_moves_free_nodes() {
        let a = node_at("A", NodeKind::Class, 100.0, 100.0);
        let b = node_at("B", NodeKind::Class, 110.0, 100.0);
        let nodes = vec![a.clone(), b.clone()];
        let links = linked(&a, &b);

        let mut simulation = Simulation::new(&Options::new());
        simulation.start();
        assert!(simulation.advance(&nodes, &links));

        // Nodes 10 apart with a target distance of 300 must move.
        assert_ne!(a.borrow().position(), Point::new(100.0, 100.0));
        assert_ne!(b.borrow().position(), Point::new(110.0, 100.0));
    }

    #[test]
    fn test_frozen_nodes_never_move() {
        let a = node_at("A", NodeKind::Class, 100.0, 100.0);
        let b = node_at("B", NodeKind::Class, 110.0, 100.0);
        let nodes = vec![a.clone(), b.clone()];
        let links = linked(&a, &b);
        for node in &nodes {
            node.borrow_mut().set_frozen(true);
        }

        let mut simulation = Simulation::new(&Options::new());
        simulation.start();
        for _ in 0..50 {
            simulation.advance(&nodes, &links);
        }

        assert_eq!(a.borrow().position(), Point::new(100.0, 100.0));
        assert_eq!(b.borrow().position(), Point::new(110.0, 100.0));
    }

    #[test]
    fn test_locked_node_pins_while_rest_relaxes() {
        let a = node_at("A", NodeKind::Class, 100.0, 100.0);
        let b = node_at("B", NodeKind::Class, 110.0, 100.0);
        a.borrow_mut().set_locked(true);
        let nodes = vec![a.clone(), b.clone()];
        let links = linked(&a, &b);

        let mut simulation = Simulation::new(&Options::new());
        simulation.start();
        simulation.advance(&nodes, &links);

        assert_eq!(a.borrow().position(), Point::new(100.0, 100.0));
        assert_ne!(b.borrow().position(), Point::new(110.0, 100.0));
    }

    #[test]
    fn test_simulation_cools_to_rest() {
        let a = node_at("A", NodeKind::Class, 100.0, 100.0);
        let nodes = vec![a];

        let mut simulation = Simulation::new(&Options::new());
        simulation.start();
        let mut ticks = 0;
        while simulation.advance(&nodes, &[]) {
            ticks += 1;
            assert!(ticks < 10_000, "simulation never cooled");
        }
        assert!(!simulation.is_running());
    }

    #[test]
    fn test_resume_reheats() {
        let mut simulation = Simulation::new(&Options::new());
        simulation.start();
        simulation.stop();
        assert!(!simulation.is_running());

        simulation.resume();
        assert!(simulation.is_running());
    }

    #[test]
    fn test_link_distance_adds_radii() {
        let options = Options::new();
        let a = node_at("A", NodeKind::Class, 0.0, 0.0);
        let b = node_at("B", NodeKind::Class, 0.0, 0.0);
        let links = linked(&a, &b);

        let simulation = Simulation::new(&options);
        let expected = options.class_distance()
            + a.borrow().actual_radius()
            + b.borrow().actual_radius();
        assert_eq!(simulation.link_distance(&links[0]), expected);
    }

    #[test]
    fn test_link_distance_shorter_for_datatypes() {
        let options = Options::new();
        let a = node_at("A", NodeKind::Class, 0.0, 0.0);
        let d = node_at("d", NodeKind::Datatype, 0.0, 0.0);
        let links = linked(&a, &d);

        let simulation = Simulation::new(&options);
        let class_pair = node_at("B", NodeKind::Class, 0.0, 0.0);
        let class_links = linked(&a, &class_pair);
        assert!(simulation.link_distance(&links[0]) < simulation.link_distance(&class_links[0]));
    }

    #[test]
    fn test_seed_positions_skips_placed_nodes() {
        let placed = node_at("A", NodeKind::Class, 42.0, 42.0);
        let fresh = Node::new("B", NodeKind::Class, LanguageMap::new()).shared();
        let nodes = vec![placed.clone(), fresh.clone()];

        let simulation = Simulation::new(&Options::new());
        simulation.seed_positions(&nodes);

        assert_eq!(placed.borrow().position(), Point::new(42.0, 42.0));
        assert!(!fresh.borrow().position().is_zero());
    }
}
