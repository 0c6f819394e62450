//! Force-directed schema visualization engine.
//!
//! The engine renders a parsed schema (classes, properties, cardinalities)
//! as a node-link diagram: a force simulation lays the nodes out, links are
//! drawn as curves touching node borders, and a pluggable filter pipeline
//! derives the displayed subgraph from the raw parsed data. [`Graph`] is
//! the public entry point and sequences the components through the
//! start/update/reload lifecycle.
//!
//! ```no_run
//! use vowl::{Graph, Options};
//!
//! let mut options = Options::new();
//! options.set_data(std::fs::read_to_string("schema.json").unwrap());
//!
//! let mut graph = Graph::new(options);
//! graph.start();
//! graph.run_to_rest();
//! let document = graph.to_svg();
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod layout;
pub mod links;
pub mod options;
pub mod render;
pub mod select;

pub use config::AppConfig;
pub use error::VowlError;
pub use options::Options;
pub use vowl_core::{draw, elements, geometry};

use indexmap::IndexMap;
use log::{info, warn};
use svg::Document;

use vowl_core::elements::{
    DEFAULT_LANGUAGE, LinkRef, Node, NodeRef, Property, PropertyRef,
};
use vowl_core::geometry::Point;

use crate::layout::Simulation;
use crate::render::Scene;
use crate::select::SelectedElement;

/// The graph controller: one visualization instance.
///
/// Owns exactly one simulation, one scene graph and one filter-chain
/// execution; all are torn down together when the controller drops. The
/// lifecycle is uninitialized until [`start`](Graph::start), then running;
/// update calls before `start` are ignored.
pub struct Graph {
    options: Options,
    language: String,
    unfiltered_nodes: Vec<NodeRef>,
    unfiltered_properties: Vec<PropertyRef>,
    nodes: Vec<NodeRef>,
    properties: Vec<PropertyRef>,
    links: Vec<LinkRef>,
    simulation: Simulation,
    scene: Scene,
    started: bool,
}

impl Graph {
    pub fn new(options: Options) -> Self {
        let simulation = Simulation::new(&options);
        let scene = Scene::new(&options);
        Self {
            options,
            language: DEFAULT_LANGUAGE.to_string(),
            unfiltered_nodes: Vec::new(),
            unfiltered_properties: Vec::new(),
            nodes: Vec::new(),
            properties: Vec::new(),
            links: Vec::new(),
            simulation,
            scene,
            started: false,
        }
    }

    /// Stops any prior simulation, parses the data payload and runs a full
    /// update. The only way into the running state.
    pub fn start(&mut self) {
        self.simulation.stop();
        self.load();
        self.started = true;
        self.update();
        info!(nodes = self.nodes.len(), links = self.links.len(); "graph started");
    }

    /// Reapplies filters and style and rebuilds the scene, without tearing
    /// the controller down.
    pub fn update(&mut self) {
        if !self.started {
            warn!("update before start is ignored");
            return;
        }

        self.refresh_graph_data();
        self.update_style();
        self.scene.build(&self.nodes, &self.links, &self.language);
        self.simulation.seed_positions(&self.nodes);
        self.simulation.start();
        self.scene.refresh_positions();
    }

    /// Re-parses the data payload, then updates.
    pub fn reload(&mut self) {
        self.load();
        self.update();
    }

    /// Reapplies presentation options (zoom bounds, force constants)
    /// without touching displayed data or rebuilding the scene.
    pub fn update_style(&mut self) {
        self.simulation.configure(&self.options);
        self.scene.configure(&self.options);
    }

    /// Switches the active label language. A no-op returning `false` when
    /// the requested language is already active; otherwise rebuilds the
    /// rendered content and recomputes positions, since labels of differing
    /// length change every shape's size and with it every link's geometry.
    pub fn set_language(&mut self, language: &str) -> bool {
        if language == self.language {
            return false;
        }

        self.language = language.to_string();
        self.scene.build(&self.nodes, &self.links, &self.language);
        self.scene.refresh_positions();
        self.simulation.resume();
        true
    }

    /// Suppresses simulation-driven movement for every node. Manual drag
    /// repositioning keeps working while frozen.
    pub fn freeze(&mut self) {
        for node in &self.nodes {
            node.borrow_mut().set_frozen(true);
        }
    }

    pub fn unfreeze(&mut self) {
        for node in &self.nodes {
            node.borrow_mut().set_frozen(false);
        }
        self.simulation.resume();
    }

    /// Restores default pan and zoom without touching data or layout.
    pub fn reset(&mut self) {
        self.scene.reset_view();
    }

    /// Runs one simulation tick and refreshes the scene. Returns `false`
    /// once the simulation is at rest.
    pub fn step(&mut self) -> bool {
        if !self.simulation.advance(&self.nodes, &self.links) {
            return false;
        }
        self.scene.refresh_positions();
        true
    }

    /// Ticks until the simulation cools to rest.
    pub fn run_to_rest(&mut self) {
        while self.step() {}
    }

    /// Pins a node at the start of a drag gesture.
    pub fn drag_start(&mut self, node: &NodeRef) {
        node.borrow_mut().set_locked(true);
    }

    /// Moves a pinned node and lets the simulation relax the rest of the
    /// graph around it. Position writes bypass the lock and the frozen
    /// flag; both only suppress simulation-driven movement.
    pub fn drag(&mut self, node: &NodeRef, position: Point) {
        node.borrow_mut().set_position(position);
        self.simulation.resume();
        self.scene.refresh_positions();
    }

    pub fn drag_end(&mut self, node: &NodeRef) {
        node.borrow_mut().set_locked(false);
    }

    /// Sets the magnification, clamped to the configured bounds.
    pub fn zoom(&mut self, magnification: f32) {
        self.scene.set_magnification(magnification);
    }

    pub fn pan(&mut self, delta: Point) {
        self.scene.pan(delta);
    }

    /// Resolves a click in screen coordinates and routes the selected
    /// element to every configured selection handler in order.
    pub fn click(&mut self, screen: Point) -> Option<SelectedElement> {
        let world = self.scene.world_from_screen(screen);
        let selected = self.scene.element_at(world)?;
        for module in self.options.selection_modules_mut() {
            module.handle(&selected);
        }
        Some(selected)
    }

    pub fn to_svg(&self) -> Document {
        self.scene.to_document()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// The displayed node set after filtering.
    pub fn nodes(&self) -> &[NodeRef] {
        &self.nodes
    }

    /// The displayed property set after filtering.
    pub fn properties(&self) -> &[PropertyRef] {
        &self.properties
    }

    /// The rendered link set, rebuilt by the final link pass of the last
    /// update.
    pub fn links(&self) -> &[LinkRef] {
        &self.links
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Parses the raw payload into fresh element objects. A missing or
    /// malformed payload degrades to an empty graph instead of failing the
    /// controller.
    fn load(&mut self) {
        let Some(data) = self.options.data() else {
            warn!("no data payload configured, loading empty graph");
            self.unfiltered_nodes = Vec::new();
            self.unfiltered_properties = Vec::new();
            return;
        };

        let parsed = match vowl_parser::parse(data) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(error = err.to_string().as_str(); "payload unreadable, loading empty graph");
                vowl_parser::OntologyData::default()
            }
        };

        let nodes: Vec<NodeRef> = parsed
            .classes
            .iter()
            .map(|record| Node::new(&record.id, record.kind, record.labels.clone()).shared())
            .collect();
        let node_by_id = |id: &str| {
            nodes
                .iter()
                .zip(&parsed.classes)
                .find(|(_, record)| record.id == id)
                .map(|(node, _)| node.clone())
        };

        // Inverse ids are resolved through this map, keyed by record id, so
        // a record skipped above can never shift a later pairing.
        let mut property_by_id: IndexMap<&str, (PropertyRef, Option<&str>)> = IndexMap::new();
        for record in &parsed.properties {
            let (Some(domain), Some(range)) = (node_by_id(&record.domain), node_by_id(&record.range))
            else {
                continue;
            };
            let property =
                Property::new(&record.id, record.kind, record.labels.clone(), domain, range)
                    .shared();
            property
                .borrow_mut()
                .set_domain_cardinality(record.domain_cardinality);
            property
                .borrow_mut()
                .set_range_cardinality(record.range_cardinality);
            property_by_id.insert(record.id.as_str(), (property, record.inverse.as_deref()));
        }

        for (property, inverse_id) in property_by_id.values() {
            if let Some(inverse_id) = inverse_id
                && let Some((inverse, _)) = property_by_id.get(inverse_id)
            {
                property.borrow_mut().set_inverse(inverse);
            }
        }

        self.unfiltered_nodes = nodes;
        self.unfiltered_properties = property_by_id
            .into_values()
            .map(|(property, _)| property)
            .collect();
    }

    /// Runs the filter pipeline, then the final link pass over the
    /// surviving subgraph. The links built here are the rendered ones;
    /// incident-link lists are recomputed from them in the same pass so no
    /// dangling references survive.
    fn refresh_graph_data(&mut self) {
        let raw_nodes = self.unfiltered_nodes.clone();
        let raw_properties = self.unfiltered_properties.clone();
        let (nodes, properties) = filter::run_pipeline(
            self.options.filter_modules_mut(),
            raw_nodes,
            raw_properties,
        );

        let links = links::create_links(&nodes, &properties);
        links::store_links_on_nodes(&nodes, &links);

        self.nodes = nodes;
        self.properties = properties;
        self.links = links;
    }
}
