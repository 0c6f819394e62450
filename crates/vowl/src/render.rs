//! The render pipeline: scene construction and per-tick refresh.
//!
//! A [`Scene`] is the one retained scene graph a controller owns. Each full
//! update tears the previous content down and rebuilds the four layers,
//! binding displayed elements to scene groups; each simulation tick only
//! rewrites transforms and path data through those bindings. Shape-specific
//! drawing is delegated to the element draw contracts.

use log::debug;
use svg::Document;
use svg::node::element as svg_element;

use vowl_core::draw::{Group, Layer, MarkerDefs, Primitive, RenderLayer};
use vowl_core::elements::{LinkRef, NodeRef};
use vowl_core::geometry::{Point, curve_point, intersection, loop_path, normal_vector};

use crate::options::Options;
use crate::select::SelectedElement;

/// Margin between a node border and the link endpoint touching it.
const LINK_ENDPOINT_MARGIN: f32 = 1.0;

/// Horizontal distance between a node border and its cardinality label.
const CARDINALITY_HDISTANCE: f32 = 20.0;

/// Normal offset lifting a cardinality label off the link path.
const CARDINALITY_VDISTANCE: f32 = 10.0;

/// Which end of a link a cardinality annotation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkEnd {
    Domain,
    Range,
}

/// The retained scene graph of one graph controller.
pub struct Scene {
    width: f32,
    height: f32,
    min_magnification: f32,
    max_magnification: f32,
    class_distance: f32,
    datatype_distance: f32,
    default_link_distance: f32,
    translation: Point,
    scale: f32,
    markers: MarkerDefs,
    link_layer: Layer,
    cardinality_layer: Layer,
    label_layer: Layer,
    node_layer: Layer,
    node_bindings: Vec<(NodeRef, usize)>,
    link_bindings: Vec<(LinkRef, usize)>,
    label_bindings: Vec<(LinkRef, usize)>,
    cardinality_bindings: Vec<(LinkRef, LinkEnd, usize)>,
    rebuilds: usize,
}

impl Scene {
    pub fn new(options: &Options) -> Self {
        let mut scene = Self {
            width: 0.0,
            height: 0.0,
            min_magnification: 0.0,
            max_magnification: 0.0,
            class_distance: 0.0,
            datatype_distance: 0.0,
            default_link_distance: 0.0,
            translation: Point::default(),
            scale: 1.0,
            markers: MarkerDefs::new(),
            link_layer: Layer::new(RenderLayer::Link),
            cardinality_layer: Layer::new(RenderLayer::Cardinality),
            label_layer: Layer::new(RenderLayer::Label),
            node_layer: Layer::new(RenderLayer::Node),
            node_bindings: Vec::new(),
            link_bindings: Vec::new(),
            label_bindings: Vec::new(),
            cardinality_bindings: Vec::new(),
            rebuilds: 0,
        };
        scene.configure(options);
        scene
    }

    /// Applies viewport size and zoom bounds. Safe mid-run; the current
    /// magnification is re-clamped against the new bounds.
    pub fn configure(&mut self, options: &Options) {
        self.width = options.width();
        self.height = options.height();
        self.min_magnification = options.min_magnification();
        self.max_magnification = options.max_magnification();
        self.class_distance = options.class_distance();
        self.datatype_distance = options.datatype_distance();
        self.default_link_distance = options.default_link_distance();
        self.scale = self
            .scale
            .clamp(self.min_magnification, self.max_magnification);
    }

    /// Tears down the current content and rebuilds all four layers from the
    /// displayed sets.
    pub fn build(&mut self, nodes: &[NodeRef], links: &[LinkRef], language: &str) {
        self.teardown();

        for link in links {
            let mut group = Group::new();
            group.add_class("link");
            link.property()
                .borrow_mut()
                .view_mut()
                .draw_link(&mut group, &mut self.markers);
            let index = self.link_layer.add(group);
            self.link_bindings.push((link.clone(), index));
        }

        self.build_labels(links, language);
        self.build_cardinalities(links);

        for node in nodes {
            let mut group = Group::new();
            group.add_class("node");
            {
                let mut n = node.borrow_mut();
                group.set_id(n.id().to_string());
                let label = n.display_label(language).to_string();
                let kind_class = n.kind().css_class();
                n.shape_mut().fit_label(&label);
                n.shape_mut().draw_node(&mut group, &label, &[kind_class]);
            }
            let index = self.node_layer.add(group);
            self.node_bindings.push((node.clone(), index));
        }

        self.rebuilds += 1;
        debug!(nodes = nodes.len(), links = links.len(); "scene rebuilt");
    }

    /// Builds the label layer. A group whose draw contract reports no
    /// visible label is dropped instead of left empty, and groups for
    /// hierarchy relations go first so sibling labels overlap them.
    fn build_labels(&mut self, links: &[LinkRef], language: &str) {
        let mut pending: Vec<(LinkRef, Group)> = Vec::new();

        for link in links {
            let mut group = Group::new();
            group.add_class("labelGroup");

            let label: Option<String> = link
                .property()
                .borrow()
                .label_for(language)
                .map(str::to_string);
            let mut drew = link
                .property()
                .borrow_mut()
                .view_mut()
                .draw_property(&mut group, label.as_deref());

            if let Some(inverse) = link.inverse() {
                let inverse_label: Option<String> =
                    inverse.borrow().label_for(language).map(str::to_string);
                drew |= inverse
                    .borrow_mut()
                    .view_mut()
                    .draw_property(&mut group, inverse_label.as_deref());
            }

            if drew {
                pending.push((link.clone(), group));
            }
        }

        pending.sort_by_key(|(link, _)| !link.property().borrow().is_subclass_of());
        for (link, group) in pending {
            let index = self.label_layer.add(group);
            self.label_bindings.push((link, index));
        }
    }

    /// Builds the cardinality layer: up to two annotations per link, one at
    /// the range end and one at the domain end. On a merged inverse pair the
    /// inverse's range-side bound sits at the domain end.
    fn build_cardinalities(&mut self, links: &[LinkRef]) {
        for link in links {
            let property = link.property();
            let range_text = property
                .borrow()
                .range_cardinality()
                .map(|c| c.to_string());
            let domain_text = property
                .borrow()
                .domain_cardinality()
                .or_else(|| {
                    link.inverse()
                        .and_then(|inverse| inverse.borrow().range_cardinality())
                })
                .map(|c| c.to_string());

            for (end, text) in [
                (LinkEnd::Range, range_text),
                (LinkEnd::Domain, domain_text),
            ] {
                let mut group = Group::new();
                group.add_class("cardinality");
                let drew = property
                    .borrow_mut()
                    .view_mut()
                    .draw_cardinality(&mut group, text.as_deref());
                if drew {
                    let index = self.cardinality_layer.add(group);
                    self.cardinality_bindings.push((link.clone(), end, index));
                }
            }
        }
    }

    /// Rewrites every bound transform and path from the current node
    /// positions; called on each simulation tick.
    pub fn refresh_positions(&mut self) {
        for (node, index) in &self.node_bindings {
            if let Some(group) = self.node_layer.group_mut(*index) {
                group.set_transform(node.borrow().position());
            }
        }

        for (link, index) in &self.link_bindings {
            let data = if link.is_loop() {
                let (center, radius) = {
                    let domain = link.domain().borrow();
                    (domain.position(), domain.actual_radius())
                };
                let [start, c1, c2, end] = loop_path(center, radius);
                link.set_curve_point(c1.midpoint(c2));
                format!(
                    "M {} {} C {} {}, {} {}, {} {}",
                    start.x(),
                    start.y(),
                    c1.x(),
                    c1.y(),
                    c2.x(),
                    c2.y(),
                    end.x(),
                    end.y()
                )
            } else {
                let (domain_pos, domain_radius) = {
                    let domain = link.domain().borrow();
                    (domain.position(), domain.actual_radius())
                };
                let (range_pos, range_radius) = {
                    let range = link.range().borrow();
                    (range.position(), range.actual_radius())
                };

                let curve = curve_point(
                    domain_pos,
                    range_pos,
                    link.parallel_index(),
                    self.distance_ratio(link),
                );
                link.set_curve_point(curve);

                let start =
                    intersection(domain_pos, domain_radius, curve, LINK_ENDPOINT_MARGIN);
                let end = intersection(range_pos, range_radius, curve, LINK_ENDPOINT_MARGIN);
                // Quadratic control point putting the curve through the
                // computed bend point.
                let control = curve.scale(2.0).sub_point(start.midpoint(end));
                format!(
                    "M {} {} Q {} {}, {} {}",
                    start.x(),
                    start.y(),
                    control.x(),
                    control.y(),
                    end.x(),
                    end.y()
                )
            };

            if let Some(group) = self.link_layer.group_mut(*index)
                && let Some(Primitive::Path { data: d, .. }) = group.primitive_mut(0)
            {
                *d = data;
            }
        }

        for (link, index) in &self.label_bindings {
            if let Some(group) = self.label_layer.group_mut(*index) {
                group.set_transform(link.curve_point());
            }
        }

        for (link, end, index) in &self.cardinality_bindings {
            let curve = link.curve_point();
            // The annotation sits near its own end of the link; the normal
            // points away from the annotated property's domain, which is the
            // node at the opposite end.
            let (anchor, opposite) = match end {
                LinkEnd::Domain => (link.domain(), link.range()),
                LinkEnd::Range => (link.range(), link.domain()),
            };
            let (anchor_pos, anchor_radius) = {
                let anchor = anchor.borrow();
                (anchor.position(), anchor.actual_radius())
            };
            let opposite_pos = opposite.borrow().position();

            let position = intersection(anchor_pos, anchor_radius, curve, CARDINALITY_HDISTANCE)
                .add_point(normal_vector(curve, opposite_pos, CARDINALITY_VDISTANCE));
            if let Some(group) = self.cardinality_layer.group_mut(*index) {
                group.set_transform(position);
            }
        }
    }

    /// The visible link distance for this link's endpoint kinds relative to
    /// the default distance. Links at the default separation render
    /// straight; shorter datatype links bend.
    fn distance_ratio(&self, link: &LinkRef) -> f32 {
        let visible =
            if link.domain().borrow().is_datatype() || link.range().borrow().is_datatype() {
                self.datatype_distance
            } else {
                self.class_distance
            };
        visible / self.default_link_distance
    }

    fn teardown(&mut self) {
        self.markers = MarkerDefs::new();
        self.link_layer = Layer::new(RenderLayer::Link);
        self.cardinality_layer = Layer::new(RenderLayer::Cardinality);
        self.label_layer = Layer::new(RenderLayer::Label);
        self.node_layer = Layer::new(RenderLayer::Node);
        self.node_bindings.clear();
        self.link_bindings.clear();
        self.label_bindings.clear();
        self.cardinality_bindings.clear();
    }

    /// Number of full rebuilds since construction.
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    pub fn link_layer(&self) -> &Layer {
        &self.link_layer
    }

    pub fn cardinality_layer(&self) -> &Layer {
        &self.cardinality_layer
    }

    pub fn label_layer(&self) -> &Layer {
        &self.label_layer
    }

    pub fn node_layer(&self) -> &Layer {
        &self.node_layer
    }

    pub fn magnification(&self) -> f32 {
        self.scale
    }

    pub fn translation(&self) -> Point {
        self.translation
    }

    /// Sets the magnification, clamped to the configured bounds.
    pub fn set_magnification(&mut self, scale: f32) {
        self.scale = scale.clamp(self.min_magnification, self.max_magnification);
    }

    pub fn pan(&mut self, delta: Point) {
        self.translation = self.translation.add_point(delta);
    }

    /// Restores default pan and zoom without touching data or layout.
    pub fn reset_view(&mut self) {
        self.translation = Point::default();
        self.scale = 1.0;
    }

    /// Maps a screen-space point through the view transform into the
    /// coordinate space node positions live in.
    pub fn world_from_screen(&self, screen: Point) -> Point {
        screen.sub_point(self.translation).scale(1.0 / self.scale)
    }

    /// Hit-tests a world-space point against nodes first (they render on
    /// top), then property labels.
    pub fn element_at(&self, world: Point) -> Option<SelectedElement> {
        for (node, _) in self.node_bindings.iter().rev() {
            let (position, width, height) = {
                let n = node.borrow();
                (n.position(), n.shape().width(), n.shape().height())
            };
            let delta = world.sub_point(position);
            if delta.x().abs() <= width / 2.0 && delta.y().abs() <= height / 2.0 {
                return Some(SelectedElement::Node(node.clone()));
            }
        }

        for (link, _) in self.label_bindings.iter().rev() {
            let size = link.property().borrow().view().label_size();
            let delta = world.sub_point(link.curve_point());
            if delta.x().abs() <= size.width() / 2.0 && delta.y().abs() <= size.height() / 2.0 {
                return Some(SelectedElement::Property(link.property().clone()));
            }
        }

        None
    }

    /// Renders the scene to an SVG document: the root group carries the
    /// view transform and the four layer containers in z-order, with marker
    /// definitions inside the link container.
    pub fn to_document(&self) -> Document {
        let link_container = self.link_layer.render_to_svg().add(self.markers.render_to_svg());

        let root = svg_element::Group::new()
            .set("class", "vowlGraph")
            .set(
                "transform",
                format!(
                    "translate({},{}) scale({})",
                    self.translation.x(),
                    self.translation.y(),
                    self.scale
                ),
            )
            .add(link_container)
            .add(self.cardinality_layer.render_to_svg())
            .add(self.label_layer.render_to_svg())
            .add(self.node_layer.render_to_svg());

        Document::new()
            .set("width", self.width)
            .set("height", self.height)
            .set("viewBox", (0.0, 0.0, self.width, self.height))
            .add(root)
    }
}
