//! Retained scene layers rendered to SVG in z-order.
//!
//! The scene consists of four ordered layers; later layers visually occlude
//! earlier ones. Each layer holds groups of primitives whose transforms are
//! rewritten on every simulation tick, and the whole scene can be rendered
//! to an SVG document at any time.

use svg::node::element as svg_element;

use crate::geometry::Point;

/// The rendering layers of a graph scene, bottom to top.
///
/// The `Ord` derive uses declaration order, so the first variant renders
/// first (bottom) and the last renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Edge paths and the marker definitions container - renders first
    Link,
    /// Cardinality annotations near link ends
    Cardinality,
    /// Property label groups
    Label,
    /// Node shapes - renders last, occluding everything else
    Node,
}

impl RenderLayer {
    /// Returns the container class name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Link => "linkContainer",
            Self::Cardinality => "cardinalityContainer",
            Self::Label => "labelContainer",
            Self::Node => "nodeContainer",
        }
    }
}

/// A visual primitive inside a scene group.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Rectangle centered on the group origin.
    Rect {
        width: f32,
        height: f32,
        rounded: f32,
        classes: Vec<String>,
    },
    /// Circle centered on the group origin.
    Circle { radius: f32, classes: Vec<String> },
    /// Free-form path; `data` is rewritten on every tick.
    Path {
        data: String,
        marker_end: Option<String>,
        classes: Vec<String>,
    },
    /// Text centered on the group origin.
    Text { content: String, classes: Vec<String> },
}

impl Primitive {
    fn render_to_svg(&self) -> Box<dyn svg::Node> {
        match self {
            Self::Rect {
                width,
                height,
                rounded,
                classes,
            } => Box::new(
                svg_element::Rectangle::new()
                    .set("x", -width / 2.0)
                    .set("y", -height / 2.0)
                    .set("width", *width)
                    .set("height", *height)
                    .set("rx", *rounded)
                    .set("class", classes.join(" ")),
            ),
            Self::Circle { radius, classes } => Box::new(
                svg_element::Circle::new()
                    .set("r", *radius)
                    .set("class", classes.join(" ")),
            ),
            Self::Path {
                data,
                marker_end,
                classes,
            } => {
                let mut path = svg_element::Path::new()
                    .set("d", data.as_str())
                    .set("class", classes.join(" "));
                if let Some(marker) = marker_end {
                    path = path.set("marker-end", marker.as_str());
                }
                Box::new(path)
            }
            Self::Text { content, classes } => Box::new(
                svg_element::Text::new(content.as_str())
                    .set("text-anchor", "middle")
                    .set("dy", "0.35em")
                    .set("class", classes.join(" ")),
            ),
        }
    }
}

/// A scene group: an identified, classed, transformed bag of primitives.
#[derive(Debug, Clone, Default)]
pub struct Group {
    id: Option<String>,
    classes: Vec<String>,
    transform: Point,
    primitives: Vec<Primitive>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        self.classes.push(class.into());
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn set_transform(&mut self, position: Point) {
        self.transform = position;
    }

    pub fn transform(&self) -> Point {
        self.transform
    }

    /// Appends a primitive, returning its index within the group.
    pub fn push(&mut self, primitive: Primitive) -> usize {
        self.primitives.push(primitive);
        self.primitives.len() - 1
    }

    pub fn primitive_mut(&mut self, index: usize) -> Option<&mut Primitive> {
        self.primitives.get_mut(index)
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn render_to_svg(&self) -> svg_element::Group {
        let mut group = svg_element::Group::new();
        if let Some(id) = &self.id {
            group = group.set("id", id.as_str());
        }
        if !self.classes.is_empty() {
            group = group.set("class", self.classes.join(" "));
        }
        if !self.transform.is_zero() {
            group = group.set(
                "transform",
                format!("translate({},{})", self.transform.x(), self.transform.y()),
            );
        }
        for primitive in &self.primitives {
            group = group.add(primitive.render_to_svg());
        }
        group
    }
}

/// An ordered container of scene groups belonging to one [`RenderLayer`].
#[derive(Debug)]
pub struct Layer {
    layer: RenderLayer,
    groups: Vec<Group>,
}

impl Layer {
    pub fn new(layer: RenderLayer) -> Self {
        Self {
            layer,
            groups: Vec::new(),
        }
    }

    pub fn layer(&self) -> RenderLayer {
        self.layer
    }

    /// Appends a group, returning its index within the layer.
    pub fn add(&mut self, group: Group) -> usize {
        self.groups.push(group);
        self.groups.len() - 1
    }

    pub fn group_mut(&mut self, index: usize) -> Option<&mut Group> {
        self.groups.get_mut(index)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn render_to_svg(&self) -> svg_element::Group {
        let mut container = svg_element::Group::new().set("class", self.layer.name());
        for group in &self.groups {
            container = container.add(group.render_to_svg());
        }
        container
    }
}

/// Container for reusable edge markers, rendered once into the link layer's
/// `<defs>` element.
#[derive(Debug, Default)]
pub struct MarkerDefs {
    classes: Vec<String>,
}

impl MarkerDefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a marker for `class` if not present and returns the
    /// `url(#…)` reference to set as `marker-end`.
    pub fn ensure(&mut self, class: &str) -> String {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
        format!("url(#marker-{class})")
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn render_to_svg(&self) -> svg_element::Definitions {
        let mut defs = svg_element::Definitions::new();
        for class in &self.classes {
            let marker = svg_element::Marker::new()
                .set("id", format!("marker-{class}"))
                .set("class", class.as_str())
                .set("viewBox", "0 -8 14 16")
                .set("refX", 12)
                .set("markerWidth", 12)
                .set("markerHeight", 12)
                .set("orient", "auto")
                .add(svg_element::Path::new().set("d", "M0,-8L14,0L0,8Z"));
            defs = defs.add(marker);
        }
        defs
    }
}
