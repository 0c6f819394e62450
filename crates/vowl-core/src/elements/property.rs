use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::{LanguageMap, NodeRef};
use crate::draw::{PropertyDrawable, PropertyView};

/// Shared handle to a property; identity is `Rc` pointer identity.
pub type PropertyRef = Rc<RefCell<Property>>;

/// The kind of relationship a property expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Object,
    Datatype,
    SubclassOf,
}

impl PropertyKind {
    /// CSS class applied to the edge path and label, which also selects the
    /// arrowhead marker.
    pub fn link_class(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Datatype => "datatype",
            Self::SubclassOf => "subclass",
        }
    }

    pub fn is_subclass_of(self) -> bool {
        matches!(self, Self::SubclassOf)
    }
}

/// A min/max occurrence bound attached to one end of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    min: u32,
    max: Option<u32>,
}

impl Cardinality {
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> Option<u32> {
        self.max
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{}", self.min),
            Some(max) => write!(f, "{}..{}", self.min, max),
            None => write!(f, "{}..*", self.min),
        }
    }
}

/// A displayed schema property connecting a domain node to a range node.
pub struct Property {
    id: String,
    kind: PropertyKind,
    labels: LanguageMap,
    domain: NodeRef,
    range: NodeRef,
    inverse: Option<Weak<RefCell<Property>>>,
    domain_cardinality: Option<Cardinality>,
    range_cardinality: Option<Cardinality>,
    view: Box<dyn PropertyDrawable>,
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Property {
    pub fn new(
        id: impl Into<String>,
        kind: PropertyKind,
        labels: LanguageMap,
        domain: NodeRef,
        range: NodeRef,
    ) -> Self {
        let view: Box<dyn PropertyDrawable> = Box::new(PropertyView::new(kind.link_class()));
        Self {
            id: id.into(),
            kind,
            labels,
            domain,
            range,
            inverse: None,
            domain_cardinality: None,
            range_cardinality: None,
            view,
        }
    }

    pub fn shared(self) -> PropertyRef {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    pub fn is_subclass_of(&self) -> bool {
        self.kind.is_subclass_of()
    }

    pub fn label_for(&self, language: &str) -> Option<&str> {
        self.labels.label_for(language)
    }

    pub fn domain(&self) -> &NodeRef {
        &self.domain
    }

    pub fn range(&self) -> &NodeRef {
        &self.range
    }

    /// The paired inverse property, if the schema declares one. Held weakly;
    /// the controller's property list owns both sides.
    pub fn inverse(&self) -> Option<PropertyRef> {
        self.inverse.as_ref().and_then(Weak::upgrade)
    }

    pub fn set_inverse(&mut self, inverse: &PropertyRef) {
        self.inverse = Some(Rc::downgrade(inverse));
    }

    pub fn domain_cardinality(&self) -> Option<Cardinality> {
        self.domain_cardinality
    }

    pub fn set_domain_cardinality(&mut self, cardinality: Option<Cardinality>) {
        self.domain_cardinality = cardinality;
    }

    pub fn range_cardinality(&self) -> Option<Cardinality> {
        self.range_cardinality
    }

    pub fn set_range_cardinality(&mut self, cardinality: Option<Cardinality>) {
        self.range_cardinality = cardinality;
    }

    pub fn view(&self) -> &dyn PropertyDrawable {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> &mut dyn PropertyDrawable {
        self.view.as_mut()
    }
}
