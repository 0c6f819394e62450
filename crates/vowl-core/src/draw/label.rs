use super::{Group, MarkerDefs, Primitive, PropertyDrawable};
use crate::geometry::Size;

const LABEL_HEIGHT: f32 = 16.0;
const CHAR_WIDTH: f32 = 7.0;
const TEXT_PADDING: f32 = 8.0;

/// Default property view: a boxed text label, an optional cardinality
/// annotation, and a marker-terminated edge path.
#[derive(Debug, Clone)]
pub struct PropertyView {
    link_class: String,
    label_size: Size,
}

impl PropertyView {
    pub fn new(link_class: impl Into<String>) -> Self {
        Self {
            link_class: link_class.into(),
            label_size: Size::new(0.0, LABEL_HEIGHT),
        }
    }
}

impl PropertyDrawable for PropertyView {
    fn draw_property(&mut self, group: &mut Group, label: Option<&str>) -> bool {
        let Some(label) = label.filter(|l| !l.is_empty()) else {
            return false;
        };

        let width = label.chars().count() as f32 * CHAR_WIDTH + TEXT_PADDING;
        self.label_size = Size::new(width, LABEL_HEIGHT);

        group.push(Primitive::Rect {
            width,
            height: LABEL_HEIGHT,
            rounded: 0.0,
            classes: vec!["label".to_string(), self.link_class.clone()],
        });
        group.push(Primitive::Text {
            content: label.to_string(),
            classes: vec!["text".to_string()],
        });
        true
    }

    fn draw_cardinality(&mut self, group: &mut Group, text: Option<&str>) -> bool {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return false;
        };

        group.push(Primitive::Text {
            content: text.to_string(),
            classes: vec!["cardinality".to_string()],
        });
        true
    }

    fn draw_link(&mut self, group: &mut Group, markers: &mut MarkerDefs) {
        let marker = markers.ensure(&self.link_class);
        group.push(Primitive::Path {
            data: String::new(),
            marker_end: Some(marker),
            classes: vec!["link-path".to_string(), self.link_class.clone()],
        });
    }

    fn label_size(&self) -> Size {
        self.label_size
    }
}
