use super::{Group, NodeDrawable, Primitive};

const DEFAULT_WIDTH: f32 = 60.0;
const DEFAULT_HEIGHT: f32 = 20.0;
const CHAR_WIDTH: f32 = 7.0;
const TEXT_PADDING: f32 = 8.0;

/// Rectangular node shape, used for datatype-like nodes.
#[derive(Debug, Clone)]
pub struct RectangularNode {
    width: f32,
    height: f32,
    focused: bool,
    hovered: bool,
}

impl RectangularNode {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for RectangularNode {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            focused: false,
            hovered: false,
        }
    }
}

impl NodeDrawable for RectangularNode {
    fn draw_node(&mut self, group: &mut Group, label: &str, extra_classes: &[&str]) {
        let mut classes = vec!["rect".to_string()];
        if self.focused {
            classes.push("focused".to_string());
        }
        if self.hovered {
            classes.push("hovered".to_string());
        }
        classes.extend(extra_classes.iter().map(|c| c.to_string()));

        group.push(Primitive::Rect {
            width: self.width,
            height: self.height,
            rounded: 0.0,
            classes,
        });
        group.push(Primitive::Text {
            content: label.to_string(),
            classes: vec!["text".to_string()],
        });
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    // The full width, not the half diagonal, keeps enough clearance for
    // wide datatype labels.
    fn actual_radius(&self) -> f32 {
        self.width
    }

    fn fit_label(&mut self, label: &str) {
        let text_width = label.chars().count() as f32 * CHAR_WIDTH + TEXT_PADDING;
        self.width = text_width.max(DEFAULT_WIDTH);
    }

    fn toggle_focus(&mut self) {
        self.focused = !self.focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_hover_highlighting(&mut self, enable: bool) {
        self.hovered = enable;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_size() {
        let shape = RectangularNode::new();
        assert_eq!(shape.width(), 60.0);
        assert_eq!(shape.height(), 20.0);
        assert_eq!(shape.actual_radius(), shape.width());
    }

    #[test]
    fn test_fit_label_grows_width_only() {
        let mut shape = RectangularNode::new();
        shape.fit_label("a rather long datatype label");

        assert!(shape.width() > 60.0);
        assert_eq!(shape.height(), 20.0);
        assert_eq!(shape.actual_radius(), shape.width());
    }

    #[test]
    fn test_fit_label_keeps_minimum_width() {
        let mut shape = RectangularNode::new();
        shape.fit_label("ab");
        assert_eq!(shape.width(), 60.0);
    }

    #[test]
    fn test_focus_toggles_class() {
        let mut shape = RectangularNode::new();
        shape.toggle_focus();
        assert!(shape.is_focused());

        let mut group = Group::new();
        shape.draw_node(&mut group, "label", &[]);
        match &group.primitives()[0] {
            Primitive::Rect { classes, .. } => {
                assert!(classes.iter().any(|c| c == "focused"));
            }
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_classes_appended() {
        let mut shape = RectangularNode::new();
        let mut group = Group::new();
        shape.draw_node(&mut group, "label", &["datatype"]);

        match &group.primitives()[0] {
            Primitive::Rect { classes, .. } => {
                assert!(classes.iter().any(|c| c == "datatype"));
            }
            other => panic!("expected rect, got {other:?}"),
        }
    }
}
