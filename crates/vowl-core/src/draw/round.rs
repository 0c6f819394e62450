use super::{Group, NodeDrawable, Primitive};

const DEFAULT_RADIUS: f32 = 50.0;
const CHAR_WIDTH: f32 = 7.0;

/// Round node shape, used for class-like nodes.
#[derive(Debug, Clone)]
pub struct RoundNode {
    radius: f32,
    focused: bool,
    hovered: bool,
}

impl RoundNode {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for RoundNode {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            focused: false,
            hovered: false,
        }
    }
}

impl NodeDrawable for RoundNode {
    fn draw_node(&mut self, group: &mut Group, label: &str, extra_classes: &[&str]) {
        let mut classes = vec!["circle".to_string()];
        if self.focused {
            classes.push("focused".to_string());
        }
        if self.hovered {
            classes.push("hovered".to_string());
        }
        classes.extend(extra_classes.iter().map(|c| c.to_string()));

        group.push(Primitive::Circle {
            radius: self.radius,
            classes,
        });
        group.push(Primitive::Text {
            content: label.to_string(),
            classes: vec!["text".to_string()],
        });
    }

    fn width(&self) -> f32 {
        self.radius * 2.0
    }

    fn height(&self) -> f32 {
        self.radius * 2.0
    }

    fn actual_radius(&self) -> f32 {
        self.radius
    }

    fn fit_label(&mut self, label: &str) {
        let text_radius = label.chars().count() as f32 * CHAR_WIDTH / 2.0;
        self.radius = text_radius.max(DEFAULT_RADIUS);
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
    fn test_default_radius() {
        let shape = RoundNode::new();
        assert_eq!(shape.actual_radius(), 50.0);
        assert_eq!(shape.width(), 100.0);
        assert_eq!(shape.height(), 100.0);
    }

    #[test]
    fn test_fit_label_grows_radius_for_long_labels() {
        let mut shape = RoundNode::new();
        shape.fit_label("an exceptionally descriptive class label");
        assert!(shape.actual_radius() > 50.0);
    }

    #[test]
    fn test_hover_class_applied() {
        let mut shape = RoundNode::new();
        shape.set_hover_highlighting(true);

        let mut group = Group::new();
        shape.draw_node(&mut group, "label", &[]);
        match &group.primitives()[0] {
            Primitive::Circle { classes, .. } => {
                assert!(classes.iter().any(|c| c == "hovered"));
            }
            other => panic!("expected circle, got {other:?}"),
        }
    }
}
