use eframe::egui;
use serde::{Deserialize, Serialize};

pub const SHAPE_CIRCLE: &str = "circle";
pub const SHAPE_RECT: &str = "rect";
pub const SHAPE_DIAMOND: &str = "diamond";

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn to_pos2(self) -> egui::Pos2 {
        egui::pos2(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// One shape on the diagram. `shape` is an open string on the wire
/// (`"circle"`, `"rect"`, `"diamond"`, ...) so documents carrying unknown
/// shape names import and re-export unchanged.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Node {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default = "default_shape")]
    pub shape: String,
    #[serde(default)]
    pub position: Point,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub rotate: f32,
}

fn default_shape() -> String {
    SHAPE_RECT.to_string()
}

impl Node {
    pub fn rect(&self) -> egui::Rect {
        egui::Rect::from_min_size(
            self.position.to_pos2(),
            egui::vec2(self.size.width, self.size.height),
        )
    }

    pub fn center(&self) -> egui::Pos2 {
        self.rect().center()
    }
}

/// A directed edge between two node ids. Endpoints are not checked against
/// the node list; dangling references are carried as-is.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Connection {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: String,
}

/// The exported/imported JSON shape. The sole persisted format.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FlowDocument {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// The two-node document every fresh session starts from.
pub fn seed_document() -> FlowDocument {
    FlowDocument {
        nodes: vec![
            Node {
                id: new_id(),
                text: "Start".to_string(),
                shape: SHAPE_CIRCLE.to_string(),
                position: Point { x: 50.0, y: 50.0 },
                size: Size {
                    width: 100.0,
                    height: 100.0,
                },
                rotate: 0.0,
            },
            Node {
                id: new_id(),
                text: "Process".to_string(),
                shape: SHAPE_RECT.to_string(),
                position: Point { x: 300.0, y: 50.0 },
                size: Size {
                    width: 120.0,
                    height: 60.0,
                },
                rotate: 0.0,
            },
        ],
        connections: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_serializes_with_wire_field_names() {
        let node = Node {
            id: "n1".to_string(),
            text: "Start".to_string(),
            shape: SHAPE_CIRCLE.to_string(),
            position: Point { x: 50.0, y: 50.0 },
            size: Size {
                width: 100.0,
                height: 100.0,
            },
            rotate: 0.0,
        };
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "circle");
        assert_eq!(value["position"]["x"], 50.0);
        assert_eq!(value["size"]["width"], 100.0);
        assert!(value.get("shape").is_none());
    }

    #[test]
    fn node_missing_fields_fall_back_to_defaults() {
        let node: Node = serde_json::from_str(r#"{"id": "n1"}"#).unwrap();
        assert_eq!(node.text, "");
        assert_eq!(node.shape, SHAPE_RECT);
        assert_eq!(node.position, Point::default());
        assert_eq!(node.rotate, 0.0);
    }

    #[test]
    fn seed_document_matches_initial_state() {
        let doc = seed_document();
        assert_eq!(doc.nodes.len(), 2);
        assert!(doc.connections.is_empty());

        let start = &doc.nodes[0];
        assert_eq!(start.text, "Start");
        assert_eq!(start.shape, SHAPE_CIRCLE);
        assert_eq!(start.position, Point { x: 50.0, y: 50.0 });
        assert_eq!(
            start.size,
            Size {
                width: 100.0,
                height: 100.0
            }
        );

        let process = &doc.nodes[1];
        assert_eq!(process.text, "Process");
        assert_eq!(process.shape, SHAPE_RECT);
        assert_eq!(process.position, Point { x: 300.0, y: 50.0 });
        assert_eq!(
            process.size,
            Size {
                width: 120.0,
                height: 60.0
            }
        );

        assert_ne!(start.id, process.id);
    }
}
