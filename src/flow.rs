use crate::model::{self, Connection, FlowDocument, Node, Point, Size};
use crate::store::Signal;

/// The narrow surface this crate needs from the rendering canvas. Keeping
/// it a trait lets the state glue run and be tested without a windowing
/// environment.
pub trait Canvas {
    /// Recenter the content and reset the zoom level.
    fn reset_view(&mut self);
}

/// Recenter request fired when the canvas first comes up. No state change;
/// silently ignored when no canvas is available yet.
pub fn canvas_loaded(canvas: Option<&mut dyn Canvas>) {
    if let Some(canvas) = canvas {
        canvas.reset_view();
    }
}

/// Optional `{text, type}` payload carried by a create-node event.
#[derive(Clone, Debug)]
pub struct NodePayload {
    pub text: String,
    pub shape: String,
}

impl Default for NodePayload {
    fn default() -> Self {
        Self {
            text: "New Node".to_string(),
            shape: model::SHAPE_RECT.to_string(),
        }
    }
}

/// The target rectangle a create-node gesture resolved to.
#[derive(Clone, Copy, Debug)]
pub struct EventRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug)]
pub struct CreateNodeEvent {
    pub payload: Option<NodePayload>,
    pub rect: EventRect,
}

/// Endpoints are optional: the gesture may end over empty space, in which
/// case the event is dropped without touching state.
#[derive(Clone, Debug, Default)]
pub struct CreateConnectionEvent {
    pub output_id: Option<String>,
    pub input_id: Option<String>,
}

/// The in-memory diagram: two observable collections, appended to by the
/// creation events and replaced wholesale on import. Nothing else mutates
/// them; there is no per-field update and no delete.
pub struct FlowState {
    nodes: Signal<Vec<Node>>,
    connections: Signal<Vec<Connection>>,
}

impl FlowState {
    pub fn seeded() -> Self {
        let doc = model::seed_document();
        Self {
            nodes: Signal::new(doc.nodes),
            connections: Signal::new(doc.connections),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        self.nodes.get()
    }

    pub fn connections(&self) -> &[Connection] {
        self.connections.get()
    }

    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.nodes().iter().find(|n| n.id == id)
    }

    /// Build a snapshot of the current state in the wire shape.
    pub fn document(&self) -> FlowDocument {
        FlowDocument {
            nodes: self.nodes().to_vec(),
            connections: self.connections().to_vec(),
        }
    }

    /// Swap both collections wholesale. Import is all-or-nothing, so this
    /// is only called with a fully parsed document.
    pub fn replace(&mut self, nodes: Vec<Node>, connections: Vec<Connection>) {
        self.nodes.set(nodes);
        self.connections.set(connections);
    }

    /// Register a callback that fires after any mutation of either
    /// collection. The shell uses this to schedule repaints.
    pub fn observe(&mut self, callback: impl Fn() + Clone + 'static) {
        let on_nodes = callback.clone();
        self.nodes.subscribe(move |_| on_nodes());
        self.connections.subscribe(move |_| callback());
    }

    /// Append one node from a creation event. A missing payload falls back
    /// to `"New Node"`/`"rect"`; diamonds start rotated by 45 degrees.
    pub fn create_node(&mut self, event: CreateNodeEvent) {
        let payload = event.payload.unwrap_or_default();
        let rotate = if payload.shape == model::SHAPE_DIAMOND {
            45.0
        } else {
            0.0
        };
        let node = Node {
            id: model::new_id(),
            text: payload.text,
            shape: payload.shape,
            position: Point {
                x: event.rect.x,
                y: event.rect.y,
            },
            size: Size {
                width: event.rect.width,
                height: event.rect.height,
            },
            rotate,
        };
        self.nodes.update(|nodes| nodes.push(node));
    }

    /// Append one connection from a creation event. If either endpoint is
    /// missing the event is a silent no-op. Endpoints are not validated
    /// against the node list.
    pub fn create_connection(&mut self, event: CreateConnectionEvent) {
        let (Some(source), Some(target)) = (event.output_id, event.input_id) else {
            return;
        };
        let connection = Connection {
            id: model::new_id(),
            source,
            target,
        };
        self.connections.update(|conns| conns.push(connection));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn node_event(text: &str, shape: &str) -> CreateNodeEvent {
        CreateNodeEvent {
            payload: Some(NodePayload {
                text: text.to_string(),
                shape: shape.to_string(),
            }),
            rect: EventRect {
                x: 10.0,
                y: 20.0,
                width: 120.0,
                height: 60.0,
            },
        }
    }

    #[test]
    fn starts_with_seed_nodes_and_no_connections() {
        let state = FlowState::seeded();
        assert_eq!(state.nodes().len(), 2);
        assert_eq!(state.nodes()[0].text, "Start");
        assert_eq!(state.nodes()[1].text, "Process");
        assert!(state.connections().is_empty());
    }

    #[test]
    fn each_creation_appends_one_node_with_a_fresh_id() {
        let mut state = FlowState::seeded();
        for i in 0..5 {
            state.create_node(node_event(&format!("n{i}"), model::SHAPE_RECT));
            assert_eq!(state.nodes().len(), 3 + i);
        }
        let mut ids: Vec<&str> = state.nodes().iter().map(|n| n.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 7);
        // Appended in event order.
        assert_eq!(state.nodes()[2].text, "n0");
        assert_eq!(state.nodes()[6].text, "n4");
    }

    #[test]
    fn node_creation_takes_position_and_size_from_the_event_rect() {
        let mut state = FlowState::seeded();
        state.create_node(node_event("box", model::SHAPE_RECT));
        let node = state.nodes().last().unwrap();
        assert_eq!(node.position, Point { x: 10.0, y: 20.0 });
        assert_eq!(
            node.size,
            Size {
                width: 120.0,
                height: 60.0
            }
        );
    }

    #[test]
    fn missing_payload_falls_back_to_defaults() {
        let mut state = FlowState::seeded();
        state.create_node(CreateNodeEvent {
            payload: None,
            rect: EventRect {
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 50.0,
            },
        });
        let node = state.nodes().last().unwrap();
        assert_eq!(node.text, "New Node");
        assert_eq!(node.shape, model::SHAPE_RECT);
        assert_eq!(node.rotate, 0.0);
    }

    #[test]
    fn diamonds_start_rotated_other_shapes_do_not() {
        let mut state = FlowState::seeded();
        state.create_node(node_event("d", model::SHAPE_DIAMOND));
        state.create_node(node_event("c", model::SHAPE_CIRCLE));
        state.create_node(node_event("weird", "hexagon"));
        let n = state.nodes().len();
        assert_eq!(state.nodes()[n - 3].rotate, 45.0);
        assert_eq!(state.nodes()[n - 2].rotate, 0.0);
        assert_eq!(state.nodes()[n - 1].rotate, 0.0);
    }

    #[test]
    fn connection_with_both_endpoints_is_appended() {
        let mut state = FlowState::seeded();
        let source = state.nodes()[0].id.clone();
        let target = state.nodes()[1].id.clone();
        state.create_connection(CreateConnectionEvent {
            output_id: Some(source.clone()),
            input_id: Some(target.clone()),
        });
        assert_eq!(state.connections().len(), 1);
        let conn = &state.connections()[0];
        assert_eq!(conn.source, source);
        assert_eq!(conn.target, target);
        assert!(!conn.id.is_empty());
    }

    #[test]
    fn connection_missing_either_endpoint_is_a_no_op() {
        let mut state = FlowState::seeded();
        state.create_connection(CreateConnectionEvent {
            output_id: Some("a".to_string()),
            input_id: None,
        });
        state.create_connection(CreateConnectionEvent {
            output_id: None,
            input_id: Some("b".to_string()),
        });
        state.create_connection(CreateConnectionEvent::default());
        assert!(state.connections().is_empty());
    }

    #[test]
    fn dangling_endpoints_are_accepted() {
        let mut state = FlowState::seeded();
        state.create_connection(CreateConnectionEvent {
            output_id: Some("no-such-node".to_string()),
            input_id: Some("also-missing".to_string()),
        });
        assert_eq!(state.connections().len(), 1);
    }

    #[test]
    fn replace_swaps_both_collections() {
        let mut state = FlowState::seeded();
        state.replace(vec![], vec![]);
        assert!(state.nodes().is_empty());
        assert!(state.connections().is_empty());
    }

    #[test]
    fn observe_fires_on_node_and_connection_mutations() {
        let count = Rc::new(Cell::new(0u32));
        let mut state = FlowState::seeded();
        let sink = Rc::clone(&count);
        state.observe(move || sink.set(sink.get() + 1));

        state.create_node(node_event("n", model::SHAPE_RECT));
        assert_eq!(count.get(), 1);
        state.create_connection(CreateConnectionEvent {
            output_id: Some("a".to_string()),
            input_id: Some("b".to_string()),
        });
        assert_eq!(count.get(), 2);
        // replace touches both collections
        state.replace(vec![], vec![]);
        assert_eq!(count.get(), 4);
    }

    #[test]
    fn canvas_loaded_resets_the_view_when_present() {
        struct Probe(Rc<Cell<u32>>);
        impl Canvas for Probe {
            fn reset_view(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }
        let count = Rc::new(Cell::new(0));
        let mut probe = Probe(Rc::clone(&count));
        canvas_loaded(Some(&mut probe));
        assert_eq!(count.get(), 1);
        // Absent canvas is not an error.
        canvas_loaded(None);
        assert_eq!(count.get(), 1);
    }
}
