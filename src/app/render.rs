use crate::flow::FlowState;
use crate::model::{self, Node};
use eframe::egui;

use super::geometry::{ellipse_points, node_anchor, rotated_rect_points};
use super::{InProgress, Tool, View};

const STROKE_COLOR: egui::Color32 = egui::Color32::from_rgb(30, 30, 30);
const FILL_COLOR: egui::Color32 = egui::Color32::from_rgb(250, 250, 250);
const TEXT_SIZE: f32 = 16.0;

pub(super) fn tool_button(ui: &mut egui::Ui, label: &str, tool: Tool, selected: &mut Tool) {
    let active = *selected == tool;
    if ui.selectable_label(active, label).clicked() {
        *selected = tool;
    }
}

pub(super) fn draw_background(
    painter: &egui::Painter,
    rect: egui::Rect,
    view: &View,
    show_grid: bool,
    grid_size: f32,
) {
    let bg = painter.ctx().style().visuals.extreme_bg_color;
    painter.rect_filled(rect, 0.0, bg);
    if !show_grid {
        return;
    }
    let grid_color = egui::Color32::from_gray(60);
    let spacing_screen = grid_size * view.zoom;
    if spacing_screen >= 24.0 {
        let start = rect.min + view.pan_screen;
        let x0 = ((rect.min.x - start.x) / spacing_screen).floor() * spacing_screen + start.x;
        let y0 = ((rect.min.y - start.y) / spacing_screen).floor() * spacing_screen + start.y;
        let mut x = x0;
        while x < rect.max.x {
            painter.line_segment(
                [egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)],
                egui::Stroke::new(1.0, grid_color),
            );
            x += spacing_screen;
        }
        let mut y = y0;
        while y < rect.max.y {
            painter.line_segment(
                [egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)],
                egui::Stroke::new(1.0, grid_color),
            );
            y += spacing_screen;
        }
    }
}

fn to_screen(origin: egui::Pos2, view: &View, points: Vec<egui::Pos2>) -> Vec<egui::Pos2> {
    points
        .into_iter()
        .map(|p| view.world_to_screen(origin, p))
        .collect()
}

fn draw_node(painter: &egui::Painter, origin: egui::Pos2, view: &View, node: &Node) {
    let stroke = egui::Stroke::new(2.0, STROKE_COLOR);
    let rect = node.rect();
    let outline = if node.shape == model::SHAPE_CIRCLE {
        ellipse_points(rect)
    } else {
        rotated_rect_points(rect, node.rotate).to_vec()
    };
    let points = to_screen(origin, view, outline);
    painter.add(egui::Shape::convex_polygon(
        points,
        FILL_COLOR,
        stroke,
    ));

    if !node.text.is_empty() {
        let center = view.world_to_screen(origin, node.center());
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            &node.text,
            egui::FontId::proportional(TEXT_SIZE * view.zoom),
            STROKE_COLOR,
        );
    }
}

pub(super) fn draw_nodes(
    painter: &egui::Painter,
    origin: egui::Pos2,
    view: &View,
    flow: &FlowState,
) {
    for node in flow.nodes() {
        draw_node(painter, origin, view, node);
    }
}

/// Connections whose endpoints are missing from the node list are skipped,
/// not treated as errors.
pub(super) fn draw_connections(
    painter: &egui::Painter,
    origin: egui::Pos2,
    view: &View,
    flow: &FlowState,
) {
    let stroke = egui::Stroke::new(2.0, STROKE_COLOR);
    for conn in flow.connections() {
        let (Some(source), Some(target)) =
            (flow.node_by_id(&conn.source), flow.node_by_id(&conn.target))
        else {
            continue;
        };
        let a = view.world_to_screen(origin, node_anchor(source, target.center()));
        let b = view.world_to_screen(origin, node_anchor(target, source.center()));
        painter.line_segment([a, b], stroke);
        draw_arrowhead(painter, a, b, stroke);
    }
}

pub(super) fn draw_in_progress(
    painter: &egui::Painter,
    origin: egui::Pos2,
    view: &View,
    flow: &FlowState,
    in_progress: &InProgress,
) {
    let stroke = egui::Stroke::new(1.5, egui::Color32::from_gray(140));
    match in_progress {
        InProgress::DragShape { start, current } => {
            let a = view.world_to_screen(origin, *start);
            let b = view.world_to_screen(origin, *current);
            painter.rect_stroke(
                egui::Rect::from_two_pos(a, b),
                0.0,
                stroke,
                egui::StrokeKind::Middle,
            );
        }
        InProgress::Connect { source_id, current } => {
            if let Some(source) = flow.node_by_id(source_id) {
                let a = view.world_to_screen(origin, node_anchor(source, *current));
                let b = view.world_to_screen(origin, *current);
                painter.line_segment([a, b], stroke);
                draw_arrowhead(painter, a, b, stroke);
            }
        }
    }
}

fn draw_arrowhead(painter: &egui::Painter, a: egui::Pos2, b: egui::Pos2, stroke: egui::Stroke) {
    let v = b - a;
    if v.length_sq() <= f32::EPSILON {
        return;
    }
    let dir = v.normalized();
    let size = 10.0;
    let perp = egui::vec2(-dir.y, dir.x);
    let tip = b;
    let base = b - dir * size;
    let left = base + perp * (size * 0.6);
    let right = base - perp * (size * 0.6);
    painter.add(egui::Shape::convex_polygon(
        vec![tip, left, right],
        stroke.color,
        egui::Stroke::NONE,
    ));
}
