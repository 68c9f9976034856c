use crate::model::{self, Node};
use eframe::egui;

pub(super) fn rotated_rect_points(rect: egui::Rect, rotation_deg: f32) -> [egui::Pos2; 4] {
    let center = rect.center();
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ];
    if rotation_deg.abs() <= f32::EPSILON {
        return corners;
    }
    let rad = rotation_deg.to_radians();
    let (sin, cos) = rad.sin_cos();
    corners.map(|p| {
        let v = p - center;
        center + egui::vec2(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
    })
}

pub(super) fn ellipse_points(rect: egui::Rect) -> Vec<egui::Pos2> {
    let center = rect.center();
    let rx = rect.width() * 0.5;
    let ry = rect.height() * 0.5;
    let steps = 48;
    (0..steps)
        .map(|i| {
            let t = (i as f32) / (steps as f32) * std::f32::consts::TAU;
            center + egui::vec2(t.cos() * rx, t.sin() * ry)
        })
        .collect()
}

fn ellipse_contains(rect: egui::Rect, p: egui::Pos2) -> bool {
    let rx = rect.width() * 0.5;
    let ry = rect.height() * 0.5;
    if rx <= f32::EPSILON || ry <= f32::EPSILON {
        return false;
    }
    let v = p - rect.center();
    let nx = v.x / rx;
    let ny = v.y / ry;
    nx * nx + ny * ny <= 1.0
}

fn rotated_rect_contains(rect: egui::Rect, rotation_deg: f32, p: egui::Pos2) -> bool {
    if rotation_deg.abs() <= f32::EPSILON {
        return rect.contains(p);
    }
    // Inverse-rotate the point about the rect center, then a plain test.
    let center = rect.center();
    let rad = (-rotation_deg).to_radians();
    let (sin, cos) = rad.sin_cos();
    let v = p - center;
    let local = center + egui::vec2(v.x * cos - v.y * sin, v.x * sin + v.y * cos);
    rect.contains(local)
}

pub(super) fn node_contains(node: &Node, world: egui::Pos2) -> bool {
    let rect = node.rect();
    if node.shape == model::SHAPE_CIRCLE {
        ellipse_contains(rect, world)
    } else {
        rotated_rect_contains(rect, node.rotate, world)
    }
}

/// Last node in insertion order wins, matching paint order.
pub(super) fn topmost_node_at(nodes: &[Node], world: egui::Pos2) -> Option<&Node> {
    nodes.iter().rev().find(|n| node_contains(n, world))
}

/// Point on the node's outline where an edge toward `toward` leaves it.
/// Falls back to the center for degenerate geometry.
pub(super) fn node_anchor(node: &Node, toward: egui::Pos2) -> egui::Pos2 {
    let rect = node.rect();
    let center = rect.center();
    let d = toward - center;
    if d.length_sq() <= f32::EPSILON {
        return center;
    }
    if node.shape == model::SHAPE_CIRCLE {
        let rx = rect.width() * 0.5;
        let ry = rect.height() * 0.5;
        if rx <= f32::EPSILON || ry <= f32::EPSILON {
            return center;
        }
        let nx = d.x / rx;
        let ny = d.y / ry;
        let t = 1.0 / (nx * nx + ny * ny).sqrt();
        return center + d * t.min(1.0);
    }
    let hw = rect.width() * 0.5;
    let hh = rect.height() * 0.5;
    let tx = if d.x.abs() > f32::EPSILON {
        hw / d.x.abs()
    } else {
        f32::INFINITY
    };
    let ty = if d.y.abs() > f32::EPSILON {
        hh / d.y.abs()
    } else {
        f32::INFINITY
    };
    let t = tx.min(ty).min(1.0);
    center + d * t
}

/// World-space bounds of the whole diagram, used by view fitting.
pub(super) fn content_bounds(nodes: &[Node]) -> Option<egui::Rect> {
    let mut it = nodes.iter();
    let first = it.next()?.rect();
    Some(it.fold(first, |acc, n| acc.union(n.rect())))
}
