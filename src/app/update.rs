use crate::flow::{self, Canvas, CreateConnectionEvent, CreateNodeEvent, EventRect, NodePayload};
use eframe::egui;

use super::geometry::{content_bounds, topmost_node_at};
use super::render::{
    draw_background, draw_connections, draw_in_progress, draw_nodes, tool_button,
};
use super::{FlowApp, InProgress, Tool};

const DEFAULT_NODE_SIZE: egui::Vec2 = egui::vec2(120.0, 60.0);
const MIN_DRAG_SIZE: f32 = 4.0;

impl eframe::App for FlowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.canvas_ready {
            flow::canvas_loaded(Some(&mut self.view));
            self.canvas_ready = true;
        }

        let wants_keyboard = ctx.wants_keyboard_input();
        ctx.input_mut(|i| {
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::O) {
                self.import_dialog();
            }
            if i.consume_key(egui::Modifiers::COMMAND, egui::Key::S) {
                self.export_dialog();
            }
            if !wants_keyboard {
                if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                    self.tool = Tool::Select;
                    self.in_progress = None;
                    self.tool_before_pan = None;
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::V) {
                    self.tool = Tool::Select;
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::C) {
                    self.tool = Tool::Circle;
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::R) {
                    self.tool = Tool::Rect;
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::D) {
                    self.tool = Tool::Diamond;
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::L) {
                    self.tool = Tool::Connect;
                }
            }
        });

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Import JSON... (⌘O)").clicked() {
                        self.import_dialog();
                        ui.close_menu();
                    }
                    if ui.button("Export JSON... (⌘S)").clicked() {
                        self.export_dialog();
                        ui.close_menu();
                    }
                    ui.separator();
                    ui.label("Quick export path:");
                    if ui.text_edit_singleline(&mut self.export_path).changed() {
                        self.persist_settings();
                    }
                    if ui.small_button("Quick Export").clicked() {
                        self.quick_export();
                        ui.close_menu();
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Reset View").clicked() {
                        self.view.reset_view();
                        ui.close_menu();
                    }
                    if ui.checkbox(&mut self.show_grid, "Show Grid").changed() {
                        self.persist_settings();
                    }
                });
                ui.separator();
                tool_button(ui, "Select (V)", Tool::Select, &mut self.tool);
                tool_button(ui, "Circle (C)", Tool::Circle, &mut self.tool);
                tool_button(ui, "Rect (R)", Tool::Rect, &mut self.tool);
                tool_button(ui, "Diamond (D)", Tool::Diamond, &mut self.tool);
                tool_button(ui, "Connect (L)", Tool::Connect, &mut self.tool);
                tool_button(ui, "Pan", Tool::Pan, &mut self.tool);
                ui.separator();
                ui.label("Node text:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.node_text).desired_width(140.0),
                );
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(status) = &self.status {
                    ui.label(status);
                } else {
                    ui.label("Ready");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Zoom: {:.0}%", self.view.zoom * 100.0));
                    ui.separator();
                    ui.label(format!("Connections: {}", self.flow.connections().len()));
                    ui.separator();
                    ui.label(format!("Nodes: {}", self.flow.nodes().len()));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
            let origin = rect.min;

            let space_down =
                ctx.input(|i| i.key_down(egui::Key::Space)) && !ctx.wants_keyboard_input();
            if space_down {
                if self.tool_before_pan.is_none() {
                    self.tool_before_pan = Some(self.tool);
                    self.tool = Tool::Pan;
                }
            } else if let Some(prev) = self.tool_before_pan.take() {
                if self.tool == Tool::Pan {
                    self.tool = prev;
                }
            }

            let scroll_delta = ctx.input(|i| i.raw_scroll_delta.y);
            if scroll_delta.abs() > 0.0 {
                if let Some(hover_pos) = ctx.input(|i| i.pointer.hover_pos()) {
                    if rect.contains(hover_pos) {
                        let zoom_delta = (1.0 + scroll_delta * 0.001).clamp(0.8, 1.25);
                        self.view
                            .zoom_about_screen_point(origin, hover_pos, zoom_delta);
                    }
                }
            }

            if self.tool == Tool::Pan && response.dragged() {
                self.view.pan_screen += response.drag_delta();
            }

            // A pending fit request (canvas load, import, Reset View) is
            // applied here, where the viewport rect is finally known.
            if self.view.fit_requested {
                let content = content_bounds(self.flow.nodes())
                    .unwrap_or(egui::Rect::from_min_size(egui::Pos2::ZERO, DEFAULT_NODE_SIZE));
                self.view.fit(rect, content);
            }

            let pointer_pos = ctx.input(|i| i.pointer.interact_pos());
            let pointer_world = pointer_pos.map(|p| self.view.screen_to_world(origin, p));

            let pressed = response.drag_started();
            let released = response.drag_stopped();

            match self.tool {
                Tool::Circle | Tool::Rect | Tool::Diamond => {
                    if pressed {
                        if let Some(world) = pointer_world {
                            self.in_progress = Some(InProgress::DragShape {
                                start: world,
                                current: world,
                            });
                        }
                    }
                    if let Some(InProgress::DragShape { current, .. }) = &mut self.in_progress {
                        if let Some(world) = pointer_world {
                            *current = world;
                        }
                    }
                    if released {
                        if let Some(InProgress::DragShape { start, current }) =
                            self.in_progress.take()
                        {
                            let r = egui::Rect::from_two_pos(start, current);
                            if r.width() >= MIN_DRAG_SIZE && r.height() >= MIN_DRAG_SIZE {
                                if let Some(shape) = self.tool.shape() {
                                    self.flow.create_node(CreateNodeEvent {
                                        payload: Some(NodePayload {
                                            text: self.node_text.clone(),
                                            shape: shape.to_string(),
                                        }),
                                        rect: EventRect {
                                            x: r.min.x,
                                            y: r.min.y,
                                            width: r.width(),
                                            height: r.height(),
                                        },
                                    });
                                }
                            }
                        }
                    }
                }
                Tool::Connect => {
                    if pressed {
                        if let Some(world) = pointer_world {
                            if let Some(node) = topmost_node_at(self.flow.nodes(), world) {
                                self.in_progress = Some(InProgress::Connect {
                                    source_id: node.id.clone(),
                                    current: world,
                                });
                            }
                        }
                    }
                    if let Some(InProgress::Connect { current, .. }) = &mut self.in_progress {
                        if let Some(world) = pointer_world {
                            *current = world;
                        }
                    }
                    if released {
                        if let Some(InProgress::Connect { source_id, current }) =
                            self.in_progress.take()
                        {
                            // Released over empty space leaves input_id
                            // unset; the event adapter drops the event.
                            let input_id = topmost_node_at(self.flow.nodes(), current)
                                .map(|n| n.id.clone());
                            self.flow.create_connection(CreateConnectionEvent {
                                output_id: Some(source_id),
                                input_id,
                            });
                        }
                    }
                }
                Tool::Select => {
                    if response.double_clicked() {
                        if let Some(world) = pointer_world {
                            if topmost_node_at(self.flow.nodes(), world).is_none() {
                                // Payload-less creation: defaults apply.
                                self.flow.create_node(CreateNodeEvent {
                                    payload: None,
                                    rect: EventRect {
                                        x: world.x - DEFAULT_NODE_SIZE.x * 0.5,
                                        y: world.y - DEFAULT_NODE_SIZE.y * 0.5,
                                        width: DEFAULT_NODE_SIZE.x,
                                        height: DEFAULT_NODE_SIZE.y,
                                    },
                                });
                            }
                        }
                    } else if response.clicked() {
                        if let Some(world) = pointer_world {
                            if let Some(node) = topmost_node_at(self.flow.nodes(), world) {
                                self.status = Some(format!("{} ({})", node.text, node.shape));
                            }
                        }
                    }
                }
                Tool::Pan => {}
            }

            let painter = ui.painter_at(rect);
            draw_background(&painter, rect, &self.view, self.show_grid, self.grid_size);
            draw_connections(&painter, origin, &self.view, &self.flow);
            draw_nodes(&painter, origin, &self.view, &self.flow);
            if let Some(in_progress) = &self.in_progress {
                draw_in_progress(&painter, origin, &self.view, &self.flow, in_progress);
            }
        });
    }
}
