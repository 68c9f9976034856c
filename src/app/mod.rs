use crate::flow::{self, FlowState};
use crate::model;
use eframe::egui;

mod actions;
mod geometry;
mod render;
mod settings;
mod update;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tool {
    Select,
    Circle,
    Rect,
    Diamond,
    Connect,
    Pan,
}

impl Tool {
    /// The shape name a creation gesture with this tool carries, if any.
    fn shape(self) -> Option<&'static str> {
        match self {
            Tool::Circle => Some(model::SHAPE_CIRCLE),
            Tool::Rect => Some(model::SHAPE_RECT),
            Tool::Diamond => Some(model::SHAPE_DIAMOND),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
enum InProgress {
    DragShape {
        start: egui::Pos2,
        current: egui::Pos2,
    },
    Connect {
        source_id: String,
        current: egui::Pos2,
    },
}

/// Pan/zoom transform between world and screen space. This is the canvas
/// surface the flow glue sees: `reset_view` records a fit request that the
/// next frame consumes once the viewport rect is known.
#[derive(Clone, Copy, Debug)]
pub struct View {
    pan_screen: egui::Vec2,
    zoom: f32,
    fit_requested: bool,
}

impl Default for View {
    fn default() -> Self {
        Self {
            pan_screen: egui::Vec2::ZERO,
            zoom: 1.0,
            fit_requested: false,
        }
    }
}

impl View {
    fn world_to_screen(&self, origin: egui::Pos2, world: egui::Pos2) -> egui::Pos2 {
        origin + self.pan_screen + world.to_vec2() * self.zoom
    }

    fn screen_to_world(&self, origin: egui::Pos2, screen: egui::Pos2) -> egui::Pos2 {
        ((screen - origin - self.pan_screen) / self.zoom).to_pos2()
    }

    fn zoom_about_screen_point(
        &mut self,
        origin: egui::Pos2,
        screen_point: egui::Pos2,
        zoom_delta: f32,
    ) {
        let before = self.screen_to_world(origin, screen_point);
        self.zoom = (self.zoom * zoom_delta).clamp(0.1, 8.0);
        let after_screen = self.world_to_screen(origin, before);
        self.pan_screen += screen_point - after_screen;
    }

    /// Reset zoom to 100% and center the given world bounds in the
    /// viewport. Called once the viewport rect is known.
    fn fit(&mut self, viewport: egui::Rect, content: egui::Rect) {
        self.zoom = 1.0;
        self.pan_screen = viewport.center() - viewport.min - content.center().to_vec2();
        self.fit_requested = false;
    }
}

impl flow::Canvas for View {
    fn reset_view(&mut self) {
        self.fit_requested = true;
    }
}

pub struct FlowApp {
    flow: FlowState,
    view: View,
    tool: Tool,
    tool_before_pan: Option<Tool>,
    node_text: String,
    in_progress: Option<InProgress>,
    status: Option<String>,
    canvas_ready: bool,
    export_path: String,
    show_grid: bool,
    grid_size: f32,
    settings_path: String,
}

impl FlowApp {
    fn config_path() -> Option<String> {
        if let Some(home) = std::env::var_os("HOME") {
            let path = std::path::PathBuf::from(home)
                .join(".config")
                .join("flowpad.toml");
            if path.exists() {
                return Some(path.display().to_string());
            }
        }
        if std::path::Path::new("settings.toml").exists() {
            return Some("settings.toml".to_string());
        }
        None
    }

    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = Self::config_path().unwrap_or_else(|| "settings.toml".to_string());
        let settings = settings::load_settings(&settings_path).unwrap_or_default();

        let mut flow = FlowState::seeded();
        let ctx = cc.egui_ctx.clone();
        flow.observe(move || ctx.request_repaint());

        Self {
            flow,
            view: View::default(),
            tool: Tool::Select,
            tool_before_pan: None,
            node_text: "New Node".to_string(),
            in_progress: None,
            status: None,
            canvas_ready: false,
            export_path: settings.export_path,
            show_grid: settings.show_grid,
            grid_size: settings.grid_size,
            settings_path,
        }
    }
}
