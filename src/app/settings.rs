use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct AppSettings {
    pub export_path: String,
    pub show_grid: bool,
    pub grid_size: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            export_path: "flow-diagram.json".to_string(),
            show_grid: true,
            grid_size: 64.0,
        }
    }
}

pub(super) fn load_settings(path: &str) -> Option<AppSettings> {
    let s = std::fs::read_to_string(path).ok()?;
    if path.ends_with(".toml") {
        toml::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| serde_json::from_str::<AppSettings>(&s).ok())
    } else {
        serde_json::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| toml::from_str::<AppSettings>(&s).ok())
    }
}

pub(super) fn save_settings(path: &str, settings: &AppSettings) -> Result<(), String> {
    if path.ends_with(".toml") {
        let toml = toml::to_string_pretty(settings).map_err(|e| e.to_string())?;
        std::fs::write(path, toml).map_err(|e| e.to_string())
    } else {
        let json = serde_json::to_string_pretty(settings).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| e.to_string())
    }
}
