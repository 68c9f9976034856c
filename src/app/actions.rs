use crate::flow::Canvas;
use crate::io;

use super::{FlowApp, settings};

impl FlowApp {
    /// Export via a native save dialog; the suggested file name embeds the
    /// current epoch millis so repeated exports do not collide.
    pub(super) fn export_dialog(&mut self) {
        let default_name = io::export_file_name();
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(&default_name)
            .add_filter("JSON", &["json"])
            .save_file()
        {
            let path_str = path.display().to_string();
            match io::to_json(&self.flow.document()) {
                Ok(json) => match std::fs::write(&path, json) {
                    Ok(()) => {
                        log::info!("exported flow to {path_str}");
                        self.status = Some(format!("Exported {path_str}"));
                    }
                    Err(e) => self.status = Some(format!("Export failed: {e}")),
                },
                Err(e) => self.status = Some(format!("Serialize failed: {e}")),
            }
        }
    }

    pub(super) fn quick_export(&mut self) {
        match io::to_json(&self.flow.document()) {
            Ok(json) => match std::fs::write(&self.export_path, json) {
                Ok(()) => {
                    log::info!("exported flow to {}", self.export_path);
                    self.status = Some(format!("Exported {}", self.export_path));
                }
                Err(e) => self.status = Some(format!("Export failed: {e}")),
            },
            Err(e) => self.status = Some(format!("Serialize failed: {e}")),
        }
    }

    /// Import via a native open dialog. A rejected file leaves the current
    /// diagram untouched and raises a blocking error dialog; an accepted
    /// one replaces both collections and recenters the canvas.
    pub(super) fn import_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            let path_str = path.display().to_string();
            match std::fs::read_to_string(&path) {
                Ok(text) => match io::parse_document(&text) {
                    Ok(doc) => {
                        log::info!(
                            "imported {} nodes, {} connections from {path_str}",
                            doc.nodes.len(),
                            doc.connections.len()
                        );
                        self.flow.replace(doc.nodes, doc.connections);
                        self.view.reset_view();
                        self.status = Some(format!("Imported {path_str}"));
                    }
                    Err(e) => {
                        log::warn!("rejected import of {path_str}: {e}");
                        self.status = Some(format!("Import failed: {e}"));
                        rfd::MessageDialog::new()
                            .set_level(rfd::MessageLevel::Error)
                            .set_title("Import failed")
                            .set_description(e.to_string())
                            .show();
                    }
                },
                Err(e) => self.status = Some(format!("Read failed: {e}")),
            }
        }
    }

    pub(super) fn persist_settings(&mut self) {
        let snapshot = settings::AppSettings {
            export_path: self.export_path.clone(),
            show_grid: self.show_grid,
            grid_size: self.grid_size,
        };
        if let Err(e) = settings::save_settings(&self.settings_path, &snapshot) {
            self.status = Some(format!("Settings save failed: {e}"));
        }
    }
}
