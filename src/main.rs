mod app;
mod flow;
mod io;
mod model;
mod store;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Flowpad",
        native_options,
        Box::new(|cc| Ok(Box::new(app::FlowApp::new(cc)))),
    )
}
