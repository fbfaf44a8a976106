//! Quill — essay editor with structured model critiques.

mod app;
mod critique;
mod dashboard;
mod document;
mod editor;
mod settings;
mod sound;
mod toolbar;

use eframe::NativeOptions;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1200.0, 800.0])
        .with_min_inner_size([760.0, 480.0])
        .with_title("Quill");

    let options = NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Quill",
        options,
        Box::new(|cc| Box::new(app::QuillApp::new(cc))),
    )
}
