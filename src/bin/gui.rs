// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use std::path::PathBuf;

use eframe::egui::ViewportBuilder;
use pick_csv::{config::state::GuiState, gui};

fn main() {
    // optional: document to open on start
    let initial = std::env::args_os().nth(1).map(PathBuf::from);

    let size = GuiState::default();
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("Pick CSV")
            .with_inner_size([size.window_w as f32, size.window_h as f32]),
        ..Default::default()
    };

    if let Err(e) = gui::run(options, initial) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
