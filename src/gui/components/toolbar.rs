// src/gui/components/toolbar.rs
//
// Top bar: document path, download folder, and the picking prompt that
// stands in for the companion popup.

use eframe::egui::{self, RichText, TextStyle};

use crate::{gui::app::App, message::Command, picker::PickKind};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.label("HTML file:");
        let resp = ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.html_path_text)
                .font(TextStyle::Monospace)
                .desired_width(360.0),
        );
        let submitted = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Open").clicked() || submitted {
            app.load_from_text();
        }

        ui.separator();

        ui.label("Save to:");
        let resp = ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.out_dir_text)
                .font(TextStyle::Monospace)
                .desired_width(200.0),
        );
        if resp.changed() {
            app.state.gui.out_dir_dirty = true;
        }
        if resp.lost_focus() {
            app.sync_out_dir();
        }
    });

    ui.horizontal(|ui| {
        let loaded = app.page.is_some();
        match app.picking {
            None => {
                for kind in [PickKind::Table, PickKind::List] {
                    let label = format!("Pick {}", kind.label());
                    if ui.add_enabled(loaded, egui::Button::new(label)).clicked() {
                        app.send(Command::StartPicking { element_type: kind });
                    }
                }
            }
            Some(kind) => {
                ui.label(RichText::new(format!("Picking: hover a {} and click it", kind.label())).strong());
                if ui.button("Cancel").clicked() {
                    app.send(Command::DisablePicking);
                }
            }
        }
    });
}
