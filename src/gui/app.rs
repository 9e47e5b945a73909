// src/gui/app.rs
use std::{
    error::Error,
    path::{Path, PathBuf},
    time::Instant,
};

use eframe::egui;

use crate::{
    config::state::AppState,
    core::html,
    dom::NodeId,
    file,
    message::{Command, Outbound},
    page::Page,
    picker::PickKind,
};

pub fn run(options: eframe::NativeOptions, initial: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Pick CSV",
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(AppState::default(), initial)))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // loaded document with its picker and widgets
    pub page: Option<Page>,

    // prompt shown while a pick is in flight (the companion UI)
    pub picking: Option<PickKind>,

    // innermost drawn node (cell, item or block) under the pointer last frame
    pub hovered: Option<NodeId>,

    pub status: String,
    pub started: Instant,
}

impl App {
    pub fn new(mut state: AppState, initial: Option<PathBuf>) -> Self {
        state.gui.out_dir_text = state.options.export.out_dir().to_string_lossy().into();

        let mut app = Self {
            state,
            page: None,
            picking: None,
            hovered: None,
            status: s!("Open an HTML file to begin"),
            started: Instant::now(),
        };

        if let Some(path) = initial {
            app.state.gui.html_path_text = path.to_string_lossy().into();
            app.load(&path);
        }
        app
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn status<T: Into<String>>(&mut self, msg: T) {
        self.status = msg.into();
    }

    /// Event timestamp: milliseconds since the window opened.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /* ---------- document ---------- */

    pub fn load(&mut self, path: &Path) {
        match html::read_document(path) {
            Ok(doc) => {
                let page = Page::with_options(doc, self.state.options.page.clone());
                let tables = page.candidates(PickKind::Table).len();
                let lists = page.candidates(PickKind::List).len();
                logf!("GUI: Loaded {} (tables={}, lists={})", path.display(), tables, lists);
                self.status(format!("Loaded {}: {} table(s), {} list(s)", path.display(), tables, lists));
                self.page = Some(page);
                self.picking = None;
                self.hovered = None;
            }
            Err(e) => {
                loge!("GUI: Failed to load {}: {}", path.display(), e);
                self.status(format!("Failed to load {}: {}", path.display(), e));
            }
        }
    }

    pub fn load_from_text(&mut self) {
        let text = self.state.gui.html_path_text.trim().to_string();
        if text.is_empty() {
            self.status("Enter a path to an HTML file");
            return;
        }
        self.load(&PathBuf::from(file::normalize_separators(&text)));
    }

    /* ---------- companion UI ---------- */

    pub fn send(&mut self, cmd: Command) {
        let Some(page) = self.page.as_mut() else { return };
        page.handle_command(cmd);
        match cmd {
            Command::StartPicking { element_type } => {
                self.picking = Some(element_type);
                // re-enter the node under the pointer so it highlights at once
                self.hovered = None;
                self.status(format!("Hover a {} and click it", element_type.label()));
            }
            Command::DisablePicking => {
                self.picking = None;
                self.status("Picking cancelled");
            }
        }
    }

    /// Drain what the page queued this frame: popup messages and downloads.
    pub fn after_events(&mut self) {
        let Some(page) = self.page.as_mut() else { return };
        let outbox = page.take_outbox();
        let downloads = page.take_downloads();

        for msg in outbox {
            logd!("GUI: Outbound {}", msg.to_json());
            match msg {
                Outbound::ClosePopup => {
                    if let Some(kind) = self.picking.take() {
                        self.status(format!("Picked a {}", kind.label()));
                    }
                }
            }
        }

        for dl in downloads {
            self.sync_out_dir();
            match file::save_download(&self.state.options.export, &dl) {
                Ok(path) => self.status(format!("Saved {}", path.display())),
                Err(e) => {
                    loge!("GUI: Save failed for {}: {}", dl.filename, e);
                    self.status(format!("Save failed: {}", e));
                }
            }
        }
    }

    /// Mirror the out-dir text field → ExportOptions.
    pub fn sync_out_dir(&mut self) {
        if !self.state.gui.out_dir_dirty { return; }
        self.state.options.export.set_out_dir(&self.state.gui.out_dir_text);
        self.state.gui.out_dir_dirty = false;
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            crate::gui::components::toolbar::draw(ui, self);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            crate::gui::components::document_view::draw(ui, self);
        });

        self.after_events();
    }
}
