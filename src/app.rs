//! Main egui/eframe application state and UI orchestration.

use crate::calibration::CalibrationRequest;
use crate::config::AppConfig;
use crate::image::{ImageMeta, LoadedImage};
use crate::session::{DrawMode, Session};
use egui::{ColorImage, Context, Key};
use egui_file_dialog::{DialogState, FileDialog};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

mod clipboard;
mod image_loader;
mod ui;

enum ImageLoadRequest {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

enum ImageLoadResult {
    Success(ColorImage),
    Error(String),
}

#[derive(Clone)]
enum PendingImageMeta {
    Path { path: PathBuf },
    DroppedBytes { name: Option<String>, byte_len: usize },
}

impl PendingImageMeta {
    fn description(&self) -> String {
        match self {
            Self::Path { path } => path
                .file_name()
                .and_then(|s| s.to_str())
                .map_or_else(|| path.display().to_string(), str::to_string),
            Self::DroppedBytes { name, .. } => name
                .as_deref()
                .map_or_else(|| "dropped bytes".to_string(), str::to_string),
        }
    }

    fn into_image_meta(self) -> ImageMeta {
        match self {
            Self::Path { path } => ImageMeta::from_path(&path),
            Self::DroppedBytes { name, byte_len } => {
                ImageMeta::from_dropped_bytes(name.as_deref(), byte_len)
            }
        }
    }
}

struct PendingImageTask {
    rx: Receiver<ImageLoadResult>,
    meta: PendingImageMeta,
}

/// The open length prompt for a freshly drawn reference line.
struct CalibrationPrompt {
    request: CalibrationRequest,
    input: String,
    focus_requested: bool,
}

impl CalibrationPrompt {
    const fn new(request: CalibrationRequest) -> Self {
        Self {
            request,
            input: String::new(),
            focus_requested: false,
        }
    }
}

/// Top-level application state for the Floorcal UI.
pub struct FloorcalApp {
    config: AppConfig,
    session: Session,
    image: Option<LoadedImage>,
    image_meta: Option<ImageMeta>,
    pending_image_task: Option<PendingImageTask>,
    prompt: Option<CalibrationPrompt>,
    active_dialog: Option<FileDialog>,
    last_image_dir: Option<PathBuf>,
    last_status: Option<String>,
    measurements_open: bool,
}

impl FloorcalApp {
    pub fn new(config: AppConfig, initial_path: Option<&Path>) -> Self {
        let session = Session::new(config.initial_transparency());
        let mut app = Self {
            config,
            session,
            image: None,
            image_meta: None,
            pending_image_task: None,
            prompt: None,
            active_dialog: None,
            last_image_dir: None,
            last_status: None,
            measurements_open: false,
        };
        if let Some(path) = initial_path {
            app.start_loading_image_from_path(path.to_owned());
        }
        app
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        log::debug!("status: {msg}");
        self.last_status = Some(msg);
    }

    fn set_loaded_image(&mut self, image: LoadedImage, meta: ImageMeta) {
        self.image = Some(image);
        self.image_meta = Some(meta);
    }

    fn toggle_mode(&mut self, mode: DrawMode) {
        let target = if self.session.mode() == mode {
            DrawMode::None
        } else {
            mode
        };
        match self.session.set_mode(target) {
            Ok(()) => self.set_status(target.label()),
            Err(err) => self.set_status(err.to_string()),
        }
    }

    fn leave_mode(&mut self) {
        if self.session.mode() != DrawMode::None && self.session.set_mode(DrawMode::None).is_ok() {
            self.set_status("Drawing mode off.");
        }
    }

    fn open_calibration_prompt(&mut self, request: CalibrationRequest) {
        self.set_status(format!(
            "Enter the real length of the {} reference line.",
            request.axis.label()
        ));
        self.prompt = Some(CalibrationPrompt::new(request));
    }

    fn handle_hotkeys(&mut self, ctx: &Context) {
        if ctx.wants_keyboard_input() || self.prompt.is_some() {
            return;
        }
        // Ctrl/Cmd + O: open image
        if self.active_dialog.is_none() && ctx.input(|i| i.key_pressed(Key::O) && i.modifiers.command)
        {
            self.open_image_dialog();
        }
        // Ctrl/Cmd + V: paste image from clipboard
        if self.active_dialog.is_none() && ctx.input(|i| i.key_pressed(Key::V) && i.modifiers.command)
        {
            self.paste_image_from_clipboard(ctx);
        }
        // Ctrl/Cmd + M: measurements window
        if ctx.input(|i| i.key_pressed(Key::M) && i.modifiers.command) {
            self.measurements_open = !self.measurements_open;
        }
        if ctx.input(|i| i.key_pressed(Key::L) && i.modifiers.is_none()) {
            self.toggle_mode(DrawMode::Line);
        }
        if ctx.input(|i| i.key_pressed(Key::R) && i.modifiers.is_none()) {
            self.toggle_mode(DrawMode::Rectangle);
        }
        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            self.leave_mode();
        }
    }

    fn update_file_dialog(&mut self, ctx: &Context) {
        let Some(dialog) = self.active_dialog.as_mut() else {
            return;
        };
        dialog.update(ctx);
        let mut close_dialog = false;
        if let Some(path) = dialog.take_picked() {
            self.start_loading_image_from_path(path);
            close_dialog = true;
        } else {
            match dialog.state() {
                DialogState::Cancelled => {
                    self.set_status("Open canceled.");
                    close_dialog = true;
                }
                DialogState::Closed => close_dialog = true,
                _ => {}
            }
        }
        if close_dialog {
            self.active_dialog = None;
        }
    }
}

impl eframe::App for FloorcalApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_image_loader(ctx);
        self.handle_dropped_files(ctx);
        self.handle_hotkeys(ctx);

        egui::TopBottomPanel::top("top").show(ctx, |ui| self.ui_top(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.ui_status_bar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.ui_canvas(ui));
        self.ui_calibration_prompt(ctx);
        self.ui_measurements_window(ctx);
        self.update_file_dialog(ctx);
    }

    // Panels are laid out against the context in `update`.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}
}
