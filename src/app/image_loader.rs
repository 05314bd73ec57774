use super::{FloorcalApp, ImageLoadRequest, ImageLoadResult, PendingImageMeta, PendingImageTask};
use crate::image::{ImageMeta, LoadedImage, decode_image_from_bytes, decode_image_from_path};
use egui::{ColorImage, Context};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, TryRecvError};
use std::thread;

impl FloorcalApp {
    pub(crate) fn start_loading_image_from_path(&mut self, path: PathBuf) {
        self.remember_image_dir_from_path(&path);
        let meta = PendingImageMeta::Path { path: path.clone() };
        self.start_image_load(ImageLoadRequest::Path(path), meta);
    }

    pub(crate) fn start_loading_image_from_bytes(&mut self, name: Option<String>, bytes: Vec<u8>) {
        let meta = PendingImageMeta::DroppedBytes {
            name,
            byte_len: bytes.len(),
        };
        self.start_image_load(ImageLoadRequest::Bytes(bytes), meta);
    }

    fn start_image_load(&mut self, request: ImageLoadRequest, meta: PendingImageMeta) {
        let description = meta.description();
        let cfg = self.config.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = match request {
                ImageLoadRequest::Path(path) => decode_image_from_path(&cfg, &path),
                ImageLoadRequest::Bytes(bytes) => decode_image_from_bytes(&cfg, bytes),
            };
            let msg = match result {
                Ok(color) => ImageLoadResult::Success(color),
                Err(err) => ImageLoadResult::Error(format!("{err:#}")),
            };
            let _ = tx.send(msg);
        });
        log::info!("Loading floorplan {description}");
        self.pending_image_task = Some(PendingImageTask { rx, meta });
        self.set_status(format!("Loading {description}…"));
    }

    /// Picks up a finished decode; a failed one leaves the current image alone.
    pub(crate) fn poll_image_loader(&mut self, ctx: &Context) {
        let Some(task) = self.pending_image_task.take() else {
            return;
        };
        match task.rx.try_recv() {
            Ok(ImageLoadResult::Success(color)) => {
                self.finish_loaded_color_image(ctx, color, task.meta.into_image_meta());
            }
            Ok(ImageLoadResult::Error(err)) => {
                let label = task.meta.description();
                log::warn!("Failed to load {label}: {err}");
                self.set_status(format!("Failed to load {label}: {err}"));
            }
            Err(TryRecvError::Empty) => {
                self.pending_image_task = Some(task);
                ctx.request_repaint();
            }
            Err(TryRecvError::Disconnected) => {
                let label = task.meta.description();
                log::error!("Image worker for {label} disconnected");
                self.set_status(format!("Loading {label} failed: worker disconnected."));
            }
        }
    }

    pub(crate) fn finish_loaded_color_image(
        &mut self,
        ctx: &Context,
        color: ColorImage,
        meta: ImageMeta,
    ) {
        let name = meta.display_name();
        let [w, h] = color.size;
        let loaded = LoadedImage::from_color_image(ctx, color);
        self.set_loaded_image(loaded, meta);
        log::info!("Loaded floorplan {name} ({w}x{h})");
        self.set_status(format!("Loaded {name}"));
    }

    /// Loads the first dropped file that carries a path or bytes.
    pub(crate) fn handle_dropped_files(&mut self, ctx: &Context) {
        let dropped_files = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped_files.is_empty() {
            return;
        }
        for f in &dropped_files {
            if let Some(path) = &f.path {
                log::debug!("Drop: loading from path {}", path.display());
                self.start_loading_image_from_path(path.clone());
                return;
            }
            if let Some(bytes) = &f.bytes {
                log::debug!("Drop: loading {} bytes named '{}'", bytes.len(), f.name);
                self.start_loading_image_from_bytes(
                    (!f.name.is_empty()).then(|| f.name.clone()),
                    bytes.to_vec(),
                );
                return;
            }
        }
        self.set_status("Drop failed: no readable bytes/path");
    }

    pub(crate) fn remember_image_dir_from_path(&mut self, path: &Path) {
        let dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        self.last_image_dir = Some(dir);
    }
}
