use super::FloorcalApp;
use crate::config::AppConfig;
use crate::image::{ImageMeta, human_readable_bytes};
use arboard::{Clipboard, Error as ClipboardError};
use egui::{ColorImage, Context};

struct ClipboardCapture {
    image: ColorImage,
    byte_len: usize,
}

impl FloorcalApp {
    pub(crate) fn paste_image_from_clipboard(&mut self, ctx: &Context) {
        self.pending_image_task = None;
        match capture_clipboard_image(&self.config) {
            Ok(captured) => {
                let meta = ImageMeta::from_clipboard(u64::try_from(captured.byte_len).ok());
                self.finish_loaded_color_image(ctx, captured.image, meta);
            }
            Err(err) => {
                log::warn!("{err}");
                self.set_status(err);
            }
        }
    }
}

fn capture_clipboard_image(cfg: &AppConfig) -> Result<ClipboardCapture, String> {
    let mut clipboard = Clipboard::new().map_err(format_clipboard_error)?;
    let data = clipboard.get_image().map_err(format_clipboard_error)?;
    let expected_len = validate_clipboard_image(cfg, data.width, data.height)?;
    let bytes = data.bytes.into_owned();
    if bytes.len() < expected_len {
        return Err("Paste failed: clipboard image data is truncated.".to_string());
    }
    let image =
        ColorImage::from_rgba_unmultiplied([data.width, data.height], &bytes[..expected_len]);
    Ok(ClipboardCapture {
        image,
        byte_len: expected_len,
    })
}

/// Checks clipboard dimensions against the decode limits; returns the RGBA byte length.
fn validate_clipboard_image(cfg: &AppConfig, width: usize, height: usize) -> Result<usize, String> {
    if width == 0 || height == 0 {
        return Err("Paste failed: clipboard image is empty.".to_string());
    }
    let limits = cfg.effective_image_limits();
    let width_u32 = u32::try_from(width).unwrap_or(u32::MAX);
    let height_u32 = u32::try_from(height).unwrap_or(u32::MAX);
    if width_u32 > limits.image_dim || height_u32 > limits.image_dim {
        return Err(format!(
            "Paste failed: clipboard image {width}x{height} exceeds the per-side limit ({} px).",
            limits.image_dim
        ));
    }

    let total_pixels = u64::try_from(width)
        .ok()
        .and_then(|w| u64::try_from(height).ok().and_then(|h| w.checked_mul(h)))
        .ok_or_else(|| {
            "Paste failed: clipboard dimensions are too large for this system.".to_string()
        })?;
    if total_pixels > limits.total_pixels {
        return Err(format!(
            "Paste failed: clipboard image too large: {width}x{height} (~{} MP) exceeds limit (~{} MP).",
            total_pixels / 1_000_000,
            limits.total_pixels / 1_000_000
        ));
    }

    let rgba_bytes = total_pixels
        .checked_mul(4)
        .ok_or_else(|| "Paste failed: clipboard image is too large to fit in memory.".to_string())?;
    if rgba_bytes > limits.alloc_bytes {
        return Err(format!(
            "Paste failed: clipboard image needs about {}, over the configured limit ({}).",
            human_readable_bytes(rgba_bytes),
            human_readable_bytes(limits.alloc_bytes)
        ));
    }

    usize::try_from(rgba_bytes)
        .map_err(|_| "Paste failed: clipboard image does not fit in available memory.".to_string())
}

fn format_clipboard_error(err: ClipboardError) -> String {
    match err {
        ClipboardError::ContentNotAvailable => {
            "Paste failed: clipboard does not contain an image.".to_string()
        }
        ClipboardError::ClipboardNotSupported => {
            "Paste failed: clipboard access is not supported in this environment.".to_string()
        }
        ClipboardError::ClipboardOccupied => {
            "Paste failed: clipboard is busy; try again in a moment.".to_string()
        }
        _ => format!("Paste failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_clipboard_image_is_rejected() {
        let cfg = AppConfig::default();
        assert!(validate_clipboard_image(&cfg, 0, 10).is_err());
    }

    #[test]
    fn oversized_side_is_rejected() {
        let cfg = AppConfig::default();
        let err = validate_clipboard_image(&cfg, 20_000, 10).expect_err("too wide");
        assert!(err.contains("per-side limit"));
    }

    #[test]
    fn valid_size_yields_rgba_length() {
        let cfg = AppConfig::default();
        assert_eq!(validate_clipboard_image(&cfg, 100, 50), Ok(100 * 50 * 4));
    }
}
