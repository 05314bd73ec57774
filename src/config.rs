use std::fs;
use std::path::PathBuf;

use directories::{BaseDirs, ProjectDirs};
use egui::{Color32, Stroke};
use serde::Deserialize;

const CONFIG_FILE_NAME: &str = "floorcal.toml";

fn alpha_to_u8(alpha: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

fn rgba(color: [u8; 3], alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(color[0], color[1], color[2], alpha_to_u8(alpha))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub color: [u8; 3],
    pub alpha: f32,
    pub thickness: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: [80, 200, 120],
            alpha: 1.0,
            thickness: 2.0,
        }
    }
}

impl StrokeStyle {
    pub fn color32(&self) -> Color32 {
        rgba(self.color, self.alpha)
    }

    pub fn stroke(&self) -> Stroke {
        Stroke {
            width: self.thickness.max(0.1),
            color: self.color32(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub font_size: f32,
    pub text_color: [u8; 3],
    pub background: [u8; 3],
    pub background_alpha: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: 13.0,
            text_color: [20, 20, 20],
            background: [255, 255, 255],
            background_alpha: 0.8,
        }
    }
}

impl LabelStyle {
    pub fn text_color32(&self) -> Color32 {
        rgba(self.text_color, 1.0)
    }

    pub fn background32(&self) -> Color32 {
        rgba(self.background, self.background_alpha)
    }

    pub const fn font_size(&self) -> f32 {
        self.font_size.clamp(6.0, 48.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub reference_line: StrokeStyle,
    pub pending_line: StrokeStyle,
    pub rectangle: StrokeStyle,
    pub rectangle_fill_alpha: f32,
    pub labels: LabelStyle,
    pub default_transparency: f32,
    pub image_limits: ImageLimits,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reference_line: StrokeStyle {
                color: [40, 120, 230],
                alpha: 1.0,
                thickness: 2.0,
            },
            pending_line: StrokeStyle {
                color: [150, 150, 150],
                alpha: 0.9,
                thickness: 1.5,
            },
            rectangle: StrokeStyle {
                color: [220, 70, 70],
                alpha: 1.0,
                thickness: 2.0,
            },
            rectangle_fill_alpha: 0.15,
            labels: LabelStyle::default(),
            default_transparency: 1.0,
            image_limits: ImageLimits::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        for path in Self::candidate_paths() {
            if let Ok(contents) = fs::read_to_string(&path) {
                match toml::from_str::<Self>(&contents) {
                    Ok(cfg) => {
                        log::info!("Loaded config from {}", path.display());
                        return cfg;
                    }
                    Err(err) => {
                        log::warn!("Failed to parse config {}: {err}", path.display());
                    }
                }
            }
        }
        Self::default()
    }

    pub fn effective_image_limits(&self) -> ImageLimits {
        self.image_limits.sanitized()
    }

    pub const fn initial_transparency(&self) -> f32 {
        if self.default_transparency.is_nan() {
            1.0
        } else {
            self.default_transparency.clamp(0.0, 1.0)
        }
    }

    pub fn rectangle_fill(&self) -> Color32 {
        rgba(self.rectangle.color, self.rectangle_fill_alpha)
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(exe_path) = std::env::current_exe()
            && let Some(dir) = exe_path.parent()
        {
            paths.push(dir.join(CONFIG_FILE_NAME));
        }

        if let Some(proj_dirs) = ProjectDirs::from("dev", "Floorcal", "Floorcal") {
            paths.push(proj_dirs.config_dir().join(CONFIG_FILE_NAME));
        }

        if let Some(base_dirs) = BaseDirs::new() {
            paths.push(base_dirs.config_dir().join("floorcal").join(CONFIG_FILE_NAME));
        }

        paths
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageLimits {
    pub image_dim: u32,
    pub total_pixels: u64,
    pub alloc_bytes: u64,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            image_dim: 12_000,
            total_pixels: 80_000_000,       // ~80 MP
            alloc_bytes: 512 * 1024 * 1024, // 512 MiB
        }
    }
}

impl ImageLimits {
    pub fn sanitized(&self) -> Self {
        let dim = self.image_dim.clamp(64, 100_000);
        let pixels = self.total_pixels.clamp(1_000_000, 5_000_000_000); // 1 MP .. 5 GP
        let alloc = self
            .alloc_bytes
            .clamp(8 * 1024 * 1024, 8 * 1024 * 1024 * 1024); // 8 MiB .. 8 GiB
        Self {
            image_dim: dim,
            total_pixels: pixels,
            alloc_bytes: alloc,
        }
    }
}
