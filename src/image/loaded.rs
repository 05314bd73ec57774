use egui::{ColorImage, Context, TextureHandle, TextureOptions, Vec2};

/// The floorplan currently on screen. Holding a new one drops the old texture.
pub struct LoadedImage {
    pub size: [usize; 2],
    pub texture: TextureHandle,
}

impl LoadedImage {
    pub fn from_color_image(ctx: &Context, pixels: ColorImage) -> Self {
        let size = pixels.size;
        let texture = ctx.load_texture("floorplan", pixels, TextureOptions::LINEAR);
        Self { size, texture }
    }

    /// Size in canvas pixels; the canvas maps 1:1 onto image pixels.
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(usize_to_f32(self.size[0]), usize_to_f32(self.size[1]))
    }
}

fn usize_to_f32(value: usize) -> f32 {
    let clamped = u32::try_from(value).unwrap_or(u32::MAX);
    #[allow(clippy::cast_precision_loss)]
    {
        clamped as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    #[test]
    fn canvas_size_matches_pixels() {
        let ctx = Context::default();
        let pixels = ColorImage::new([5, 2], vec![Color32::WHITE; 10]);
        let loaded = LoadedImage::from_color_image(&ctx, pixels);
        assert_eq!(loaded.size, [5, 2]);
        assert_eq!(loaded.canvas_size(), Vec2::new(5.0, 2.0));
    }
}
