use crate::codec::decode_displayable;
use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use std::collections::HashMap;
use tracing::warn;

/// Longest side of any decoded preview; larger photos are downscaled.
pub const MAX_PREVIEW_SIDE: u32 = 768;

pub fn decode_color_image(payload: &str) -> Result<ColorImage, String> {
    let bytes = decode_displayable(payload).map_err(|err| err.to_string())?;
    let mut image =
        image::load_from_memory(&bytes).map_err(|err| format!("unsupported image: {err}"))?;
    if image.width() > MAX_PREVIEW_SIDE || image.height() > MAX_PREVIEW_SIDE {
        image = image.thumbnail(MAX_PREVIEW_SIDE, MAX_PREVIEW_SIDE);
    }
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

enum TextureSlot {
    Pending,
    Ready(TextureHandle),
    Failed,
}

/// Textures keyed by name. A miss queues the payload for decoding off the UI
/// thread; the result comes back through [`TextureCache::finish`]. Payloads
/// that fail to decode are remembered so they are not retried every frame.
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<String, TextureSlot>,
    queued: Vec<(String, String)>,
}

impl TextureCache {
    pub fn get_or_load(&mut self, key: &str, payload: &str) -> Option<TextureHandle> {
        match self.textures.get(key) {
            Some(TextureSlot::Ready(texture)) => Some(texture.clone()),
            Some(TextureSlot::Pending | TextureSlot::Failed) => None,
            None => {
                self.textures.insert(key.to_string(), TextureSlot::Pending);
                self.queued.push((key.to_string(), payload.to_string()));
                None
            }
        }
    }

    /// Decode jobs requested since the last call.
    pub fn take_queued(&mut self) -> Vec<(String, String)> {
        std::mem::take(&mut self.queued)
    }

    /// Installs a decoded preview. Results for keys that were forgotten in
    /// the meantime are dropped.
    pub fn finish(&mut self, ctx: &egui::Context, key: &str, result: Result<ColorImage, String>) -> bool {
        let Some(slot) = self.textures.get_mut(key) else {
            return false;
        };
        if !matches!(slot, TextureSlot::Pending) {
            return false;
        }
        *slot = match result {
            Ok(image) => TextureSlot::Ready(ctx.load_texture(key, image, TextureOptions::LINEAR)),
            Err(err) => {
                warn!(key = %key, "failed to decode preview: {err}");
                TextureSlot::Failed
            }
        };
        true
    }

    pub fn forget(&mut self, key: &str) {
        self.textures.remove(key);
        self.queued.retain(|(queued, _)| queued != key);
    }

    pub fn clear(&mut self) {
        self.textures.clear();
        self.queued.clear();
    }
}

/// Paints a texture cropped to a square of `side` points, like `object-cover`.
pub fn square_image(ui: &mut egui::Ui, texture: &TextureHandle, side: f32) -> egui::Response {
    let [width, height] = texture.size();
    let (width, height) = (width.max(1) as f32, height.max(1) as f32);
    let uv = if width > height {
        let inset = (1.0 - height / width) / 2.0;
        egui::Rect::from_min_max(egui::pos2(inset, 0.0), egui::pos2(1.0 - inset, 1.0))
    } else {
        let inset = (1.0 - width / height) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, inset), egui::pos2(1.0, 1.0 - inset))
    };

    ui.add(
        egui::Image::new((texture.id(), egui::vec2(side, side)))
            .uv(uv)
            .corner_radius(egui::CornerRadius::same(8)),
    )
}
