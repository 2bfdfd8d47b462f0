use raylib::prelude::*;

use crate::constants::FALLBACK_BACKGROUND;
use crate::slideshow::SlideshowController;

/// Offscreen target the particle field draws into.
pub struct Canvas {
    pub target: RenderTexture2D,
}

impl Canvas {
    pub fn new(rl: &mut RaylibHandle, thread: &RaylibThread, (width, height): (i32, i32)) -> anyhow::Result<Self> {
        let target = rl
            .load_render_texture(thread, width.max(1) as u32, height.max(1) as u32)
            .map_err(|e| anyhow::anyhow!("failed to create {width}x{height} particle canvas: {e}"))?;
        Ok(Self { target })
    }
}

fn tint(opacity: f32) -> Color {
    Color::new(255, 255, 255, (opacity.clamp(0.0, 1.0) * 255.0).round() as u8)
}

// Scale to cover the whole screen, centered, cropping the overflow
fn draw_cover<D: RaylibDraw>(d: &mut D, texture: &Texture2D, screen: Vector2, opacity: f32) {
    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;
    let scale = (screen.x / tex_width).max(screen.y / tex_height);

    let scaled_width = tex_width * scale;
    let scaled_height = tex_height * scale;

    d.draw_texture_pro(
        texture,
        Rectangle::new(0.0, 0.0, tex_width, tex_height),
        Rectangle::new(
            (screen.x - scaled_width) * 0.5,
            (screen.y - scaled_height) * 0.5,
            scaled_width,
            scaled_height,
        ),
        Vector2::zero(),
        0.0,
        tint(opacity),
    );
}

/// Paints the two image layers, or the fallback color when nothing loaded.
pub fn draw_layers<D: RaylibDraw>(d: &mut D, slideshow: &SlideshowController, textures: &[Texture2D], screen: Vector2) {
    if slideshow.is_fallback() {
        d.clear_background(FALLBACK_BACKGROUND);
        return;
    }
    d.clear_background(Color::BLACK);

    for layer in slideshow.layers() {
        if layer.opacity() <= 0.0 {
            continue;
        }
        if let Some(texture) = layer.image().and_then(|i| textures.get(i)) {
            draw_cover(d, texture, screen, layer.opacity());
        }
    }
}

/// Stretches the particle canvas over the screen (render textures are stored upside down).
pub fn composite<D: RaylibDraw>(d: &mut D, canvas: &Canvas, screen: Vector2) {
    let width = canvas.target.width() as f32;
    let height = canvas.target.height() as f32;
    d.draw_texture_pro(
        &canvas.target,
        Rectangle::new(0.0, 0.0, width, -height),
        Rectangle::new(0.0, 0.0, screen.x, screen.y),
        Vector2::zero(),
        0.0,
        Color::WHITE,
    );
}

pub fn draw_status<D: RaylibDraw>(d: &mut D, slideshow: &SlideshowController) {
    let total = slideshow.images().len();
    if total == 0 {
        return;
    }
    let mode = if slideshow.running() { "auto" } else { "paused" };
    let text = format!("{}/{}  {}", slideshow.current() + 1, total, mode);
    d.draw_text(&text, 16, 16, 20, Color::RAYWHITE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tint_clamps_and_scales_alpha() {
        assert_eq!(tint(1.0).a, 255);
        assert_eq!(tint(0.5).a, 128);
        assert_eq!(tint(-1.0).a, 0);
        assert_eq!(tint(3.0).a, 255);
    }
}
