use raylib::prelude::*;

/// Logical window size plus device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() { pixel_ratio.max(1.0) } else { 1.0 };
        Self { width: width.max(0.0), height: height.max(0.0), pixel_ratio }
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Backing size of a canvas covering the viewport at full pixel density.
    pub fn surface_size(&self) -> (i32, i32) {
        (
            (self.width * self.pixel_ratio).round() as i32,
            (self.height * self.pixel_ratio).round() as i32,
        )
    }
}

/// Where particles get drawn. Coordinates are logical pixels.
pub trait Surface {
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color);
}

/// Draws into any raylib draw handle, scaling logical coordinates by the pixel ratio.
pub struct Painter<'a, D: RaylibDraw> {
    d: &'a mut D,
    scale: f32,
}

impl<'a, D: RaylibDraw> Painter<'a, D> {
    pub fn new(d: &'a mut D, scale: f32) -> Self {
        Self { d, scale }
    }
}

impl<D: RaylibDraw> Surface for Painter<'_, D> {
    fn clear(&mut self) {
        self.d.clear_background(Color::BLANK);
    }

    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color) {
        self.d.draw_circle_v(center * self.scale, radius * self.scale, color);
    }
}

/// Stand-in when there is no canvas; nothing is drawn.
pub struct Detached;

impl Surface for Detached {
    fn clear(&mut self) {}
    fn fill_circle(&mut self, _center: Vector2, _radius: f32, _color: Color) {}
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_never_drops_below_one() {
        assert_eq!(Viewport::new(100.0, 100.0, 0.5).pixel_ratio, 1.0);
        assert_eq!(Viewport::new(100.0, 100.0, f32::NAN).pixel_ratio, 1.0);
    }

    #[test]
    fn surface_size_scales_and_rounds() {
        let viewport = Viewport::new(1280.0, 721.0, 1.5);
        assert_eq!(viewport.surface_size(), (1920, 1082));
        assert_eq!(viewport.area(), 1280.0 * 721.0);
    }
}
