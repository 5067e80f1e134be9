//! 2D rendering module
//!
//! The scene is drawn through the `Surface` trait so it can target a browser
//! canvas or a recording surface in tests. Images are looked up by `Sprite`
//! on every draw; the renderer never holds on to handles.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;
pub mod sprite;

pub use scene::render_frame;
pub use sprite::Sprite;

/// Immediate-mode drawing target, shaped after the canvas 2D context
pub trait Surface {
    type Image;

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Draw at natural size with the top-left corner at (x, y)
    fn draw_image(&mut self, image: &Self::Image, x: f64, y: f64);
    fn draw_image_scaled(&mut self, image: &Self::Image, x: f64, y: f64, width: f64, height: f64);
    /// Natural (width, height) in pixels
    fn image_size(&self, image: &Self::Image) -> (f64, f64);

    fn set_font(&mut self, font: &str);
    fn set_fill_style(&mut self, style: &str);
    fn set_stroke_style(&mut self, style: &str);
    fn set_line_width(&mut self, width: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    fn stroke_text(&mut self, text: &str, x: f64, y: f64);
}

/// Loaded images, keyed by sprite
pub trait ImageSource {
    type Image;

    fn get(&self, sprite: Sprite) -> Option<&Self::Image>;
}
