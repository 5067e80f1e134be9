//! Browser canvas backend
//!
//! `CanvasSurface` forwards draws to a `CanvasRenderingContext2d`.
//! `ImageCache` preloads every sprite and only resolves once all of them have
//! finished loading.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::try_join_all;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

use super::{ImageSource, Sprite, Surface};

/// Browser resource failures
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("DOM unavailable: {0}")]
    Dom(String),
    #[error("failed to load image {0}")]
    Load(&'static str),
    #[error("image load for {0} was dropped before finishing")]
    Cancelled(&'static str),
}

fn dom_error(context: &str, err: JsValue) -> AssetError {
    AssetError::Dom(format!("{context}: {err:?}"))
}

/// 2D canvas drawing surface. The canvas element itself is owned by the page.
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Create a `width` x `height` canvas and append it to the page body
    pub fn create(document: &Document, width: u32, height: u32) -> Result<Self, AssetError> {
        let canvas = document
            .create_element("canvas")
            .map_err(|e| dom_error("create canvas", e))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| AssetError::Dom("element is not a canvas".into()))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let body = document
            .body()
            .ok_or_else(|| AssetError::Dom("no document body".into()))?;
        body.append_child(&canvas)
            .map_err(|e| dom_error("append canvas", e))?;

        let context = canvas
            .get_context("2d")
            .map_err(|e| dom_error("get 2d context", e))?
            .ok_or_else(|| AssetError::Dom("2d context unsupported".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AssetError::Dom("context is not 2d".into()))?;

        log::info!("Canvas {}x{} ready", width, height);
        Ok(Self { context })
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.clear_rect(x, y, width, height);
    }

    fn draw_image(&mut self, image: &HtmlImageElement, x: f64, y: f64) {
        self.context
            .draw_image_with_html_image_element(image, x, y)
            .ok();
    }

    fn draw_image_scaled(
        &mut self,
        image: &HtmlImageElement,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) {
        self.context
            .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, width, height)
            .ok();
    }

    fn image_size(&self, image: &HtmlImageElement) -> (f64, f64) {
        (image.natural_width() as f64, image.natural_height() as f64)
    }

    fn set_font(&mut self, font: &str) {
        self.context.set_font(font);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.context.set_fill_style_str(style);
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.context.set_stroke_style_str(style);
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.context.fill_text(text, x, y).ok();
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) {
        self.context.stroke_text(text, x, y).ok();
    }
}

/// Every loaded sprite image
pub struct ImageCache {
    images: HashMap<Sprite, HtmlImageElement>,
}

impl ImageCache {
    /// Load all `sprites` concurrently; fails on the first image that errors
    pub async fn load(sprites: &[Sprite]) -> Result<Self, AssetError> {
        let loads = sprites.iter().map(|&sprite| async move {
            let image = load_image(sprite.path()).await?;
            Ok::<_, AssetError>((sprite, image))
        });
        let images: HashMap<_, _> = try_join_all(loads).await?.into_iter().collect();
        log::info!("Loaded {} images", images.len());
        Ok(Self { images })
    }
}

impl ImageSource for ImageCache {
    type Image = HtmlImageElement;

    fn get(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
        self.images.get(&sprite)
    }
}

/// Resolve once the browser fires `load` (or `error`) for `path`
async fn load_image(path: &'static str) -> Result<HtmlImageElement, AssetError> {
    let image = HtmlImageElement::new().map_err(|e| dom_error("create image", e))?;
    let (tx, rx) = oneshot::channel::<Result<(), AssetError>>();
    let load_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = Rc::clone(&load_tx);

    let on_load = Closure::once(move || {
        if let Some(tx) = load_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });
    let on_error = Closure::once(move |_: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(AssetError::Load(path)));
        }
    });

    image.set_onload(Some(on_load.as_ref().unchecked_ref()));
    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    image.set_src(path);

    // Both callbacks must outlive this future; only one of them ever fires
    on_load.forget();
    on_error.forget();

    rx.await.map_err(|_| AssetError::Cancelled(path))??;
    log::debug!("Loaded {}", path);
    Ok(image)
}
