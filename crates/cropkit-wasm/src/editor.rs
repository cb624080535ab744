//! The crop editor as a JavaScript class.
//!
//! `CropEditor` owns a [`CropEngine`] and the two host callbacks. The engine
//! decides whether a session produced a crop or was cancelled; this wrapper
//! only turns those outcomes into exactly one `onCrop` or `onCancel` call.
//!
//! # Example
//!
//! ```typescript
//! const editor = new CropEditor(
//!   { aspectRatio: 'square', shape: 'circle', outputScale: 2 },
//!   (bytes, mime, width, height) => upload(new Blob([bytes], { type: mime })),
//!   () => closeDialog(),
//! );
//! editor.load(decode_image(bytes));
//!
//! canvas.onpointerdown = (e) => editor.pointerDown(e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => editor.pointerMove(e.offsetX, e.offsetY) && redraw();
//! canvas.onpointerup = () => editor.pointerUp();
//!
//! applyButton.onclick = () => editor.apply(0);
//! ```
//!
//! Pointer coordinates are viewport pixels. On high-DPI displays the host
//! scales them by the ratio between the canvas buffer and its layout size
//! before passing them in.

use cropkit_core::{CropConfig, CropEngine, CropShape, Interaction, Point, ZoomDirection};
use js_sys::{Array, Function, Uint8Array};
use wasm_bindgen::prelude::*;

use crate::types::{JsRaster, JsSourceImage};

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Interactive crop editor.
#[wasm_bindgen]
pub struct CropEditor {
    engine: CropEngine,
    on_crop: Function,
    on_cancel: Function,
}

#[wasm_bindgen]
impl CropEditor {
    /// Create an editor.
    ///
    /// `config` is a plain object with any subset of the configuration
    /// fields (`aspectRatio`, `shape`, `outputScale`, `viewport`, `minZoom`,
    /// `maxZoom`, `zoomStep`, `handleSize`, `showGuides`, `outputFormat`,
    /// `jpegQuality`); `undefined` or `null` uses the defaults.
    ///
    /// `on_crop(bytes: Uint8Array, mime: string, width: number, height: number)`
    /// runs once per successful `apply`; `on_cancel()` once per `cancel`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, on_crop: Function, on_cancel: Function) -> Result<CropEditor, JsValue> {
        let config: CropConfig = if config.is_undefined() || config.is_null() {
            CropConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js)?
        };
        let engine = CropEngine::new(config).map_err(to_js)?;
        Ok(Self {
            engine,
            on_crop,
            on_cancel,
        })
    }

    /// Load an image and start a new session.
    pub fn load(&mut self, image: &JsSourceImage) -> Result<(), JsValue> {
        let source = image.to_source().map_err(to_js)?;
        self.engine.load(source).map_err(to_js)
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.engine.begin_interaction(Point::new(x, y));
    }

    /// Returns true when the region changed and the surface needs a redraw.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.engine.update_interaction(Point::new(x, y))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.engine.end_interaction();
    }

    /// Zoom in one step. Returns the new zoom.
    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) -> Result<f64, JsValue> {
        self.engine.set_zoom(ZoomDirection::In).map_err(to_js)
    }

    /// Zoom out one step. Returns the new zoom.
    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> Result<f64, JsValue> {
        self.engine.set_zoom(ZoomDirection::Out).map_err(to_js)
    }

    /// Switch rectangle/circle. Returns the new shape name.
    #[wasm_bindgen(js_name = toggleShape)]
    pub fn toggle_shape(&mut self) -> Result<String, JsValue> {
        self.engine
            .toggle_shape()
            .map(|shape| shape_name(shape).to_string())
            .map_err(to_js)
    }

    /// Switch aspect lock on/off. Returns the new ratio, or `undefined` when
    /// free-form. Locking to a non-square ratio turns a circle back into a
    /// rectangle.
    #[wasm_bindgen(js_name = toggleAspectLock)]
    pub fn toggle_aspect_lock(&mut self) -> Option<f64> {
        self.engine.toggle_aspect_lock()
    }

    /// Export the crop and hand it to `onCrop`.
    ///
    /// `rotation` is in degrees, clockwise, about the output centre. On
    /// error no callback runs and the session stays open for a retry.
    pub fn apply(&mut self, rotation: Option<f64>) -> Result<(), JsValue> {
        let result = self.engine.apply(rotation.unwrap_or(0.0)).map_err(to_js)?;

        let args = Array::new();
        args.push(&Uint8Array::from(result.bytes.as_slice()));
        args.push(&JsValue::from_str(result.mime_type()));
        args.push(&JsValue::from(result.width));
        args.push(&JsValue::from(result.height));
        self.on_crop.apply(&JsValue::NULL, &args)?;
        Ok(())
    }

    /// Abandon the session. `onCancel` runs only the first time; returns
    /// whether it ran.
    pub fn cancel(&mut self) -> Result<bool, JsValue> {
        if !self.engine.cancel() {
            return Ok(false);
        }
        self.on_cancel.call0(&JsValue::NULL)?;
        Ok(true)
    }

    /// Whether an image is loaded and the session is open.
    #[wasm_bindgen(getter, js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.engine.is_active()
    }

    /// Current region as `{ start: {x, y}, end: {x, y}, shape }`, or
    /// `undefined` without an image.
    #[wasm_bindgen(getter)]
    pub fn region(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.engine.region()).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.engine.zoom()
    }

    #[wasm_bindgen(getter)]
    pub fn shape(&self) -> String {
        shape_name(self.engine.shape()).to_string()
    }

    #[wasm_bindgen(getter, js_name = aspectLock)]
    pub fn aspect_lock(&self) -> Option<f64> {
        self.engine.aspect_lock()
    }

    /// `"idle"`, `"creating"`, `"moving"` or `"resizing"`.
    #[wasm_bindgen(getter)]
    pub fn interaction(&self) -> String {
        interaction_name(&self.engine.interaction()).to_string()
    }

    /// Live preview rendered after the latest change.
    pub fn preview(&self) -> Option<JsRaster> {
        self.engine.preview().cloned().map(JsRaster::from)
    }

    /// Overlay (dim, stroke, handles, guides) rendered after the latest change.
    pub fn overlay(&self) -> Option<JsRaster> {
        self.engine.overlay().cloned().map(JsRaster::from)
    }

    /// The source image as currently displayed in the viewport.
    pub fn frame(&self) -> Option<JsRaster> {
        self.engine.render_frame().map(JsRaster::from)
    }
}

pub(crate) fn shape_name(shape: CropShape) -> &'static str {
    match shape {
        CropShape::Rect => "rect",
        CropShape::Circle => "circle",
    }
}

pub(crate) fn interaction_name(interaction: &Interaction) -> &'static str {
    match interaction {
        Interaction::Idle => "idle",
        Interaction::Creating { .. } => "creating",
        Interaction::Moving { .. } => "moving",
        Interaction::Resizing { .. } => "resizing",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropkit_core::ResizeHandle;

    #[test]
    fn test_shape_names_match_config_values() {
        assert_eq!(shape_name(CropShape::Rect), "rect");
        assert_eq!(shape_name(CropShape::Circle), "circle");
    }

    #[test]
    fn test_interaction_names() {
        assert_eq!(interaction_name(&Interaction::Idle), "idle");
        assert_eq!(
            interaction_name(&Interaction::Moving {
                last: Point::new(1.0, 1.0)
            }),
            "moving"
        );
        assert_eq!(
            interaction_name(&Interaction::Resizing {
                handle: ResizeHandle::Top,
                grab: Point::default(),
            }),
            "resizing"
        );
    }
}

/// WASM-specific tests that need real JS callbacks.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn counter(name: &str) -> Function {
        Function::new_no_args(&format!(
            "globalThis.{name} = (globalThis.{name} || 0) + 1;"
        ))
    }

    fn count(name: &str) -> f64 {
        js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn image(width: u32, height: u32) -> JsSourceImage {
        JsSourceImage::new(width, height, vec![255u8; (width * height * 4) as usize])
    }

    #[wasm_bindgen_test]
    fn test_apply_calls_on_crop_once() {
        let mut editor = CropEditor::new(
            JsValue::UNDEFINED,
            counter("__crop_a"),
            counter("__cancel_a"),
        )
        .unwrap();
        editor.load(&image(400, 400)).unwrap();

        editor.pointer_down(300.0, 300.0);
        assert_eq!(editor.interaction(), "resizing");
        assert!(editor.pointer_move(350.0, 350.0));
        editor.pointer_up();

        editor.apply(None).unwrap();
        assert!(editor.apply(None).is_err());
        assert!(!editor.cancel().unwrap());
        assert_eq!(count("__crop_a"), 1.0);
        assert_eq!(count("__cancel_a"), 0.0);
    }

    #[wasm_bindgen_test]
    fn test_cancel_calls_on_cancel_once() {
        let mut editor = CropEditor::new(
            JsValue::NULL,
            counter("__crop_b"),
            counter("__cancel_b"),
        )
        .unwrap();
        editor.load(&image(100, 100)).unwrap();
        editor.zoom_in().unwrap();

        assert!(editor.cancel().unwrap());
        assert!(!editor.cancel().unwrap());
        assert_eq!(count("__cancel_b"), 1.0);
        assert_eq!(count("__crop_b"), 0.0);
        assert!(editor.region().unwrap().is_undefined());
    }

    #[wasm_bindgen_test]
    fn test_config_object() {
        let config = js_sys::JSON::parse(r#"{"aspectRatio":"banner","outputScale":2}"#).unwrap();
        let mut editor =
            CropEditor::new(config, counter("__crop_c"), counter("__cancel_c")).unwrap();
        editor.load(&image(300, 100)).unwrap();
        assert_eq!(editor.aspect_lock(), Some(3.0));
        assert!(editor.toggle_shape().is_err());
    }

    #[wasm_bindgen_test]
    fn test_invalid_config_rejected() {
        let config = js_sys::JSON::parse(r#"{"outputScale":0.5}"#).unwrap();
        assert!(CropEditor::new(config, counter("__crop_d"), counter("__cancel_d")).is_err());
    }

    #[wasm_bindgen_test]
    fn test_load_rejects_bad_buffer() {
        let mut editor =
            CropEditor::new(JsValue::UNDEFINED, counter("__crop_e"), counter("__cancel_e")).unwrap();
        assert!(editor.load(&JsSourceImage::new(10, 10, vec![0u8; 10])).is_err());
        assert!(!editor.is_active());
        assert!(editor.preview().is_none());
    }
}
