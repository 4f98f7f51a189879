//! # drAing WASM Application
//!
//! Browser bindings for drAing: the drawing controller paints on an
//! `HtmlCanvasElement` 2D context and the magic wand asks the vision model
//! about the picture.
//!
//! ## Usage
//!
//! Build for WASM (the API key is read at build time):
//! ```bash
//! OPENAI_API_KEY=sk-... wasm-pack build --target web draing-app
//! ```
//!
//! Then wire it up in JavaScript:
//! ```javascript
//! import init, { DrawingApp } from './pkg/draing_app.js';
//!
//! await init();
//! const app = new DrawingApp('drawing-canvas');
//! canvas.addEventListener('mousedown', (e) => app.mouseDown(e));
//! canvas.addEventListener('mousemove', (e) => app.mouseMove(e));
//! canvas.addEventListener('mouseup', () => app.endStroke());
//! canvas.addEventListener('mouseleave', () => app.endStroke());
//! wandButton.addEventListener('click', async () => {
//!     const text = await app.analyze();
//! });
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::sync::Arc;

use draing_core::{
    BrushWidth, CanvasError, CanvasResult, Color, DisplayRect, DrawingController, Point,
    PointerInput, Snapshot, StrokeStyle, Surface, Tool, TouchPoint, PNG_MIME,
};
use draing_magic::{AnalysisStatus, MagicConfig, OpenAiDescriber, Studio};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    console_error_panic_hook::set_once();
    tracing::info!("drAing WASM initialized");
}

/// A surface backed by a browser canvas 2D context.
pub struct DomSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl DomSurface {
    /// Wrap a canvas and its 2D context, configuring round caps and joins.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        Self { canvas, ctx }
    }
}

impl Surface for DomSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.fill_rect(
            f64::from(x),
            f64::from(y),
            f64::from(width),
            f64::from(height),
        );
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        // The context ignores lineWidth = 0 and keeps the previous width
        if style.width.is_nan() || style.width <= 0.0 {
            return;
        }
        self.ctx.set_stroke_style_str(&style.color.to_hex());
        self.ctx.set_line_width(f64::from(style.width));
        self.ctx.begin_path();
        self.ctx.move_to(f64::from(from.x), f64::from(from.y));
        self.ctx.line_to(f64::from(to.x), f64::from(to.y));
        self.ctx.stroke();
    }

    fn snapshot(&self) -> CanvasResult<Snapshot> {
        let uri = self
            .canvas
            .to_data_url_with_type(PNG_MIME)
            .map_err(|e| CanvasError::Encoding(format!("toDataURL failed: {e:?}")))?;
        let (width, height) = self.size();
        Snapshot::from_data_uri(width, height, &uri)
    }
}

/// The drawing application for WASM.
#[wasm_bindgen]
pub struct DrawingApp {
    canvas: HtmlCanvasElement,
    studio: Studio<DomSurface>,
}

#[wasm_bindgen]
impl DrawingApp {
    /// Attach to the canvas element with the given ID.
    ///
    /// The backing buffer is sized once from the element's layout box.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas element is not found or 2D context fails.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(canvas_id: &str) -> Result<DrawingApp, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document object"))?;

        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("Canvas element '{canvas_id}' not found")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("Element is not a canvas"))?;

        let rect = canvas.get_bounding_client_rect();
        let width = rect.width().max(0.0) as u32;
        let height = rect.height().max(0.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx = canvas
            .get_context("2d")
            .map_err(|_| JsValue::from_str("Failed to get 2D context"))?
            .ok_or_else(|| JsValue::from_str("2D context not available"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("Failed to cast to 2D context"))?;

        let mut controller = DrawingController::new();
        if width > 0 && height > 0 {
            controller.mount(DomSurface::new(canvas.clone(), ctx));
        } else {
            tracing::warn!("Canvas '{canvas_id}' has no layout size; drawing disabled");
        }

        let config = MagicConfig::new(option_env!("OPENAI_API_KEY").unwrap_or_default());
        let describer =
            OpenAiDescriber::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            canvas,
            studio: Studio::new(controller, Arc::new(describer)),
        })
    }

    /// Start a stroke under the mouse.
    #[wasm_bindgen(js_name = mouseDown)]
    pub fn mouse_down(&mut self, event: &MouseEvent) {
        let point = self.map(&mouse_input(event));
        self.studio.canvas_mut().begin_stroke(point);
    }

    /// Continue the stroke to the mouse position.
    #[wasm_bindgen(js_name = mouseMove)]
    pub fn mouse_move(&mut self, event: &MouseEvent) {
        let point = self.map(&mouse_input(event));
        self.studio.canvas_mut().continue_stroke(point);
    }

    /// Start a stroke under the first touch.
    #[wasm_bindgen(js_name = touchStart)]
    pub fn touch_start(&mut self, event: &TouchEvent) {
        let point = self.map(&touch_input(event));
        self.studio.canvas_mut().begin_stroke(point);
    }

    /// Continue the stroke to the first touch.
    #[wasm_bindgen(js_name = touchMove)]
    pub fn touch_move(&mut self, event: &TouchEvent) {
        let point = self.map(&touch_input(event));
        self.studio.canvas_mut().continue_stroke(point);
    }

    /// End the stroke (mouse up, mouse leave, touch end).
    #[wasm_bindgen(js_name = endStroke)]
    pub fn end_stroke(&mut self) {
        self.studio.canvas_mut().end_stroke();
    }

    /// Select `"brush"` or `"eraser"`.
    ///
    /// # Errors
    ///
    /// Returns an error for any other tool name.
    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&mut self, tool: &str) -> Result<(), JsValue> {
        let parsed =
            parse_tool(tool).ok_or_else(|| JsValue::from_str(&format!("Unknown tool '{tool}'")))?;
        self.studio.canvas_mut().set_tool(parsed);
        Ok(())
    }

    /// Set the brush color from a `#rrggbb` string.
    ///
    /// # Errors
    ///
    /// Returns an error if the color is not valid hex.
    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&mut self, color: &str) -> Result<(), JsValue> {
        let color = Color::from_hex(color).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.studio.canvas_mut().set_color(color);
        Ok(())
    }

    /// Set the brush width; clamped to the slider range.
    #[wasm_bindgen(js_name = setWidth)]
    pub fn set_width(&mut self, width: u32) {
        self.studio
            .canvas_mut()
            .set_width(BrushWidth::clamp_ui(width));
    }

    /// Clear the canvas and the description.
    pub fn clear(&mut self) {
        self.studio.clear();
    }

    /// Ask the magic wand about the drawing.
    ///
    /// Resolves to the text to display, or `null` when nothing was sent.
    /// While a request is in flight this resolves immediately to `null`.
    pub fn analyze(&self) -> js_sys::Promise {
        if !self.studio.analysis().can_analyze() {
            return js_sys::Promise::resolve(&JsValue::NULL);
        }
        let Some(pending) = self.studio.start_analysis() else {
            return js_sys::Promise::resolve(&JsValue::NULL);
        };

        wasm_bindgen_futures::future_to_promise(async move {
            let status = pending.run().await;
            Ok(match status {
                AnalysisStatus::Succeeded(text) | AnalysisStatus::Failed(text) => {
                    JsValue::from_str(&text)
                }
                AnalysisStatus::Idle | AnalysisStatus::Pending => JsValue::NULL,
            })
        })
    }

    /// The description to display, if any.
    #[must_use]
    pub fn result(&self) -> Option<String> {
        self.studio.analysis().result().map(str::to_string)
    }

    /// Whether a request is in flight.
    #[wasm_bindgen(js_name = isLoading)]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.studio.analysis().is_loading()
    }

    /// Label for the magic button.
    #[wasm_bindgen(js_name = buttonLabel)]
    #[must_use]
    pub fn button_label(&self) -> String {
        self.studio.analysis().button_label().to_string()
    }

    /// The current brush color as `#rrggbb`.
    #[must_use]
    pub fn color(&self) -> String {
        self.studio.canvas().color().to_hex()
    }

    /// The current brush width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.studio.canvas().width()
    }

    /// The active tool name.
    #[must_use]
    pub fn tool(&self) -> String {
        tool_name(self.studio.canvas().tool()).to_string()
    }
}

impl DrawingApp {
    #[allow(clippy::cast_possible_truncation)]
    fn map(&self, input: &PointerInput) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        let displayed = DisplayRect::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        );
        self.studio.canvas().map_input_to_point(input, &displayed)
    }
}

fn parse_tool(name: &str) -> Option<Tool> {
    match name {
        "brush" => Some(Tool::Brush),
        "eraser" => Some(Tool::Eraser),
        _ => None,
    }
}

fn tool_name(tool: Tool) -> &'static str {
    match tool {
        Tool::Brush => "brush",
        Tool::Eraser => "eraser",
    }
}

#[allow(clippy::cast_precision_loss)]
fn mouse_input(event: &MouseEvent) -> PointerInput {
    PointerInput::mouse(event.client_x() as f32, event.client_y() as f32)
}

#[allow(clippy::cast_precision_loss)]
fn touch_input(event: &TouchEvent) -> PointerInput {
    let list = event.touches();
    let touches = (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| TouchPoint {
            client_x: t.client_x() as f32,
            client_y: t.client_y() as f32,
        })
        .collect();
    PointerInput::Touch { touches }
}
