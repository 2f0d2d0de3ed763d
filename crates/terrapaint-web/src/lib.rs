//! WASM browser front end for **terrapaint** using Canvas 2D.
//!
//! [`MapPainter`] owns the editor state and renders it into an HTML
//! `<canvas>` each animation frame: one filled rectangle per cell plus the
//! viewport box outline. Pointer events on the canvas paint with the
//! selected brush; the toolbar calls the exported methods
//! ([`MapPainter::select_brush`], [`MapPainter::set_width`], ...) from its
//! own event handlers.
//!
//! # Limitations
//!
//! * **Single page lifetime.** Event-listener and animation-frame closures
//!   are leaked (`.forget()`); there is no teardown path.
//!
//! # Quick start
//!
//! ```html
//! <canvas id="terrapaint-canvas"></canvas>
//! <script type="module">
//!   import init, { start } from './pkg/terrapaint_web.js';
//!   await init();
//!   const painter = start("terrapaint-canvas", 90, 90);
//!   // toolbar glue:
//!   //   painter.select_brush(1);
//!   //   painter.set_width(1, widthInput.value);
//!   //   painter.download_snapshot(prompt("Cell Size in pixels", "8"));
//! </script>
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use terrapaint_core::{
    BrushOptions, Color, Editor, Effect, Msg, OptionValue, PointerAction, TileMap,
};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlAnchorElement, HtmlCanvasElement, MouseEvent, Window,
};

/// Cell side length used when the snapshot prompt input is unusable.
const DEFAULT_SNAPSHOT_CELL_SIZE: u32 = 8;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn window() -> Window {
    web_sys::window().expect("no global `window`")
}

fn document() -> Document {
    window().document().expect("no `document`")
}

/// Convert a palette [`Color`] to a CSS colour string.
fn color_to_css(color: Color) -> String {
    format!("rgb({},{},{})", color.r(), color.g(), color.b())
}

/// A mouse event's position in canvas pixel coordinates.
fn mouse_to_canvas(evt: &MouseEvent, canvas: &HtmlCanvasElement) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (
        evt.client_x() as f64 - rect.left(),
        evt.client_y() as f64 - rect.top(),
    )
}

// ---------------------------------------------------------------------------
// Shared state used inside closures
// ---------------------------------------------------------------------------

/// Mutable state shared between the rAF loop, the event-listener closures
/// and the exported [`MapPainter`] methods.
struct Shared {
    editor: Editor,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Shared {
    /// Push a message through the editor and fulfil any side-effect it
    /// requests.
    fn dispatch(&mut self, msg: Msg) {
        match self.editor.update(msg) {
            Some(Effect::Save) => self.log_save_data(),
            Some(Effect::Snapshot { cell_size }) => self.download_snapshot(cell_size),
            // A browser page has nothing to tear down.
            Some(Effect::End) | None => {}
        }
    }

    /// Match the canvas backing store to its CSS size and refit the
    /// viewport box.
    fn resize(&mut self) {
        let rect = self.canvas.get_bounding_client_rect();
        self.canvas.set_width(rect.width() as u32);
        self.canvas.set_height(rect.height() as u32);
        self.dispatch(Msg::Screen {
            width: rect.width(),
            height: rect.height(),
        });
    }

    /// Draw the full map into the viewport box, then its outline.
    fn render(&self) {
        let ctx = &self.ctx;
        let view = self.editor.viewport();
        let map = self.editor.map();

        ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );

        let cell = view.cell_size(map.width());
        for (p, layer) in map.iter() {
            ctx.set_fill_style_str(&color_to_css(self.editor.layer_color(layer)));
            // Overlap each rectangle by half a pixel to avoid hairline
            // seams between cells.
            ctx.fill_rect(
                view.x + p.x as f64 * cell - 0.5,
                view.y + p.y as f64 * cell - 0.5,
                cell + 1.0,
                cell + 1.0,
            );
        }

        ctx.set_line_width(5.0);
        ctx.set_stroke_style_str("black");
        ctx.stroke_rect(view.x, view.y, view.size, view.size);
    }

    /// Serialize the map and log the save blob to the browser console.
    fn log_save_data(&self) {
        match self.editor.save_data() {
            Ok(data) => match serde_json::to_string(&data) {
                Ok(json) => web_sys::console::log_1(&JsValue::from_str(&json)),
                Err(e) => web_sys::console::error_1(&JsValue::from_str(&e.to_string())),
            },
            Err(e) => web_sys::console::error_1(&JsValue::from_str(&e.to_string())),
        }
    }

    /// Render the map to an offscreen canvas at `cell_size` pixels per
    /// cell and trigger a PNG download.
    fn download_snapshot(&self, cell_size: u32) {
        let canvas: HtmlCanvasElement = match document()
            .create_element("canvas")
            .map(|e| e.dyn_into::<HtmlCanvasElement>())
        {
            Ok(Ok(canvas)) => canvas,
            _ => return,
        };
        let map = self.editor.map();
        canvas.set_width(map.width() as u32 * cell_size);
        canvas.set_height(map.height() as u32 * cell_size);

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            return;
        };

        let cs = cell_size as f64;
        for (p, layer) in map.iter() {
            ctx.set_fill_style_str(&color_to_css(self.editor.layer_color(layer)));
            ctx.fill_rect(p.x as f64 * cs, p.y as f64 * cs, cs, cs);
        }

        let Ok(url) = canvas.to_data_url() else {
            return;
        };
        if let Ok(Ok(link)) = document()
            .create_element("a")
            .map(|e| e.dyn_into::<HtmlAnchorElement>())
        {
            link.set_href(&url);
            link.set_download("image.png");
            link.click();
        }
    }
}

// ---------------------------------------------------------------------------
// MapPainter
// ---------------------------------------------------------------------------

/// The exported painter handle. Construct with [`start`]; call the methods
/// from toolbar event handlers.
#[wasm_bindgen]
pub struct MapPainter {
    shared: Rc<RefCell<Shared>>,
}

/// Attach a painter to the canvas with the given element id and take over
/// its pointer events and animation frames.
#[wasm_bindgen]
pub fn start(canvas_id: &str, map_width: i32, map_height: i32) -> MapPainter {
    let canvas: HtmlCanvasElement = document()
        .get_element_by_id(canvas_id)
        .unwrap_or_else(|| panic!("canvas element '{canvas_id}' not found"))
        .dyn_into::<HtmlCanvasElement>()
        .expect("element is not a canvas");

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .expect("getContext failed")
        .expect("no 2d context")
        .dyn_into::<CanvasRenderingContext2d>()
        .expect("context is not CanvasRenderingContext2d");

    let mut editor = Editor::new(map_width, map_height);
    editor.update(Msg::Init);

    let shared = Rc::new(RefCell::new(Shared {
        editor,
        canvas: canvas.clone(),
        ctx,
    }));

    shared.borrow_mut().resize();

    // -- click ------------------------------------------------------------
    {
        let shared = Rc::clone(&shared);
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
            let (x, y) = mouse_to_canvas(&e, &canvas_clone);
            shared.borrow_mut().dispatch(Msg::Pointer {
                action: PointerAction::Press,
                x,
                y,
            });
        });
        canvas
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .expect("addEventListener click");
        closure.forget();
    }

    // -- mousemove (paints while the primary button is held) ---------------
    {
        let shared = Rc::clone(&shared);
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |e: MouseEvent| {
            if e.buttons() != 1 {
                return;
            }
            let (x, y) = mouse_to_canvas(&e, &canvas_clone);
            shared.borrow_mut().dispatch(Msg::Pointer {
                action: PointerAction::Drag,
                x,
                y,
            });
        });
        canvas
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
            .expect("addEventListener mousemove");
        closure.forget();
    }

    // -- window resize -----------------------------------------------------
    {
        let shared = Rc::clone(&shared);
        let closure = Closure::<dyn FnMut()>::new(move || {
            shared.borrow_mut().resize();
        });
        window()
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .expect("addEventListener resize");
        closure.forget();
    }

    // -- requestAnimationFrame loop ----------------------------------------
    {
        let shared = Rc::clone(&shared);
        let raf_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let raf_cb2 = Rc::clone(&raf_cb);

        *raf_cb.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            shared.borrow().render();
            let cb_ref = raf_cb2.borrow();
            if let Some(cb) = cb_ref.as_ref() {
                let _ = window().request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }));

        {
            let cb_ref = raf_cb.borrow();
            if let Some(cb) = cb_ref.as_ref() {
                window()
                    .request_animation_frame(cb.as_ref().unchecked_ref())
                    .expect("requestAnimationFrame");
            }
        }

        // Leak the closure so it lives for the page lifetime.
        std::mem::forget(raf_cb);
    }

    MapPainter { shared }
}

#[wasm_bindgen]
impl MapPainter {
    /// Select the brush painted by subsequent pointer events.
    pub fn select_brush(&self, id: usize) {
        self.shared.borrow_mut().dispatch(Msg::SelectBrush(id));
    }

    /// Set a brush's width from a toolbar input value. Malformed or
    /// non-positive input coerces to width 1.
    pub fn set_width(&self, brush: usize, value: &str) {
        let width = value.trim().parse::<i32>().unwrap_or(1).max(1);
        self.shared.borrow_mut().dispatch(Msg::SetOption {
            brush,
            name: BrushOptions::WIDTH.to_string(),
            value: OptionValue::Number(width),
        });
    }

    /// Set a brush's material from a toolbar select value. Unknown names
    /// are ignored.
    pub fn set_color(&self, brush: usize, value: &str) {
        let Ok(material) = value.parse() else {
            web_sys::console::warn_1(&JsValue::from_str(&format!("unknown material {value:?}")));
            return;
        };
        self.shared.borrow_mut().dispatch(Msg::SetOption {
            brush,
            name: BrushOptions::COLOR.to_string(),
            value: OptionValue::Choice(material),
        });
    }

    /// Flood the map with the selected brush.
    pub fn fill(&self) {
        self.shared.borrow_mut().dispatch(Msg::Fill);
    }

    /// Serialize the map and log the save blob to the console.
    pub fn save(&self) {
        self.shared.borrow_mut().dispatch(Msg::Save);
    }

    /// Export a PNG snapshot. `cell_size` is the prompt's raw input;
    /// anything that is not a positive integer falls back to 8.
    pub fn download_snapshot(&self, cell_size: Option<String>) {
        let cell_size = cell_size
            .as_deref()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&n| n >= 1)
            .unwrap_or(DEFAULT_SNAPSHOT_CELL_SIZE);
        self.shared.borrow_mut().dispatch(Msg::Export { cell_size });
    }

    /// Replace the current map with a loaded save blob (JSON text).
    pub fn load(&self, save_json: &str) -> Result<(), JsValue> {
        let data: terrapaint_core::SaveData =
            serde_json::from_str(save_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let map: TileMap =
            terrapaint_core::load(&data).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.shared.borrow_mut().editor = Editor::with_map(map);
        // Refit the viewport to the current canvas size.
        self.shared.borrow_mut().resize();
        Ok(())
    }
}
