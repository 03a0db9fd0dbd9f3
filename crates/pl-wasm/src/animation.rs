//! Full-window canvas animation driven by `requestAnimationFrame`.
//!
//! The [`FrameLoop`] lives behind an `Rc<RefCell<..>>` shared by the
//! animation-frame closure, the window `resize` listener and the exported
//! handle. Only those callbacks mutate it, one at a time.

use crate::render2d;
use pl_core::{DemoConfig, FrameDriver, FrameLoop, Tick};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

struct Shared {
    frame_loop: FrameLoop,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Pending `requestAnimationFrame` handle, if any.
    raf_id: Option<i32>,
}

/// Handle to the mounted animation. Dropping it stops the loop.
#[wasm_bindgen]
pub struct AnimationDemo {
    state: Rc<RefCell<Shared>>,
    callback: FrameCallback,
    on_resize: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl AnimationDemo {
    /// Append a full-window canvas to `<body>` and start animating.
    pub fn mount() -> Result<AnimationDemo, JsValue> {
        Self::mount_with(DemoConfig::default())
    }

    /// Like [`mount`](Self::mount), with a JSON config override.
    pub fn mount_with_config(json: &str) -> Result<AnimationDemo, JsValue> {
        let config = DemoConfig::from_json(json)
            .map_err(|e| JsValue::from_str(&format!("invalid config: {e}")))?;
        Self::mount_with(config)
    }

    /// Resume the loop. No-op if already running.
    pub fn start(&self) -> Result<(), JsValue> {
        if self.state.borrow_mut().frame_loop.start() {
            schedule(&self.state, &self.callback)?;
        }
        Ok(())
    }

    /// Stop the loop and cancel the pending frame.
    pub fn stop(&self) {
        let mut s = self.state.borrow_mut();
        s.frame_loop.stop();
        if let Some(id) = s.raf_id.take()
            && let Some(window) = web_sys::window()
        {
            let _ = window.cancel_animation_frame(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().frame_loop.is_running()
    }

    /// Resize the canvas. History is kept; the sweep speed follows the width.
    pub fn resize(&self, width: f64, height: f64) {
        apply_size(&mut self.state.borrow_mut(), width, height);
    }

    /// Current window statistics as JSON:
    /// `{"latest":..,"worst":..,"mean":..,"fps":..,"count":..}`.
    pub fn stats_json(&self) -> String {
        let stats = self.state.borrow().frame_loop.driver().stats();
        serde_json::to_string(&stats).unwrap_or_else(|_| "{}".to_string())
    }

    /// Frames painted since mount.
    pub fn frames(&self) -> f64 {
        self.state.borrow().frame_loop.frames() as f64
    }
}

impl AnimationDemo {
    fn mount_with(config: DemoConfig) -> Result<AnimationDemo, JsValue> {
        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_attribute("style", "display: block;")?;
        body.append_child(&canvas)?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into()?;

        let (width, height) = inner_size(&window);
        let driver = FrameDriver::new(config, width, height);
        let state = Rc::new(RefCell::new(Shared {
            frame_loop: FrameLoop::new(driver),
            canvas,
            ctx,
            raf_id: None,
        }));
        apply_size(&mut state.borrow_mut(), width, height);

        let resize_state = Rc::clone(&state);
        let on_resize = Closure::<dyn FnMut()>::new(move || {
            if let Some(window) = web_sys::window() {
                let (w, h) = inner_size(&window);
                apply_size(&mut resize_state.borrow_mut(), w, h);
            }
        });
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let frame_closure = frame_callback(Rc::clone(&state), Rc::downgrade(&callback));
        *callback.borrow_mut() = Some(frame_closure);

        let demo = AnimationDemo {
            state,
            callback,
            on_resize,
        };
        demo.start()?;
        log::info!("animation mounted at {width}x{height}");
        Ok(demo)
    }
}

impl Drop for AnimationDemo {
    fn drop(&mut self) {
        self.stop();
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "resize",
                self.on_resize.as_ref().unchecked_ref(),
            );
        }
        self.callback.borrow_mut().take();
    }
}

fn frame_callback(
    state: Rc<RefCell<Shared>>,
    callback: Weak<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
) -> Closure<dyn FnMut(f64)> {
    Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
        let reschedule = {
            let mut s = state.borrow_mut();
            s.raf_id = None;
            let tick = s.frame_loop.tick(timestamp);
            if let Tick::Frame(frame) = &tick {
                render2d::paint_frame(&s.ctx, frame);
            }
            tick.should_reschedule()
        };
        if reschedule
            && let Some(callback) = callback.upgrade()
            && let Err(e) = schedule(&state, &callback)
        {
            log::error!("requestAnimationFrame failed: {e:?}");
        }
    })
}

fn schedule(state: &Rc<RefCell<Shared>>, callback: &FrameCallback) -> Result<(), JsValue> {
    let window = window()?;
    let id = match callback.borrow().as_ref() {
        Some(closure) => window.request_animation_frame(closure.as_ref().unchecked_ref())?,
        None => return Ok(()),
    };
    state.borrow_mut().raf_id = Some(id);
    Ok(())
}

fn apply_size(s: &mut Shared, width: f64, height: f64) {
    s.canvas.set_width(width.max(0.0) as u32);
    s.canvas.set_height(height.max(0.0) as u32);
    s.frame_loop.driver_mut().resize(width, height);
}

fn inner_size(window: &Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w, h)
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}
