//! WASM bridge for Pacing Lab — exposes the canvas animation and the webcam
//! picker to JavaScript.
//!
//! Compiled via `wasm-pack build --target web` and loaded from the demo pages.

mod animation;
mod logging;
mod render2d;
mod webcam;

pub use animation::AnimationDemo;
pub use webcam::start_webcam_picker;

use wasm_bindgen::prelude::*;

/// Module entry: install the panic hook and a default console logger.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook_setup();
    logging::install(log::LevelFilter::Info);
}

/// Change the console log level (`error`, `warn`, `info`, `debug`, `trace`).
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    logging::install(logging::parse_level(level));
}

/// Serialize the default demo config so pages can tweak it before mounting.
#[wasm_bindgen]
pub fn default_config_json() -> String {
    serde_json::to_string(&pl_core::DemoConfig::default()).unwrap_or_else(|_| "{}".to_string())
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Pacing Lab WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
