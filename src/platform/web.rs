//! Browser scheduling via `requestAnimationFrame` and `setInterval`

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{FrameHandle, IntervalHandle, Scheduler};

/// Scheduler backed by the browser window.
///
/// Owns the two callbacks so they stay alive for as long as the game does;
/// every request reuses the same closure.
pub struct WebScheduler {
    window: web_sys::Window,
    on_frame: Closure<dyn FnMut(f64)>,
    on_interval: Closure<dyn FnMut()>,
}

impl WebScheduler {
    pub fn new(
        window: web_sys::Window,
        on_frame: Closure<dyn FnMut(f64)>,
        on_interval: Closure<dyn FnMut()>,
    ) -> Self {
        Self {
            window,
            on_frame,
            on_interval,
        }
    }
}

impl Scheduler for WebScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        match self
            .window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
        {
            Ok(id) => FrameHandle(id),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", handle.0, e);
        }
    }

    fn start_interval(&mut self, period_ms: u32) -> IntervalHandle {
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                self.on_interval.as_ref().unchecked_ref(),
                period_ms as i32,
            ) {
            Ok(id) => IntervalHandle(id),
            Err(e) => {
                log::error!("setInterval failed: {:?}", e);
                IntervalHandle(0)
            }
        }
    }

    fn stop_interval(&mut self, handle: IntervalHandle) {
        self.window.clear_interval_with_handle(handle.0);
    }
}
