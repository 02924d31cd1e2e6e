//! Trailing-edge debounce on `setTimeout`.

use std::cell::Cell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::Window;

/// Runs its callback once `delay_ms` have passed without another [`Debouncer::trigger`].
pub struct Debouncer {
    window: Window,
    delay_ms: i32,
    pending: Cell<Option<i32>>,
    callback: Closure<dyn FnMut()>,
}

impl Debouncer {
    pub fn new(window: Window, delay_ms: u32, callback: impl FnMut() + 'static) -> Self {
        Self {
            window,
            delay_ms: i32::try_from(delay_ms).unwrap_or(i32::MAX),
            pending: Cell::new(None),
            callback: Closure::new(callback),
        }
    }

    pub fn trigger(&self) {
        self.cancel();
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.callback.as_ref().unchecked_ref(),
                self.delay_ms,
            ) {
            Ok(timer) => self.pending.set(Some(timer)),
            Err(err) => log::warn!("setTimeout failed: {err:?}"),
        }
    }

    /// Drops a scheduled run. Clearing a timer that already fired is harmless.
    pub fn cancel(&self) {
        if let Some(timer) = self.pending.take() {
            self.window.clear_timeout_with_handle(timer);
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
