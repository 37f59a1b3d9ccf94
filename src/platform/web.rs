//! Browser frame clock backed by `requestAnimationFrame`

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::FrameClock;

struct Inner {
    running: bool,
    /// Pending `requestAnimationFrame` handle
    request_id: Option<i32>,
    /// JS-side trampoline, rescheduled after every frame while running
    callback: Option<Closure<dyn FnMut(f64)>>,
    /// Host handler receiving the frame timestamp (ms)
    on_frame: Option<Box<dyn FnMut(f64)>>,
}

/// Frame clock that requests one animation frame at a time
///
/// The next frame is only requested after the current handler returns, so
/// ticks never overlap or queue up. `cancel` revokes the pending request.
pub struct AnimationFrameClock {
    inner: Rc<RefCell<Inner>>,
}

impl Default for AnimationFrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationFrameClock {
    pub fn new() -> Self {
        let inner = Rc::new(RefCell::new(Inner {
            running: false,
            request_id: None,
            callback: None,
            on_frame: None,
        }));

        let weak = Rc::downgrade(&inner);
        let callback = Closure::<dyn FnMut(f64)>::new(move |now: f64| {
            if let Some(inner) = weak.upgrade() {
                Self::fire(&inner, now);
            }
        });
        inner.borrow_mut().callback = Some(callback);

        Self { inner }
    }

    /// Install the per-frame handler
    pub fn set_on_frame(&self, handler: impl FnMut(f64) + 'static) {
        self.inner.borrow_mut().on_frame = Some(Box::new(handler));
    }

    fn fire(inner: &Rc<RefCell<Inner>>, now: f64) {
        // Take the handler out so it can cancel the clock without a double borrow
        let mut handler = {
            let mut guard = inner.borrow_mut();
            guard.request_id = None;
            if !guard.running {
                return;
            }
            guard.on_frame.take()
        };

        if let Some(handler) = handler.as_mut() {
            handler(now);
        }

        let mut guard = inner.borrow_mut();
        if guard.on_frame.is_none() {
            guard.on_frame = handler;
        }
        if guard.running {
            Self::request(&mut guard);
        }
    }

    fn request(inner: &mut Inner) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, frame clock cannot run");
            return;
        };
        let result = match inner.callback.as_ref() {
            Some(callback) => window.request_animation_frame(callback.as_ref().unchecked_ref()),
            None => return,
        };
        match result {
            Ok(id) => inner.request_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }
}

impl FrameClock for AnimationFrameClock {
    fn start(&mut self) {
        let mut guard = self.inner.borrow_mut();
        if guard.running {
            return;
        }
        guard.running = true;
        Self::request(&mut guard);
        log::debug!("Frame clock started");
    }

    fn cancel(&mut self) {
        let mut guard = self.inner.borrow_mut();
        guard.running = false;
        if let Some(id) = guard.request_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        log::debug!("Frame clock cancelled");
    }

    fn is_running(&self) -> bool {
        self.inner.borrow().running
    }
}

impl Drop for AnimationFrameClock {
    fn drop(&mut self) {
        self.cancel();
    }
}
