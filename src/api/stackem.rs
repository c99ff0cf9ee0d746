//! `StackEm` - the JavaScript-facing stack controller
//!
//! Wraps a [`Stacker`] over the DOM and owns the window resize listener.
//! The listener only holds a weak reference to the stacker, and dropping
//! (or `free()`-ing) the instance unbinds it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use super::helpers::now_ms;
use crate::errors::StackError;
use crate::models::StackOptions;
use crate::stack::{should_relayout, Debounce, DomHost, StackState, Stacker};
use crate::utils::PassTimings;

type SharedStacker = Rc<RefCell<Stacker<DomHost>>>;
type SharedTimings = Rc<RefCell<PassTimings>>;

/// Masonry stacking for the items of one container
///
/// ```js
/// const stack = new StackEm({ wrapperSelector: '.wrapper', itemSelector: '.item' });
/// stack.init();   // stack and re-stack on resize
/// stack.remove(); // undo
/// ```
#[wasm_bindgen]
pub struct StackEm {
    stacker: SharedStacker,
    timings: SharedTimings,
    resize: Option<ResizeBinding>,
}

#[wasm_bindgen]
impl StackEm {
    /// Create a controller for the container matching `wrapperSelector`
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<StackEm, JsValue> {
        let options = StackOptions::from_js(&options)?;
        let host = DomHost::locate(&options)?;

        log::info!(
            "StackEm created for '{}' / '{}'",
            options.wrapper_selector,
            options.item_selector
        );

        Ok(StackEm {
            stacker: Rc::new(RefCell::new(Stacker::new(host, options))),
            timings: Rc::new(RefCell::new(PassTimings::new())),
            resize: None,
        })
    }

    /// Stack the items and, unless `resize: false` was given, re-stack them
    /// whenever the window is resized
    pub fn init(&mut self) -> Result<(), JsValue> {
        self.build()?;
        if self.stacker.borrow().options().resize {
            self.bind_resize()?;
        }
        Ok(())
    }

    /// Stack the items once
    pub fn build(&self) -> Result<(), JsValue> {
        let mut stacker = self.stacker.borrow_mut();
        timed_build(&mut stacker, &self.timings)?;
        Ok(())
    }

    /// Undo the stacking
    pub fn remove(&self) -> Result<(), JsValue> {
        self.stacker.borrow_mut().remove()?;
        Ok(())
    }

    /// Re-stack after resizing settles. Binding twice has no effect.
    #[wasm_bindgen(js_name = bindResize)]
    pub fn bind_resize(&mut self) -> Result<(), JsValue> {
        if self.resize.is_some() {
            return Ok(());
        }

        let (window, delay_ms) = {
            let stacker = self.stacker.borrow();
            (stacker.host().window().clone(), stacker.options().resize_delay_ms)
        };

        let binding = ResizeBinding::install(
            window,
            Rc::downgrade(&self.stacker),
            Rc::downgrade(&self.timings),
            delay_ms,
        )?;
        self.resize = Some(binding);
        log::debug!("resize listener bound ({}ms)", delay_ms);
        Ok(())
    }

    /// Stop re-stacking on resize
    #[wasm_bindgen(js_name = unbindResize)]
    pub fn unbind_resize(&mut self) {
        if self.resize.take().is_some() {
            log::debug!("resize listener unbound");
        }
    }

    /// Column count of the current stacking
    pub fn columns(&self) -> Option<u32> {
        self.stacker.borrow().grid().map(|g| g.columns() as u32)
    }

    /// Container height set by the current stacking
    #[wasm_bindgen(js_name = containerHeight)]
    pub fn container_height(&self) -> Option<f64> {
        self.stacker.borrow().grid().map(|g| g.container_height())
    }

    #[wasm_bindgen(js_name = isStacked)]
    pub fn is_stacked(&self) -> bool {
        self.stacker.borrow().state() == StackState::Stacked
    }

    #[wasm_bindgen(js_name = isResizeBound)]
    pub fn is_resize_bound(&self) -> bool {
        self.resize.is_some()
    }

    /// Average duration of recent passes in milliseconds
    #[wasm_bindgen(js_name = averagePassMs)]
    pub fn average_pass_ms(&self) -> Option<f64> {
        self.timings.borrow().average()
    }
}

fn timed_build(
    stacker: &mut Stacker<DomHost>,
    timings: &RefCell<PassTimings>,
) -> Result<(), StackError> {
    let started = now_ms(stacker.host().window());
    stacker.build()?;

    if let (Some(start), Some(end)) = (started, now_ms(stacker.host().window())) {
        timings.borrow_mut().record(end - start);
        log::debug!("layout pass took {:.2}ms", end - start);
    }
    Ok(())
}

/// Remove and rebuild after a settled resize
fn relayout(stacker: &SharedStacker, timings: &SharedTimings) -> Result<(), StackError> {
    let Ok(mut stacker) = stacker.try_borrow_mut() else {
        log::warn!("stacker busy, skipping re-layout");
        return Ok(());
    };

    if !should_relayout(stacker.host().root_scroll_height()) {
        log::debug!("document has no height, skipping re-layout");
        return Ok(());
    }

    stacker.remove()?;
    timed_build(&mut stacker, timings)
}

/// Window resize listener with its trailing-edge timer
struct ResizeBinding {
    window: Window,
    debounce: Rc<RefCell<Debounce>>,
    listener: Closure<dyn FnMut()>,
    // Kept alive for the timers that call it
    _relayout: Closure<dyn FnMut()>,
}

impl ResizeBinding {
    fn install(
        window: Window,
        stacker: Weak<RefCell<Stacker<DomHost>>>,
        timings: Weak<RefCell<PassTimings>>,
        delay_ms: i32,
    ) -> Result<Self, StackError> {
        let debounce = Rc::new(RefCell::new(Debounce::new(delay_ms)));

        let relayout_closure = {
            let debounce = debounce.clone();
            Closure::<dyn FnMut()>::new(move || {
                if !debounce.borrow_mut().settle() {
                    return;
                }
                let (Some(stacker), Some(timings)) = (stacker.upgrade(), timings.upgrade()) else {
                    return;
                };
                if let Err(e) = relayout(&stacker, &timings) {
                    log::warn!("re-layout after resize failed: {}", e);
                }
            })
        };
        let relayout_fn = relayout_closure
            .as_ref()
            .unchecked_ref::<js_sys::Function>()
            .clone();

        let listener = {
            let debounce = debounce.clone();
            let window = window.clone();
            Closure::<dyn FnMut()>::new(move || {
                let mut debounce = debounce.borrow_mut();
                if let Some(previous) = debounce.cancel() {
                    window.clear_timeout_with_handle(previous);
                }
                match window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    &relayout_fn,
                    debounce.delay_ms(),
                ) {
                    Ok(handle) => {
                        debounce.arm(handle);
                    }
                    Err(e) => log::warn!("could not schedule re-layout: {:?}", e),
                }
            })
        };

        window
            .add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
            .map_err(|e| StackError::dom("bind resize", e))?;

        Ok(Self {
            window,
            debounce,
            listener,
            _relayout: relayout_closure,
        })
    }
}

impl Drop for ResizeBinding {
    fn drop(&mut self) {
        if let Some(handle) = self.debounce.borrow_mut().cancel() {
            self.window.clear_timeout_with_handle(handle);
        }
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("resize", self.listener.as_ref().unchecked_ref())
        {
            log::warn!("could not unbind resize listener: {:?}", e);
        }
    }
}
