//! Browser side of the scroll lock: listens to the page, measures it, feeds
//! the engine and performs whatever the engine asks for.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, HtmlElement, KeyboardEvent, ScrollBehavior,
    ScrollToOptions, TouchEvent, WheelEvent, Window,
};

use super::attachment::Attachment;
use super::geometry::{key_delta, normalize_wheel_delta, Geometry};
use super::lock::{Behavior, Effect, Input, LockConfig, LockEngine, LockSnapshot, PinTick};
use crate::config::ScrollTuning;

/// An event listener that unregisters itself when dropped.
pub struct DomListener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl DomListener {
    pub fn new<F>(target: &EventTarget, kind: &'static str, passive: bool, handler: F) -> Option<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        // Non-passive so preventDefault() can hold the page still.
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .ok()?;
        Some(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for DomListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// requestAnimationFrame loop that runs until the callback returns false or
/// the loop is dropped.
pub struct FrameLoop {
    handle: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
    pub fn start<F>(mut on_frame: F) -> Option<Self>
    where
        F: FnMut() -> bool + 'static,
    {
        let window = web_sys::window()?;
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

        let next_handle = handle.clone();
        let this_callback = Rc::downgrade(&callback);
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            next_handle.set(None);
            if !on_frame() {
                return;
            }
            let (Some(callback), Some(window)) = (this_callback.upgrade(), web_sys::window()) else {
                return;
            };
            if let Some(callback) = callback.borrow().as_ref() {
                next_handle.set(
                    window
                        .request_animation_frame(callback.as_ref().unchecked_ref())
                        .ok(),
                );
            };
        }) as Box<dyn FnMut()>));

        if let Some(first) = callback.borrow().as_ref() {
            handle.set(window.request_animation_frame(first.as_ref().unchecked_ref()).ok());
        }
        Some(Self { handle, callback })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.handle.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}

type PageAttachment = Attachment<DomListener, FrameLoop, Timeout>;

struct Inner {
    engine: LockEngine,
    container: HtmlElement,
    wrapper: HtmlElement,
    attachment: PageAttachment,
    key_step: f64,
    on_change: Rc<dyn Fn(LockSnapshot)>,
    last_snapshot: LockSnapshot,
}

/// Live scroll lock bound to a carousel container and its wrapper.
#[derive(Clone)]
pub struct ScrollLockController {
    inner: Rc<RefCell<Inner>>,
}

impl PartialEq for ScrollLockController {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ScrollLockController {
    /// Starts listening. Returns `None` while the elements can't be measured
    /// yet; the caller simply tries again on the next mount.
    pub fn attach<F>(
        container: HtmlElement,
        wrapper: HtmlElement,
        config: LockConfig,
        tuning: ScrollTuning,
        on_change: F,
    ) -> Option<Self>
    where
        F: Fn(LockSnapshot) + 'static,
    {
        let window = web_sys::window()?;
        let geometry = measure(&window, &container, &wrapper)?;
        let use_scrollend = tuning.use_scrollend && supports_scrollend(&window);
        let key_step = tuning.key_step;

        let mut engine = LockEngine::new(config, tuning);
        engine.sync_initial(&geometry);
        let snapshot = engine.snapshot();

        let controller = Self {
            inner: Rc::new(RefCell::new(Inner {
                engine,
                container,
                wrapper,
                attachment: Attachment::new(),
                key_step,
                on_change: Rc::new(on_change),
                last_snapshot: snapshot,
            })),
        };
        controller.listen(&window, use_scrollend);

        debug!(
            "Scroll lock attached: {} sections, phase {:?}, scrollend {}",
            config.section_count, snapshot.phase, use_scrollend
        );
        let on_change = controller.inner.borrow().on_change.clone();
        on_change(snapshot);
        Some(controller)
    }

    pub fn set_progress(&self, value: f64) {
        dispatch(&self.inner, Input::SetProgress(value), None);
    }

    pub fn jump_to_section(&self, section: usize) {
        let offset = self.inner.borrow().engine.layout().offset_of(section);
        self.set_progress(offset);
    }

    /// Removes every listener, stops the pin loop and clears pending timers.
    /// Safe to call any number of times.
    pub fn detach(&self) {
        let Ok(mut state) = self.inner.try_borrow_mut() else {
            return;
        };
        if state.attachment.detach() {
            debug!("Scroll lock detached");
        }
    }

    fn listen(&self, window: &Window, use_scrollend: bool) {
        let weak = Rc::downgrade(&self.inner);
        let key_step = self.inner.borrow().key_step;
        let mut listeners = Vec::new();

        listeners.extend(DomListener::new(
            window,
            "wheel",
            false,
            route(weak.clone(), |event| {
                let wheel = event.dyn_ref::<WheelEvent>()?;
                // Pinch zoom arrives as ctrl+wheel.
                if wheel.ctrl_key() {
                    return None;
                }
                let delta =
                    normalize_wheel_delta(wheel.delta_y(), wheel.delta_mode(), viewport_height());
                Some(Input::Wheel { delta })
            }),
        ));
        listeners.extend(DomListener::new(
            window,
            "touchstart",
            true,
            route(weak.clone(), |event| {
                first_touch_y(event).map(|y| Input::TouchStart { y })
            }),
        ));
        listeners.extend(DomListener::new(
            window,
            "touchmove",
            false,
            route(weak.clone(), |event| {
                first_touch_y(event).map(|y| Input::TouchMove { y })
            }),
        ));
        for kind in ["touchend", "touchcancel"] {
            listeners.extend(DomListener::new(
                window,
                kind,
                true,
                route(weak.clone(), |_| Some(Input::TouchEnd)),
            ));
        }
        listeners.extend(DomListener::new(
            window,
            "keydown",
            false,
            route(weak.clone(), move |event| {
                let key = event.dyn_ref::<KeyboardEvent>()?;
                if key.ctrl_key() || key.meta_key() || key.alt_key() || keys_owned_by_target(event) {
                    return None;
                }
                let delta = key_delta(&key.key(), key.shift_key(), viewport_height(), key_step)?;
                Some(Input::Key { delta })
            }),
        ));
        listeners.extend(DomListener::new(
            window,
            "scroll",
            true,
            route(weak.clone(), |_| Some(Input::DocumentScroll)),
        ));
        listeners.extend(DomListener::new(
            window,
            "resize",
            true,
            route(weak.clone(), |_| Some(Input::Resize)),
        ));
        if use_scrollend {
            listeners.extend(DomListener::new(
                window,
                "scrollend",
                true,
                route(weak, |_| Some(Input::ScrollEnd)),
            ));
        }

        let mut state = self.inner.borrow_mut();
        for listener in listeners {
            state.attachment.add_listener(listener);
        }
    }
}

fn route<F>(weak: Weak<RefCell<Inner>>, translate: F) -> impl FnMut(Event) + 'static
where
    F: Fn(&Event) -> Option<Input> + 'static,
{
    move |event: Event| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        if let Some(input) = translate(&event) {
            dispatch(&inner, input, Some(&event));
        }
    }
}

fn dispatch(inner: &Rc<RefCell<Inner>>, input: Input, event: Option<&Event>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let effects = {
        let Ok(mut state) = inner.try_borrow_mut() else {
            debug!("Dropped {:?} while the scroll lock was busy", input);
            return;
        };
        if state.attachment.is_detached() {
            return;
        }
        let state = &mut *state;
        let Some(geometry) = measure(&window, &state.container, &state.wrapper) else {
            return;
        };
        state.engine.handle(input, &geometry)
    };
    apply(inner, &window, effects, event);
    notify(inner);
}

fn apply(inner: &Rc<RefCell<Inner>>, window: &Window, effects: Vec<Effect>, event: Option<&Event>) {
    for effect in effects {
        match effect {
            Effect::PreventDefault => {
                if let Some(event) = event.filter(|event| event.cancelable()) {
                    event.prevent_default();
                }
            }
            Effect::ScrollTo { y, behavior } => {
                window.scroll_to_with_scroll_to_options(&scroll_options(y, behavior));
            }
            Effect::ScrollBy { dy, behavior } => {
                window.scroll_by_with_scroll_to_options(&scroll_options(dy, behavior));
            }
            Effect::StartPin => {
                let weak = Rc::downgrade(inner);
                let frame = FrameLoop::start(move || match weak.upgrade() {
                    Some(inner) => pin_tick(&inner),
                    None => false,
                });
                if let Some(frame) = frame {
                    inner.borrow_mut().attachment.set_frame(frame);
                }
            }
            Effect::StopPin => inner.borrow_mut().attachment.clear_frame(),
            Effect::Schedule { timer, after_ms } => {
                let weak = Rc::downgrade(inner);
                let timeout = Timeout::new(after_ms, move || {
                    if let Some(inner) = weak.upgrade() {
                        dispatch(&inner, Input::Timer(timer), None);
                    }
                });
                inner.borrow_mut().attachment.set_timer(timer, timeout);
            }
            Effect::Cancel(timer) => inner.borrow_mut().attachment.clear_timer(timer),
        }
    }
}

fn pin_tick(inner: &Rc<RefCell<Inner>>) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Ok(scroll_y) = window.scroll_y() else {
        return true;
    };
    let tick = match inner.try_borrow() {
        Ok(state) if !state.attachment.is_detached() => state.engine.tick(scroll_y),
        Ok(_) => PinTick::Stop,
        Err(_) => PinTick::Hold,
    };
    match tick {
        PinTick::Hold => true,
        PinTick::Correct(y) => {
            window.scroll_to_with_scroll_to_options(&scroll_options(y, Behavior::Instant));
            true
        }
        PinTick::Stop => false,
    }
}

fn notify(inner: &Rc<RefCell<Inner>>) {
    let (on_change, snapshot) = {
        let mut state = inner.borrow_mut();
        let snapshot = state.engine.snapshot();
        if snapshot == state.last_snapshot {
            return;
        }
        state.last_snapshot = snapshot;
        (state.on_change.clone(), snapshot)
    };
    on_change(snapshot);
}

fn measure(window: &Window, container: &HtmlElement, wrapper: &HtmlElement) -> Option<Geometry> {
    if !wrapper.is_connected() || !container.is_connected() {
        return None;
    }
    let section_width = container.client_width() as f64;
    if section_width <= 0.0 {
        return None;
    }
    let rect = wrapper.get_bounding_client_rect();
    Some(Geometry {
        scroll_y: window.scroll_y().ok()?,
        viewport_height: window.inner_height().ok()?.as_f64()?,
        wrapper_top: rect.top(),
        wrapper_height: rect.height(),
        section_width,
    })
}

fn scroll_options(top: f64, behavior: Behavior) -> ScrollToOptions {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(match behavior {
        Behavior::Instant => ScrollBehavior::Instant,
        Behavior::Smooth => ScrollBehavior::Smooth,
    });
    options
}

fn viewport_height() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

fn first_touch_y(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(touch.client_y() as f64)
}

/// Keys pressed on these elements belong to them, e.g. Space on a button.
fn owns_keys(tag_name: &str, content_editable: bool) -> bool {
    content_editable
        || matches!(
            tag_name.to_ascii_uppercase().as_str(),
            "INPUT" | "TEXTAREA" | "SELECT" | "BUTTON" | "A"
        )
}

fn keys_owned_by_target(event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<HtmlElement>().ok())
        .map(|el| owns_keys(&el.tag_name(), el.is_content_editable()))
        .unwrap_or(false)
}

fn supports_scrollend(window: &Window) -> bool {
    web_sys::js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("onscrollend"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interactive_targets_keep_their_keys() {
        assert!(owns_keys("BUTTON", false));
        assert!(owns_keys("a", false));
        assert!(owns_keys("INPUT", false));
        assert!(owns_keys("DIV", true));
        assert!(!owns_keys("BODY", false));
        assert!(!owns_keys("SECTION", false));
    }
}
