//! DOM wiring for the page behaviors: typing headline, scroll reveal, nav
//! toggle and footer year.

use std::cell::RefCell;
use std::rc::Rc;

use landing_fx_core::error::FxError;
use landing_fx_core::frame_loop::LoopHandle;
use landing_fx_page::reveal::{REVEAL_CLASS, REVEAL_SELECTORS};
use landing_fx_page::{toggle_display, Intersection, RevealTracker, Typewriter};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::canvas::window;

/// Attribute carrying the tracker id of an observed element.
const REVEAL_ID_ATTR: &str = "data-reveal-id";

fn document(window: &Window) -> Result<Document, FxError> {
    window
        .document()
        .ok_or_else(|| FxError::SurfaceUnavailable("no document".into()))
}

fn element_by_id(id: &str) -> Result<Element, FxError> {
    document(&window()?)?
        .get_element_by_id(id)
        .ok_or_else(|| FxError::SurfaceUnavailable(format!("#{id}: element not found")))
}

/// Handle to the running typing loop.
#[wasm_bindgen]
pub struct Typing {
    handle: LoopHandle,
    callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    window: Window,
}

#[wasm_bindgen]
impl Typing {
    /// Clears the pending timeout and stops the cycle.
    pub fn stop(&mut self) {
        if let Some(id) = self.handle.stop() {
            self.window.clear_timeout_with_handle(id);
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for Typing {
    fn drop(&mut self) {
        self.stop();
    }
}

pub(crate) fn start_typing(element_id: &str, params: &serde_json::Value) -> Result<Typing, FxError> {
    let window = window()?;
    let target = element_by_id(element_id)?;
    let mut writer = Typewriter::from_json(params)?;

    let handle = LoopHandle::new();
    let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

    let slot = callback.clone();
    let win = window.clone();
    let active = handle.clone();
    *callback.borrow_mut() = Some(Closure::new(move || {
        active.fired();
        if !active.is_active() {
            return;
        }
        let step = writer.tick();
        target.set_text_content(Some(&step.text));
        if let Some(next) = slot.borrow().as_ref() {
            let delay = i32::try_from(step.delay_ms).unwrap_or(i32::MAX);
            match win.set_timeout_with_callback_and_timeout_and_arguments_0(
                next.as_ref().unchecked_ref(),
                delay,
            ) {
                Ok(id) => active.scheduled(id),
                Err(_) => {
                    log::error!("typing stopped: setTimeout failed");
                    active.cancel();
                }
            }
        }
    }));

    if let Some(first) = callback.borrow().as_ref() {
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(first.as_ref().unchecked_ref(), 0)
            .map_err(|_| FxError::SchedulerUnavailable("setTimeout failed".into()))?;
        handle.scheduled(id);
    }

    Ok(Typing {
        handle,
        callback,
        window,
    })
}

/// Handle to the scroll-reveal observer.
#[wasm_bindgen]
pub struct Reveals {
    observer: IntersectionObserver,
    tracker: Rc<RefCell<RevealTracker>>,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

#[wasm_bindgen]
impl Reveals {
    /// Elements still waiting to be revealed.
    #[wasm_bindgen(getter)]
    pub fn pending(&self) -> usize {
        self.tracker.borrow().pending()
    }

    /// Stops observing every element. Also runs when the handle is freed.
    pub fn disconnect(&self) {
        self.observer.disconnect();
        self.tracker.borrow_mut().disconnect();
    }
}

impl Drop for Reveals {
    fn drop(&mut self) {
        self.disconnect();
    }
}

pub(crate) fn observe_reveals(selectors: Option<&str>, threshold: f64) -> Result<Reveals, FxError> {
    let document = document(&window()?)?;
    let tracker = Rc::new(RefCell::new(RevealTracker::new(threshold)));

    let seen = tracker.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(id) = target.get_attribute(REVEAL_ID_ATTR) else {
                    continue;
                };
                let revealed = seen.borrow_mut().report(&Intersection {
                    id: &id,
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                });
                if revealed {
                    let _ = target.class_list().add_1(REVEAL_CLASS);
                    observer.unobserve(&target);
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(tracker.borrow().threshold()));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        .map_err(|_| FxError::SchedulerUnavailable("IntersectionObserver unavailable".into()))?;

    let selectors = selectors.unwrap_or(REVEAL_SELECTORS);
    let nodes = document
        .query_selector_all(selectors)
        .map_err(|_| FxError::InvalidConfig(format!("bad selector list '{selectors}'")))?;
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let id = i.to_string();
        let _ = el.set_attribute(REVEAL_ID_ATTR, &id);
        tracker.borrow_mut().observe(&id);
        observer.observe(&el);
    }
    log::debug!("observing {} elements for reveal", tracker.borrow().pending());

    Ok(Reveals {
        observer,
        tracker,
        _callback: callback,
    })
}

/// Click on `toggle` flips `nav` between `display: flex` and `none`. A
/// missing toggle button is not an error.
pub(crate) fn bind_nav_toggle(toggle: &str, nav: &str) -> Result<(), FxError> {
    let document = document(&window()?)?;
    let Some(button) = document.query_selector(toggle).ok().flatten() else {
        log::debug!("no '{toggle}' on this page");
        return Ok(());
    };
    let menu = document
        .query_selector(nav)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| FxError::SurfaceUnavailable(format!("'{nav}' not found")))?;

    let on_click = Closure::<dyn FnMut()>::new(move || {
        let style = menu.style();
        let current = style.get_property_value("display").unwrap_or_default();
        let _ = style.set_property("display", toggle_display(&current));
    });
    button
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|_| FxError::SchedulerUnavailable("cannot listen for click".into()))?;
    // Bound for the page's lifetime.
    on_click.forget();
    Ok(())
}

pub(crate) fn set_footer_year(element_id: &str) -> Result<(), FxError> {
    let year = js_sys::Date::new_0().get_full_year();
    element_by_id(element_id)?.set_text_content(Some(&year.to_string()));
    Ok(())
}
