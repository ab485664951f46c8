//! `requestAnimationFrame` driver for any [`Effect`].
//!
//! The frame closure owns the effect, its surface and random source, and
//! holds an `Rc` to its own slot so it can reschedule itself. The slot is
//! emptied by [`Animation::stop`] (or drop), which breaks that cycle after
//! revoking the queued frame. The optional resize listener is removed at the
//! same time.

use std::cell::RefCell;
use std::rc::Rc;

use landing_fx_core::effect::Effect;
use landing_fx_core::error::FxError;
use landing_fx_core::frame_loop::{tick, LoopHandle};
use landing_fx_core::Viewport;
use landing_fx_effects::EffectKind;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

use crate::canvas::{CanvasSurface, JsRandom};

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Everything one running effect needs between frames.
pub(crate) struct Stage {
    pub effect: EffectKind,
    pub surface: CanvasSurface,
    pub rng: JsRandom,
    pub canvas: HtmlCanvasElement,
}

impl Stage {
    /// Resizes the effect and then the canvas backing store to match it.
    pub fn fit(&mut self, viewport: Viewport) -> Result<(), FxError> {
        self.effect.resize(viewport, &mut self.rng)?;
        let laid_out = self.effect.viewport();
        self.canvas.set_width(laid_out.width as u32);
        self.canvas.set_height(laid_out.height as u32);
        Ok(())
    }
}

/// Viewport from the host's `innerWidth`/`innerHeight`; missing or
/// non-numeric values read as zero.
pub(crate) fn window_viewport(window: &Window) -> Result<Viewport, FxError> {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64());
    viewport_or_zero(read(window.inner_width()), read(window.inner_height()))
}

fn viewport_or_zero(width: Option<f64>, height: Option<f64>) -> Result<Viewport, FxError> {
    Viewport::new(width.unwrap_or(0.0), height.unwrap_or(0.0))
}

fn report(err: &FxError) {
    log::error!("{} stopped: {err}", env!("CARGO_PKG_NAME"));
}

/// Handle to a running canvas animation.
#[wasm_bindgen]
pub struct Animation {
    handle: LoopHandle,
    frame: FrameSlot,
    resize: Option<Closure<dyn FnMut()>>,
    window: Window,
}

#[wasm_bindgen]
impl Animation {
    /// Cancels the frame loop and detaches the resize listener.
    ///
    /// The queued `requestAnimationFrame` is revoked before the frame
    /// closure is dropped, so the browser never calls a freed closure.
    pub fn stop(&mut self) {
        if let Some(id) = self.handle.stop() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.frame.borrow_mut().take();
        if let Some(listener) = self.resize.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
        }
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.handle.is_active()
    }
}

impl Drop for Animation {
    fn drop(&mut self) {
        self.stop();
    }
}

/// How a stage's canvas gets its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sizing {
    /// Fills the window and re-fits on every window resize.
    FollowWindow,
    /// Takes the canvas element's laid-out size once, at start.
    Element,
}

/// Sizes `stage`, then starts its frame loop.
pub(crate) fn start(mut stage: Stage, sizing: Sizing) -> Result<Animation, FxError> {
    let window = crate::canvas::window()?;
    let initial = match sizing {
        Sizing::FollowWindow => window_viewport(&window)?,
        Sizing::Element => Viewport::new(
            f64::from(stage.canvas.offset_width()),
            f64::from(stage.canvas.offset_height()),
        )?,
    };
    stage.fit(initial)?;
    log::info!(
        "{} started at {}x{}",
        stage.effect.name(),
        stage.effect.viewport().width,
        stage.effect.viewport().height
    );

    let stage = Rc::new(RefCell::new(stage));
    let handle = LoopHandle::new();

    let resize = if sizing == Sizing::FollowWindow {
        let stage = stage.clone();
        let win = window.clone();
        let listener = Closure::<dyn FnMut()>::new(move || {
            let fitted = window_viewport(&win).and_then(|vp| stage.borrow_mut().fit(vp));
            if let Err(e) = fitted {
                report(&e);
            }
        });
        window
            .add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
            .map_err(|_| FxError::SchedulerUnavailable("cannot listen for resize".into()))?;
        Some(listener)
    } else {
        None
    };

    let frame: FrameSlot = Rc::new(RefCell::new(None));
    let slot = frame.clone();
    let win = window.clone();
    let loop_handle = handle.clone();
    *frame.borrow_mut() = Some(Closure::new(move || {
        loop_handle.fired();
        let again = {
            let mut s = stage.borrow_mut();
            let Stage {
                effect,
                surface,
                rng,
                ..
            } = &mut *s;
            tick(effect, surface, rng, &loop_handle).unwrap_or_else(|e| {
                report(&e);
                loop_handle.cancel();
                false
            })
        };
        if !again {
            return;
        }
        if let Some(next) = slot.borrow().as_ref() {
            match win.request_animation_frame(next.as_ref().unchecked_ref()) {
                Ok(id) => loop_handle.scheduled(id),
                Err(_) => {
                    report(&FxError::SchedulerUnavailable(
                        "requestAnimationFrame failed".into(),
                    ));
                    loop_handle.cancel();
                }
            }
        }
    }));

    if let Some(first) = frame.borrow().as_ref() {
        let id = window
            .request_animation_frame(first.as_ref().unchecked_ref())
            .map_err(|_| FxError::SchedulerUnavailable("requestAnimationFrame failed".into()))?;
        handle.scheduled(id);
    }

    Ok(Animation {
        handle,
        frame,
        resize,
        window,
    })
}
