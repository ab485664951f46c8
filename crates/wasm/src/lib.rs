//! WASM bindings for landing-fx.
//!
//! The host page calls the exports explicitly; nothing runs on module load.
//!
//! ```js
//! import init, { NetworkBackground, GrowthTree, startTyping } from "./landing_fx_wasm.js";
//! await init();
//! const bg = NetworkBackground.start("network-canvas");
//! const tree = GrowthTree.start("growth-canvas");
//! const typing = startTyping("typing-words");
//! // later: bg.stop(); tree.stop(); typing.stop();
//! ```

mod animation;
mod canvas;
mod dom;

use landing_fx_core::error::FxError;
use landing_fx_core::Viewport;
use landing_fx_effects::EffectKind;
use landing_fx_page::nav::{NAV_SELECTOR, TOGGLE_SELECTOR};
use landing_fx_page::reveal::DEFAULT_THRESHOLD;
use serde_json::Value;
use wasm_bindgen::prelude::*;

pub use animation::Animation;
pub use dom::{Reveals, Typing};

use animation::{Sizing, Stage};
use canvas::{canvas_context, CanvasSurface, JsRandom};

fn js_err(e: FxError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parses optional JSON parameters; absent means `{}`.
fn parse_params(json: Option<String>) -> Result<Value, FxError> {
    match json {
        None => Ok(Value::Object(Default::default())),
        Some(text) => serde_json::from_str(&text)
            .map_err(|e| FxError::InvalidConfig(format!("params: {e}"))),
    }
}

fn start_effect(
    name: &str,
    canvas_id: &str,
    params: Option<String>,
    sizing: Sizing,
) -> Result<Animation, FxError> {
    let params = parse_params(params)?;
    let (canvas, ctx) = canvas_context(canvas_id)?;
    let mut rng = JsRandom;
    // Real size is applied by `animation::start` before the first frame.
    let effect = EffectKind::from_name(name, Viewport::default(), &params, &mut rng)?;
    animation::start(
        Stage {
            effect,
            surface: CanvasSurface::new(ctx),
            rng,
            canvas,
        },
        sizing,
    )
}

/// Full-window particle network behind the page.
#[wasm_bindgen]
pub struct NetworkBackground;

#[wasm_bindgen]
impl NetworkBackground {
    /// Sizes `canvas_id` to the window, seeds the field and starts drawing.
    /// Window resizes reseed it.
    pub fn start(canvas_id: &str, params: Option<String>) -> Result<Animation, JsValue> {
        start_effect("network", canvas_id, params, Sizing::FollowWindow).map_err(js_err)
    }
}

/// Growth tree with service labels. Stops once fully grown.
#[wasm_bindgen(js_name = GrowthTree)]
pub struct GrowthTreeCanvas;

#[wasm_bindgen(js_class = GrowthTree)]
impl GrowthTreeCanvas {
    /// Spans the canvas element's width; height comes from the tree params.
    pub fn start(canvas_id: &str, params: Option<String>) -> Result<Animation, JsValue> {
        start_effect("tree", canvas_id, params, Sizing::Element).map_err(js_err)
    }
}

#[wasm_bindgen(js_name = startTyping)]
pub fn start_typing(element_id: &str, params: Option<String>) -> Result<Typing, JsValue> {
    let params = parse_params(params).map_err(js_err)?;
    dom::start_typing(element_id, &params).map_err(js_err)
}

/// Adds the fade-in class to matching elements the first time they scroll
/// into view.
#[wasm_bindgen(js_name = observeReveals)]
pub fn observe_reveals(selectors: Option<String>, threshold: Option<f64>) -> Result<Reveals, JsValue> {
    dom::observe_reveals(selectors.as_deref(), threshold.unwrap_or(DEFAULT_THRESHOLD))
        .map_err(js_err)
}

#[wasm_bindgen(js_name = bindNavToggle)]
pub fn bind_nav_toggle(toggle: Option<String>, nav: Option<String>) -> Result<(), JsValue> {
    dom::bind_nav_toggle(
        toggle.as_deref().unwrap_or(TOGGLE_SELECTOR),
        nav.as_deref().unwrap_or(NAV_SELECTOR),
    )
    .map_err(js_err)
}

#[wasm_bindgen(js_name = setFooterYear)]
pub fn set_footer_year(element_id: &str) -> Result<(), JsValue> {
    dom::set_footer_year(element_id).map_err(js_err)
}

/// Routes panics and `log` records to the browser console. `level` is one
/// of "error", "warn", "info", "debug", "trace" (default "warn").
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) {
    console_error_panic_hook::set_once();
    let filter = level
        .as_deref()
        .and_then(|l| l.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Warn);
    if log::set_logger(&CONSOLE).is_ok() {
        log::set_max_level(filter);
    }
}

struct ConsoleLogger;

static CONSOLE: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            log::Level::Info => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_params_are_an_empty_object() {
        assert_eq!(parse_params(None).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn params_parse_as_json() {
        let v = parse_params(Some(r#"{"max_points": 40}"#.into())).unwrap();
        assert_eq!(v["max_points"], 40);
    }

    #[test]
    fn bad_params_are_invalid_config() {
        assert!(matches!(
            parse_params(Some("{nope".into())),
            Err(FxError::InvalidConfig(_))
        ));
    }
}
