#![deny(unsafe_code)]
//! Host-independent page behaviors: the typing headline, one-shot scroll
//! reveal, and the mobile nav toggle. The WASM crate wires them to the DOM.

pub mod nav;
pub mod reveal;
pub mod typing;

pub use nav::{toggle_display, NavDisplay};
pub use reveal::{Intersection, RevealTracker};
pub use typing::{TypeTick, Typewriter, TypingTiming};
