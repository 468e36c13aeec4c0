//! Platform abstraction layer
//!
//! Turns device input (keyboard, touch, on-screen buttons) into the
//! device-agnostic intents the simulation understands.

pub mod input;

pub use input::{Intent, Swipe, intent_for_key};
