//! Platform abstraction layer
//!
//! Turns raw browser input (key names, pointer offsets) into simulation
//! commands. Kept free of `web_sys` so it can be tested natively.

pub mod input;

pub use input::{Joystick, KeyAction, map_key};
