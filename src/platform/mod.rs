//! Platform abstraction layer
//!
//! Translates raw host events (key codes, touch points) into simulation
//! `Action`s. Kept free of `web_sys` types so the mapping runs and tests
//! natively; the browser host only forwards strings and coordinates.

pub mod input;

pub use input::{hit_test, key_action, touch_end_actions, touch_start_actions};
