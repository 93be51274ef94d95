//! Platform abstraction layer
//!
//! Shared by the web and native front ends:
//! - Time/ticks (fixed-step accumulator)
//! - Input events (held keys and one-shot presses)

pub mod input;
pub mod time;

pub use input::{Key, InputLatch};
pub use time::FixedStep;
