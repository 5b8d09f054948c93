//! Platform abstraction layer
//!
//! Browser-independent pieces of the outer loop:
//! - Frame timing (`clock`)
//! - Keyboard/button mapping with edge triggering (`input`)

pub mod clock;
pub mod input;

pub use clock::FrameDriver;
pub use input::{InputEvent, InputMapper, Key};
