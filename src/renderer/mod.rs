//! Draw-command output
//!
//! The simulation never touches pixels. Every surviving entity emits one
//! shape per owned path into a [`DrawSink`] supplied by the host canvas.

pub mod color;
pub mod commands;

pub use color::{Rgba, palette};
pub use commands::{DrawCommand, DrawSink, ShapeCounter};
