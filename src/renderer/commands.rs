//! Draw command stream consumed by the host canvas

use glam::Vec2;

use super::color::Rgba;

/// A single canvas instruction in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Start a new shape
    BeginShape,
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Circular arc; angles in radians, passed through untouched
    Arc {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
    /// Close the current shape, then stroke and fill it with the given colors
    EndShape {
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
    },
}

/// Receiver of ordered draw commands
pub trait DrawSink {
    fn submit(&mut self, command: DrawCommand);
}

impl DrawSink for Vec<DrawCommand> {
    fn submit(&mut self, command: DrawCommand) {
        self.push(command);
    }
}

/// Sink that only tallies what would have been drawn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeCounter {
    pub shapes: usize,
    pub points: usize,
}

impl DrawSink for ShapeCounter {
    fn submit(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::BeginShape => self.shapes += 1,
            DrawCommand::MoveTo(_) | DrawCommand::LineTo(_) | DrawCommand::Arc { .. } => {
                self.points += 1
            }
            DrawCommand::EndShape { .. } => {}
        }
    }
}
