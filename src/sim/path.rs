//! Local-coordinate shapes and their rotation/scale transform
//!
//! A path keeps an immutable snapshot of its original step coordinates. The
//! current coordinates are always recomputed from that snapshot:
//!
//! `current = scale * R(rotation) * original`
//!
//! with `R` mapping `(x, y)` to `(cos*x + sin*y, cos*y - sin*x)`.

use glam::Vec2;
use std::f32::consts::TAU;

use crate::normalize_degrees;
use crate::renderer::{DrawCommand, DrawSink, Rgba};

/// One drawing instruction in shape-local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathStep {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Arc around `center`; radius and angles are never transformed
    Arc {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
}

impl PathStep {
    /// The step's anchor point
    pub fn point(&self) -> Vec2 {
        match *self {
            PathStep::MoveTo(p) | PathStep::LineTo(p) => p,
            PathStep::Arc { center, .. } => center,
        }
    }

    fn with_point(self, p: Vec2) -> Self {
        match self {
            PathStep::MoveTo(_) => PathStep::MoveTo(p),
            PathStep::LineTo(_) => PathStep::LineTo(p),
            PathStep::Arc {
                radius,
                start_angle,
                end_angle,
                ..
            } => PathStep::Arc {
                center: p,
                radius,
                start_angle,
                end_angle,
            },
        }
    }

    fn at_origin(self, origin: Vec2) -> DrawCommand {
        match self {
            PathStep::MoveTo(p) => DrawCommand::MoveTo(origin + p),
            PathStep::LineTo(p) => DrawCommand::LineTo(origin + p),
            PathStep::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => DrawCommand::Arc {
                center: origin + center,
                radius,
                start_angle,
                end_angle,
            },
        }
    }
}

/// Rotate a point by `degrees` using the path sign convention
#[inline]
fn rotate_point(p: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(cos * p.x + sin * p.y, cos * p.y - sin * p.x)
}

/// A drawable, transformable shape
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    original: Vec<PathStep>,
    steps: Vec<PathStep>,
    /// Degrees, always in [0, 360)
    rotation: f32,
    scale: f32,
    pub fill: Option<Rgba>,
    pub stroke: Option<Rgba>,
}

impl Path {
    pub fn new(steps: Vec<PathStep>) -> Self {
        Self {
            original: steps.clone(),
            steps,
            rotation: 0.0,
            scale: 1.0,
            fill: None,
            stroke: None,
        }
    }

    /// Closed outline through `points` (first is a move, the rest are lines)
    pub fn polygon(points: &[Vec2]) -> Self {
        let steps = points
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                if i == 0 {
                    PathStep::MoveTo(p)
                } else {
                    PathStep::LineTo(p)
                }
            })
            .collect();
        Self::new(steps)
    }

    /// Regular polygon with vertex `i` at angle `i * 2π / sides`
    pub fn regular_polygon(radius: f32, sides: u32) -> Self {
        let sides = sides.max(3);
        let step = TAU / sides as f32;
        let points: Vec<Vec2> = (0..sides)
            .map(|i| {
                let a = i as f32 * step;
                Vec2::new(radius * a.cos(), radius * a.sin())
            })
            .collect();
        Self::polygon(&points)
    }

    pub fn triangle(radius: f32) -> Self {
        Self::regular_polygon(radius, 3)
    }

    /// Axis-aligned rectangle centered on the origin
    pub fn rectangle(width: f32, height: f32) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Self::polygon(&[
            Vec2::new(-hw, -hh),
            Vec2::new(-hw, hh),
            Vec2::new(hw, hh),
            Vec2::new(hw, -hh),
        ])
    }

    pub fn with_fill(mut self, color: Rgba) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_stroke(mut self, color: Rgba) -> Self {
        self.stroke = Some(color);
        self
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Current (transformed) steps
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Untransformed snapshot
    pub fn original(&self) -> &[PathStep] {
        &self.original
    }

    /// Current step points in local space
    pub fn vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.steps.iter().map(PathStep::point)
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = normalize_degrees(degrees);
        self.apply_transform();
    }

    pub fn rotate(&mut self, delta: f32) {
        self.set_rotation(self.rotation + delta);
    }

    /// Set the uniform scale; negative or non-finite factors become 0
    pub fn set_scale(&mut self, factor: f32) {
        self.scale = if factor.is_finite() { factor.max(0.0) } else { 0.0 };
        self.apply_transform();
    }

    /// Permanently offset the original coordinates (construction time only)
    pub fn shift(&mut self, offset: Vec2) {
        for step in &mut self.original {
            *step = step.with_point(step.point() + offset);
        }
        self.apply_transform();
    }

    /// Permanently rotate the original coordinates (construction time only)
    pub fn bake_rotation(&mut self, degrees: f32) {
        for step in &mut self.original {
            *step = step.with_point(rotate_point(step.point(), degrees));
        }
        self.apply_transform();
    }

    fn apply_transform(&mut self) {
        let (rotation, scale) = (self.rotation, self.scale);
        for (current, orig) in self.steps.iter_mut().zip(&self.original) {
            *current = orig.with_point(rotate_point(orig.point(), rotation) * scale);
        }
    }

    /// Emit every step translated to `origin`
    pub fn execute<S: DrawSink + ?Sized>(&self, origin: Vec2, sink: &mut S) {
        for step in &self.steps {
            sink.submit(step.at_origin(origin));
        }
    }

    /// Emit a complete shape: begin, steps, end with this path's colors
    pub fn draw<S: DrawSink + ?Sized>(&self, origin: Vec2, sink: &mut S) {
        sink.submit(DrawCommand::BeginShape);
        self.execute(origin, sink);
        sink.submit(DrawCommand::EndShape {
            fill: self.fill,
            stroke: self.stroke,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn test_rectangle_corners() {
        let path = Path::rectangle(4.0, 2.0);
        let pts: Vec<Vec2> = path.vertices().collect();
        assert_eq!(
            pts,
            vec![
                Vec2::new(-2.0, -1.0),
                Vec2::new(-2.0, 1.0),
                Vec2::new(2.0, 1.0),
                Vec2::new(2.0, -1.0),
            ]
        );
        assert!(matches!(path.steps()[0], PathStep::MoveTo(_)));
        assert!(matches!(path.steps()[3], PathStep::LineTo(_)));
    }

    #[test]
    fn test_regular_polygon_vertices_on_circle() {
        let path = Path::regular_polygon(5.0, 5);
        assert_eq!(path.steps().len(), 5);
        assert!(close(path.steps()[0].point(), Vec2::new(5.0, 0.0)));
        assert!(path.vertices().all(|p| (p.length() - 5.0).abs() < 1e-4));
    }

    #[test]
    fn test_rotation_sign_convention() {
        // (1, 0) rotated by 90 goes to (0, -1): x' = cos*x + sin*y, y' = cos*y - sin*x
        let mut path = Path::polygon(&[Vec2::new(1.0, 0.0)]);
        path.set_rotation(90.0);
        assert!(close(path.steps()[0].point(), Vec2::new(0.0, -1.0)));
    }

    #[test]
    fn test_rotation_is_not_accumulated() {
        let mut path = Path::triangle(10.0);
        for _ in 0..1000 {
            path.rotate(7.3);
        }
        let expected = normalize_degrees(7.3 * 1000.0);
        assert!((path.rotation() - expected).abs() < 0.1);

        let mut fresh = Path::triangle(10.0);
        fresh.set_rotation(path.rotation());
        for (a, b) in path.vertices().zip(fresh.vertices()) {
            assert!(close(a, b));
        }
    }

    #[test]
    fn test_scale_applies_to_original() {
        let mut path = Path::regular_polygon(1.0, 5);
        path.set_scale(30.0);
        path.set_scale(20.0);
        assert!(path.vertices().all(|p| (p.length() - 20.0).abs() < 1e-3));

        path.set_scale(-3.0);
        assert_eq!(path.scale(), 0.0);
        assert!(path.vertices().all(|p| p == Vec2::ZERO));
    }

    #[test]
    fn test_shift_bakes_into_original() {
        let mut path = Path::rectangle(2.0, 2.0);
        path.shift(Vec2::new(10.0, 0.0));
        assert!(close(path.original()[0].point(), Vec2::new(9.0, -1.0)));
        path.set_rotation(180.0);
        // Rotating 180 maps (9, -1) to (-9, 1)
        assert!(close(path.steps()[0].point(), Vec2::new(-9.0, 1.0)));
        path.set_rotation(0.0);
        assert!(close(path.steps()[0].point(), Vec2::new(9.0, -1.0)));
    }

    #[test]
    fn test_bake_rotation() {
        let mut path = Path::polygon(&[Vec2::new(0.0, 5.0)]);
        path.bake_rotation(-90.0);
        path.set_rotation(0.0);
        // sin(-90) = -1: x' = -y, y' = x
        assert!(close(path.steps()[0].point(), Vec2::new(-5.0, 0.0)));
    }

    #[test]
    fn test_draw_translates_points_and_passes_arc_through() {
        let mut path = Path::new(vec![
            PathStep::MoveTo(Vec2::new(1.0, 2.0)),
            PathStep::Arc {
                center: Vec2::new(0.0, 1.0),
                radius: 3.0,
                start_angle: 0.5,
                end_angle: 1.5,
            },
        ])
        .with_fill(Rgba::rgb(1, 2, 3));
        path.set_rotation(90.0);

        let mut out: Vec<DrawCommand> = Vec::new();
        path.draw(Vec2::new(100.0, 200.0), &mut out);

        assert_eq!(out.len(), 4);
        assert_eq!(out[0], DrawCommand::BeginShape);
        match out[1] {
            DrawCommand::MoveTo(p) => assert!(close(p, Vec2::new(102.0, 199.0))),
            other => panic!("unexpected {other:?}"),
        }
        match out[2] {
            DrawCommand::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                assert!(close(center, Vec2::new(101.0, 200.0)));
                assert_eq!((radius, start_angle, end_angle), (3.0, 0.5, 1.5));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            out[3],
            DrawCommand::EndShape {
                fill: Some(Rgba::rgb(1, 2, 3)),
                stroke: None
            }
        );
    }

    proptest! {
        #[test]
        fn prop_zero_rotation_restores_original(
            x in -500.0f32..500.0,
            y in -500.0f32..500.0,
            turns in proptest::collection::vec(-720.0f32..720.0, 1..8),
        ) {
            let mut path = Path::polygon(&[Vec2::new(x, y), Vec2::new(y, x)]);
            for t in turns {
                path.rotate(t);
            }
            path.set_rotation(0.0);
            for (cur, orig) in path.steps().iter().zip(path.original()) {
                prop_assert!((cur.point() - orig.point()).length() < 1e-3);
            }
        }
    }
}
