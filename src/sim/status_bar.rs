//! HUD gauges drawn as ordinary entities
//!
//! Path layout per bar: frame, empty background, fill (rebuilt every frame),
//! then one divider per inner segment boundary.

use glam::Vec2;

use super::entity::{Body, Entity, EntityKind};
use super::path::Path;
use crate::consts::BAR_INSET;
use crate::platform::Viewport;
use crate::renderer::{Rgba, palette};
use crate::settings::PlayerTuning;

const FILL_PATH: usize = 2;

/// Which player reading a bar shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gauge {
    Health,
    TripleAmmo,
    Burst,
}

/// Player readings in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GaugeReadings {
    pub health: f32,
    pub triple: f32,
    pub burst: f32,
}

impl GaugeReadings {
    pub fn get(&self, gauge: Gauge) -> f32 {
        match gauge {
            Gauge::Health => self.health,
            Gauge::TripleAmmo => self.triple,
            Gauge::Burst => self.burst,
        }
    }
}

/// Position relative to the viewport's bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarAnchor {
    pub x: f32,
    /// Distance of the bar center above the bottom edge
    pub from_bottom: f32,
}

impl BarAnchor {
    pub fn resolve(&self, viewport: Viewport) -> Vec2 {
        Vec2::new(self.x, viewport.height - self.from_bottom)
    }
}

#[derive(Debug, Clone)]
pub struct StatusBar {
    pub gauge: Gauge,
    pub progress: f32,
    pub size: Vec2,
    pub fill_color: Rgba,
    pub vertical: bool,
    pub anchor: BarAnchor,
    pub segments: u32,
}

impl StatusBar {
    fn inner_width(&self) -> f32 {
        self.size.x - BAR_INSET
    }

    fn fill_path(&self) -> Path {
        let inner = self.inner_width();
        let filled = inner * self.progress;
        let mut path =
            Path::rectangle(filled, self.size.y - BAR_INSET).with_fill(self.fill_color);
        // Left-align the filled part inside the frame
        path.shift(Vec2::new(-(inner - filled) / 2.0, 0.0));
        path
    }

    pub fn update(&mut self, body: &mut Body, readings: Option<&GaugeReadings>, viewport: Viewport) {
        body.pos = self.anchor.resolve(viewport);
        if let Some(readings) = readings {
            let p = readings.get(self.gauge);
            self.progress = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
        }

        let fill = self.fill_path();
        match body.paths.get_mut(FILL_PATH) {
            Some(slot) => *slot = fill,
            None => body.paths.push(fill),
        }

        if self.vertical {
            for path in &mut body.paths {
                path.set_rotation(90.0);
            }
        }
    }
}

pub fn spawn(
    gauge: Gauge,
    anchor: BarAnchor,
    size: Vec2,
    fill_color: Rgba,
    vertical: bool,
    segments: u32,
    viewport: Viewport,
) -> Entity {
    let bar = StatusBar {
        gauge,
        progress: 1.0,
        size,
        fill_color,
        vertical,
        anchor,
        segments: segments.max(1),
    };
    let inner = bar.inner_width();
    let inner_height = size.y - BAR_INSET;

    let mut paths = vec![
        Path::rectangle(size.x, size.y).with_fill(palette::BAR_FRAME),
        Path::rectangle(inner, inner_height).with_fill(palette::BAR_EMPTY),
        bar.fill_path(),
    ];
    for i in 1..bar.segments {
        let mut divider = Path::rectangle(2.0, inner_height).with_fill(palette::BAR_FRAME);
        divider.shift(Vec2::new(
            i as f32 * inner / bar.segments as f32 - inner / 2.0,
            0.0,
        ));
        paths.push(divider);
    }
    if vertical {
        for path in &mut paths {
            path.set_rotation(90.0);
        }
    }

    let mut body = Body::new(anchor.resolve(viewport), size / 2.0, paths);
    body.collidable = false;
    Entity {
        body,
        kind: EntityKind::StatusBar(bar),
    }
}

/// Triple ammo, burst and health bars, in that order
pub fn standard_bars(tuning: &PlayerTuning, viewport: Viewport) -> Vec<Entity> {
    let triple_segments = (tuning.triple_ammo / 2.0).floor().max(1.0) as u32;
    vec![
        spawn(
            Gauge::TripleAmmo,
            BarAnchor {
                x: 20.0,
                from_bottom: 110.0,
            },
            Vec2::new(200.0, 20.0),
            palette::BAR_TRIPLE,
            true,
            triple_segments,
            viewport,
        ),
        spawn(
            Gauge::Burst,
            BarAnchor {
                x: 90.0,
                from_bottom: 20.0,
            },
            Vec2::new(100.0, 20.0),
            palette::BAR_BURST,
            false,
            1,
            viewport,
        ),
        spawn(
            Gauge::Health,
            BarAnchor {
                x: 90.0,
                from_bottom: 50.0,
            },
            Vec2::new(100.0, 20.0),
            palette::BAR_HEALTH,
            false,
            1,
            viewport,
        ),
    ]
}
