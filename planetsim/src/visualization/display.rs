//! What a renderer needs from the simulation, without rendering anything
//!
//! The toggles here are display-only; nothing in `simulation` reads them.

use crate::simulation::states::{Body, Color, NVec2, Trail};

/// Meters per screen pixel at zoom 1
pub const DEFAULT_SCALE: f64 = 5e8;

/// Glow halo radius relative to the body radius
pub const GLOW_FACTOR: f64 = 1.5;

/// Display toggles and world scale, owned by the frontend
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub show_glow: bool,
    pub show_trails: bool,
    pub show_shadows: bool,
    pub show_rings: bool,
    pub scale: f64, // meters per pixel
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_glow: true,
            show_trails: true,
            show_shadows: false,
            show_rings: false,
            scale: DEFAULT_SCALE,
        }
    }
}

impl DisplayConfig {
    pub fn toggle_glow(&mut self) {
        self.show_glow = !self.show_glow;
    }

    pub fn toggle_trails(&mut self) {
        self.show_trails = !self.show_trails;
    }

    pub fn toggle_shadows(&mut self) {
        self.show_shadows = !self.show_shadows;
    }

    pub fn toggle_rings(&mut self) {
        self.show_rings = !self.show_rings;
    }

    /// World meters -> screen pixels, origin at `center`
    pub fn world_to_screen(&self, p: NVec2, center: NVec2) -> NVec2 {
        center + p / self.scale
    }

    /// Screen pixels -> world meters, inverse of [`Self::world_to_screen`]
    pub fn screen_to_world(&self, s: NVec2, center: NVec2) -> NVec2 {
        (s - center) * self.scale
    }

    /// Drawn radius; radii are authored for the default scale
    pub fn body_radius(&self, body: &Body) -> f64 {
        body.radius() * (DEFAULT_SCALE / self.scale)
    }

    /// Glow halo radius, or `None` when glow is off
    pub fn glow_radius(&self, body: &Body) -> Option<f64> {
        self.show_glow.then(|| GLOW_FACTOR * self.body_radius(body))
    }
}

/// One line segment of a trail, with its fade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSegment {
    pub from: NVec2,
    pub to: NVec2,
    pub alpha: f32,
}

impl TrailSegment {
    pub fn color(&self, base: Color) -> Color {
        base.faded(self.alpha)
    }
}

/// Consecutive point pairs, oldest first
/// The segment ending at point `i` fades with weight `i / len`
pub fn trail_segments(trail: &Trail) -> impl Iterator<Item = TrailSegment> + '_ {
    (1..trail.len()).filter_map(move |i| {
        let from = *trail.get(i - 1)?;
        let to = *trail.get(i)?;
        Some(TrailSegment { from, to, alpha: trail.fade(i) })
    })
}
