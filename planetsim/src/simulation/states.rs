//! Core state types for the planetary simulation.
//!
//! - `Body`   one gravitating point mass, owning its `Trail`
//! - `Trail`  bounded oldest-first history of past positions
//! - `System` the ordered registry of bodies, plus simulation time `t`
//!
//! Insertion order is iteration order, both for force summation and for
//! whoever draws the bodies. Bodies are never removed.

use std::collections::VecDeque;

use nalgebra::Vector2;

use crate::simulation::error::SimError;

pub type NVec2 = Vector2<f64>;

/// Number of past positions kept per body
pub const TRAIL_CAPACITY: usize = 100;

/// Opaque RGBA display tag carried by each body
///
/// The physics never reads it; it is only handed back to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const LIGHTGRAY: Color = Color::rgb(200, 200, 200);
    pub const GRAY: Color = Color::rgb(130, 130, 130);
    pub const YELLOW: Color = Color::rgb(253, 249, 0);
    pub const ORANGE: Color = Color::rgb(255, 161, 0);
    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    pub const SKYBLUE: Color = Color::rgb(102, 191, 255);
    pub const BLUE: Color = Color::rgb(0, 121, 241);
    pub const DARKBLUE: Color = Color::rgb(0, 82, 172);
    pub const PURPLE: Color = Color::rgb(200, 122, 255);
    pub const BEIGE: Color = Color::rgb(211, 176, 131);
    pub const BROWN: Color = Color::rgb(127, 106, 79);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Look up a palette entry by name, ignoring case
    pub fn from_name(name: &str) -> Result<Self, SimError> {
        let color = match name.to_ascii_lowercase().as_str() {
            "white" => Color::WHITE,
            "lightgray" => Color::LIGHTGRAY,
            "gray" => Color::GRAY,
            "yellow" => Color::YELLOW,
            "orange" => Color::ORANGE,
            "red" => Color::RED,
            "green" => Color::GREEN,
            "skyblue" => Color::SKYBLUE,
            "blue" => Color::BLUE,
            "darkblue" => Color::DARKBLUE,
            "purple" => Color::PURPLE,
            "beige" => Color::BEIGE,
            "brown" => Color::BROWN,
            _ => return Err(SimError::UnknownColor(name.to_string())),
        };
        Ok(color)
    }

    /// Same color with alpha scaled by `weight` in [0, 1]
    pub fn faded(self, weight: f32) -> Self {
        let a = (self.a as f32 * weight.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLUE
    }
}

/// FIFO of past positions, capped at [`TRAIL_CAPACITY`]
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<NVec2>,
}

impl Trail {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(TRAIL_CAPACITY + 1),
        }
    }

    /// Append the newest position, evicting the oldest once full
    pub fn push(&mut self, p: NVec2) {
        self.points.push_back(p);
        if self.points.len() > TRAIL_CAPACITY {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &NVec2> + '_ {
        self.points.iter()
    }

    pub fn get(&self, i: usize) -> Option<&NVec2> {
        self.points.get(i)
    }

    pub fn oldest(&self) -> Option<&NVec2> {
        self.points.front()
    }

    pub fn newest(&self) -> Option<&NVec2> {
        self.points.back()
    }

    /// Fade weight of point `i`: its index over the current length
    /// Out-of-range indexes get 0.0, like `get` gives `None`
    pub fn fade(&self, i: usize) -> f32 {
        if i >= self.points.len() {
            return 0.0;
        }
        i as f32 / self.points.len() as f32
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position (m)
    pub v: NVec2, // velocity (m/s)
    pub(crate) a: NVec2, // acceleration from the last step (m/s^2)
    m: f64, // mass (kg)
    radius: f64, // display radius, independent of mass
    pub color: Color,
    pub(crate) trail: Trail,
}

impl Body {
    /// Build a body, rejecting non-positive or non-finite mass and radius
    pub fn new(x: NVec2, v: NVec2, m: f64, radius: f64, color: Color) -> Result<Self, SimError> {
        if !(m.is_finite() && m > 0.0) {
            return Err(SimError::InvalidMass(m));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidRadius(radius));
        }
        Ok(Self {
            x,
            v,
            a: NVec2::zeros(),
            m,
            radius,
            color,
            trail: Trail::new(),
        })
    }

    /// Body at rest at `x`
    pub fn at_rest(x: NVec2, m: f64, radius: f64, color: Color) -> Result<Self, SimError> {
        Self::new(x, NVec2::zeros(), m, radius, color)
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn acceleration(&self) -> NVec2 {
        self.a
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub(crate) bodies: Vec<Body>, // bodies, in insertion order
    pub t: f64, // elapsed simulation time (s)
    pub steps: u64, // completed steps
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bodies(bodies: Vec<Body>) -> Self {
        Self {
            bodies,
            t: 0.0,
            steps: 0,
        }
    }

    /// Append a body; only callable between steps
    pub fn push(&mut self, body: Body) {
        self.bodies.push(body);
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn get(&self, i: usize) -> Option<&Body> {
        self.bodies.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    /// Index of the most massive body, first one wins on ties
    pub fn primary(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, b) in self.bodies.iter().enumerate() {
            match best {
                Some(j) if self.bodies[j].m >= b.m => {}
                _ => best = Some(i),
            }
        }
        best
    }
}

impl<'a> IntoIterator for &'a System {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
