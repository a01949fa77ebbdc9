//! Archimedean spiral walk over integer points.
//!
//! The walk starts at the origin and advances by a fixed angle per step while the
//! radius grows linearly with the angle (`r = a * theta`, `a = spacing / 2π`), so
//! consecutive arms are `spacing` pixels apart. Points are rounded onto the integer
//! grid; a step that rounds onto the point just yielded is skipped.

use crate::model::Point;
use std::f64::consts::TAU;

/// Default angle advanced per step (5 degrees).
pub const DEFAULT_ANGLE_STEP: f64 = std::f64::consts::PI / 36.0;
/// Default distance between two consecutive arms of the spiral.
pub const DEFAULT_SPACING: f64 = 32.0;

// The direction is advanced by rotation; recompute it exactly this often.
const RESYNC_EVERY: u64 = 256;

/// Infinite, deterministic iterator of candidate points around an origin.
///
/// A spiral carries its own progress; start a new one for every search instead of
/// resuming a partially consumed walk.
#[derive(Debug, Clone)]
pub struct Spiral {
    origin: Point,
    angle_step: f64,
    growth: f64,
    step: u64,
    // (cos, sin) of the current angle and of `angle_step`
    dir: (f64, f64),
    rot: (f64, f64),
    last: Option<(i64, i64)>,
}

impl Spiral {
    /// Spiral around `origin` with the default step and spacing.
    pub fn new(origin: Point) -> Self {
        Self::with_params(origin, DEFAULT_ANGLE_STEP, DEFAULT_SPACING)
    }

    /// Spiral around `origin` advancing `angle_step` radians per point, with arms
    /// `spacing` pixels apart.
    pub fn with_params(origin: Point, angle_step: f64, spacing: f64) -> Self {
        Self {
            origin,
            angle_step,
            growth: spacing / TAU,
            step: 0,
            dir: (1.0, 0.0),
            rot: (angle_step.cos(), angle_step.sin()),
            last: None,
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Current angle of the walk in radians.
    pub fn angle(&self) -> f64 {
        self.step as f64 * self.angle_step
    }

    /// Current radius of the walk.
    pub fn radius(&self) -> f64 {
        self.growth * self.angle()
    }

    /// Advances the walk and returns the next point. Never runs out.
    ///
    /// Coordinates saturate at the `i32` range when the walk leaves the plane.
    pub fn next_point(&mut self) -> Point {
        let (x, y) = self.next_wide();
        let clamp = |v: i64| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        Point::new(clamp(x), clamp(y))
    }

    /// Like [`next_point`](Self::next_point), without saturation.
    pub(crate) fn next_wide(&mut self) -> (i64, i64) {
        loop {
            let r = self.radius();
            let p = (
                self.origin.x as i64 + (r * self.dir.0).round() as i64,
                self.origin.y as i64 + (r * self.dir.1).round() as i64,
            );
            self.advance();
            if self.last != Some(p) {
                self.last = Some(p);
                return p;
            }
        }
    }

    fn advance(&mut self) {
        self.step += 1;
        if self.step % RESYNC_EVERY == 0 {
            let theta = self.angle();
            self.dir = (theta.cos(), theta.sin());
        } else {
            let (c, s) = self.dir;
            let (rc, rs) = self.rot;
            self.dir = (c * rc - s * rs, s * rc + c * rs);
        }
    }
}

impl Iterator for Spiral {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        Some(self.next_point())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
