//! Pointer position to dial angle conversion

use serde::{Deserialize, Serialize};

/// A position in the dial control's local coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Wrap any angle into [0, 360)
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Angle of `point` around `center`, in degrees within [0, 360).
///
/// Zero points straight up from the center. A pointer sitting exactly on the
/// center has no direction; the result is then some value in range and
/// callers must tolerate it jumping around.
pub fn angle_of(point: Point, center: Point) -> f64 {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let degrees = dy.atan2(dx).to_degrees() + 90.0;
    normalize_degrees(degrees)
}

/// Signed movement from `prev` to `next`, in degrees within (-180, 180].
///
/// The shortest path across the 0/360 seam is taken, and the sign is inverted
/// relative to the raw angle difference so that forward-time rotation comes
/// out positive. With y pointing down, as in screen space, that is
/// counter-clockwise on screen; with y pointing up it is clockwise.
pub fn delta(prev: f64, next: f64) -> f64 {
    let raw = normalize_degrees(next) - normalize_degrees(prev);
    let shortest = (raw + 180.0).rem_euclid(360.0) - 180.0;
    let inverted = -shortest;
    // -0.0 reads badly in logs
    if inverted == 0.0 { 0.0 } else { inverted }
}
