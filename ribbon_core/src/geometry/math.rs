// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: vector math and segment intersection helpers

use crate::types::{Color, Vec2, Vec3};

/// Determinant magnitude below which two offset edges count as parallel.
pub const DEFAULT_INTERSECTION_EPSILON: f32 = 0.1;

/// Trait for values that can be linearly interpolated.
pub trait Lerp: Sized + Copy {
    /// Interpolate between `self` and `other` with factor `t`.
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, other: Self, t: f32) -> Self {
        self + t * (other - self)
    }
}

impl Lerp for Vec3 {
    fn lerp(self, other: Self, t: f32) -> Self {
        Vec3 {
            x: self.x.lerp(other.x, t),
            y: self.y.lerp(other.y, t),
            z: self.z.lerp(other.z, t),
        }
    }
}

impl Lerp for Color {
    fn lerp(self, other: Self, t: f32) -> Self {
        Color {
            r: self.r.lerp(other.r, t),
            g: self.g.lerp(other.g, t),
            b: self.b.lerp(other.b, t),
            a: self.a.lerp(other.a, t),
        }
    }
}

/// Dot product.
pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

/// Right-handed cross product `a × b`.
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    Vec3 {
        x: a.y * b.z - a.z * b.y,
        y: a.z * b.x - a.x * b.z,
        z: a.x * b.y - a.y * b.x,
    }
}

/// Euclidean length.
pub fn length(v: Vec3) -> f32 {
    dot(v, v).sqrt()
}

/// Unit vector along `v`, or the zero vector when `v` has no usable length.
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let len = length(v);
    if len > f32::MIN_POSITIVE && len.is_finite() {
        v / len
    } else {
        Vec3::ZERO
    }
}

/// Rotate `v` around the unit vector `axis` by `angle` radians (Rodrigues).
pub fn rotate_about(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    v * cos + cross(axis, v) * sin + axis * (dot(axis, v) * (1.0 - cos))
}

/// Point on segment `a → b` closest to `p`.
pub fn closest_on_segment(p: Vec3, a: Vec3, b: Vec3) -> Vec3 {
    let ab = b - a;
    let len2 = dot(ab, ab);
    if len2 > f32::MIN_POSITIVE && len2.is_finite() {
        a + ab * (dot(p - a, ab) / len2).clamp(0.0, 1.0)
    } else {
        a
    }
}

/// Pull `p` back inside the band of `radius` around segment `a → b`.
pub fn clamp_to_band(p: Vec3, a: Vec3, b: Vec3, radius: f32) -> Vec3 {
    let anchor = closest_on_segment(p, a, b);
    let d = p - anchor;
    if length(d) > radius {
        anchor + normalize_or_zero(d) * radius
    } else {
        p
    }
}

/// Coordinate plane used for in-plane overlap tests.
///
/// The axis along which the viewer looks the most is dropped, which keeps the
/// two remaining axes as close to screen space as a fixed plane can get.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionPlane {
    /// Drops Z
    Xy,
    /// Drops X
    Yz,
    /// Drops Y
    Zx,
}

impl ProjectionPlane {
    /// Pick the plane most orthogonal to `view`. A zero view falls back to XY.
    pub fn facing(view: Vec3) -> Self {
        let (ax, ay, az) = (view.x.abs(), view.y.abs(), view.z.abs());
        if az >= ax && az >= ay {
            ProjectionPlane::Xy
        } else if ax >= ay {
            ProjectionPlane::Yz
        } else {
            ProjectionPlane::Zx
        }
    }

    /// Project a point onto this plane.
    pub fn project(self, p: Vec3) -> Vec2 {
        match self {
            ProjectionPlane::Xy => Vec2::new(p.x, p.y),
            ProjectionPlane::Yz => Vec2::new(p.y, p.z),
            ProjectionPlane::Zx => Vec2::new(p.z, p.x),
        }
    }
}

/// Parametric location of a segment crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Parameter along the first segment, in `0..=1`
    pub t: f32,
    /// Parameter along the second segment, in `0..=1`
    pub u: f32,
}

/// Outcome of a segment intersection test.
///
/// `score` is the magnitude of the determinant of the two direction vectors
/// and is reported whether or not the segments actually cross.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// Crossing parameters, when the segments overlap
    pub hit: Option<SegmentHit>,
    /// Determinant magnitude
    pub score: f32,
}

impl Crossing {
    /// Score counted in a tie-break: zero unless the segments cross.
    pub fn strength(&self) -> f32 {
        if self.hit.is_some() {
            self.score
        } else {
            0.0
        }
    }
}

/// Intersect segment `p0 → p1` with segment `p2 → p3`.
///
/// Near-parallel pairs (determinant magnitude at or below `epsilon`) never
/// report a hit.
pub fn segment_intersection(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, epsilon: f32) -> Crossing {
    let ab = p1 - p0;
    let cd = p3 - p2;
    let div = cd.y * ab.x - cd.x * ab.y;
    let score = if div.is_finite() { div.abs() } else { 0.0 };
    let mut hit = None;
    if score > epsilon {
        let ac = p0 - p2;
        let t = (cd.x * ac.y - cd.y * ac.x) / div;
        let u = (ab.x * ac.y - ab.y * ac.x) / div;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            hit = Some(SegmentHit { t, u });
        }
    }
    Crossing { hit, score }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        length(a - b) < 1e-5
    }

    #[test]
    fn lerp_scalar_and_color() {
        assert_eq!(2.0f32.lerp(4.0, 0.25), 2.5);
        let c = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert_eq!(c, Color::rgba(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn cross_is_right_handed() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(cross(x, y), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn normalize_zero_stays_zero() {
        assert_eq!(normalize_or_zero(Vec3::ZERO), Vec3::ZERO);
        let n = normalize_or_zero(Vec3::new(3.0, 0.0, 4.0));
        assert!((length(n) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rotate_quarter_turn() {
        let z = Vec3::new(0.0, 0.0, 1.0);
        let r = rotate_about(Vec3::new(1.0, 0.0, 0.0), z, FRAC_PI_2);
        assert!(approx(r, Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn plane_drops_dominant_axis() {
        assert_eq!(ProjectionPlane::facing(Vec3::new(-2.0, 0.0, 5.0)), ProjectionPlane::Xy);
        assert_eq!(ProjectionPlane::facing(Vec3::new(4.0, 1.0, 0.0)), ProjectionPlane::Yz);
        assert_eq!(ProjectionPlane::facing(Vec3::new(0.0, -3.0, 1.0)), ProjectionPlane::Zx);
        assert_eq!(ProjectionPlane::facing(Vec3::ZERO), ProjectionPlane::Xy);
    }

    #[test]
    fn crossing_segments_hit() {
        let c = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            1e-6,
        );
        let hit = c.hit.unwrap();
        assert!((hit.t - 0.5).abs() < 1e-6);
        assert!((hit.u - 0.5).abs() < 1e-6);
        assert!((c.score - 4.0).abs() < 1e-6);
        assert_eq!(c.strength(), c.score);
    }

    #[test]
    fn parallel_segments_miss_with_zero_score() {
        let c = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            1e-6,
        );
        assert!(c.hit.is_none());
        assert_eq!(c.score, 0.0);
    }

    #[test]
    fn disjoint_segments_report_score_without_hit() {
        let c = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(3.0, -1.0),
            Vec2::new(3.0, 1.0),
            1e-6,
        );
        assert!(c.hit.is_none());
        assert!(c.score > 0.0);
        assert_eq!(c.strength(), 0.0);
    }

    #[test]
    fn shallow_crossing_below_epsilon_is_ignored() {
        let c = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, -0.01),
            Vec2::new(1.0, 0.01),
            DEFAULT_INTERSECTION_EPSILON,
        );
        assert!(c.hit.is_none());
    }

    #[test]
    fn band_clamp_keeps_inside_points() {
        let (a, b) = (Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        let inside = Vec3::new(1.0, 0.05, 0.0);
        assert_eq!(clamp_to_band(inside, a, b, 0.1), inside);
        let above = clamp_to_band(Vec3::new(1.0, 0.0, 3.0), a, b, 0.1);
        assert!(approx(above, Vec3::new(1.0, 0.0, 0.1)));
        let past_end = clamp_to_band(Vec3::new(5.0, 0.0, 0.0), a, b, 0.5);
        assert!(approx(past_end, Vec3::new(2.5, 0.0, 0.0)));
        assert_eq!(closest_on_segment(Vec3::new(1.0, 1.0, 1.0), a, a), a);
    }
}
