// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: joint resolution between consecutive path segments
//!
//! Each interior point gets two offset quads, one per side of the ribbon. When
//! the inner edges of a quad cross, that side is pinched to the crossing point
//! and the opposite side is filled with a fan around the joint. Otherwise the
//! joint is a plain bevel.

use super::emit::Emitter;
use super::math::{
    clamp_to_band, cross, normalize_or_zero, segment_intersection, Crossing, Lerp,
    ProjectionPlane,
};
use crate::sink::MeshSink;
use crate::style::LineStyle;
use crate::types::{Color, Vec3};

/// Trailing edge carried from one joint into the next.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Boundary {
    /// Last upper boundary point, if it is still shared
    pub upper: Option<Vec3>,
    /// Last lower boundary point, if it is still shared
    pub lower: Option<Vec3>,
}

/// How a joint was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Incoming rectangle plus a bridging quad, no crossing
    Bevel,
    /// Upper side pinched to its crossing point, lower side fanned
    CollapseUpper,
    /// Lower side pinched to its crossing point, upper side fanned
    CollapseLower,
}

impl JoinKind {
    /// Triangles emitted for this kind with the given fan resolution.
    pub fn triangle_count(self, joint_smoothness: u32) -> usize {
        match self {
            JoinKind::Bevel => 4,
            JoinKind::CollapseUpper | JoinKind::CollapseLower => 2 + joint_smoothness as usize,
        }
    }
}

/// Offset corners along one side of the ribbon around a joint.
#[derive(Debug, Clone, Copy)]
struct OffsetQuad {
    prev: Vec3,
    incoming: Vec3,
    outgoing: Vec3,
    next: Vec3,
}

impl OffsetQuad {
    fn crossing(&self, plane: ProjectionPlane, epsilon: f32) -> Crossing {
        segment_intersection(
            plane.project(self.prev),
            plane.project(self.incoming),
            plane.project(self.outgoing),
            plane.project(self.next),
            epsilon,
        )
    }

    fn pinch(&self, crossing: &Crossing) -> Option<Vec3> {
        crossing.hit.map(|h| self.prev.lerp(self.incoming, h.t))
    }
}

/// Resolves joints one after another, stitching them through a [`Boundary`].
#[derive(Debug, Clone)]
pub struct JointResolver<'s> {
    style: &'s LineStyle,
    last: Boundary,
}

impl<'s> JointResolver<'s> {
    /// Start a pass with an empty boundary.
    pub fn new(style: &'s LineStyle) -> Self {
        Self {
            style,
            last: Boundary::default(),
        }
    }

    /// Boundary that the next joint will start from.
    pub fn boundary(&self) -> Boundary {
        self.last
    }

    /// Emit the triangles bridging `prev → curr` and `curr → next`.
    ///
    /// `t_in` is the gradient progress of `prev` and `t_out` that of `curr`;
    /// the incoming offset uses the thickness at `t_in` and the outgoing one the
    /// thickness at `t_out`.
    pub fn resolve<S: MeshSink + ?Sized>(
        &mut self,
        emit: &mut Emitter<'_, S>,
        [prev, curr, next]: [Vec3; 3],
        viewer: Vec3,
        t_in: f32,
        t_out: f32,
    ) -> JoinKind {
        let style = self.style;
        let (w_in, w_out) = (style.thickness_at(t_in), style.thickness_at(t_out));
        let (c_in, c_out) = (style.color_at(t_in), style.color_at(t_out));

        let view = viewer - curr;
        let off_in = normalize_or_zero(cross(view, curr - prev)) * w_in;
        let off_out = normalize_or_zero(cross(view, next - curr)) * w_out;

        let upper = OffsetQuad {
            prev: self.last.upper.unwrap_or(prev + off_in),
            incoming: curr + off_in,
            outgoing: curr + off_out,
            next: next + off_out,
        };
        let lower = OffsetQuad {
            prev: self.last.lower.unwrap_or(prev - off_in),
            incoming: curr - off_in,
            outgoing: curr - off_out,
            next: next - off_out,
        };

        let plane = ProjectionPlane::facing(view);
        let up = upper.crossing(plane, style.intersection_epsilon);
        let lo = lower.crossing(plane, style.intersection_epsilon);

        let kind = if up.hit.is_some() && up.strength() > lo.strength() {
            JoinKind::CollapseUpper
        } else if lo.hit.is_some() && lo.strength() > up.strength() {
            JoinKind::CollapseLower
        } else {
            JoinKind::Bevel
        };
        log::trace!(
            "joint at {:?}: {:?} (upper score {}, lower score {})",
            curr,
            kind,
            up.score,
            lo.score
        );

        // The crossing is found in 2-D; in 3-D the edges may not meet, so the
        // pinch is held within the incoming segment's band.
        let band = w_in.max(w_out);
        let settle = |x: Vec3| clamp_to_band(x, prev, curr, band);
        match (kind, upper.pinch(&up).map(settle), lower.pinch(&lo).map(settle)) {
            (JoinKind::CollapseUpper, Some(x), _) => {
                emit.triangle([(x, c_out), (lower.prev, c_in), (upper.prev, c_in)]);
                emit.triangle([(lower.incoming, c_out), (lower.prev, c_in), (x, c_out)]);
                self.last = Boundary {
                    upper: Some(x),
                    lower: None,
                };
                self.fill(emit, x, curr, (lower.outgoing, w_out), (lower.incoming, w_in), c_out);
            }
            (JoinKind::CollapseLower, _, Some(x)) => {
                emit.triangle([(upper.incoming, c_out), (lower.prev, c_in), (upper.prev, c_in)]);
                emit.triangle([(upper.incoming, c_out), (x, c_out), (lower.prev, c_in)]);
                self.last = Boundary {
                    upper: None,
                    lower: Some(x),
                };
                self.fill(emit, x, curr, (upper.incoming, w_in), (upper.outgoing, w_out), c_out);
            }
            _ => {
                let (u_in, u_out) = ((upper.incoming, c_out), (upper.outgoing, c_out));
                let (l_in, l_out) = ((lower.incoming, c_out), (lower.outgoing, c_out));
                emit.triangle([u_in, (lower.prev, c_in), (upper.prev, c_in)]);
                emit.triangle([u_in, l_in, (lower.prev, c_in)]);
                emit.triangle([u_in, u_out, l_in]);
                emit.triangle([u_out, l_out, l_in]);
                self.last = Boundary::default();
            }
        }
        kind
    }

    /// Fan from `pivot` over the arc around `center` running from `from` to `to`.
    fn fill<S: MeshSink + ?Sized>(
        &self,
        emit: &mut Emitter<'_, S>,
        pivot: Vec3,
        center: Vec3,
        (from, w_from): (Vec3, f32),
        (to, w_to): (Vec3, f32),
        color: Color,
    ) {
        let count = self.style.joint_smoothness.max(1);
        let rim = |k: u32| {
            let s = k as f32 / count as f32;
            center + normalize_or_zero(from.lerp(to, s) - center) * w_from.lerp(w_to, s)
        };
        for k in 0..count {
            emit.triangle([(pivot, color), (rim(k), color), (rim(k + 1), color)]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::math::length;
    use crate::sink::TriangleBuffer;

    const CAMERA: Vec3 = Vec3::new(0.0, 0.0, 5.0);

    fn resolve(
        style: &LineStyle,
        buf: &mut TriangleBuffer,
        triple: [Vec3; 3],
    ) -> (JoinKind, Boundary, usize) {
        let mut emit = Emitter::new(buf);
        let mut resolver = JointResolver::new(style);
        let kind = resolver.resolve(&mut emit, triple, CAMERA, 0.0, 0.0);
        (kind, resolver.boundary(), emit.triangles())
    }

    #[test]
    fn straight_joint_is_bevel() {
        let style = LineStyle::default();
        let mut buf = TriangleBuffer::new();
        let (kind, last, tris) = resolve(
            &style,
            &mut buf,
            [Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)],
        );
        assert_eq!(kind, JoinKind::Bevel);
        assert_eq!(tris, 4);
        assert_eq!(last, Boundary::default());
    }

    #[test]
    fn left_turn_pinches_upper_side() {
        let style = LineStyle::default().with_smoothness(3, 5);
        let mut buf = TriangleBuffer::new();
        let curr = Vec3::new(1.0, 0.0, 0.0);
        let next = Vec3::new(0.0, 1.0, 0.0);
        let (kind, last, tris) = resolve(&style, &mut buf, [Vec3::ZERO, curr, next]);
        assert_eq!(kind, JoinKind::CollapseUpper);
        assert_eq!(tris, 2 + 5);
        let x = last.upper.unwrap();
        assert!(last.lower.is_none());
        assert!((x.y - 0.1).abs() < 1e-5);
        assert!(x.x < 1.0 && x.x > 0.0);
        // fan triangles pivot on the pinch point and sit on the outer arc
        for tri in buf.triangles().skip(2) {
            assert_eq!(tri[0].position, x);
            assert!((length(tri[1].position - curr) - 0.1).abs() < 1e-5);
        }
    }

    #[test]
    fn right_turn_pinches_lower_side() {
        let style = LineStyle::default();
        let mut buf = TriangleBuffer::new();
        let (kind, last, tris) = resolve(
            &style,
            &mut buf,
            [Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, -1.0, 0.0)],
        );
        assert_eq!(kind, JoinKind::CollapseLower);
        assert_eq!(tris, JoinKind::CollapseLower.triangle_count(style.joint_smoothness));
        assert!(last.upper.is_none());
        assert!((last.lower.unwrap().y + 0.1).abs() < 1e-5);
    }

    #[test]
    fn carried_boundary_is_reused() {
        let style = LineStyle::default();
        let mut buf = TriangleBuffer::new();
        let mut emit = Emitter::new(&mut buf);
        let mut resolver = JointResolver::new(&style);
        let a = Vec3::ZERO;
        let b = Vec3::new(1.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 1.0, 0.0);
        let d = Vec3::new(0.0, 2.0, 0.0);
        resolver.resolve(&mut emit, [a, b, c], CAMERA, 0.0, 0.0);
        let pinch = resolver.boundary().upper.unwrap();
        let before = emit.triangles();
        resolver.resolve(&mut emit, [b, c, d], CAMERA, 0.0, 0.0);
        assert!(emit.triangles() > before);
        let first_of_second = buf.triangles().nth(before).unwrap();
        assert_eq!(first_of_second[2].position, pinch);
    }

    #[test]
    fn degenerate_triple_stays_finite() {
        let style = LineStyle::default();
        let mut buf = TriangleBuffer::new();
        let p = Vec3::new(1.0, 1.0, 0.0);
        let (kind, _, _) = resolve(&style, &mut buf, [p, p, p]);
        assert_eq!(kind, JoinKind::Bevel);
        assert!(buf.vertices.iter().all(|v| v.position.is_finite()));
    }

    // Left turn at the origin: the upper side crosses with score 1.
    const LEFT_TURN: [Vec3; 3] = [
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::ZERO,
        Vec3::new(0.0, 1.0, 0.0),
    ];

    fn resolve_carried(style: &LineStyle, carried_lower: Vec3) -> (JoinKind, Boundary) {
        let mut buf = TriangleBuffer::new();
        let mut emit = Emitter::new(&mut buf);
        let mut resolver = JointResolver::new(style);
        resolver.last = Boundary {
            upper: None,
            lower: Some(carried_lower),
        };
        let lower = OffsetQuad {
            prev: carried_lower,
            incoming: Vec3::new(0.0, -0.1, 0.0),
            outgoing: Vec3::new(0.1, 0.0, 0.0),
            next: Vec3::new(0.1, 1.0, 0.0),
        };
        let crossing = lower.crossing(ProjectionPlane::Xy, style.intersection_epsilon);
        assert!(crossing.hit.is_some(), "carried lower edge must cross");
        let kind = resolver.resolve(&mut emit, LEFT_TURN, CAMERA, 0.0, 0.0);
        (kind, resolver.boundary())
    }

    #[test]
    fn stronger_crossing_wins_when_both_sides_cross() {
        let style = LineStyle::default();
        // lower score 0.2 against upper score 1
        let (kind, last) = resolve_carried(&style, Vec3::new(0.2, 0.3, 0.0));
        assert_eq!(kind, JoinKind::CollapseUpper);
        assert!(last.upper.is_some() && last.lower.is_none());
        // lower score 2 against upper score 1
        let (kind, last) = resolve_carried(&style, Vec3::new(2.0, 4.1, 0.0));
        assert_eq!(kind, JoinKind::CollapseLower);
        assert!(last.lower.is_some() && last.upper.is_none());
    }

    #[test]
    fn equal_crossings_fall_back_to_bevel() {
        let style = LineStyle::default();
        let (kind, last) = resolve_carried(&style, Vec3::new(1.0, 2.1, 0.0));
        assert_eq!(kind, JoinKind::Bevel);
        assert_eq!(last, Boundary::default());
    }

    #[test]
    fn carried_pinch_stays_in_band() {
        let style = LineStyle::default();
        // a lower edge carried from far away crosses well past the ribbon
        let (kind, last) = resolve_carried(&style, Vec3::new(2.0, 4.1, 0.0));
        assert_eq!(kind, JoinKind::CollapseLower);
        let x = last.lower.unwrap();
        let anchor = crate::geometry::math::closest_on_segment(x, LEFT_TURN[0], LEFT_TURN[1]);
        assert!(length(x - anchor) <= 0.1 + 1e-5);
    }
}
