// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: billboard polyline tessellation
//!
//! Turns an ordered path of 3D points into a camera-facing ribbon: a rounded
//! cap at each end and one resolved joint per interior point. Gradient progress
//! at point `i` of an `n` point path is `i / n`.

use super::cap::corner_cap;
use super::emit::Emitter;
use super::joint::{JoinKind, JointResolver};
use super::math::{cross, normalize_or_zero};
use crate::sink::{MeshSink, PrimitiveKind, Viewpoint};
use crate::style::{LineStyle, StyleError};
use crate::types::Vec3;

/// Minimum path length for joint mode.
pub const MIN_JOINT_POINTS: usize = 3;

/// Reasons a path is rejected before the sink is touched.
#[derive(Debug, thiserror::Error)]
pub enum TessError {
    #[error("path needs {required} points, got {got}")]
    TooFewPoints { required: usize, got: usize },
    #[error("path point {index} is not finite")]
    NonFinitePoint { index: usize },
    #[error("invalid line style: {0}")]
    InvalidStyle(#[from] StyleError),
}

/// Summary of one tessellation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TessReport {
    /// Total triangles emitted
    pub triangles: usize,
    /// Triangles spent on end caps
    pub cap_triangles: usize,
    /// Resolved joints in path order, the extrapolated closing joint last
    pub joints: Vec<JoinKind>,
}

impl TessReport {
    /// Number of joints that resolved to `kind`.
    pub fn count(&self, kind: JoinKind) -> usize {
        self.joints.iter().filter(|&&k| k == kind).count()
    }
}

/// Billboard line tessellator bound to one [`LineStyle`].
#[derive(Debug, Clone, Default)]
pub struct Tessellator {
    style: LineStyle,
}

impl Tessellator {
    /// Create a tessellator, validating the style.
    pub fn new(style: LineStyle) -> Result<Self, TessError> {
        style.validate()?;
        Ok(Self { style })
    }

    /// Current style.
    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    /// Replace the style between passes.
    pub fn set_style(&mut self, style: LineStyle) -> Result<(), StyleError> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    /// Tessellate a path of at least three points into `sink`.
    ///
    /// On error nothing is written to the sink; otherwise it is cleared,
    /// begun once, filled and ended once.
    pub fn tessellate<S, V>(
        &self,
        points: &[Vec3],
        viewer: &V,
        sink: &mut S,
    ) -> Result<TessReport, TessError>
    where
        S: MeshSink + ?Sized,
        V: Viewpoint + ?Sized,
    {
        let n = points.len();
        if n < MIN_JOINT_POINTS {
            log::warn!("billboard path rejected: {n} points, joint mode needs {MIN_JOINT_POINTS}");
            return Err(TessError::TooFewPoints {
                required: MIN_JOINT_POINTS,
                got: n,
            });
        }
        check_finite(points)?;

        let style = &self.style;
        let progress = |i: usize| i as f32 / n as f32;
        let mut report = TessReport::default();

        sink.clear();
        sink.begin(PrimitiveKind::Triangles);
        let mut emit = Emitter::new(sink);

        // The first joint offsets points[0] with the view taken at points[1].
        report.cap_triangles += corner_cap(
            &mut emit,
            points[0],
            points[1],
            viewer.position() - points[1],
            style.thickness_at(0.0),
            style.color_at(0.0),
            style.corner_smoothness,
        );

        let mut resolver = JointResolver::new(style);
        for (i, w) in points.windows(3).enumerate() {
            let i = i + 1;
            let kind = resolver.resolve(
                &mut emit,
                [w[0], w[1], w[2]],
                viewer.position(),
                progress(i - 1),
                progress(i),
            );
            report.joints.push(kind);
        }

        // Mirror the final segment past the end so it closes like any other.
        let (before, last) = (points[n - 2], points[n - 1]);
        let kind = resolver.resolve(
            &mut emit,
            [before, last, last + (last - before)],
            viewer.position(),
            progress(n - 2),
            progress(n - 1),
        );
        report.joints.push(kind);

        report.cap_triangles += corner_cap(
            &mut emit,
            last,
            before,
            viewer.position() - last,
            style.thickness_at(progress(n - 1)),
            style.color_at(progress(n - 1)),
            style.corner_smoothness,
        );

        report.triangles = emit.triangles();
        sink.end();
        log::debug!(
            "tessellated {n} points into {} triangles ({} bevel, {} collapsed)",
            report.triangles,
            report.count(JoinKind::Bevel),
            report.joints.len() - report.count(JoinKind::Bevel)
        );
        Ok(report)
    }

    /// Tessellate a single straight segment: one quad and two caps.
    ///
    /// The start thickness and color apply at `a`, the end ones at `b`.
    pub fn tessellate_segment<S, V>(
        &self,
        a: Vec3,
        b: Vec3,
        viewer: &V,
        sink: &mut S,
    ) -> Result<TessReport, TessError>
    where
        S: MeshSink + ?Sized,
        V: Viewpoint + ?Sized,
    {
        check_finite(&[a, b])?;
        let style = &self.style;
        let mut report = TessReport::default();

        sink.clear();
        sink.begin(PrimitiveKind::Triangles);
        let mut emit = Emitter::new(sink);

        let (c_a, c_b) = (style.start_color, style.end_color);
        report.cap_triangles += corner_cap(
            &mut emit,
            a,
            b,
            viewer.position() - a,
            style.start_thickness,
            c_a,
            style.corner_smoothness,
        );

        let ab = b - a;
        let off_a = normalize_or_zero(cross(viewer.position() - a, ab)) * style.start_thickness;
        let off_b = normalize_or_zero(cross(viewer.position() - b, ab)) * style.end_thickness;
        emit.triangle([(b + off_b, c_b), (a - off_a, c_a), (a + off_a, c_a)]);
        emit.triangle([(b + off_b, c_b), (b - off_b, c_b), (a - off_a, c_a)]);

        report.cap_triangles += corner_cap(
            &mut emit,
            b,
            a,
            viewer.position() - b,
            style.end_thickness,
            c_b,
            style.corner_smoothness,
        );

        report.triangles = emit.triangles();
        sink.end();
        log::debug!("tessellated segment into {} triangles", report.triangles);
        Ok(report)
    }

    /// Pick the mode from the point count: two points draw a segment, three
    /// or more use joints.
    pub fn tessellate_auto<S, V>(
        &self,
        points: &[Vec3],
        viewer: &V,
        sink: &mut S,
    ) -> Result<TessReport, TessError>
    where
        S: MeshSink + ?Sized,
        V: Viewpoint + ?Sized,
    {
        match points {
            [a, b] => self.tessellate_segment(*a, *b, viewer, sink),
            _ => self.tessellate(points, viewer, sink),
        }
    }
}

/// Tessellate `points` with `style` into `sink` in joint mode.
pub fn tessellate<S, V>(
    points: &[Vec3],
    viewer: &V,
    style: &LineStyle,
    sink: &mut S,
) -> Result<TessReport, TessError>
where
    S: MeshSink + ?Sized,
    V: Viewpoint + ?Sized,
{
    Tessellator::new(*style)?.tessellate(points, viewer, sink)
}

fn check_finite(points: &[Vec3]) -> Result<(), TessError> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => {
            log::warn!("billboard path rejected: point {index} is not finite");
            Err(TessError::NonFinitePoint { index })
        }
        None => Ok(()),
    }
}
