// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: mesh sink and viewer seams

use crate::types::{Color, Vec3};

/// Primitive topology requested when a mesh is begun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveKind {
    /// Independent triangles, three vertices each
    #[default]
    Triangles,
}

/// Immediate-mode consumer of the emitted triangle soup.
///
/// Calls arrive as `clear`, `begin`, then any number of `set_color` /
/// `add_vertex` pairs, then `end`. The color is sticky: it applies to every
/// vertex added after it until changed.
pub trait MeshSink {
    /// Drop whatever the previous pass left behind.
    fn clear(&mut self);
    /// Start a new primitive batch.
    fn begin(&mut self, kind: PrimitiveKind);
    /// Set the color for subsequently added vertices.
    fn set_color(&mut self, color: Color);
    /// Append a vertex using the current color.
    fn add_vertex(&mut self, position: Vec3);
    /// Finalize the batch.
    fn end(&mut self);
}

impl<S: MeshSink + ?Sized> MeshSink for &mut S {
    fn clear(&mut self) {
        (**self).clear()
    }
    fn begin(&mut self, kind: PrimitiveKind) {
        (**self).begin(kind)
    }
    fn set_color(&mut self, color: Color) {
        (**self).set_color(color)
    }
    fn add_vertex(&mut self, position: Vec3) {
        (**self).add_vertex(position)
    }
    fn end(&mut self) {
        (**self).end()
    }
}

/// Source of the viewer position used to orient the ribbon.
pub trait Viewpoint {
    /// Current world-space position of the viewer.
    fn position(&self) -> Vec3;
}

impl Viewpoint for Vec3 {
    fn position(&self) -> Vec3 {
        *self
    }
}

impl<V: Viewpoint + ?Sized> Viewpoint for &V {
    fn position(&self) -> Vec3 {
        (**self).position()
    }
}

/// Vertex with the color that was current when it was added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColoredVertex {
    /// World-space position
    pub position: Vec3,
    /// Vertex color
    pub color: Color,
}

/// In-memory [`MeshSink`] that records everything it is given.
#[derive(Debug, Clone, Default)]
pub struct TriangleBuffer {
    /// Recorded vertices, three per triangle
    pub vertices: Vec<ColoredVertex>,
    /// Number of `begin` calls seen since creation
    pub begin_count: usize,
    /// Number of `end` calls seen since creation
    pub end_count: usize,
    /// Topology of the last begun batch
    pub kind: Option<PrimitiveKind>,
    color: Color,
    open: bool,
}

impl TriangleBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of complete triangles recorded.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Iterate over recorded triangles.
    pub fn triangles(&self) -> impl Iterator<Item = [ColoredVertex; 3]> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Whether a batch is currently open.
    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl MeshSink for TriangleBuffer {
    fn clear(&mut self) {
        self.vertices.clear();
        self.kind = None;
        self.color = Color::default();
        self.open = false;
    }

    fn begin(&mut self, kind: PrimitiveKind) {
        self.begin_count += 1;
        self.kind = Some(kind);
        self.open = true;
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn add_vertex(&mut self, position: Vec3) {
        self.vertices.push(ColoredVertex {
            position,
            color: self.color,
        });
    }

    fn end(&mut self) {
        self.end_count += 1;
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_is_sticky() {
        let mut buf = TriangleBuffer::new();
        buf.begin(PrimitiveKind::Triangles);
        buf.set_color(Color::BLACK);
        buf.add_vertex(Vec3::new(0.0, 0.0, 0.0));
        buf.add_vertex(Vec3::new(1.0, 0.0, 0.0));
        buf.set_color(Color::WHITE);
        buf.add_vertex(Vec3::new(0.0, 1.0, 0.0));
        buf.end();
        let tris: Vec<_> = buf.triangles().collect();
        assert_eq!(tris.len(), 1);
        assert_eq!(tris[0][1].color, Color::BLACK);
        assert_eq!(tris[0][2].color, Color::WHITE);
        assert!(!buf.is_open());
    }

    #[test]
    fn clear_keeps_bracket_counts() {
        let mut buf = TriangleBuffer::new();
        buf.begin(PrimitiveKind::Triangles);
        buf.add_vertex(Vec3::ZERO);
        buf.end();
        buf.clear();
        assert!(buf.vertices.is_empty());
        assert_eq!(buf.begin_count, 1);
        assert_eq!(buf.end_count, 1);
    }

    #[test]
    fn clear_mid_batch_resets_state() {
        let mut buf = TriangleBuffer::new();
        buf.begin(PrimitiveKind::Triangles);
        buf.set_color(Color::BLACK);
        buf.add_vertex(Vec3::ZERO);
        buf.clear();
        assert!(!buf.is_open());
        assert_eq!(buf.kind, None);
        buf.add_vertex(Vec3::ZERO);
        assert_eq!(buf.vertices[0].color, Color::default());
    }

    #[test]
    fn static_viewpoint() {
        let cam = Vec3::new(0.0, 0.0, 5.0);
        assert_eq!((&cam).position(), cam);
    }
}
