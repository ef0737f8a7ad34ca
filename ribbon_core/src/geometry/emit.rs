// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: triangle emission into a mesh sink

use crate::sink::MeshSink;
use crate::types::{Color, Vec3};

/// Forwards colored triangles to a [`MeshSink`] and counts them.
pub struct Emitter<'a, S: MeshSink + ?Sized> {
    sink: &'a mut S,
    vertices: usize,
}

impl<'a, S: MeshSink + ?Sized> Emitter<'a, S> {
    /// Wrap an already begun sink.
    pub fn new(sink: &'a mut S) -> Self {
        Self { sink, vertices: 0 }
    }

    /// Emit one triangle; each corner carries its own color.
    pub fn triangle(&mut self, corners: [(Vec3, Color); 3]) {
        for (position, color) in corners {
            self.sink.set_color(color);
            self.sink.add_vertex(position);
        }
        self.vertices += 3;
    }

    /// Triangles emitted so far.
    pub fn triangles(&self) -> usize {
        self.vertices / 3
    }
}
