// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: rounded end caps

use std::f32::consts::PI;

use smallvec::SmallVec;

use super::emit::Emitter;
use super::math::{cross, normalize_or_zero, rotate_about};
use crate::sink::MeshSink;
use crate::types::{Color, Vec3};

/// Close the ribbon at `center` with a half-disk fan of `segments` triangles.
///
/// `pivot` is the neighbouring path point; the fan starts on one side of the
/// ribbon, sweeps away from the pivot and ends on the other side. `view` points
/// toward the viewer and must be the vector the adjoining ribbon edge was
/// offset with, so the rim ends meet that edge. Returns the number of
/// triangles emitted.
pub fn corner_cap<S: MeshSink + ?Sized>(
    emit: &mut Emitter<'_, S>,
    center: Vec3,
    pivot: Vec3,
    view: Vec3,
    thickness: f32,
    color: Color,
    segments: u32,
) -> usize {
    let axis = normalize_or_zero(-view);
    let radius = normalize_or_zero(cross(center - pivot, axis));
    let step = PI / segments.max(1) as f32;

    let rim: SmallVec<[Vec3; 17]> = (0..=segments.max(1))
        .map(|k| center + rotate_about(radius, axis, step * k as f32) * thickness)
        .collect();

    for pair in rim.windows(2) {
        emit.triangle([(pair[0], color), (pair[1], color), (center, color)]);
    }
    rim.len() - 1
}
