// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
#![no_main]
use libfuzzer_sys::fuzz_target;
use ribbon_core::types::Vec3;
use ribbon_core::{Tessellator, TriangleBuffer};

fuzz_target!(|data: &[u8]| {
    let floats: Vec<f32> = data
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    let points: Vec<Vec3> = floats
        .chunks_exact(3)
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect();
    let mut buf = TriangleBuffer::new();
    let camera = Vec3::new(0.0, 0.0, 10.0);
    if Tessellator::default()
        .tessellate_auto(&points, &camera, &mut buf)
        .is_ok()
    {
        assert_eq!(buf.begin_count, 1);
        assert_eq!(buf.end_count, 1);
        assert_eq!(buf.vertices.len() % 3, 0);
    } else {
        assert_eq!(buf.begin_count, 0);
    }
});
