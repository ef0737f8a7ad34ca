// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Tessellates a small zig-zag as a moving viewer orbits it and prints a
//! per-frame summary. An optional argument names a JSON line style.

use std::fs::File;

use ribbon_core::loader::json;
use ribbon_core::types::Vec3;
use ribbon_core::{JoinKind, LineStyle, Tessellator, TriangleBuffer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let style = match std::env::args().nth(1) {
        Some(path) => json::from_reader(File::open(path)?)?,
        None => LineStyle::default().with_thickness(0.05, 0.2),
    };
    let tess = Tessellator::new(style)?;
    let path = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(3.0, 1.0, 0.0),
        Vec3::new(1.5, 1.2, 0.0),
        Vec3::new(3.5, 1.5, 0.5),
    ];
    let mut mesh = TriangleBuffer::new();
    for frame in 0..8 {
        let angle = frame as f32 * std::f32::consts::FRAC_PI_4;
        let camera = Vec3::new(1.5 + 6.0 * angle.cos(), 0.75, 6.0 * angle.sin().abs() + 1.0);
        let report = tess.tessellate(&path, &camera, &mut mesh)?;
        println!(
            "frame {frame}: {} triangles, {} bevel, {} pinched upper, {} pinched lower",
            report.triangles,
            report.count(JoinKind::Bevel),
            report.count(JoinKind::CollapseUpper),
            report.count(JoinKind::CollapseLower),
        );
    }
    Ok(())
}
