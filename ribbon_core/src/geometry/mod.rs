// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: geometry primitives and ribbon tessellation

mod cap;
mod emit;
mod joint;
pub mod math;
mod tess;

pub use cap::corner_cap;
pub use emit::Emitter;
pub use joint::{Boundary, JoinKind, JointResolver};
pub use math::{segment_intersection, Crossing, Lerp, SegmentHit, DEFAULT_INTERSECTION_EPSILON};
pub use tess::{tessellate, TessError, TessReport, Tessellator, MIN_JOINT_POINTS};
