// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: billboard polyline core library
//!
//! Tessellates a path of 3D points into a camera-facing ribbon with rounded
//! caps, pinched or beveled joints and index-based color/thickness gradients.

pub mod geometry;
pub mod loader;
pub mod sink;
pub mod style;
pub mod types;

pub use geometry::{tessellate, JoinKind, TessError, TessReport, Tessellator};
pub use sink::{MeshSink, PrimitiveKind, TriangleBuffer, Viewpoint};
pub use style::LineStyle;
