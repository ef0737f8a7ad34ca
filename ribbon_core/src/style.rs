// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: line style configuration
//!
//! Gradient endpoints and smoothing resolutions supplied by the caller between
//! tessellation passes. Gradients are sampled by point index, not arc length.

use serde::{Deserialize, Serialize};

use crate::geometry::{Lerp, DEFAULT_INTERSECTION_EPSILON};
use crate::types::Color;

/// Half-width used at both ends when nothing else is configured.
pub const DEFAULT_THICKNESS: f32 = 0.1;
/// Triangles per rounded end cap.
pub const DEFAULT_CORNER_SMOOTHNESS: u32 = 3;
/// Triangles in the fan that fills the outside of a collapsed joint.
pub const DEFAULT_JOINT_SMOOTHNESS: u32 = 3;

/// Errors raised while loading or validating a [`LineStyle`].
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("style JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read style: {0}")]
    Io(#[from] std::io::Error),
    #[error("{which} thickness must be finite and non-negative, got {value}")]
    InvalidThickness { which: &'static str, value: f32 },
    #[error("{which} smoothness must be at least 1")]
    ZeroSmoothness { which: &'static str },
    #[error("intersection epsilon must be finite and non-negative, got {0}")]
    InvalidEpsilon(f32),
}

/// Appearance of a billboard line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    /// Color at the first path point
    pub start_color: Color,
    /// Color the gradient heads toward at the last point
    pub end_color: Color,
    /// Half-width at the first path point
    pub start_thickness: f32,
    /// Half-width the gradient heads toward at the last point
    pub end_thickness: f32,
    /// Fan segments per end cap
    pub corner_smoothness: u32,
    /// Fan segments on the outside of a collapsed joint
    pub joint_smoothness: u32,
    /// Determinant magnitude below which offset edges count as parallel
    pub intersection_epsilon: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            start_color: Color::WHITE,
            end_color: Color::WHITE,
            start_thickness: DEFAULT_THICKNESS,
            end_thickness: DEFAULT_THICKNESS,
            corner_smoothness: DEFAULT_CORNER_SMOOTHNESS,
            joint_smoothness: DEFAULT_JOINT_SMOOTHNESS,
            intersection_epsilon: DEFAULT_INTERSECTION_EPSILON,
        }
    }
}

impl LineStyle {
    /// Set both gradient colors.
    pub fn set_colors(&mut self, start: Color, end: Color) {
        self.start_color = start;
        self.end_color = end;
    }

    /// Set both gradient thicknesses.
    pub fn set_thickness(&mut self, start: f32, end: f32) {
        self.start_thickness = start;
        self.end_thickness = end;
    }

    /// Builder form of [`LineStyle::set_colors`].
    pub fn with_colors(mut self, start: Color, end: Color) -> Self {
        self.set_colors(start, end);
        self
    }

    /// Builder form of [`LineStyle::set_thickness`].
    pub fn with_thickness(mut self, start: f32, end: f32) -> Self {
        self.set_thickness(start, end);
        self
    }

    /// Builder setter for both fan resolutions.
    pub fn with_smoothness(mut self, corner: u32, joint: u32) -> Self {
        self.corner_smoothness = corner;
        self.joint_smoothness = joint;
        self
    }

    /// Half-width at gradient progress `t`.
    pub fn thickness_at(&self, t: f32) -> f32 {
        self.start_thickness.lerp(self.end_thickness, t)
    }

    /// Color at gradient progress `t`.
    pub fn color_at(&self, t: f32) -> Color {
        self.start_color.lerp(self.end_color, t)
    }

    /// Check that every field is usable by the tessellator.
    pub fn validate(&self) -> Result<(), StyleError> {
        for (which, value) in [("start", self.start_thickness), ("end", self.end_thickness)] {
            if !value.is_finite() || value < 0.0 {
                return Err(StyleError::InvalidThickness { which, value });
            }
        }
        if self.corner_smoothness == 0 {
            return Err(StyleError::ZeroSmoothness { which: "corner" });
        }
        if self.joint_smoothness == 0 {
            return Err(StyleError::ZeroSmoothness { which: "joint" });
        }
        if !self.intersection_epsilon.is_finite() || self.intersection_epsilon < 0.0 {
            return Err(StyleError::InvalidEpsilon(self.intersection_epsilon));
        }
        Ok(())
    }
}
