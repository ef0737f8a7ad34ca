// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: JSON line style loader

use crate::style::{LineStyle, StyleError};
use std::io::Read;

/// Load a style from a reader containing JSON.
pub fn from_reader<R: Read>(mut reader: R) -> Result<LineStyle, StyleError> {
    let mut s = String::new();
    reader.read_to_string(&mut s)?;
    from_str(&s)
}

/// Load a style from raw JSON bytes.
pub fn from_slice(data: &[u8]) -> Result<LineStyle, StyleError> {
    let style: LineStyle = serde_json::from_slice(data)?;
    finish(style)
}

/// Load a style from a JSON string. Missing keys take their defaults.
pub fn from_str(s: &str) -> Result<LineStyle, StyleError> {
    let style: LineStyle = serde_json::from_str(s)?;
    finish(style)
}

/// Serialize a style back to JSON.
pub fn to_string(style: &LineStyle) -> Result<String, StyleError> {
    Ok(serde_json::to_string_pretty(style)?)
}

fn finish(style: LineStyle) -> Result<LineStyle, StyleError> {
    style.validate()?;
    log::debug!(
        "loaded line style: thickness {}..{}, corner {}, joint {}",
        style.start_thickness,
        style.end_thickness,
        style.corner_smoothness,
        style.joint_smoothness
    );
    Ok(style)
}
