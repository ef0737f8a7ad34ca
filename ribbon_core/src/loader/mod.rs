// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: style loaders

pub mod json;
