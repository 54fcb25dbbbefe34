// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod asserts;
mod env;
mod renderer;

pub(crate) use asserts::{assert_close, assert_merge_complete};
pub(crate) use env::{chars, single_run, TestFont};
pub(crate) use renderer::RecordingRenderer;
